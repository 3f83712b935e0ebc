//! Request handlers for the hermod API.

pub mod users;
pub mod webhooks;

use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// Health check endpoint.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
    }))
}
