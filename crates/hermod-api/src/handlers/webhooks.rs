//! Webhook registration, listing, and ping dispatch handlers.
//!
//! Mirrors the registry contract onto HTTP: domain errors become
//! not-found/conflict responses, and the ping endpoint turns a dispatch
//! summary into a client-facing report.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use hermod_delivery::DeliveryOutcome;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{error::ApiError, state::AppState};

/// Registration and unregistration request body.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRequest {
    /// Event name to subscribe to or unsubscribe from.
    pub event: String,
    /// Subscriber URL.
    pub url: String,
}

/// Successful registration response.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Echoed event name.
    pub event: String,
    /// Echoed subscriber URL.
    pub url: String,
}

/// One event with its registered URLs.
#[derive(Debug, Clone, Serialize)]
pub struct Webhook {
    /// Event name.
    pub event: String,
    /// Subscriber URLs in registration order.
    pub urls: Vec<String>,
}

/// Listing response grouped by event.
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredWebhooksResponse {
    /// Registered webhooks grouped by event.
    pub webhooks: Vec<Webhook>,
}

/// Ping dispatch report.
#[derive(Debug, Clone, Serialize)]
pub struct PingResponse {
    /// Human-readable summary line.
    pub message: String,
    /// Total URLs attempted.
    pub attempted: usize,
    /// Deliveries answered with 2xx.
    pub succeeded: usize,
    /// Deliveries that failed for any reason.
    pub failed: usize,
    /// Per-URL outcomes in selection order.
    pub outcomes: Vec<DeliveryOutcome>,
}

/// Optional event-name filter shared by listing and ping.
#[derive(Debug, Clone, Deserialize)]
pub struct EventFilterParams {
    /// Restrict the operation to a single event name.
    pub event_filter: Option<String>,
}

/// `POST /webhook` — register a URL for an event.
pub async fn register_webhook(
    State(state): State<AppState>,
    Json(request): Json<WebhookRequest>,
) -> Result<Json<WebhookResponse>, ApiError> {
    state.registry.register(&request.event, &request.url).await?;

    Ok(Json(WebhookResponse {
        message: "Webhook registered successfully".to_string(),
        event: request.event,
        url: request.url,
    }))
}

/// `DELETE /webhook` — unregister a URL from an event.
pub async fn unregister_webhook(
    State(state): State<AppState>,
    Json(request): Json<WebhookRequest>,
) -> Result<StatusCode, ApiError> {
    state.registry.unregister(&request.event, &request.url).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /webhooks` — list registered webhooks grouped by event.
///
/// Without a filter, every recognized event appears, empty sets included,
/// so integrators can discover registrable events. With a filter, an empty
/// event is a 404 (`NoUrlsRegistered`).
pub async fn list_webhooks(
    State(state): State<AppState>,
    Query(params): Query<EventFilterParams>,
) -> Result<Json<RegisteredWebhooksResponse>, ApiError> {
    let data = state.registry.read(params.event_filter.as_deref()).await?;

    let webhooks = data
        .into_iter()
        .map(|(event, urls)| Webhook { event, urls })
        .collect();

    Ok(Json(RegisteredWebhooksResponse { webhooks }))
}

/// `POST /ping` — dispatch a test payload to registered webhooks.
///
/// The body is an optional arbitrary JSON payload; when absent, a default
/// test payload is sent. Delivery failures show up in the report, never as
/// an error status.
pub async fn ping_webhooks(
    State(state): State<AppState>,
    Query(params): Query<EventFilterParams>,
    body: Bytes,
) -> Result<Json<PingResponse>, ApiError> {
    let payload = parse_ping_payload(&body)?;
    let selection = state.registry.read(params.event_filter.as_deref()).await?;

    let summary = state.dispatcher.send(&selection, &payload).await;

    let message = match &params.event_filter {
        Some(event) => format!("Pinged webhooks for event '{event}' successfully."),
        None => "Pinged all registered webhooks successfully.".to_string(),
    };

    Ok(Json(PingResponse {
        message,
        attempted: summary.attempted,
        succeeded: summary.succeeded,
        failed: summary.failed,
        outcomes: summary.outcomes,
    }))
}

/// Parses the optional ping body, falling back to the default payload.
fn parse_ping_payload(body: &Bytes) -> Result<Value, ApiError> {
    if body.is_empty() {
        return Ok(json!({ "message": "Ping from the hermod notification service" }));
    }

    serde_json::from_slice(body)
        .map_err(|e| ApiError::validation(format!("invalid JSON payload: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ping_body_uses_default_payload() {
        let payload = parse_ping_payload(&Bytes::new()).unwrap();
        assert_eq!(payload["message"], "Ping from the hermod notification service");
    }

    #[test]
    fn explicit_ping_body_passed_through() {
        let payload = parse_ping_payload(&Bytes::from_static(b"{\"test_key\":\"v\"}")).unwrap();
        assert_eq!(payload, json!({"test_key": "v"}));
    }

    #[test]
    fn malformed_ping_body_rejected() {
        let result = parse_ping_payload(&Bytes::from_static(b"{not json"));
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
