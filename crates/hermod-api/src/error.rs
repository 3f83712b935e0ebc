//! API error type and HTTP status mapping.
//!
//! Registry errors surface as not-found or conflict responses; business
//! validation failures surface as bad requests. Response bodies carry a
//! single `detail` field with the human-readable message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hermod_core::RegistryError;
use serde_json::json;
use thiserror::Error;

/// Errors returned by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Domain error from the event registry.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Username is already taken.
    #[error("username '{0}' already exists")]
    UsernameTaken(String),

    /// Request failed business validation.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Creates a validation error from a message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns the HTTP status for this error.
    fn status_code(&self) -> StatusCode {
        match self {
            // Duplicate registration is a conflict, absence is not-found.
            Self::Registry(RegistryError::UrlAlreadyExists { .. }) => StatusCode::CONFLICT,
            Self::Registry(_) => StatusCode::NOT_FOUND,
            Self::UsernameTaken(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}
