//! HTTP client for webhook delivery with a fixed per-call timeout.
//!
//! Wraps a pooled `reqwest` client so fan-out to many endpoints reuses
//! connections. Every call is bounded by the configured timeout; the
//! original service had no bound at all, which left dispatch hanging on a
//! stalled endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::error::{DeliveryError, Result};

/// Configuration for the webhook delivery client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Timeout for a single HTTP request.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Maximum number of redirects to follow.
    pub max_redirects: u32,
    /// Whether to verify TLS certificates.
    pub verify_tls: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECONDS),
            user_agent: "Hermod-Webhook-Delivery/1.0".to_string(),
            max_redirects: 3,
            verify_tls: true,
        }
    }
}

/// HTTP client optimized for webhook delivery.
///
/// Cheap to clone; all clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    client: reqwest::Client,
    config: ClientConfig,
}

/// Response from a single webhook delivery attempt.
///
/// Produced for any HTTP response the endpoint returns, success or not.
/// Transport failures (timeout, connection refused) surface as
/// [`DeliveryError`] instead.
#[derive(Debug, Clone)]
pub struct DeliveryResponse {
    /// HTTP status code returned by the endpoint.
    pub status_code: u16,
    /// Whether the status was 2xx.
    pub is_success: bool,
    /// Total duration of the request.
    pub duration: Duration,
}

impl DeliveryClient {
    /// Creates a new delivery client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::Configuration` if the HTTP client cannot be
    /// built with the provided settings.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects as usize))
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| {
                DeliveryError::configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Creates a new delivery client with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Delivers `payload` as a JSON document to `url`.
    ///
    /// Returns the endpoint's response for any HTTP status it answers
    /// with; classifying non-2xx statuses as failed deliveries is the
    /// engine's job.
    ///
    /// # Errors
    ///
    /// - `Timeout` when the configured per-call timeout elapses
    /// - `Network` for connection failures and other transport errors
    pub async fn deliver(
        &self,
        event: &str,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<DeliveryResponse> {
        let delivery_id = Uuid::new_v4();
        let start_time = std::time::Instant::now();

        let span = info_span!(
            "webhook_delivery",
            event,
            url,
            delivery_id = %delivery_id,
        );

        async move {
            tracing::debug!("starting webhook delivery");

            let response = self
                .client
                .post(url)
                .json(payload)
                .header("X-Hermod-Event", event)
                .header("X-Hermod-Delivery-Id", delivery_id.to_string())
                .send()
                .await;

            let response = match response {
                Ok(response) => response,
                Err(e) => {
                    let duration = start_time.elapsed();
                    tracing::warn!(duration_ms = duration.as_millis(), "request failed: {}", e);

                    if e.is_timeout() {
                        return Err(DeliveryError::timeout(self.config.timeout.as_secs()));
                    }
                    if e.is_connect() {
                        return Err(DeliveryError::network(format!("connection failed: {e}")));
                    }
                    return Err(DeliveryError::network(e.to_string()));
                },
            };

            let duration = start_time.elapsed();
            let status_code = response.status().as_u16();
            let is_success = response.status().is_success();

            if is_success {
                tracing::info!(status = status_code, "webhook delivered");
            } else {
                tracing::warn!(status = status_code, "endpoint returned error status");
            }

            Ok(DeliveryResponse { status_code, is_success, duration })
        }
        .instrument(span)
        .await
    }
}
