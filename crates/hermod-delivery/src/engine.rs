//! Fan-out dispatch of a payload to a selection of subscriber URLs.
//!
//! Every (event, url) pair in the selection is attempted exactly once.
//! Deliveries run concurrently and independently; one URL failing, timing
//! out, or answering with an error status never affects delivery to any
//! other URL. Outcomes keep the selection's iteration order regardless of
//! which responses arrive first.

use std::collections::BTreeMap;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::client::DeliveryClient;

/// Outcome of one delivery attempt to one URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    /// Event the URL was registered for.
    pub event: String,
    /// Destination URL.
    pub url: String,
    /// Whether the endpoint answered with a 2xx status.
    pub success: bool,
    /// HTTP status code, when the endpoint responded at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Status line or transport error text.
    pub detail: String,
}

/// Aggregated result of one dispatch call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchSummary {
    /// Total number of URLs attempted.
    pub attempted: usize,
    /// Number of deliveries answered with 2xx.
    pub succeeded: usize,
    /// Number of deliveries that failed for any reason.
    pub failed: usize,
    /// Per-URL outcomes in selection order.
    pub outcomes: Vec<DeliveryOutcome>,
}

/// Delivers payloads to sets of subscriber URLs and aggregates outcomes.
#[derive(Debug, Clone)]
pub struct DispatchEngine {
    client: DeliveryClient,
}

impl DispatchEngine {
    /// Creates an engine delivering through the given client.
    pub fn new(client: DeliveryClient) -> Self {
        Self { client }
    }

    /// Delivers `payload` to every (event, url) pair in `selection`.
    ///
    /// An empty selection yields a summary with zero attempts. Per-URL
    /// failures are recorded in the summary, never returned as errors.
    pub async fn send(
        &self,
        selection: &BTreeMap<String, Vec<String>>,
        payload: &serde_json::Value,
    ) -> DispatchSummary {
        let pairs: Vec<(&str, &str)> = selection
            .iter()
            .flat_map(|(event, urls)| urls.iter().map(move |url| (event.as_str(), url.as_str())))
            .collect();

        // join_all preserves input order, so outcomes line up with the
        // selection no matter which responses arrive first.
        let deliveries = pairs.iter().map(|(event, url)| self.deliver_one(event, url, payload));
        let outcomes = join_all(deliveries).await;

        let succeeded = outcomes.iter().filter(|outcome| outcome.success).count();
        let summary = DispatchSummary {
            attempted: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
            outcomes,
        };

        tracing::info!(
            attempted = summary.attempted,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "dispatch complete"
        );

        summary
    }

    async fn deliver_one(
        &self,
        event: &str,
        url: &str,
        payload: &serde_json::Value,
    ) -> DeliveryOutcome {
        match self.client.deliver(event, url, payload).await {
            Ok(response) => DeliveryOutcome {
                event: event.to_string(),
                url: url.to_string(),
                success: response.is_success,
                status: Some(response.status_code),
                detail: format!("HTTP {}", response.status_code),
            },
            Err(e) => DeliveryOutcome {
                event: event.to_string(),
                url: url.to_string(),
                success: false,
                status: None,
                detail: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_selection_yields_zero_summary() {
        let engine = DispatchEngine::new(DeliveryClient::with_defaults().unwrap());

        let summary = engine.send(&BTreeMap::new(), &serde_json::json!({})).await;

        assert_eq!(summary.attempted, 0);
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.failed, 0);
        assert!(summary.outcomes.is_empty());
    }
}
