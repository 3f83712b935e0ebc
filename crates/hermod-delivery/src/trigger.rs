//! Fire-and-forget notification glue for business events.
//!
//! Business operations (user registration, message sending) call
//! [`NotificationTrigger::trigger`] after they commit. The trigger resolves
//! subscribers and dispatches on a spawned task, so the originating request
//! returns without waiting for delivery, and nothing on the notification
//! path can fail the business operation. Delivery summaries are logged and
//! discarded.

use std::{collections::BTreeMap, sync::Arc};

use hermod_core::EventRegistry;

use crate::engine::DispatchEngine;

/// Dispatches event notifications to registered subscribers, best-effort.
#[derive(Debug, Clone)]
pub struct NotificationTrigger {
    registry: Arc<EventRegistry>,
    engine: DispatchEngine,
}

impl NotificationTrigger {
    /// Creates a trigger resolving subscribers from `registry` and
    /// delivering through `engine`.
    pub fn new(registry: Arc<EventRegistry>, engine: DispatchEngine) -> Self {
        Self { registry, engine }
    }

    /// Notifies all subscribers of `event` with `payload`.
    ///
    /// Returns immediately; delivery runs on a spawned task. An
    /// unrecognized event or an event with no subscribers is a no-op.
    /// The returned handle can be awaited where completion matters
    /// (tests); callers on the request path drop it.
    pub fn trigger(&self, event: &str, payload: serde_json::Value) -> tokio::task::JoinHandle<()> {
        let registry = self.registry.clone();
        let engine = self.engine.clone();
        let event = event.to_string();

        tokio::spawn(async move {
            let urls = registry.subscribers(&event).await;
            if urls.is_empty() {
                tracing::debug!(event = %event, "no subscribers, skipping notification");
                return;
            }

            let selection = BTreeMap::from([(event.clone(), urls)]);
            let summary = engine.send(&selection, &payload).await;

            if summary.failed > 0 {
                tracing::warn!(
                    event = %event,
                    failed = summary.failed,
                    succeeded = summary.succeeded,
                    "some notifications failed to deliver"
                );
            }
        })
    }
}
