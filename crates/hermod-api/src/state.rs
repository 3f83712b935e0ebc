//! Shared application state.
//!
//! All stores are owned, injectable instances shared behind `Arc` so
//! handlers receive state explicitly and tests build isolated instances.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use hermod_core::EventRegistry;
use hermod_delivery::{ClientConfig, DeliveryClient, DispatchEngine, NotificationTrigger};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Lowercased unique username.
    pub username: String,
    /// When the user was registered.
    pub registered_at: DateTime<Utc>,
}

/// A message sent between two users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Username of the sender.
    pub sender: String,
    /// Username of the recipient.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// When the message was received by the service.
    pub received_at: DateTime<Utc>,
}

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Webhook registry mapping events to subscriber URLs.
    pub registry: Arc<EventRegistry>,
    /// Fan-out dispatch engine for the ping endpoint.
    pub dispatcher: DispatchEngine,
    /// Fire-and-forget trigger for business events.
    pub trigger: NotificationTrigger,
    /// Registered users, in registration order.
    pub users: Arc<RwLock<Vec<User>>>,
    /// Sent messages, in arrival order.
    pub messages: Arc<RwLock<Vec<Message>>>,
}

impl AppState {
    /// Builds the full state graph from a delivery client configuration.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::Configuration` if the HTTP client cannot
    /// be built.
    pub fn new(client_config: ClientConfig) -> hermod_delivery::Result<Self> {
        let registry = Arc::new(EventRegistry::new());
        let dispatcher = DispatchEngine::new(DeliveryClient::new(client_config)?);
        let trigger = NotificationTrigger::new(registry.clone(), dispatcher.clone());

        Ok(Self {
            registry,
            dispatcher,
            trigger,
            users: Arc::new(RwLock::new(Vec::new())),
            messages: Arc::new(RwLock::new(Vec::new())),
        })
    }

    /// Builds state with default delivery configuration.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::Configuration` if the HTTP client cannot
    /// be built.
    pub fn with_defaults() -> hermod_delivery::Result<Self> {
        Self::new(ClientConfig::default())
    }
}
