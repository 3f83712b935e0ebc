//! In-memory webhook registry.
//!
//! Maps recognized event names to ordered sets of subscriber URLs. The
//! registry is an owned, injectable instance shared behind an `Arc` rather
//! than process-global state, so tests get isolated registries and handlers
//! receive it explicitly.
//!
//! Mutations take the write lock, so concurrent registrations of the same
//! URL cannot both pass the duplicate check. Reads take the read lock and
//! may run concurrently with each other.

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::{
    error::{RegistryError, Result},
    events,
};

/// Registry of subscriber URLs keyed by recognized event name.
///
/// Seeded at construction with every recognized event mapped to an empty
/// set. URL insertion order is preserved, so dispatch iterates subscribers
/// in registration order.
#[derive(Debug)]
pub struct EventRegistry {
    inner: RwLock<BTreeMap<String, Vec<String>>>,
}

impl EventRegistry {
    /// Creates a registry seeded with all recognized events and no
    /// subscribers.
    pub fn new() -> Self {
        let seeded = events::RECOGNIZED_EVENTS
            .iter()
            .map(|event| ((*event).to_string(), Vec::new()))
            .collect();

        Self { inner: RwLock::new(seeded) }
    }

    /// Registers `url` as a subscriber for `event`.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` if `event` is not a recognized event name,
    /// or `UrlAlreadyExists` if `url` is already registered for it.
    pub async fn register(&self, event: &str, url: &str) -> Result<()> {
        let mut registry = self.inner.write().await;

        let urls = registry
            .get_mut(event)
            .ok_or_else(|| RegistryError::event_not_found(event))?;

        if urls.iter().any(|existing| existing == url) {
            return Err(RegistryError::url_already_exists(event, url));
        }

        urls.push(url.to_string());
        tracing::info!(event, url, "webhook registered");
        Ok(())
    }

    /// Removes `url` from `event`'s subscriber set.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` if `event` is not a recognized event name,
    /// or `UrlNotFound` if `url` is not currently registered for it.
    pub async fn unregister(&self, event: &str, url: &str) -> Result<()> {
        let mut registry = self.inner.write().await;

        let urls = registry
            .get_mut(event)
            .ok_or_else(|| RegistryError::event_not_found(event))?;

        let position = urls
            .iter()
            .position(|existing| existing == url)
            .ok_or_else(|| RegistryError::url_not_found(event, url))?;

        urls.remove(position);
        tracing::info!(event, url, "webhook unregistered");
        Ok(())
    }

    /// Reads registered webhooks, optionally filtered to a single event.
    ///
    /// With a filter, returns the single event→URLs pair. Without one,
    /// returns the entire mapping including recognized events whose
    /// subscriber set is empty, so clients can enumerate every event they
    /// may register against.
    ///
    /// # Errors
    ///
    /// With a filter: `EventNotFound` if the event is unrecognized, or
    /// `NoUrlsRegistered` if it is recognized but has no subscribers.
    pub async fn read(&self, event_filter: Option<&str>) -> Result<BTreeMap<String, Vec<String>>> {
        let registry = self.inner.read().await;

        match event_filter {
            Some(event) => {
                let urls = registry
                    .get(event)
                    .ok_or_else(|| RegistryError::event_not_found(event))?;

                if urls.is_empty() {
                    return Err(RegistryError::no_urls_registered(event));
                }

                Ok(BTreeMap::from([(event.to_string(), urls.clone())]))
            },
            None => Ok(registry.clone()),
        }
    }

    /// Returns the subscriber URLs for `event`, or an empty list if the
    /// event is unrecognized or has no subscribers.
    ///
    /// Lookup variant for the notification path, where an unknown or empty
    /// event is a no-op rather than an error.
    pub async fn subscribers(&self, event: &str) -> Vec<String> {
        let registry = self.inner.read().await;
        registry.get(event).cloned().unwrap_or_default()
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}
