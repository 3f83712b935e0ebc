//! Error types for registry operations.
//!
//! Defines the domain error taxonomy raised by [`EventRegistry`]. These are
//! control-flow errors for the registry's callers; the API layer translates
//! them into not-found/conflict responses. Per-URL delivery failures are
//! deliberately *not* part of this taxonomy: they are outcome data produced
//! by the dispatch engine.
//!
//! [`EventRegistry`]: crate::EventRegistry

use thiserror::Error;

/// Result type alias using `RegistryError`.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised by event registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Referenced event name is not in the recognized catalogue.
    #[error("event '{event}' not found")]
    EventNotFound {
        /// The unrecognized event name
        event: String,
    },

    /// URL is already registered for the event.
    #[error("webhook URL '{url}' already exists for event '{event}'")]
    UrlAlreadyExists {
        /// The event the registration targeted
        event: String,
        /// The duplicate URL
        url: String,
    },

    /// URL is not registered for the event.
    #[error("webhook URL '{url}' not found for event '{event}'")]
    UrlNotFound {
        /// The event the unregistration targeted
        event: String,
        /// The absent URL
        url: String,
    },

    /// Event is recognized but has no registered URLs.
    #[error("event '{event}' has no registered URLs")]
    NoUrlsRegistered {
        /// The empty event
        event: String,
    },
}

impl RegistryError {
    /// Creates an event-not-found error.
    pub fn event_not_found(event: impl Into<String>) -> Self {
        Self::EventNotFound { event: event.into() }
    }

    /// Creates a duplicate-URL error.
    pub fn url_already_exists(event: impl Into<String>, url: impl Into<String>) -> Self {
        Self::UrlAlreadyExists { event: event.into(), url: url.into() }
    }

    /// Creates a URL-not-found error.
    pub fn url_not_found(event: impl Into<String>, url: impl Into<String>) -> Self {
        Self::UrlNotFound { event: event.into(), url: url.into() }
    }

    /// Creates a no-URLs-registered error.
    pub fn no_urls_registered(event: impl Into<String>) -> Self {
        Self::NoUrlsRegistered { event: event.into() }
    }

    /// Returns whether this error denotes an absent entity rather than a
    /// conflicting one.
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EventNotFound { .. } | Self::UrlNotFound { .. } | Self::NoUrlsRegistered { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_format() {
        let error = RegistryError::event_not_found("order_shipped");
        assert_eq!(error.to_string(), "event 'order_shipped' not found");

        let error = RegistryError::url_already_exists("user_registered", "http://a/hook");
        assert_eq!(
            error.to_string(),
            "webhook URL 'http://a/hook' already exists for event 'user_registered'"
        );
    }

    #[test]
    fn not_found_classification() {
        assert!(RegistryError::event_not_found("x").is_not_found());
        assert!(RegistryError::url_not_found("x", "http://a").is_not_found());
        assert!(RegistryError::no_urls_registered("x").is_not_found());
        assert!(!RegistryError::url_already_exists("x", "http://a").is_not_found());
    }
}
