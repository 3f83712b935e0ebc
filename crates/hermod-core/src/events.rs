//! Recognized event catalogue.
//!
//! The registry only accepts registrations for events the service itself
//! emits or that integrators are known to publish. The catalogue is fixed
//! at compile time; registering a URL for any other name fails with
//! [`EventNotFound`](crate::RegistryError::EventNotFound).

/// Emitted after a new user completes registration.
pub const USER_REGISTERED: &str = "user_registered";

/// Emitted after a user sends a message to another user.
pub const USER_SEND_MESSAGE: &str = "user_send_message";

/// Emitted when a payment is received from an external processor.
pub const PAYMENT_RECEIVED: &str = "payment_received";

/// Emitted when a received payment finishes processing.
pub const PAYMENT_PROCESSED: &str = "payment_processed";

/// Emitted when invoice generation begins.
pub const INVOICE_PROCESSING: &str = "invoice_processing";

/// Emitted when invoice generation completes.
pub const INVOICE_COMPLETED: &str = "invoice_completed";

/// All event names the registry is seeded with at startup.
pub const RECOGNIZED_EVENTS: [&str; 6] = [
    USER_REGISTERED,
    USER_SEND_MESSAGE,
    PAYMENT_RECEIVED,
    PAYMENT_PROCESSED,
    INVOICE_PROCESSING,
    INVOICE_COMPLETED,
];

/// Returns whether `event` names a recognized event.
pub fn is_recognized(event: &str) -> bool {
    RECOGNIZED_EVENTS.contains(&event)
}
