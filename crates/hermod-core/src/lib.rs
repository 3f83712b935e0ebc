//! Core domain types for the hermod webhook service.
//!
//! Provides the recognized event catalogue, the in-memory event registry
//! that maps event names to subscriber URLs, and the domain error taxonomy
//! shared by the delivery and API crates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod registry;

pub use error::{RegistryError, Result};
pub use registry::EventRegistry;
