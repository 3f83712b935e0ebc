//! Webhook fan-out delivery for the hermod service.
//!
//! This crate delivers JSON payloads to registered subscriber URLs. The
//! [`DispatchEngine`] takes a selection of event→URLs pairs and attempts
//! each URL exactly once, independently and concurrently; per-URL failures
//! are recorded as outcome data, never raised to the caller. The
//! [`NotificationTrigger`] is the fire-and-forget glue that business
//! operations invoke after they commit.
//!
//! # Delivery Flow
//!
//! 1. **Select** - Caller resolves subscribers via the event registry
//! 2. **Fan out** - One HTTP POST per (event, url) pair, bounded by a
//!    fixed timeout
//! 3. **Aggregate** - Outcomes fold into a [`DispatchSummary`] with
//!    success/failure counts
//!
//! There are no retries and no delivery queue: each URL is attempted once
//! per dispatch, and a failed delivery only shows up in the summary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod engine;
pub mod error;
pub mod trigger;

pub use client::{ClientConfig, DeliveryClient};
pub use engine::{DeliveryOutcome, DispatchEngine, DispatchSummary};
pub use error::{DeliveryError, Result};
pub use trigger::NotificationTrigger;

/// Default HTTP request timeout for a single delivery, in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
