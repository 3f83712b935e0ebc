//! HTTP API for the hermod webhook service.
//!
//! Exposes webhook registration, unregistration, listing, and on-demand
//! ping dispatch, plus the business endpoints (user registration, message
//! sending) whose side effects feed the notification trigger. The boundary
//! layer owns request/response shapes and the mapping from domain errors
//! to HTTP statuses; all webhook semantics live in `hermod-core` and
//! `hermod-delivery`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::ApiError;
pub use server::{create_router, start_server};
pub use state::AppState;
