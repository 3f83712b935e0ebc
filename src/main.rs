//! Hermod webhook notification service.
//!
//! Main entry point. Initializes tracing, loads configuration, wires the
//! registry/dispatch state, and serves the HTTP API until shutdown.

use anyhow::Result;
use hermod_api::{start_server, AppState, Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from defaults, config.toml, and environment
    let config = Config::load()?;

    // Initialize tracing with structured logging; the configured level is
    // the fallback when RUST_LOG is not set in the environment
    init_tracing(&config.rust_log)?;

    info!("Starting hermod webhook notification service");

    let addr = config.parse_server_addr()?;
    info!(
        host = %config.host,
        port = config.port,
        delivery_timeout_seconds = config.delivery_timeout_seconds,
        "Configuration loaded"
    );

    // Wire the registry, dispatch engine, and notification trigger
    let state = AppState::new(config.to_client_config())?;
    info!("Event registry seeded with recognized events");

    start_server(state, addr).await?;

    info!("Hermod shutdown complete");
    Ok(())
}

/// Initializes tracing from `RUST_LOG`, falling back to the configured
/// directive.
fn init_tracing(default_directive: &str) -> Result<()> {
    use anyhow::Context;
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .context("Invalid log filter directive")?;

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
    Ok(())
}
