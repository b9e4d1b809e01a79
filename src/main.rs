//! EventEngine server: event-session provisioning and expiry reconciliation
//! against Lacework tenants.
//!
//! Loads configuration, initializes logging and dispatches to the selected
//! subcommand.

mod bootstrap;
mod commands;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use eventengine_core::config::{AppConfig, LoggingConfig};

use commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.env)
        .with_context(|| format!("Failed to load configuration (env: {})", cli.env))?;

    init_logging(&config.logging);
    tracing::info!(
        env = %cli.env,
        version = env!("CARGO_PKG_VERSION"),
        store = %config.store.provider,
        "EventEngine starting"
    );

    cli.execute(config).await
}

/// Initialize tracing. `RUST_LOG` wins over the configured level.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
