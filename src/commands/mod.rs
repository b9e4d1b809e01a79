//! CLI command definitions and dispatch.

pub mod migrate;
pub mod serve;
pub mod sweep;

use clap::{Parser, Subcommand};

use eventengine_core::config::AppConfig;

/// EventEngine: event sessions and Lacework user provisioning
#[derive(Debug, Parser)]
#[command(name = "eventengine", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay to merge over `config/default.toml`
    #[arg(long, global = true, env = "EVENTENGINE_ENV", default_value = "development")]
    pub env: String,

    /// Subcommand to execute; defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server and the expiry sweep schedule
    Serve,
    /// Run one expiry sweep and exit
    Sweep,
    /// Apply PostgreSQL migrations and exit
    Migrate,
}

impl Cli {
    /// Execute the selected command.
    pub async fn execute(&self, config: AppConfig) -> anyhow::Result<()> {
        match self.command.as_ref().unwrap_or(&Commands::Serve) {
            Commands::Serve => serve::execute(config).await,
            Commands::Sweep => sweep::execute(config).await,
            Commands::Migrate => migrate::execute(config).await,
        }
    }
}
