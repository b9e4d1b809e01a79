//! `eventengine sweep`

use anyhow::Context;

use eventengine_core::config::AppConfig;

use crate::bootstrap::Components;

/// Run a single expiry sweep against the configured store and exit.
pub async fn execute(config: AppConfig) -> anyhow::Result<()> {
    let components = Components::build(&config).await?;

    let report = components
        .reconciler
        .tick()
        .await
        .context("Expiry sweep failed")?;
    if let Some(report) = report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    components.close().await;
    Ok(())
}
