//! `eventengine migrate`

use anyhow::{Context, bail};

use eventengine_core::config::{AppConfig, StoreProvider};
use eventengine_database::DatabasePool;
use eventengine_database::migration::run_migrations;

/// Apply pending migrations to the configured database.
pub async fn execute(config: AppConfig) -> anyhow::Result<()> {
    if config.store.provider != StoreProvider::Postgres {
        bail!(
            "Migrations apply to the postgres store only (configured: {})",
            config.store.provider
        );
    }

    let db = DatabasePool::connect(&config.store.database)
        .await
        .context("Database connection failed")?;
    run_migrations(db.pool()).await.context("Migration failed")?;
    db.close().await;

    tracing::info!("Migrations complete");
    Ok(())
}
