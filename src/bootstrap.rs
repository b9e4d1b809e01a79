//! Builds the shared components from configuration.

use std::sync::Arc;

use anyhow::Context;

use eventengine_core::config::{AppConfig, StoreProvider};
use eventengine_database::migration::run_migrations;
use eventengine_database::{DatabasePool, SessionRepository};
use eventengine_entity::SessionStore;
use eventengine_kv::{MemorySessionStore, RedisClient, RedisSessionStore};
use eventengine_lacework::{LaceworkApi, LaceworkClient};
use eventengine_service::SessionService;
use eventengine_worker::Reconciler;

/// Everything the commands need, wired once.
pub struct Components {
    pub session_service: Arc<SessionService>,
    pub reconciler: Reconciler,
    db: Option<DatabasePool>,
}

impl Components {
    /// Connect the store, construct the Lacework client and the services.
    pub async fn build(config: &AppConfig) -> anyhow::Result<Self> {
        let (store, db) = connect_store(config).await?;

        if config.tenant.url.is_empty() {
            tracing::warn!("No default tenant URL configured; DEFAULT sessions cannot reach Lacework");
        }

        let lacework: Arc<dyn LaceworkApi> = Arc::new(
            LaceworkClient::new(&config.lacework).context("Failed to build Lacework client")?,
        );

        let session_service = Arc::new(SessionService::new(
            Arc::clone(&store),
            lacework,
            config.tenant.clone(),
            &config.lacework,
        ));
        let reconciler = Reconciler::new(store, session_service.cascade().clone());

        Ok(Self {
            session_service,
            reconciler,
            db,
        })
    }

    /// Release backend connections.
    pub async fn close(&self) {
        if let Some(db) = &self.db {
            db.close().await;
        }
    }
}

async fn connect_store(
    config: &AppConfig,
) -> anyhow::Result<(Arc<dyn SessionStore>, Option<DatabasePool>)> {
    tracing::info!(provider = %config.store.provider, "Initializing session store");

    match config.store.provider {
        StoreProvider::Postgres => {
            let db = DatabasePool::connect(&config.store.database)
                .await
                .context("Database connection failed")?;
            run_migrations(db.pool()).await.context("Migration failed")?;
            let store: Arc<dyn SessionStore> =
                Arc::new(SessionRepository::new(db.pool().clone()));
            Ok((store, Some(db)))
        }
        StoreProvider::Redis => {
            let client = RedisClient::connect(&config.store.redis)
                .await
                .context("Redis connection failed")?;
            let store: Arc<dyn SessionStore> = Arc::new(RedisSessionStore::new(client));
            Ok((store, None))
        }
        StoreProvider::Memory => {
            tracing::warn!("Using the in-memory session store; sessions are lost on restart");
            let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
            Ok((store, None))
        }
    }
}
