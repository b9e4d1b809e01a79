//! Fixtures shared by the unit tests in this crate.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use eventengine_core::config::{LaceworkConfig, TenantConfig};
use eventengine_core::result::AppResult;
use eventengine_entity::{InstanceType, Session, SessionStore};
use eventengine_kv::MemorySessionStore;
use eventengine_lacework::MockLaceworkApi;

use crate::SessionService;

pub fn tenant() -> TenantConfig {
    TenantConfig {
        url: "shared.lacework.net".to_string(),
        access_key_id: "DEFAULT_KEY".to_string(),
        secret_key: "default-secret".to_string(),
        sub_account: String::new(),
    }
}

pub fn default_session(name: &str) -> Session {
    let now = Utc::now();
    Session {
        name: name.to_string(),
        instance_type: InstanceType::Default,
        lw_url: "ignored.lacework.net".to_string(),
        lw_sub_account: String::new(),
        lw_access_key_id: "STORED_KEY".to_string(),
        lw_secret_key: "stored-secret".to_string(),
        lw_user_group: String::new(),
        created_by: "ops@example.com".to_string(),
        updated_by: "ops@example.com".to_string(),
        created_at: now,
        updated_at: now,
        expires_at: now + Duration::hours(4),
        reg_count: 0,
    }
}

pub fn custom_session(name: &str) -> Session {
    Session {
        instance_type: InstanceType::Custom,
        lw_url: "partner.lacework.net".to_string(),
        lw_access_key_id: "PARTNER_KEY".to_string(),
        lw_secret_key: "partner-secret".to_string(),
        ..default_session(name)
    }
}

pub struct Harness {
    pub store: MemorySessionStore,
    pub lacework: Arc<MockLaceworkApi>,
    pub service: SessionService,
}

pub fn harness() -> Harness {
    let store = MemorySessionStore::new();
    harness_over(store.clone(), Arc::new(store))
}

/// Harness whose service writes through `backend`; `store` observes the
/// same records directly.
pub fn harness_over(store: MemorySessionStore, backend: Arc<dyn SessionStore>) -> Harness {
    let lacework = Arc::new(MockLaceworkApi::new());
    let service = SessionService::new(
        backend,
        lacework.clone(),
        tenant(),
        &LaceworkConfig::default(),
    );
    Harness {
        store,
        lacework,
        service,
    }
}

/// Another writer that gets in first.
#[derive(Debug, Clone, Copy)]
pub enum Race {
    /// A registration lands between the service's read and its `replace`.
    CountBeforeReplace,
    /// The session is deleted just before the counter update.
    DeleteBeforeIncrement,
}

/// Memory store that lets a competing write run ahead of selected calls.
#[derive(Debug)]
pub struct RacingStore {
    pub inner: MemorySessionStore,
    pub race: Race,
}

#[async_trait]
impl SessionStore for RacingStore {
    async fn get_by_name(&self, name: &str) -> AppResult<Option<Session>> {
        self.inner.get_by_name(name).await
    }

    async fn get_all(&self) -> AppResult<Vec<Session>> {
        self.inner.get_all().await
    }

    async fn insert(&self, session: &Session) -> AppResult<Session> {
        self.inner.insert(session).await
    }

    async fn replace(&self, session: &Session) -> AppResult<Session> {
        if let Race::CountBeforeReplace = self.race {
            self.inner.increment_reg_count(&session.name).await?;
        }
        self.inner.replace(session).await
    }

    async fn delete_by_name(&self, name: &str) -> AppResult<bool> {
        self.inner.delete_by_name(name).await
    }

    async fn increment_reg_count(&self, name: &str) -> AppResult<i64> {
        if let Race::DeleteBeforeIncrement = self.race {
            self.inner.delete_by_name(name).await?;
        }
        self.inner.increment_reg_count(name).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}

pub fn racing_harness(race: Race) -> Harness {
    let store = MemorySessionStore::new();
    let backend = RacingStore {
        inner: store.clone(),
        race,
    };
    harness_over(store, Arc::new(backend))
}
