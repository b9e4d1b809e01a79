//! Session CRUD and explicit deletion.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use eventengine_core::config::{LaceworkConfig, TenantConfig};
use eventengine_core::error::AppError;
use eventengine_core::result::AppResult;
use eventengine_entity::{Session, SessionStore};
use eventengine_lacework::LaceworkApi;

use super::cascade::{CascadeReport, UserCascade};

/// Session lifecycle operations.
#[derive(Debug, Clone)]
pub struct SessionService {
    pub(crate) store: Arc<dyn SessionStore>,
    pub(crate) lacework: Arc<dyn LaceworkApi>,
    pub(crate) tenant: Arc<TenantConfig>,
    pub(crate) default_user_group: String,
    cascade: UserCascade,
}

impl SessionService {
    /// Creates a new session service.
    pub fn new(
        store: Arc<dyn SessionStore>,
        lacework: Arc<dyn LaceworkApi>,
        tenant: TenantConfig,
        lacework_config: &LaceworkConfig,
    ) -> Self {
        let tenant = Arc::new(tenant);
        let cascade = UserCascade::new(lacework.clone(), tenant.clone());
        Self {
            store,
            lacework,
            tenant,
            default_user_group: lacework_config.default_user_group.clone(),
            cascade,
        }
    }

    /// The remote-user cleanup used by deletes.
    pub fn cascade(&self) -> &UserCascade {
        &self.cascade
    }

    /// The store this service writes to.
    pub fn store(&self) -> Arc<dyn SessionStore> {
        self.store.clone()
    }

    /// URL of the shared default tenant.
    pub fn default_instance_url(&self) -> &str {
        &self.tenant.url
    }

    /// Fetch one session.
    pub async fn get_session(&self, name: &str) -> AppResult<Session> {
        self.store
            .get_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Session '{name}' not found")))
    }

    /// Fetch every session.
    pub async fn list_sessions(&self) -> AppResult<Vec<Session>> {
        self.store.get_all().await
    }

    /// Create a session.
    ///
    /// Timestamps are stamped here and `regCount` starts at zero whatever
    /// the caller sent.
    pub async fn add_session(&self, mut session: Session) -> AppResult<Session> {
        if self.store.get_by_name(&session.name).await?.is_some() {
            return Err(AppError::already_exists(format!(
                "Session '{}' already exists",
                session.name
            )));
        }

        let now = Utc::now();
        session.created_at = now;
        session.updated_at = now;
        session.reg_count = 0;

        let created = self.store.insert(&session).await?;
        info!(
            session = %created.name,
            instance_type = %created.instance_type,
            expires_at = %created.expires_at,
            created_by = %created.created_by,
            "Session created"
        );
        Ok(created)
    }

    /// Overwrite a session's mutable fields.
    ///
    /// `name`, `createdAt`, `createdBy` and `regCount` are carried over
    /// from the stored record.
    pub async fn update_session(&self, name: &str, incoming: Session) -> AppResult<Session> {
        let stored = self.get_session(name).await?;

        let session = Session {
            name: stored.name,
            created_at: stored.created_at,
            created_by: stored.created_by,
            reg_count: stored.reg_count,
            updated_at: Utc::now(),
            ..incoming
        };

        let updated = self.store.replace(&session).await?;
        info!(
            session = %updated.name,
            updated_by = %updated.updated_by,
            expires_at = %updated.expires_at,
            "Session updated"
        );
        Ok(updated)
    }

    /// Delete a session after removing its remote users.
    ///
    /// If the cascade cannot reach the tenant the record is kept and the
    /// error returned, unless `force` is set. A record that disappears
    /// between lookup and delete counts as deleted.
    pub async fn delete_session(&self, name: &str, force: bool) -> AppResult<Option<CascadeReport>> {
        let session = self.get_session(name).await?;

        let report = match self.cascade.purge(&session).await {
            Ok(report) => Some(report),
            Err(e) if force => {
                warn!(
                    session = %name,
                    error = %e,
                    "Remote user cleanup failed, deleting session anyway"
                );
                None
            }
            Err(e) => {
                warn!(session = %name, error = %e, "Remote user cleanup failed, session kept");
                return Err(e);
            }
        };

        if self.store.delete_by_name(name).await? {
            info!(
                session = %name,
                users_deleted = report.map(|r| r.deleted).unwrap_or(0),
                "Session deleted"
            );
        } else {
            info!(session = %name, "Session already gone");
        }
        Ok(report)
    }

    /// Delete several sessions in order. The first failure stops the batch.
    pub async fn delete_sessions(&self, names: &[String]) -> AppResult<usize> {
        for name in names {
            self.delete_session(name, false).await?;
        }
        Ok(names.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Race, custom_session, default_session, harness, racing_harness};
    use chrono::Duration;
    use eventengine_core::error::ErrorKind;

    #[tokio::test]
    async fn test_add_session_rejects_duplicate_name() {
        let h = harness();
        h.service.add_session(default_session("evt1")).await.unwrap();

        let err = h
            .service
            .add_session(default_session("evt1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::AlreadyExists);
    }

    #[tokio::test]
    async fn test_add_session_resets_counter_and_timestamps() {
        let h = harness();
        let mut session = default_session("evt1");
        session.reg_count = 42;
        session.created_at = Utc::now() - Duration::days(30);

        let before = Utc::now();
        let created = h.service.add_session(session).await.unwrap();
        assert_eq!(created.reg_count, 0);
        assert!(created.created_at >= before);
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_session_is_not_found() {
        let h = harness();
        let err = h
            .service
            .update_session("nope", default_session("nope"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_keeps_identity_fields() {
        let h = harness();
        let created = h.service.add_session(default_session("evt1")).await.unwrap();
        h.store.increment_reg_count("evt1").await.unwrap();

        let mut incoming = custom_session("renamed");
        incoming.created_by = "someone-else@example.com".to_string();
        incoming.updated_by = "editor@example.com".to_string();
        incoming.reg_count = 0;

        let updated = h.service.update_session("evt1", incoming).await.unwrap();
        assert_eq!(updated.name, "evt1");
        assert_eq!(updated.created_by, "ops@example.com");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.reg_count, 1);
        assert_eq!(updated.updated_by, "editor@example.com");
        assert_eq!(updated.lw_url, "partner.lacework.net");
        assert!(h.service.get_session("renamed").await.is_err());
    }

    #[tokio::test]
    async fn test_update_keeps_registration_made_during_update() {
        let h = racing_harness(Race::CountBeforeReplace);
        h.service.add_session(default_session("evt1")).await.unwrap();

        let mut incoming = default_session("evt1");
        incoming.expires_at = incoming.expires_at + Duration::hours(2);
        let updated = h.service.update_session("evt1", incoming).await.unwrap();
        assert_eq!(updated.reg_count, 1);

        let stored = h.store.get_by_name("evt1").await.unwrap().unwrap();
        assert_eq!(stored.reg_count, 1);
        assert_eq!(stored.expires_at, updated.expires_at);
    }

    #[tokio::test]
    async fn test_delete_missing_session_is_not_found() {
        let h = harness();
        let err = h.service.delete_session("nope", false).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_remote_users() {
        let h = harness();
        h.service.add_session(default_session("evt1")).await.unwrap();
        h.lacework.add_user("U1", "acme-evt1");
        h.lacework.add_user("U2", "other-evt2");

        let report = h.service.delete_session("evt1", false).await.unwrap();
        assert_eq!(report.map(|r| r.deleted), Some(1));
        assert!(h.store.get_by_name("evt1").await.unwrap().is_none());
        assert_eq!(h.lacework.users().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_keeps_record_when_token_fails() {
        let h = harness();
        h.service.add_session(default_session("evt1")).await.unwrap();
        h.lacework.set_token_failure(true);

        let err = h.service.delete_session("evt1", false).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::AuthFailed);
        assert!(h.store.get_by_name("evt1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_forced_delete_ignores_cascade_failure() {
        let h = harness();
        h.service.add_session(default_session("evt1")).await.unwrap();
        h.lacework.set_token_failure(true);

        let report = h.service.delete_session("evt1", true).await.unwrap();
        assert!(report.is_none());
        assert!(h.store.get_by_name("evt1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bulk_delete_stops_at_first_failure() {
        let h = harness();
        h.service.add_session(default_session("evt1")).await.unwrap();
        h.service.add_session(default_session("evt3")).await.unwrap();

        let names = vec!["evt1".to_string(), "missing".to_string(), "evt3".to_string()];
        let err = h.service.delete_sessions(&names).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        assert!(h.store.get_by_name("evt1").await.unwrap().is_none());
        assert!(h.store.get_by_name("evt3").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_default_instance_url() {
        let h = harness();
        assert_eq!(h.service.default_instance_url(), "shared.lacework.net");
    }
}
