//! Remote-user cleanup for a session.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use eventengine_core::config::TenantConfig;
use eventengine_core::result::AppResult;
use eventengine_entity::Session;
use eventengine_lacework::LaceworkApi;

/// Outcome of one cascade over a session's remote users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    /// Users whose `company` ends with the session name.
    pub matched: usize,
    /// Matched users deleted.
    pub deleted: usize,
    /// Matched users whose deletion failed and were skipped.
    pub failed: usize,
}

/// Deletes every remote user provisioned under a session.
///
/// Steps: resolve credentials, acquire a token, list users, keep the
/// suffix matches, delete each. Token and list failures are returned and
/// nothing is deleted; a failed user delete is logged and skipped.
#[derive(Debug, Clone)]
pub struct UserCascade {
    lacework: Arc<dyn LaceworkApi>,
    tenant: Arc<TenantConfig>,
}

impl UserCascade {
    /// Create a cascade over the given client and default tenant.
    pub fn new(lacework: Arc<dyn LaceworkApi>, tenant: Arc<TenantConfig>) -> Self {
        Self { lacework, tenant }
    }

    /// Remove the session's remote users.
    pub async fn purge(&self, session: &Session) -> AppResult<CascadeReport> {
        let creds = session.tenant_credentials(&self.tenant);
        let token = self.lacework.create_access_token(&creds).await?;
        let users = self.lacework.list_users(&creds, &token).await?;

        let mut report = CascadeReport::default();
        for user in users
            .iter()
            .filter(|u| u.belongs_to_session(&session.name))
        {
            report.matched += 1;
            match self
                .lacework
                .delete_user(&creds, &token, &user.user_guid)
                .await
            {
                Ok(()) => {
                    report.deleted += 1;
                    info!(
                        session = %session.name,
                        user_guid = %user.user_guid,
                        "Deleted remote user"
                    );
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(
                        session = %session.name,
                        user_guid = %user.user_guid,
                        error = %e,
                        "Failed to delete remote user, skipping"
                    );
                }
            }
        }

        Ok(report)
    }
}
