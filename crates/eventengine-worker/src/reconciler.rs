//! Expiry sweep over all stored sessions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use eventengine_core::error::ErrorKind;
use eventengine_core::result::AppResult;
use eventengine_entity::SessionStore;
use eventengine_service::UserCascade;

/// Tallies for one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Sessions read from the store.
    pub examined: usize,
    /// Sessions whose expiry had passed.
    pub expired: usize,
    /// Expired sessions removed from the store.
    pub sessions_deleted: usize,
    /// Remote users removed across all expired sessions.
    pub users_deleted: usize,
    /// Remote users that could not be removed and were skipped.
    pub user_delete_failures: usize,
    /// Expired sessions kept because no token could be acquired.
    pub skipped_auth: usize,
    /// Expired sessions kept because their remote users could not be listed.
    pub skipped_list: usize,
    /// Expired sessions whose record delete failed; retried next sweep.
    pub session_delete_failures: usize,
}

/// Reaps expired sessions.
///
/// At most one sweep runs at a time per reconciler; a sweep requested
/// while another is in progress is skipped, not queued.
#[derive(Debug, Clone)]
pub struct Reconciler {
    store: Arc<dyn SessionStore>,
    cascade: UserCascade,
    running: Arc<Mutex<()>>,
}

impl Reconciler {
    /// Create a reconciler over a store and the remote-user cascade.
    pub fn new(store: Arc<dyn SessionStore>, cascade: UserCascade) -> Self {
        Self {
            store,
            cascade,
            running: Arc::new(Mutex::new(())),
        }
    }

    /// Run one sweep against the current time.
    ///
    /// Returns `Ok(None)` if another sweep was already running.
    pub async fn tick(&self) -> AppResult<Option<SweepReport>> {
        self.tick_at(Utc::now()).await
    }

    /// Run one sweep treating `now` as the current time.
    pub async fn tick_at(&self, now: DateTime<Utc>) -> AppResult<Option<SweepReport>> {
        let Ok(_guard) = self.running.try_lock() else {
            warn!("Previous expiry sweep still running, skipping this one");
            return Ok(None);
        };

        let report = self.sweep(now).await?;
        info!(
            examined = report.examined,
            expired = report.expired,
            sessions_deleted = report.sessions_deleted,
            users_deleted = report.users_deleted,
            user_delete_failures = report.user_delete_failures,
            skipped_auth = report.skipped_auth,
            skipped_list = report.skipped_list,
            session_delete_failures = report.session_delete_failures,
            "Expiry sweep finished"
        );
        Ok(Some(report))
    }

    async fn sweep(&self, now: DateTime<Utc>) -> AppResult<SweepReport> {
        let sessions = self.store.get_all().await.inspect_err(|e| {
            error!(error = %e, "Could not load sessions, aborting sweep");
        })?;

        let mut report = SweepReport {
            examined: sessions.len(),
            ..SweepReport::default()
        };

        for session in sessions.iter().filter(|s| s.is_expired_at(now)) {
            report.expired += 1;
            info!(
                session = %session.name,
                expires_at = %session.expires_at,
                "Session expired, cleaning up"
            );

            match self.cascade.purge(session).await {
                Ok(cascade) => {
                    report.users_deleted += cascade.deleted;
                    report.user_delete_failures += cascade.failed;
                }
                Err(e) if e.kind == ErrorKind::AuthFailed => {
                    report.skipped_auth += 1;
                    warn!(
                        session = %session.name,
                        error = %e,
                        "No access token for tenant, keeping session until next sweep"
                    );
                    continue;
                }
                Err(e) => {
                    report.skipped_list += 1;
                    warn!(
                        session = %session.name,
                        error = %e,
                        "Could not list remote users, keeping session until next sweep"
                    );
                    continue;
                }
            }

            match self.store.delete_by_name(&session.name).await {
                Ok(_) => report.sessions_deleted += 1,
                Err(e) => {
                    report.session_delete_failures += 1;
                    error!(
                        session = %session.name,
                        error = %e,
                        "Failed to delete expired session"
                    );
                }
            }
        }

        Ok(report)
    }
}
