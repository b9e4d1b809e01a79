//! Cron scheduler for the expiry sweep.

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use eventengine_core::config::ReconcilerConfig;
use eventengine_core::error::AppError;

use crate::reconciler::Reconciler;

/// Cron-based scheduler for periodic background tasks.
pub struct CronScheduler {
    scheduler: JobScheduler,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new, stopped scheduler.
    pub async fn new() -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self { scheduler })
    }

    /// Schedule the expiry sweep.
    ///
    /// Returns `false` without registering anything when the reconciler is
    /// disabled. An unparsable schedule is a configuration error.
    pub async fn register_reconciler(
        &self,
        reconciler: Reconciler,
        config: &ReconcilerConfig,
    ) -> Result<bool, AppError> {
        if !config.enabled {
            tracing::info!("Expiry sweep disabled");
            return Ok(false);
        }

        let job = CronJob::new_async(config.schedule.as_str(), move |_uuid, _lock| {
            let reconciler = reconciler.clone();
            Box::pin(async move {
                tracing::debug!("Starting scheduled expiry sweep");
                if let Err(e) = reconciler.tick().await {
                    tracing::error!(error = %e, "Scheduled expiry sweep failed");
                }
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid reconciler schedule '{}': {e}",
                config.schedule
            ))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add expiry sweep schedule: {e}")))?;

        tracing::info!(schedule = %config.schedule, "Registered: expiry sweep");
        Ok(true)
    }

    /// Start firing registered jobs.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Stop the scheduler. A sweep already in flight runs to completion.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shut down scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}
