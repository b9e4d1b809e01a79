//! Expiry reconciler schedule configuration.

use serde::{Deserialize, Serialize};

/// Background expiry sweep configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Whether the sweep is scheduled at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression (seconds first). Hourly by default.
    #[serde(default = "default_schedule")]
    pub schedule: String,
    /// Run one sweep immediately after startup.
    #[serde(default)]
    pub run_on_startup: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            schedule: default_schedule(),
            run_on_startup: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_schedule() -> String {
    "0 0 * * * *".to_string()
}
