//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! `config/default.toml`, an optional environment overlay and
//! `EVENTENGINE__*` environment variables. Each sub-module represents a
//! logical configuration section. The resulting [`AppConfig`] is built
//! once at startup and shared read-only.

pub mod app;
pub mod logging;
pub mod reconciler;
pub mod store;
pub mod tenant;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, CtfConfig, ServerConfig};
pub use self::logging::LoggingConfig;
pub use self::reconciler::ReconcilerConfig;
pub use self::store::{DatabaseConfig, RedisConfig, StoreConfig, StoreProvider};
pub use self::tenant::{LaceworkConfig, TenantConfig};

use crate::error::AppError;

/// Variables honoured for compatibility with existing deployments,
/// mapped onto their configuration keys.
const LEGACY_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("eventengine_def_instance_url", "tenant.url"),
    ("eventengine_def_access_key_id", "tenant.access_key_id"),
    ("eventengine_def_secret_key", "tenant.secret_key"),
    ("eventengine_def_sub_acct", "tenant.sub_account"),
    ("eventengine_serverPort", "server.port"),
    ("ctf_secret", "ctf.secret"),
];

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Default (shared) tenant credentials.
    #[serde(default)]
    pub tenant: TenantConfig,
    /// Lacework API client settings.
    #[serde(default)]
    pub lacework: LaceworkConfig,
    /// CTF route shared secret.
    #[serde(default)]
    pub ctf: CtfConfig,
    /// Session store backend.
    #[serde(default)]
    pub store: StoreConfig,
    /// Expiry sweep schedule.
    #[serde(default)]
    pub reconciler: ReconcilerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config/default.toml`, `config/{env}.toml`, variables prefixed
    /// with `EVENTENGINE__` and finally the legacy variable names.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("EVENTENGINE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        for (var, key) in LEGACY_ENV_OVERRIDES {
            builder = builder
                .set_override_option(*key, std::env::var(var).ok())
                .map_err(|e| AppError::configuration(format!("Invalid override {var}: {e}")))?;
        }

        let config = builder
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
