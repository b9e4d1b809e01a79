//! Default tenant and Lacework client configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Access group assigned to registrants when a session names none.
pub const DEFAULT_USER_GROUP: &str = "LACEWORK_USER_GROUP_READ_ONLY_USER";

/// Lifetime requested for every access token, in seconds.
pub const DEFAULT_TOKEN_EXPIRY_SECONDS: u64 = 86400;

/// The shared tenant used by every `DEFAULT` session.
///
/// Read once at startup and never mutated afterwards.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct TenantConfig {
    /// Tenant host, e.g. `acme.lacework.net`.
    #[serde(default)]
    pub url: String,
    /// API access key id.
    #[serde(default)]
    pub access_key_id: String,
    /// API secret key.
    #[serde(default)]
    pub secret_key: String,
    /// Optional sub-account name sent as `Account-Name`.
    #[serde(default)]
    pub sub_account: String,
}

impl fmt::Debug for TenantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantConfig")
            .field("url", &self.url)
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &"****")
            .field("sub_account", &self.sub_account)
            .finish()
    }
}

/// Outbound Lacework API client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaceworkConfig {
    /// Per-request deadline in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Requested access token lifetime in seconds.
    #[serde(default = "default_token_expiry")]
    pub token_expiry_seconds: u64,
    /// Group used when a session has no `lwUserGroup`.
    #[serde(default = "default_user_group")]
    pub default_user_group: String,
}

impl Default for LaceworkConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: default_request_timeout(),
            token_expiry_seconds: default_token_expiry(),
            default_user_group: default_user_group(),
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_token_expiry() -> u64 {
    DEFAULT_TOKEN_EXPIRY_SECONDS
}

fn default_user_group() -> String {
    DEFAULT_USER_GROUP.to_string()
}
