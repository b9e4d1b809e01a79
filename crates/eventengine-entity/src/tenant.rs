//! Resolved connection details for one Lacework tenant.

use std::fmt;

use eventengine_core::config::TenantConfig;

/// Everything needed to talk to one tenant.
#[derive(Clone, PartialEq, Eq)]
pub struct TenantCredentials {
    /// Tenant host (or full base URL).
    pub url: String,
    /// Sub-account sent as `Account-Name`; empty when unused.
    pub sub_account: String,
    /// API access key id.
    pub access_key_id: String,
    /// API secret key.
    pub secret_key: String,
}

impl TenantCredentials {
    /// Sub-account, if one is set.
    pub fn sub_account(&self) -> Option<&str> {
        if self.sub_account.is_empty() {
            None
        } else {
            Some(&self.sub_account)
        }
    }
}

impl From<&TenantConfig> for TenantCredentials {
    fn from(config: &TenantConfig) -> Self {
        Self {
            url: config.url.clone(),
            sub_account: config.sub_account.clone(),
            access_key_id: config.access_key_id.clone(),
            secret_key: config.secret_key.clone(),
        }
    }
}

impl fmt::Debug for TenantCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantCredentials")
            .field("url", &self.url)
            .field("sub_account", &self.sub_account)
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &"****")
            .finish()
    }
}
