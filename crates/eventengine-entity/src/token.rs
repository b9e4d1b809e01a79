//! Short-lived Lacework access tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bearer credential for one tenant. Requested per operation, never cached.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// Opaque token sent as the `Authorization` header.
    pub token: String,
    /// Expiry as declared by the platform.
    #[serde(default)]
    pub expires_at: String,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"****")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
