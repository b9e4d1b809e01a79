//! Lacework team users.

use serde::{Deserialize, Serialize};

/// A user record held by the Lacework platform.
///
/// Only `user_guid` and `company` are relied upon; the other fields are
/// decoded when present for logging and API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    /// Platform-assigned identifier.
    pub user_guid: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Login email.
    #[serde(default)]
    pub email: String,
    /// `<company>-<session>` tag written at registration time.
    #[serde(default)]
    pub company: String,
    /// 1 when the account is enabled.
    #[serde(default)]
    pub user_enabled: i32,
    /// Account type, e.g. `StandardUser`.
    #[serde(default, rename = "type")]
    pub user_type: String,
    /// Group memberships.
    #[serde(default)]
    pub user_groups: Vec<UserGroupRef>,
    /// Last login timestamp as reported by the platform.
    #[serde(default)]
    pub last_login_time: Option<String>,
}

/// Membership of a remote user in an access group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroupRef {
    /// Group identifier.
    #[serde(default)]
    pub user_group_guid: String,
    /// Group display name.
    #[serde(default)]
    pub user_group_name: String,
}

impl RemoteUser {
    /// Whether this user was provisioned under `session_name`.
    ///
    /// Case-sensitive suffix match on `company`. An empty session name
    /// matches nothing.
    pub fn belongs_to_session(&self, session_name: &str) -> bool {
        !session_name.is_empty() && self.company.ends_with(session_name)
    }
}
