//! Registrant details for a session sign-up.

use serde::{Deserialize, Serialize};

/// A person signing up to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registrant {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
}

impl Registrant {
    /// Name written on the remote user.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
