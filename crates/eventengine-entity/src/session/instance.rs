//! Session tenant mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which tenant a session provisions users into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "instance_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum InstanceType {
    /// The shared tenant from process configuration. Session credentials are ignored.
    Default,
    /// A dedicated tenant described by the session's own credential fields.
    Custom,
}

impl InstanceType {
    /// Return the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for InstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstanceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEFAULT" => Ok(Self::Default),
            "CUSTOM" => Ok(Self::Custom),
            _ => Err(format!("Unknown instance type: '{s}'")),
        }
    }
}
