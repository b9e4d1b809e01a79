//! Request and response bodies of the Lacework API v2.

use serde::{Deserialize, Serialize};

/// `POST /api/v2/access/tokens`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenRequest {
    pub key_id: String,
    pub expiry_time: u64,
}

/// `POST /api/v2/TeamUsers`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeamUserRequest {
    #[serde(rename = "type")]
    pub user_type: String,
    pub name: String,
    pub email: String,
    pub company: String,
}

/// `POST /api/v2/UserGroups/{group}/addUsers`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUsersRequest {
    pub user_guids: Vec<String>,
}

/// The `{"data": ...}` envelope wrapping most v2 responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Account type used for every registrant.
pub const STANDARD_USER: &str = "StandardUser";
