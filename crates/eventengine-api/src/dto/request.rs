//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use eventengine_entity::{InstanceType, Registrant, Session};

/// Session create/replace body.
///
/// Server-managed fields (`createdAt`, `updatedAt`, `regCount`) are
/// accepted for wire compatibility and ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_custom_tenant"))]
pub struct SessionRequest {
    /// Session name.
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Session name is required"))]
    pub name: String,
    /// Tenant mode.
    pub instance_type: InstanceType,
    #[serde(default)]
    pub lw_url: String,
    #[serde(default)]
    pub lw_sub_account: String,
    #[serde(default, rename = "lwAccessKeyID")]
    pub lw_access_key_id: String,
    #[serde(default)]
    pub lw_secret_key: String,
    #[serde(default)]
    pub lw_user_group: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub updated_by: String,
    /// Expiry, RFC 3339.
    pub expires_at: DateTime<Utc>,
}

fn validate_custom_tenant(req: &SessionRequest) -> Result<(), ValidationError> {
    if req.instance_type != InstanceType::Custom {
        return Ok(());
    }
    if req.lw_url.is_empty() || req.lw_access_key_id.is_empty() || req.lw_secret_key.is_empty() {
        return Err(ValidationError::new("custom_tenant").with_message(
            "CUSTOM sessions require lwUrl, lwAccessKeyID and lwSecretKey".into(),
        ));
    }
    Ok(())
}

impl SessionRequest {
    /// Build the entity. Timestamps and counter are stamped by the service.
    pub fn into_session(self) -> Session {
        let now = Utc::now();
        Session {
            name: self.name,
            instance_type: self.instance_type,
            lw_url: self.lw_url,
            lw_sub_account: self.lw_sub_account,
            lw_access_key_id: self.lw_access_key_id,
            lw_secret_key: self.lw_secret_key,
            lw_user_group: self.lw_user_group,
            created_by: self.created_by,
            updated_by: self.updated_by,
            created_at: now,
            updated_at: now,
            expires_at: self.expires_at,
            reg_count: 0,
        }
    }
}

/// Body of `DELETE /api/sessions/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    /// Names to delete, in order.
    pub sessions: Vec<String>,
}

/// Query string of `DELETE /api/sessions/{name}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteSessionQuery {
    /// Delete the record even if remote users could not be removed.
    #[serde(default)]
    pub force: bool,
}

/// Registration body, echoed back on success.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,
}

impl RegisterUserRequest {
    /// The person to register.
    pub fn to_registrant(&self) -> Registrant {
        Registrant {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            company: self.company.clone(),
        }
    }
}
