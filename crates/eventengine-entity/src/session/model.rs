//! Session entity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use eventengine_core::config::TenantConfig;

use super::instance::InstanceType;
use crate::tenant::TenantCredentials;

/// A time-boxed registration context tied to one tenant.
///
/// Sessions are created by an operator, accumulate registrations, and are
/// destroyed explicitly or by the expiry sweep once `expires_at` passes.
/// Remote users are correlated to a session only through the
/// `<company>-<name>` suffix written at registration time.
#[derive(Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique session name.
    pub name: String,
    /// Tenant mode.
    pub instance_type: InstanceType,
    /// Tenant host for `CUSTOM` sessions.
    #[serde(default)]
    pub lw_url: String,
    /// Tenant sub-account for `CUSTOM` sessions.
    #[serde(default)]
    pub lw_sub_account: String,
    /// Tenant access key id for `CUSTOM` sessions.
    #[serde(default, rename = "lwAccessKeyID")]
    pub lw_access_key_id: String,
    /// Tenant secret key for `CUSTOM` sessions.
    #[serde(default)]
    pub lw_secret_key: String,
    /// Access group for registrants; empty means the configured default.
    #[serde(default)]
    pub lw_user_group: String,
    /// Operator who created the session.
    #[serde(default)]
    pub created_by: String,
    /// Operator who last updated the session.
    #[serde(default)]
    pub updated_by: String,
    /// When the session was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// When the session was last written.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    /// When the session becomes eligible for the expiry sweep.
    pub expires_at: DateTime<Utc>,
    /// Successful registrations so far.
    #[serde(default)]
    pub reg_count: i64,
}

impl Session {
    /// Whether `expires_at` lies strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Whether the session has expired as of the current UTC time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Credentials to use against the tenant.
    ///
    /// `DEFAULT` sessions always resolve to the process-wide tenant; the
    /// session's own credential fields only count for `CUSTOM` sessions.
    pub fn tenant_credentials(&self, defaults: &TenantConfig) -> TenantCredentials {
        match self.instance_type {
            InstanceType::Default => TenantCredentials::from(defaults),
            InstanceType::Custom => TenantCredentials {
                url: self.lw_url.clone(),
                sub_account: self.lw_sub_account.clone(),
                access_key_id: self.lw_access_key_id.clone(),
                secret_key: self.lw_secret_key.clone(),
            },
        }
    }

    /// Access group for registrants, falling back to `default_group`.
    pub fn user_group<'a>(&'a self, default_group: &'a str) -> &'a str {
        if self.lw_user_group.is_empty() {
            default_group
        } else {
            &self.lw_user_group
        }
    }

    /// The `company` value written on remote users registered under this session.
    pub fn company_tag(&self, company: &str) -> String {
        format!("{company}-{}", self.name)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("name", &self.name)
            .field("instance_type", &self.instance_type)
            .field("lw_url", &self.lw_url)
            .field("lw_sub_account", &self.lw_sub_account)
            .field("lw_access_key_id", &self.lw_access_key_id)
            .field("lw_secret_key", &"****")
            .field("lw_user_group", &self.lw_user_group)
            .field("created_by", &self.created_by)
            .field("updated_by", &self.updated_by)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("expires_at", &self.expires_at)
            .field("reg_count", &self.reg_count)
            .finish()
    }
}
