//! The Lacework operations EventEngine depends on.

use async_trait::async_trait;

use eventengine_core::result::AppResult;
use eventengine_entity::{AccessToken, RemoteUser, TenantCredentials};

/// Remote user and token management against one tenant per call.
///
/// Every call is a single request: no retry and no token caching. A token
/// failure maps to `AuthFailed`; any other unexpected status maps to
/// `RemoteApi` with the raw status in the message.
#[async_trait]
pub trait LaceworkApi: Send + Sync + std::fmt::Debug + 'static {
    /// Exchange the tenant's key pair for a short-lived access token.
    async fn create_access_token(&self, tenant: &TenantCredentials) -> AppResult<AccessToken>;

    /// Create a standard user. A duplicate email fails with the platform's status.
    async fn create_user(
        &self,
        tenant: &TenantCredentials,
        token: &AccessToken,
        name: &str,
        email: &str,
        company: &str,
    ) -> AppResult<RemoteUser>;

    /// Add one user to an access group.
    async fn assign_user_to_group(
        &self,
        tenant: &TenantCredentials,
        token: &AccessToken,
        user_guid: &str,
        group_id: &str,
    ) -> AppResult<()>;

    /// List every team user in the tenant, unfiltered.
    async fn list_users(
        &self,
        tenant: &TenantCredentials,
        token: &AccessToken,
    ) -> AppResult<Vec<RemoteUser>>;

    /// Delete one team user.
    async fn delete_user(
        &self,
        tenant: &TenantCredentials,
        token: &AccessToken,
        user_guid: &str,
    ) -> AppResult<()>;
}
