//! In-memory Lacework tenant for development and testing.
//!
//! Simulates the team-user and token endpoints without network access.
//! Every call is recorded so tests can assert on what was sent.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;

use eventengine_core::error::AppError;
use eventengine_core::result::AppResult;
use eventengine_entity::{AccessToken, RemoteUser, TenantCredentials};

use crate::api::LaceworkApi;
use crate::error::Operation;
use crate::wire::STANDARD_USER;

/// One recorded call against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    CreateToken {
        url: String,
        access_key_id: String,
    },
    CreateUser {
        name: String,
        email: String,
        company: String,
    },
    AssignGroup {
        user_guid: String,
        group_id: String,
    },
    ListUsers,
    DeleteUser {
        user_guid: String,
    },
}

/// Mock Lacework tenant.
#[derive(Debug, Default)]
pub struct MockLaceworkApi {
    /// Users currently held by the fake tenant.
    users: Mutex<Vec<RemoteUser>>,
    /// Every call in arrival order.
    calls: Mutex<Vec<MockCall>>,
    /// GUIDs whose deletion is rejected.
    undeletable: Mutex<HashSet<String>>,
    fail_token: AtomicBool,
    fail_create: AtomicBool,
    fail_assign: AtomicBool,
    fail_list: AtomicBool,
    next_guid: AtomicU64,
}

impl MockLaceworkApi {
    /// Create an empty mock tenant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user with the given GUID and company tag.
    pub fn add_user(&self, user_guid: &str, company: &str) {
        let user = RemoteUser {
            user_guid: user_guid.to_string(),
            name: format!("User {user_guid}"),
            email: format!("{}@example.com", user_guid.to_lowercase()),
            company: company.to_string(),
            user_enabled: 1,
            user_type: STANDARD_USER.to_string(),
            user_groups: Vec::new(),
            last_login_time: None,
        };
        self.users
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(user);
    }

    /// Snapshot of the users held by the tenant.
    pub fn users(&self) -> Vec<RemoteUser> {
        self.users.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Snapshot of recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Access key ids presented on token requests, in order.
    pub fn token_key_ids(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::CreateToken { access_key_id, .. } => Some(access_key_id),
                _ => None,
            })
            .collect()
    }

    /// Make token requests fail with 401.
    pub fn set_token_failure(&self, fail: bool) {
        self.fail_token.store(fail, Ordering::SeqCst);
    }

    /// Make user creation fail with 500.
    pub fn set_create_failure(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    /// Make group assignment fail with 404.
    pub fn set_assign_failure(&self, fail: bool) {
        self.fail_assign.store(fail, Ordering::SeqCst);
    }

    /// Make user listing fail with 500.
    pub fn set_list_failure(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    /// Reject deletion of one user.
    pub fn fail_delete_for(&self, user_guid: &str) {
        self.undeletable
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(user_guid.to_string());
    }

    fn record(&self, call: MockCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

fn rejected(operation: Operation, status: &str) -> AppError {
    AppError::remote_api(format!("{operation} returned status {status}"))
}

#[async_trait]
impl LaceworkApi for MockLaceworkApi {
    async fn create_access_token(&self, tenant: &TenantCredentials) -> AppResult<AccessToken> {
        self.record(MockCall::CreateToken {
            url: tenant.url.clone(),
            access_key_id: tenant.access_key_id.clone(),
        });

        if self.fail_token.load(Ordering::SeqCst) {
            return Err(AppError::auth_failed(format!(
                "{} returned status 401 Unauthorized",
                Operation::CreateToken
            )));
        }

        Ok(AccessToken {
            token: format!("mock-token-{}", tenant.access_key_id),
            expires_at: "2099-01-01T00:00:00.000Z".to_string(),
        })
    }

    async fn create_user(
        &self,
        _tenant: &TenantCredentials,
        _token: &AccessToken,
        name: &str,
        email: &str,
        company: &str,
    ) -> AppResult<RemoteUser> {
        self.record(MockCall::CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            company: company.to_string(),
        });

        if self.fail_create.load(Ordering::SeqCst) {
            return Err(rejected(Operation::CreateUser, "500 Internal Server Error"));
        }

        let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::remote_api(format!(
                "{} returned status 409 Conflict: User with this email address already exists.",
                Operation::CreateUser
            )));
        }

        let seq = self.next_guid.fetch_add(1, Ordering::SeqCst) + 1;
        let user = RemoteUser {
            user_guid: format!("MOCK_{seq:04}"),
            name: name.to_string(),
            email: email.to_string(),
            company: company.to_string(),
            user_enabled: 1,
            user_type: STANDARD_USER.to_string(),
            user_groups: Vec::new(),
            last_login_time: None,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn assign_user_to_group(
        &self,
        _tenant: &TenantCredentials,
        _token: &AccessToken,
        user_guid: &str,
        group_id: &str,
    ) -> AppResult<()> {
        self.record(MockCall::AssignGroup {
            user_guid: user_guid.to_string(),
            group_id: group_id.to_string(),
        });

        if self.fail_assign.load(Ordering::SeqCst) {
            return Err(rejected(Operation::AssignGroup, "404 Not Found"));
        }
        Ok(())
    }

    async fn list_users(
        &self,
        _tenant: &TenantCredentials,
        _token: &AccessToken,
    ) -> AppResult<Vec<RemoteUser>> {
        self.record(MockCall::ListUsers);

        if self.fail_list.load(Ordering::SeqCst) {
            return Err(rejected(Operation::ListUsers, "500 Internal Server Error"));
        }
        Ok(self.users())
    }

    async fn delete_user(
        &self,
        _tenant: &TenantCredentials,
        _token: &AccessToken,
        user_guid: &str,
    ) -> AppResult<()> {
        self.record(MockCall::DeleteUser {
            user_guid: user_guid.to_string(),
        });

        let blocked = self
            .undeletable
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(user_guid);
        if blocked {
            return Err(rejected(Operation::DeleteUser, "500 Internal Server Error"));
        }

        let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        let before = users.len();
        users.retain(|u| u.user_guid != user_guid);
        if users.len() == before {
            return Err(rejected(Operation::DeleteUser, "404 Not Found"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant() -> TenantCredentials {
        TenantCredentials {
            url: "acme.lacework.net".to_string(),
            sub_account: String::new(),
            access_key_id: "KEY".to_string(),
            secret_key: "SECRET".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_list_and_delete() {
        let mock = MockLaceworkApi::new();
        let token = mock.create_access_token(&tenant()).await.unwrap();

        let user = mock
            .create_user(&tenant(), &token, "Ada Lovelace", "ada@example.com", "acme-evt1")
            .await
            .unwrap();
        assert_eq!(user.company, "acme-evt1");

        let listed = mock.list_users(&tenant(), &token).await.unwrap();
        assert_eq!(listed.len(), 1);

        mock.delete_user(&tenant(), &token, &user.user_guid)
            .await
            .unwrap();
        assert!(mock.users().is_empty());
        assert_eq!(mock.token_key_ids(), vec!["KEY".to_string()]);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let mock = MockLaceworkApi::new();
        let token = mock.create_access_token(&tenant()).await.unwrap();
        mock.create_user(&tenant(), &token, "A B", "a@example.com", "acme-evt1")
            .await
            .unwrap();

        let err = mock
            .create_user(&tenant(), &token, "A B", "a@example.com", "acme-evt1")
            .await
            .unwrap_err();
        assert!(err.message.contains("409"));
    }

    #[tokio::test]
    async fn test_failure_switches() {
        let mock = MockLaceworkApi::new();
        mock.set_token_failure(true);
        let err = mock.create_access_token(&tenant()).await.unwrap_err();
        assert_eq!(err.kind, eventengine_core::error::ErrorKind::AuthFailed);

        mock.set_token_failure(false);
        mock.add_user("U1", "acme-evt1");
        mock.fail_delete_for("U1");
        let token = mock.create_access_token(&tenant()).await.unwrap();
        assert!(mock.delete_user(&tenant(), &token, "U1").await.is_err());
        assert_eq!(mock.users().len(), 1);
    }
}
