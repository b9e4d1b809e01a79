//! `reqwest`-backed Lacework API v2 client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use eventengine_core::config::LaceworkConfig;
use eventengine_core::error::{AppError, ErrorKind};
use eventengine_core::result::AppResult;
use eventengine_entity::{AccessToken, RemoteUser, TenantCredentials};

use crate::api::LaceworkApi;
use crate::error::{LaceworkError, Operation};
use crate::wire::{
    AccessTokenRequest, AddUsersRequest, CreateTeamUserRequest, DataEnvelope, STANDARD_USER,
};

/// Header carrying the API secret key on token requests.
const SECRET_KEY_HEADER: &str = "X-LW-UAKS";

/// Header selecting a sub-account inside an organization tenant.
const ACCOUNT_NAME_HEADER: &str = "Account-Name";

/// Longest response body echoed into an error message.
const MAX_ERROR_BODY: usize = 256;

/// HTTP client for Lacework tenants.
///
/// Holds one pooled `reqwest::Client` shared by all tenants. Every request
/// is bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct LaceworkClient {
    http: reqwest::Client,
    token_expiry_seconds: u64,
}

impl LaceworkClient {
    /// Build a client from configuration.
    pub fn new(config: &LaceworkConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            token_expiry_seconds: config.token_expiry_seconds,
        })
    }

    /// Request builder carrying the token and optional sub-account headers.
    fn authorized(
        &self,
        method: Method,
        tenant: &TenantCredentials,
        token: &AccessToken,
        path: &str,
    ) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, endpoint(&tenant.url, path))
            .header(AUTHORIZATION, token.token.as_str())
            .header(CONTENT_TYPE, "application/json");

        if let Some(sub_account) = tenant.sub_account() {
            builder = builder.header(ACCOUNT_NAME_HEADER, sub_account);
        }
        builder
    }
}

/// Absolute URL for `path` on a tenant.
///
/// Bare hosts get `https://`; a URL that already carries a scheme is kept.
pub fn endpoint(tenant_url: &str, path: &str) -> String {
    let base = tenant_url.trim_end_matches('/');
    if base.contains("://") {
        format!("{base}{path}")
    } else {
        format!("https://{base}{path}")
    }
}

/// Send a request and require exactly `expected` back.
async fn send(
    operation: Operation,
    builder: RequestBuilder,
    expected: StatusCode,
) -> Result<Response, LaceworkError> {
    let response = builder
        .send()
        .await
        .map_err(|source| LaceworkError::Transport { operation, source })?;

    let status = response.status();
    debug!(operation = %operation, status = %status, "Lacework response");

    if status != expected {
        let body = response.text().await.unwrap_or_default();
        let body: String = body.trim().chars().take(MAX_ERROR_BODY).collect();
        warn!(operation = %operation, status = %status, "Unexpected Lacework status");
        return Err(LaceworkError::UnexpectedStatus {
            operation,
            status,
            body,
        });
    }

    Ok(response)
}

async fn decode<T: DeserializeOwned>(
    operation: Operation,
    response: Response,
) -> Result<T, LaceworkError> {
    response
        .json::<T>()
        .await
        .map_err(|source| LaceworkError::Decode { operation, source })
}

#[async_trait]
impl LaceworkApi for LaceworkClient {
    async fn create_access_token(&self, tenant: &TenantCredentials) -> AppResult<AccessToken> {
        let operation = Operation::CreateToken;
        let body = AccessTokenRequest {
            key_id: tenant.access_key_id.clone(),
            expiry_time: self.token_expiry_seconds,
        };

        let builder = self
            .http
            .post(endpoint(&tenant.url, "/api/v2/access/tokens"))
            .header(SECRET_KEY_HEADER, tenant.secret_key.as_str())
            .header(CONTENT_TYPE, "application/json")
            .json(&body);

        let response = send(operation, builder, StatusCode::CREATED).await?;
        let token: AccessToken = decode(operation, response).await?;

        debug!(tenant = %tenant.url, expires_at = %token.expires_at, "Access token issued");
        Ok(token)
    }

    async fn create_user(
        &self,
        tenant: &TenantCredentials,
        token: &AccessToken,
        name: &str,
        email: &str,
        company: &str,
    ) -> AppResult<RemoteUser> {
        let operation = Operation::CreateUser;
        let body = CreateTeamUserRequest {
            user_type: STANDARD_USER.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            company: company.to_string(),
        };

        let builder = self
            .authorized(Method::POST, tenant, token, "/api/v2/TeamUsers")
            .json(&body);

        let response = send(operation, builder, StatusCode::CREATED).await?;
        let envelope: DataEnvelope<RemoteUser> = decode(operation, response).await?;
        Ok(envelope.data)
    }

    async fn assign_user_to_group(
        &self,
        tenant: &TenantCredentials,
        token: &AccessToken,
        user_guid: &str,
        group_id: &str,
    ) -> AppResult<()> {
        let body = AddUsersRequest {
            user_guids: vec![user_guid.to_string()],
        };
        let path = format!("/api/v2/UserGroups/{group_id}/addUsers");

        let builder = self
            .authorized(Method::POST, tenant, token, &path)
            .json(&body);

        send(Operation::AssignGroup, builder, StatusCode::OK).await?;
        Ok(())
    }

    async fn list_users(
        &self,
        tenant: &TenantCredentials,
        token: &AccessToken,
    ) -> AppResult<Vec<RemoteUser>> {
        let operation = Operation::ListUsers;
        let builder = self.authorized(Method::GET, tenant, token, "/api/v2/TeamUsers/");

        let response = send(operation, builder, StatusCode::OK).await?;
        let envelope: DataEnvelope<Vec<RemoteUser>> = decode(operation, response).await?;
        Ok(envelope.data)
    }

    async fn delete_user(
        &self,
        tenant: &TenantCredentials,
        token: &AccessToken,
        user_guid: &str,
    ) -> AppResult<()> {
        let path = format!("/api/v2/TeamUsers/{user_guid}");
        let builder = self.authorized(Method::DELETE, tenant, token, &path);

        send(Operation::DeleteUser, builder, StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}
