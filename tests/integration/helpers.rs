//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::{Duration, Utc};
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use eventengine_api::{AppState, build_app};
use eventengine_core::config::{AppConfig, TenantConfig};
use eventengine_kv::MemorySessionStore;
use eventengine_lacework::MockLaceworkApi;
use eventengine_service::SessionService;

/// Shared secret configured for the CTF route.
pub const CTF_SECRET: &str = "ctf-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store, for direct assertions
    pub store: MemorySessionStore,
    /// Fake Lacework tenant
    pub lacework: Arc<MockLaceworkApi>,
}

impl TestApp {
    /// App with the CTF secret set.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.ctf.secret = CTF_SECRET.to_string();
        Self::with_config(config)
    }

    /// App over an in-memory store and mock tenant with the given config.
    pub fn with_config(mut config: AppConfig) -> Self {
        config.tenant = TenantConfig {
            url: "shared.lacework.net".to_string(),
            access_key_id: "DEFAULT_KEY".to_string(),
            secret_key: "default-secret".to_string(),
            sub_account: String::new(),
        };

        let store = MemorySessionStore::new();
        let lacework = Arc::new(MockLaceworkApi::new());
        let service = SessionService::new(
            Arc::new(store.clone()),
            lacework.clone(),
            config.tenant.clone(),
            &config.lacework,
        );

        let state = AppState::new(Arc::new(config), Arc::new(service));
        Self {
            router: build_app(state),
            store,
            lacework,
        }
    }

    /// Create a DEFAULT session through the API.
    pub async fn create_session(&self, name: &str) -> TestResponse {
        self.request("POST", "/api/sessions/", Some(session_body(name)), None)
            .await
    }

    /// Make a request; `authorization` is sent verbatim.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            content_type,
            text,
            body,
        }
    }
}

/// A DEFAULT session body expiring in one day.
pub fn session_body(name: &str) -> Value {
    serde_json::json!({
        "name": name,
        "instanceType": "DEFAULT",
        "createdBy": "ops@example.com",
        "updatedBy": "ops@example.com",
        "expiresAt": (Utc::now() + Duration::days(1)).to_rfc3339(),
    })
}

/// A complete registration body.
pub fn registration_body() -> Value {
    serde_json::json!({
        "email": "a@b.com",
        "firstName": "A",
        "lastName": "B",
        "company": "acme",
    })
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// `Content-Type` header, empty if absent
    pub content_type: String,
    /// Raw body
    pub text: String,
    /// Parsed JSON body, `Null` if not JSON
    pub body: Value,
}
