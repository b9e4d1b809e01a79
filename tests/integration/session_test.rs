//! Integration tests for the session endpoints.

mod helpers;

use http::StatusCode;

use eventengine_entity::SessionStore;
use helpers::{TestApp, session_body};

#[tokio::test]
async fn test_create_and_fetch_session() {
    let app = TestApp::new();

    let created = app.create_session("evt1").await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["name"], "evt1");
    assert_eq!(created.body["instanceType"], "DEFAULT");
    assert_eq!(created.body["regCount"], 0);

    let fetched = app.request("GET", "/api/sessions/evt1", None, None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["createdBy"], "ops@example.com");
    assert!(fetched.body.get("expiresAt").is_some());
}

#[tokio::test]
async fn test_list_accepts_both_collection_paths() {
    let app = TestApp::new();
    app.create_session("evt1").await;
    app.create_session("evt2").await;

    for path in ["/api/sessions", "/api/sessions/"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::OK, "{path}");
        assert_eq!(response.body.as_array().map(Vec::len), Some(2), "{path}");
    }
}

#[tokio::test]
async fn test_duplicate_name_conflicts() {
    let app = TestApp::new();
    app.create_session("evt1").await;

    let response = app.create_session("evt1").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "ALREADY_EXISTS");
}

#[tokio::test]
async fn test_missing_session_is_not_found() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/sessions/nope", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
    assert!(response.body["message"].as_str().is_some());
}

#[tokio::test]
async fn test_create_without_expiry_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/sessions/",
            Some(serde_json::json!({ "name": "evt1", "instanceType": "DEFAULT" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_custom_session_without_credentials_is_bad_request() {
    let app = TestApp::new();
    let mut body = session_body("evt1");
    body["instanceType"] = "CUSTOM".into();

    let response = app.request("POST", "/api/sessions/", Some(body), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_replaces_mutable_fields() {
    let app = TestApp::new();
    app.create_session("evt1").await;

    let mut body = session_body("ignored");
    body["lwUserGroup"] = "WORKSHOP_GROUP".into();
    body["updatedBy"] = "editor@example.com".into();
    body["createdBy"] = "someone-else@example.com".into();

    let response = app
        .request("PUT", "/api/sessions/evt1", Some(body), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "evt1");
    assert_eq!(response.body["lwUserGroup"], "WORKSHOP_GROUP");
    assert_eq!(response.body["updatedBy"], "editor@example.com");
    assert_eq!(response.body["createdBy"], "ops@example.com");
}

#[tokio::test]
async fn test_update_missing_session_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request("PUT", "/api/sessions/nope", Some(session_body("nope")), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_removes_session_and_its_users() {
    let app = TestApp::new();
    app.create_session("evt1").await;
    app.lacework.add_user("U1", "acme-evt1");
    app.lacework.add_user("U2", "other-evt2");

    let response = app
        .request("DELETE", "/api/sessions/evt1", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Session deleted.");
    assert!(app.store.get_by_name("evt1").await.unwrap().is_none());

    let remaining: Vec<_> = app
        .lacework
        .users()
        .into_iter()
        .map(|u| u.user_guid)
        .collect();
    assert_eq!(remaining, vec!["U2".to_string()]);
}

#[tokio::test]
async fn test_delete_with_tenant_down_keeps_session_unless_forced() {
    let app = TestApp::new();
    app.create_session("evt1").await;
    app.lacework.set_token_failure(true);

    let response = app
        .request("DELETE", "/api/sessions/evt1", None, None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["error"], "AUTH_FAILED");
    assert!(app.store.get_by_name("evt1").await.unwrap().is_some());

    let response = app
        .request("DELETE", "/api/sessions/evt1?force=true", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(app.store.get_by_name("evt1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_bulk_delete() {
    let app = TestApp::new();
    app.create_session("evt1").await;
    app.create_session("evt2").await;
    app.create_session("evt3").await;

    let response = app
        .request(
            "DELETE",
            "/api/sessions/",
            Some(serde_json::json!({ "sessions": ["evt1", "evt2"] })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Sessions deleted.");
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn test_bulk_delete_stops_at_missing_session() {
    let app = TestApp::new();
    app.create_session("evt1").await;
    app.create_session("evt3").await;

    let response = app
        .request(
            "DELETE",
            "/api/sessions",
            Some(serde_json::json!({ "sessions": ["evt1", "missing", "evt3"] })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(app.store.get_by_name("evt1").await.unwrap().is_none());
    assert!(app.store.get_by_name("evt3").await.unwrap().is_some());
}

#[tokio::test]
async fn test_bulk_delete_rejects_malformed_body() {
    let app = TestApp::new();

    let response = app
        .request(
            "DELETE",
            "/api/sessions/",
            Some(serde_json::json!({ "names": ["evt1"] })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_default_instance_is_plain_text() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/sessions/defaultinstance", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.content_type.starts_with("text/plain"));
    assert_eq!(response.text, "shared.lacework.net");
}

#[tokio::test]
async fn test_health_status() {
    let app = TestApp::new();

    let response = app.request("GET", "/healthz/status", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        serde_json::json!({ "status": "success", "message": "ok" })
    );

    let response = app.request("GET", "/healthz/ready", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
}
