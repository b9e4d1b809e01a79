//! Integration tests for registration.

mod helpers;

use http::StatusCode;

use eventengine_entity::SessionStore;
use eventengine_lacework::mock::MockCall;
use helpers::{TestApp, registration_body};

#[tokio::test]
async fn test_register_creates_tagged_user() {
    let app = TestApp::new();
    app.create_session("evt1").await;

    let response = app
        .request("POST", "/api/register/evt1", Some(registration_body()), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, registration_body());

    let users = app.lacework.users();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].company, "acme-evt1");
    assert_eq!(users[0].email, "a@b.com");

    assert!(app.lacework.calls().iter().any(|call| matches!(
        call,
        MockCall::AssignGroup { group_id, .. } if group_id == "LACEWORK_USER_GROUP_READ_ONLY_USER"
    )));

    let stored = app.store.get_by_name("evt1").await.unwrap().unwrap();
    assert_eq!(stored.reg_count, 1);
}

#[tokio::test]
async fn test_register_unknown_session_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/register/nope", Some(registration_body()), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(app.lacework.calls().is_empty());
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = TestApp::new();
    app.create_session("evt1").await;
    let mut body = registration_body();
    body["email"] = "not-an-email".into();

    let response = app
        .request("POST", "/api/register/evt1", Some(body), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.lacework.calls().is_empty());
}

#[tokio::test]
async fn test_register_rejects_missing_fields() {
    let app = TestApp::new();
    app.create_session("evt1").await;

    let response = app
        .request(
            "POST",
            "/api/register/evt1",
            Some(serde_json::json!({ "email": "a@b.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_token_failure_is_bad_gateway() {
    let app = TestApp::new();
    app.create_session("evt1").await;
    app.lacework.set_token_failure(true);

    let response = app
        .request("POST", "/api/register/evt1", Some(registration_body()), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["error"], "AUTH_FAILED");

    let stored = app.store.get_by_name("evt1").await.unwrap().unwrap();
    assert_eq!(stored.reg_count, 0);
}

#[tokio::test]
async fn test_register_duplicate_email_is_bad_gateway() {
    let app = TestApp::new();
    app.create_session("evt1").await;
    app.request("POST", "/api/register/evt1", Some(registration_body()), None)
        .await;

    let response = app
        .request("POST", "/api/register/evt1", Some(registration_body()), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["error"], "REMOTE_API_ERROR");

    let stored = app.store.get_by_name("evt1").await.unwrap().unwrap();
    assert_eq!(stored.reg_count, 1);
}
