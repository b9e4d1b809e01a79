//! Integration tests for the CTF session route.

mod helpers;

use http::StatusCode;

use eventengine_core::config::AppConfig;
use helpers::{CTF_SECRET, TestApp, session_body};

const CTF_PATH: &str = "/api/sessions/ctfaddsession";

#[tokio::test]
async fn test_matching_secret_creates_session() {
    let app = TestApp::new();

    let response = app
        .request("POST", CTF_PATH, Some(session_body("ctf1")), Some(CTF_SECRET))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "ctf1");
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn test_wrong_secret_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .request("POST", CTF_PATH, Some(session_body("ctf1")), Some("guess"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_missing_header_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .request("POST", CTF_PATH, Some(session_body("ctf1")), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unset_secret_admits_nobody() {
    let app = TestApp::with_config(AppConfig::default());

    let response = app
        .request("POST", CTF_PATH, Some(session_body("ctf1")), Some(""))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_plain_create_needs_no_secret() {
    let app = TestApp::new();

    let response = app.create_session("evt1").await;
    assert_eq!(response.status, StatusCode::OK);
}
