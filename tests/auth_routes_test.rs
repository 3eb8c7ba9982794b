// ABOUTME: Integration tests for registration, login, session, and sign-out
// ABOUTME: Covers validation failures, revocation, and session events

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::http::StatusCode;
use common::{create_test_resources, get, post, setup_authenticated};
use serde_json::json;
use stride_server::auth::SessionEvent;
use stride_server::routes;
use stride_server::routes::auth::{LoginResponse, RegisterResponse, SessionResponse};

#[tokio::test]
async fn test_register_and_login_flow() {
    let resources = create_test_resources().await.unwrap();
    let router = routes::router(resources.clone());

    let response = post(
        router.clone(),
        "/api/auth/register",
        None,
        json!({
            "email": "ada@example.com",
            "password": "longenough",
            "display_name": "Ada"
        }),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let registered: RegisterResponse = response.json();
    assert!(!registered.user_id.is_empty());

    let response = post(
        router.clone(),
        "/api/auth/login",
        None,
        json!({"email": "ada@example.com", "password": "longenough"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    let login: LoginResponse = response.json();
    assert_eq!(login.user.email, "ada@example.com");
    assert_eq!(login.user.display_name.as_deref(), Some("Ada"));
    assert!(!login.jwt_token.is_empty());

    // The issued token resolves to a live session
    let response = get(
        router,
        "/api/auth/session",
        Some(&format!("Bearer {}", login.jwt_token)),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    let session: SessionResponse = response.json();
    assert_eq!(session.user.user_id, registered.user_id);
}

#[tokio::test]
async fn test_register_validation_failures() {
    let resources = create_test_resources().await.unwrap();
    let router = routes::router(resources);

    let bad_email = post(
        router.clone(),
        "/api/auth/register",
        None,
        json!({"email": "not-an-email", "password": "longenough"}),
    )
    .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_email.body["error"]["code"], "INVALID_INPUT");

    let short_password = post(
        router,
        "/api/auth/register",
        None,
        json!({"email": "ok@example.com", "password": "short"}),
    )
    .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let resources = create_test_resources().await.unwrap();
    let router = routes::router(resources);
    let body = json!({"email": "dup@example.com", "password": "longenough"});

    let first = post(router.clone(), "/api/auth/register", None, body.clone()).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = post(router, "/api/auth/register", None, body).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"]["code"], "RESOURCE_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_login_wrong_password_rejected() {
    let resources = create_test_resources().await.unwrap();
    let router = routes::router(resources);

    post(
        router.clone(),
        "/api/auth/register",
        None,
        json!({"email": "eve@example.com", "password": "longenough"}),
    )
    .await;

    let response = post(
        router,
        "/api/auth/login",
        None,
        json!({"email": "eve@example.com", "password": "wrongwrong"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"]["code"], "AUTH_INVALID");
}

#[tokio::test]
async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
    let resources = create_test_resources().await.unwrap();
    let router = routes::router(resources);

    let response = post(
        router,
        "/api/auth/login",
        None,
        json!({"email": "ghost@example.com", "password": "whatever1"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"]["code"], "AUTH_INVALID");
}

#[tokio::test]
async fn test_logout_revokes_the_session() {
    let (resources, _user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);

    let before = get(router.clone(), "/api/auth/session", Some(&auth)).await;
    assert_eq!(before.status, StatusCode::OK);

    let logout = common::send(
        router.clone(),
        axum::http::Method::POST,
        "/api/auth/logout",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(logout.status, StatusCode::NO_CONTENT);

    // The same token no longer resolves to a session
    let after = get(router, "/api/auth/session", Some(&auth)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_and_malformed_tokens_rejected() {
    let resources = create_test_resources().await.unwrap();
    let router = routes::router(resources);

    let missing = get(router.clone(), "/api/auth/session", None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error"]["code"], "AUTH_REQUIRED");

    let malformed = get(router, "/api/auth/session", Some("Bearer not-a-jwt")).await;
    assert_eq!(malformed.status, StatusCode::UNAUTHORIZED);
    assert_eq!(malformed.body["error"]["code"], "AUTH_INVALID");
}

#[tokio::test]
async fn test_login_publishes_session_event() {
    let resources = create_test_resources().await.unwrap();
    let mut events = resources.session_events.subscribe();
    let router = routes::router(resources);

    post(
        router.clone(),
        "/api/auth/register",
        None,
        json!({"email": "sub@example.com", "password": "longenough"}),
    )
    .await;
    post(
        router,
        "/api/auth/login",
        None,
        json!({"email": "sub@example.com", "password": "longenough"}),
    )
    .await;

    match events.recv().await.unwrap() {
        SessionEvent::SignedIn { .. } => {}
        other => panic!("expected a signed-in event, got {other:?}"),
    }
}
