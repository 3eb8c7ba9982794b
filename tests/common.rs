// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, resources, user creation, and request helpers

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

//! Shared test utilities for `stride_server` integration tests

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use std::sync::{Arc, Once};
use stride_server::auth::generate_jwt_secret;
use stride_server::config::{CacheSettings, DatabaseUrl, Environment, LogLevel, ServerConfig};
use stride_server::database::Database;
use stride_server::errors::AppResult;
use stride_server::models::User;
use stride_server::resources::ServerResources;
use tower::ServiceExt;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup (in-memory)
pub async fn create_test_database() -> AppResult<Arc<Database>> {
    init_test_logging();
    let database = Arc::new(Database::new("sqlite::memory:").await?);
    Ok(database)
}

/// Test server configuration over an in-memory database
pub fn create_test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        database_url: DatabaseUrl::Memory,
        jwt_secret: generate_jwt_secret().unwrap().to_vec(),
        token_expiry_hours: 24,
        environment: Environment::Testing,
        log_level: LogLevel::Warn,
        cache: CacheSettings::default(),
        fdc: None,
    }
}

/// Full resource container over a fresh in-memory database
pub async fn create_test_resources() -> AppResult<Arc<ServerResources>> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    let resources = ServerResources::new(database, Arc::new(create_test_config()))?;
    Ok(Arc::new(resources))
}

/// Create a standard test user
pub async fn create_test_user(database: &Database) -> AppResult<(Uuid, User)> {
    create_test_user_with_email(database, "test@example.com").await
}

/// Create a test user with a custom email
pub async fn create_test_user_with_email(
    database: &Database,
    email: &str,
) -> AppResult<(Uuid, User)> {
    let user = User::new(
        email.to_owned(),
        bcrypt::hash("correct-horse-battery", 4).unwrap(),
        Some("Test User".to_owned()),
    );
    let user_id = user.id;

    database.create_user(&user).await?;
    Ok((user_id, user))
}

/// Issue a recorded session token for a user, as login would
pub async fn issue_token(resources: &ServerResources, user: &User) -> AppResult<String> {
    let session = resources.auth_manager.create_session(user)?;
    resources
        .database
        .record_session(session.session_id, user.id, session.expires_at)
        .await?;
    Ok(session.jwt_token)
}

/// Convenience: resources plus an authenticated user's bearer header
pub async fn setup_authenticated() -> (Arc<ServerResources>, Uuid, String) {
    let resources = create_test_resources().await.unwrap();
    let (user_id, user) = create_test_user(&resources.database).await.unwrap();
    let token = issue_token(&resources, &user).await.unwrap();
    (resources, user_id, format!("Bearer {token}"))
}

// ============================================================================
// In-process HTTP helpers
// ============================================================================

/// Response captured from an in-process request
pub struct TestResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl TestResponse {
    /// Deserialize the body into a typed value
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_value(self.body.clone()).expect("response body did not match type")
    }
}

/// Execute one request against a router built from the test resources
pub async fn send(
    router: Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<serde_json::Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let response = router.oneshot(request).await.expect("request failed");
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    TestResponse { status, body }
}

/// GET shorthand
pub async fn get(router: Router, uri: &str, auth: Option<&str>) -> TestResponse {
    send(router, Method::GET, uri, auth, None).await
}

/// POST shorthand
pub async fn post(
    router: Router,
    uri: &str,
    auth: Option<&str>,
    body: serde_json::Value,
) -> TestResponse {
    send(router, Method::POST, uri, auth, Some(body)).await
}

/// PATCH shorthand
pub async fn patch(
    router: Router,
    uri: &str,
    auth: Option<&str>,
    body: serde_json::Value,
) -> TestResponse {
    send(router, Method::PATCH, uri, auth, Some(body)).await
}

/// DELETE shorthand
pub async fn delete(router: Router, uri: &str, auth: Option<&str>) -> TestResponse {
    send(router, Method::DELETE, uri, auth, None).await
}
