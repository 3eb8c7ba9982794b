// ABOUTME: User authentication route handlers for registration, login, and sign-out
// ABOUTME: Validates credentials, issues session tokens, and records sessions

//! Authentication routes
//!
//! Registration validates email shape and password strength before hashing.
//! Login issues a signed token whose session id is recorded server-side, so
//! sign-out can revoke it before expiry. Both directions publish session
//! lifecycle events.

use crate::{
    auth::SessionEvent,
    constants::limits,
    errors::AppError,
    models::User,
    resources::ServerResources,
    routes::authenticate,
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Request/Response Types
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Email address
    pub email: String,
    /// Plain-text password, hashed before storage
    pub password: String,
    /// Optional display name attached to the new account
    pub display_name: Option<String>,
}

/// User registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Identifier of the new account
    pub user_id: String,
    /// Human-readable confirmation
    pub message: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// User info for login and session responses
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    /// Account identifier
    pub user_id: String,
    /// Email address
    pub email: String,
    /// Display name, when set
    pub display_name: Option<String>,
}

/// User login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed bearer token
    pub jwt_token: String,
    /// Token expiry, RFC 3339
    pub expires_at: String,
    /// The authenticated user
    pub user: UserInfo,
}

/// Current session response
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    /// The authenticated user
    pub user: UserInfo,
    /// Session identifier from the token
    pub session_id: String,
}

// ============================================================================
// Authentication service
// ============================================================================

/// Authentication business logic behind the route handlers
#[derive(Clone)]
pub struct AuthService {
    resources: Arc<ServerResources>,
}

impl AuthService {
    /// Create the service over shared resources
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Handle user registration
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed email or weak password, a
    /// conflict when the email is taken, or a database error.
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, AppError> {
        tracing::info!("User registration attempt for email: {}", request.email);

        if !Self::is_valid_email(&request.email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }

        if request.password.len() < limits::MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {} characters",
                limits::MIN_PASSWORD_LENGTH
            )));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        let user = User::new(request.email.clone(), password_hash, request.display_name);
        let user_id = self.resources.database.create_user(&user).await?;

        tracing::info!("User registered successfully: {} ({user_id})", request.email);

        Ok(RegisterResponse {
            user_id: user_id.to_string(),
            message: "User registered successfully".into(),
        })
    }

    /// Handle user login
    ///
    /// # Errors
    ///
    /// Returns `AUTH_INVALID` for unknown email or wrong password without
    /// revealing which, or a database error.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        tracing::info!("User login attempt for email: {}", request.email);

        let user = self
            .resources
            .database
            .get_user_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

        // bcrypt is CPU-bound; keep it off the async executor
        let password = request.password;
        let password_hash = user.password_hash.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
                .await
                .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            tracing::warn!("Invalid password for user: {}", request.email);
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        if !user.is_active {
            return Err(AppError::permission_denied("Account is deactivated"));
        }

        let session = self.resources.auth_manager.create_session(&user)?;
        self.resources
            .database
            .record_session(session.session_id, user.id, session.expires_at)
            .await?;
        self.resources.database.update_last_active(user.id).await?;

        self.resources
            .session_events
            .publish(SessionEvent::SignedIn { user_id: user.id });

        tracing::info!("User logged in successfully: {} ({})", request.email, user.id);

        Ok(LoginResponse {
            jwt_token: session.jwt_token,
            expires_at: session.expires_at.to_rfc3339(),
            user: UserInfo {
                user_id: user.id.to_string(),
                email: user.email,
                display_name: user.display_name,
            },
        })
    }

    fn is_valid_email(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
    }
}

// ============================================================================
// Auth Routes
// ============================================================================

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/logout", post(Self::handle_logout))
            .route("/api/auth/session", get(Self::handle_session))
            .with_state(resources)
    }

    /// Handle registration request
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let response = AuthService::new(resources).register(request).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle login request
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let response = AuthService::new(resources).login(request).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle sign-out: revoke the session behind the presented token
    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        let revoked = resources.database.revoke_session(auth.session_id).await?;
        if revoked {
            resources
                .session_events
                .publish(SessionEvent::SignedOut {
                    user_id: auth.user_id,
                });
            tracing::info!("User signed out: {}", auth.user_id);
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle session retrieval for the presented token
    async fn handle_session(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        let user = resources
            .database
            .get_user(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user"))?;

        let response = SessionResponse {
            user: UserInfo {
                user_id: user.id.to_string(),
                email: user.email,
                display_name: user.display_name,
            },
            session_id: auth.session_id.to_string(),
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(AuthService::is_valid_email("user@example.com"));
        assert!(!AuthService::is_valid_email("userexample.com"));
        assert!(!AuthService::is_valid_email("@example.com"));
        assert!(!AuthService::is_valid_email("user@nodot"));
    }
}
