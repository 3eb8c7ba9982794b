// ABOUTME: JWT-based user authentication and session lifecycle management
// ABOUTME: Handles token generation, validation, revocation checks, and events
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Health

//! # Authentication and Session Management
//!
//! Sessions are explicit data, not ambient state: every login issues a token
//! whose `jti` is recorded in the session registry, sign-out revokes that row,
//! and the middleware rejects tokens whose session is gone. Lifecycle changes
//! are observable through [`SessionEvents`].

use crate::constants::service;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{User, UserSession};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
    },
    /// Token signature is invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired { expired_at } => {
                write!(
                    f,
                    "JWT token expired at {}",
                    expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                )
            }
            Self::TokenInvalid { reason } => {
                write!(f, "JWT token signature is invalid: {reason}")
            }
            Self::TokenMalformed { details } => {
                write!(f, "JWT token is malformed: {details}")
            }
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            other => Self::auth_invalid(other.to_string()),
        }
    }
}

/// `JWT` claims for user authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// User email
    pub email: String,
    /// Session identifier, matched against the session registry
    pub jti: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
}

/// Authenticated request context produced by the middleware
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// Authenticated user `ID`
    pub user_id: Uuid,
    /// Session identifier from the token
    pub session_id: Uuid,
    /// Email of the authenticated user
    pub email: String,
}

/// Authentication manager for session tokens
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
    /// Monotonic counter to ensure unique issued-at values
    token_counter: AtomicU64,
}

impl AuthManager {
    /// Create a new authentication manager from a signing secret
    #[must_use]
    pub fn new(jwt_secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret),
            decoding_key: DecodingKey::from_secret(jwt_secret),
            token_expiry_hours,
            token_counter: AtomicU64::new(0),
        }
    }

    /// Generate a signed session token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User, session_id: Uuid) -> AppResult<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        // Atomic counter keeps issued-at values unique across rapid calls
        let counter = self.token_counter.fetch_add(1, Ordering::Relaxed);
        let unique_iat = now.timestamp() * 1000 + i64::from(u32::try_from(counter % 1000).unwrap_or(0));

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            jti: session_id.to_string(),
            iat: unique_iat,
            exp: expiry.timestamp(),
            aud: service::NAME.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign session token: {e}")))
    }

    /// Validate a token with detailed error information
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] describing whether the token is
    /// expired, carries an invalid signature, or is malformed.
    pub fn validate_token_detailed(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let claims = self.decode_token_claims(token)?;

        if Utc::now().timestamp() > claims.exp {
            let expired_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now);
            tracing::warn!(
                "JWT token expired for user: {} at {}",
                claims.sub,
                expired_at.to_rfc3339()
            );
            return Err(JwtValidationError::TokenExpired { expired_at });
        }

        Ok(claims)
    }

    /// Decode token claims without expiration validation
    fn decode_token_claims(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_audience(&[service::NAME]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;
        tracing::warn!("JWT token validation failed: {:?}", e);

        match e.kind() {
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }

    /// Create a session for a user: a fresh session id plus a signed token
    ///
    /// # Errors
    ///
    /// Returns an error if token generation fails
    pub fn create_session(&self, user: &User) -> AppResult<UserSession> {
        let session_id = Uuid::new_v4();
        let jwt_token = self.generate_token(user, session_id)?;
        let expires_at = Utc::now() + Duration::hours(self.token_expiry_hours);

        Ok(UserSession {
            user_id: user.id,
            session_id,
            jwt_token,
            expires_at,
            email: user.email.clone(),
        })
    }
}

/// Generate a random signing secret
///
/// # Errors
///
/// Returns an error if the system RNG fails; the server cannot operate
/// securely without working RNG.
pub fn generate_jwt_secret() -> AppResult<[u8; 64]> {
    use ring::rand::{SecureRandom, SystemRandom};

    let rng = SystemRandom::new();
    let mut secret = [0u8; 64];

    rng.fill(&mut secret).map_err(|e| {
        tracing::error!("Failed to generate cryptographically secure JWT secret: {e:?}");
        AppError::internal("System RNG failure - cannot generate secure JWT secret")
    })?;

    Ok(secret)
}

// ============================================================================
// Request authentication middleware
// ============================================================================

/// Authenticates bearer tokens against the signing key and session registry
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: Arc<AuthManager>,
    database: Arc<Database>,
}

impl AuthMiddleware {
    /// Create middleware over a shared manager and database
    #[must_use]
    pub fn new(auth_manager: Arc<AuthManager>, database: Arc<Database>) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Authenticate an `Authorization` header value
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` when the header is absent, `AUTH_EXPIRED` for
    /// expired tokens, and `AUTH_INVALID` for bad signatures, malformed
    /// tokens, or revoked sessions.
    pub async fn authenticate_request(&self, auth_header: Option<&str>) -> AppResult<AuthResult> {
        let header = auth_header.ok_or_else(AppError::auth_required)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::auth_invalid("Authorization header must be a bearer token"))?;

        let claims = self.auth_manager.validate_token_detailed(token)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Invalid user ID in token"))?;
        let session_id = Uuid::parse_str(&claims.jti)
            .map_err(|_| AppError::auth_invalid("Invalid session ID in token"))?;

        if !self.database.is_session_active(session_id).await? {
            return Err(AppError::auth_invalid("Session has been signed out"));
        }

        Ok(AuthResult {
            user_id,
            session_id,
            email: claims.email,
        })
    }
}

// ============================================================================
// Session change notifications
// ============================================================================

/// A session lifecycle change, broadcast to subscribers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A user signed in
    SignedIn {
        /// User that signed in
        user_id: Uuid,
    },
    /// A user signed out
    SignedOut {
        /// User that signed out
        user_id: Uuid,
    },
}

/// Broadcast channel for session lifecycle changes
///
/// Subscribers that fall behind lose the oldest events, which is fine for a
/// notification surface.
#[derive(Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    /// Create a channel with the given buffer capacity
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event; dropped silently when nobody is subscribed
    pub fn publish(&self, event: SessionEvent) {
        if let Err(e) = self.sender.send(event) {
            tracing::debug!("session event dropped, no subscribers: {e}");
        }
    }

    /// Subscribe to future events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new(64)
    }
}
