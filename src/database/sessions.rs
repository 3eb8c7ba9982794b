// ABOUTME: Server-side session registry keyed by token jti
// ABOUTME: Records login sessions so sign-out revokes tokens before expiry

use super::Database;
use crate::errors::AppResult;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the session registry table
    pub(super) async fn migrate_sessions(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                expires_at TEXT NOT NULL,
                revoked_at TEXT
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_sessions_user ON user_sessions(user_id)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Record a session issued at login
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn record_session(
        &self,
        session_id: Uuid,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_sessions (id, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(session_id.to_string())
        .bind(user_id.to_string())
        .bind(Utc::now())
        .bind(expires_at)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Check whether a session is live: recorded, unrevoked, and unexpired
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn is_session_active(&self, session_id: Uuid) -> AppResult<bool> {
        let row = sqlx::query(
            "SELECT expires_at, revoked_at FROM user_sessions WHERE id = $1",
        )
        .bind(session_id.to_string())
        .fetch_optional(self.pool())
        .await?;

        Ok(row.is_some_and(|r| {
            let expires_at: DateTime<Utc> = r.get("expires_at");
            let revoked_at: Option<DateTime<Utc>> = r.get("revoked_at");
            revoked_at.is_none() && expires_at > Utc::now()
        }))
    }

    /// Revoke a session at sign-out; revoking twice is a no-op
    ///
    /// Returns whether a live session was actually revoked.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn revoke_session(&self, session_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE user_sessions SET revoked_at = $2 WHERE id = $1 AND revoked_at IS NULL",
        )
        .bind(session_id.to_string())
        .bind(Utc::now())
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
