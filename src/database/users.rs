// ABOUTME: User account database operations
// ABOUTME: Handles account creation, lookup by id and email, and activity tracking

use super::{parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::User;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the accounts table
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                display_name TEXT,
                password_hash TEXT NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                last_active TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Create a user account
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if the email is taken, or a database
    /// error if the insert fails.
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        if self.get_user_by_email(&user.email).await?.is_some() {
            return Err(AppError::already_exists("account with this email"));
        }

        sqlx::query(
            r"
            INSERT INTO users (id, email, display_name, password_hash, is_active, created_at, last_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.last_active)
        .execute(self.pool())
        .await?;

        Ok(user.id)
    }

    /// Get a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        self.get_user_impl("id", &user_id.to_string()).await
    }

    /// Get a user by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.get_user_impl("email", email).await
    }

    /// Bump the last-active timestamp after a successful login
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails
    pub async fn update_last_active(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_active = $2 WHERE id = $1")
            .bind(user_id.to_string())
            .bind(Utc::now())
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn get_user_impl(&self, column: &str, value: &str) -> AppResult<Option<User>> {
        // Column name comes from a fixed internal set, never from input
        let query = format!(
            "SELECT id, email, display_name, password_hash, is_active, created_at, last_active \
             FROM users WHERE {column} = $1"
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(self.pool())
            .await?;

        row.map(|r| {
            Ok(User {
                id: parse_uuid(&r.get::<String, _>("id"))?,
                email: r.get("email"),
                display_name: r.get("display_name"),
                password_hash: r.get("password_hash"),
                is_active: r.get("is_active"),
                created_at: r.get::<DateTime<Utc>, _>("created_at"),
                last_active: r.get::<DateTime<Utc>, _>("last_active"),
            })
        })
        .transpose()
    }
}
