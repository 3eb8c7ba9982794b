// ABOUTME: Database management over SQLite for accounts and health records
// ABOUTME: Owns the connection pool, migrations, and shared row helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Health

//! # Database Management
//!
//! Persistence layer for the Stride server. Single-row reads return
//! `AppResult<Option<T>>`: `None` is the normal "no row" case, while every
//! real failure surfaces as a typed [`AppError`] — callers always can tell
//! the two apart.

mod coach;
mod food;
mod journal;
mod profiles;
mod sessions;
mod stats;
mod users;
mod workouts;

pub use food::NewFoodEntry;
pub use journal::NewJournalEntry;
pub use workouts::NewWorkout;

use crate::errors::{AppError, AppResult};
use sqlx::{Pool, Sqlite, SqlitePool};
use uuid::Uuid;

/// Database manager for account and health-record storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration statement fails.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains(":memory:")
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_profiles().await?;
        self.migrate_sessions().await?;
        self.migrate_stats().await?;
        self.migrate_workouts().await?;
        self.migrate_food().await?;
        self.migrate_journal().await?;
        self.migrate_coach().await?;
        Ok(())
    }

    /// Verify the connection is usable (liveness probe)
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer a trivial query
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Parse a stored UUID column, mapping corruption to a database error
pub(crate) fn parse_uuid(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| AppError::database(format!("Invalid UUID in database: {raw} ({e})")))
}
