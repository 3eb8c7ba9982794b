// ABOUTME: Coach conversation database operations
// ABOUTME: Append-only exchange log (user message + coach reply) per user

use super::{parse_uuid, Database};
use crate::errors::AppResult;
use crate::models::CoachExchange;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the coach exchange table
    pub(super) async fn migrate_coach(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS coach_exchanges (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                message TEXT NOT NULL,
                reply TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_coach_user_created \
             ON coach_exchanges(user_id, created_at)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Append one exchange to a user's conversation
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn record_coach_exchange(
        &self,
        user_id: Uuid,
        message: &str,
        reply: &str,
    ) -> AppResult<CoachExchange> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO coach_exchanges (id, user_id, message, reply, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(message)
        .bind(reply)
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(CoachExchange {
            id,
            user_id,
            message: message.to_owned(),
            reply: reply.to_owned(),
            created_at: now,
        })
    }

    /// List a user's conversation in chronological order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn coach_history(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<CoachExchange>> {
        // Take the newest rows, then flip back to chronological order
        let rows = sqlx::query(
            r"
            SELECT id, user_id, message, reply, created_at
            FROM coach_exchanges
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        let mut exchanges = rows
            .into_iter()
            .map(row_to_exchange)
            .collect::<AppResult<Vec<_>>>()?;
        exchanges.reverse();
        Ok(exchanges)
    }

    /// Delete a user's entire conversation
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn clear_coach_history(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM coach_exchanges WHERE user_id = $1")
            .bind(user_id.to_string())
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected())
    }
}

fn row_to_exchange(row: SqliteRow) -> AppResult<CoachExchange> {
    Ok(CoachExchange {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
        message: row.get("message"),
        reply: row.get("reply"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    })
}
