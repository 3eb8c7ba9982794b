// ABOUTME: Journal entry database operations
// ABOUTME: Append-only wellbeing log with score validation and recency listing

use super::{parse_uuid, Database};
use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::models::JournalEntry;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// Fields supplied by the client when creating a journal entry
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    /// Mood score, 1-10
    pub mood: Option<i64>,
    /// Energy score, 1-10
    pub energy_level: Option<i64>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Calendar day the entry belongs to
    pub date: NaiveDate,
}

impl Database {
    /// Create the journal entries table
    pub(super) async fn migrate_journal(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS journal_entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                mood INTEGER CHECK (mood BETWEEN 1 AND 10),
                energy_level INTEGER CHECK (energy_level BETWEEN 1 AND 10),
                notes TEXT,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_journal_user_date \
             ON journal_entries(user_id, date DESC)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Append a journal entry
    ///
    /// # Errors
    ///
    /// Returns `VALUE_OUT_OF_RANGE` for scores outside 1..=10, or a database
    /// error if the insert fails.
    pub async fn create_journal_entry(
        &self,
        user_id: Uuid,
        entry: NewJournalEntry,
    ) -> AppResult<JournalEntry> {
        for (field, value) in [("mood", entry.mood), ("energy_level", entry.energy_level)] {
            if let Some(score) = value {
                if !(limits::SCORE_MIN..=limits::SCORE_MAX).contains(&score) {
                    return Err(AppError::new(
                        crate::errors::ErrorCode::ValueOutOfRange,
                        format!(
                            "{field} must be between {} and {}",
                            limits::SCORE_MIN,
                            limits::SCORE_MAX
                        ),
                    ));
                }
            }
        }

        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO journal_entries (id, user_id, mood, energy_level, notes, date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(entry.mood)
        .bind(entry.energy_level)
        .bind(&entry.notes)
        .bind(entry.date)
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(JournalEntry {
            id,
            user_id,
            mood: entry.mood,
            energy_level: entry.energy_level,
            notes: entry.notes,
            date: entry.date,
            created_at: now,
        })
    }

    /// List a user's journal entries, newest day first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn recent_journal_entries(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<JournalEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, mood, energy_level, notes, date, created_at
            FROM journal_entries
            WHERE user_id = $1
            ORDER BY date DESC, created_at DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(row_to_journal).collect()
    }
}

fn row_to_journal(row: SqliteRow) -> AppResult<JournalEntry> {
    Ok(JournalEntry {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
        mood: row.get("mood"),
        energy_level: row.get("energy_level"),
        notes: row.get("notes"),
        date: row.get::<NaiveDate, _>("date"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    })
}
