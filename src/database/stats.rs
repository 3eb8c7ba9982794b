// ABOUTME: Daily statistics database operations
// ABOUTME: One row per user per calendar day, written through an atomic upsert

use super::{parse_uuid, Database};
use crate::errors::AppResult;
use crate::models::{DailyStats, DailyStatsPatch};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the daily stats table
    ///
    /// `(user_id, date)` carries a uniqueness constraint; the upsert below
    /// depends on it.
    pub(super) async fn migrate_stats(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS daily_stats (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                steps INTEGER NOT NULL DEFAULT 0,
                calories_burned INTEGER NOT NULL DEFAULT 0,
                water_glasses INTEGER NOT NULL DEFAULT 0,
                workouts_completed INTEGER NOT NULL DEFAULT 0,
                weight_kg REAL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (user_id, date)
            )
            ",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get a user's stats for one calendar day
    ///
    /// Returns `None` before any counter has been written for that day.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_daily_stats(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<DailyStats>> {
        let row = sqlx::query(
            r"
            SELECT user_id, date, steps, calories_burned, water_glasses,
                   workouts_completed, weight_kg, created_at, updated_at
            FROM daily_stats
            WHERE user_id = $1 AND date = $2
            ",
        )
        .bind(user_id.to_string())
        .bind(date)
        .fetch_optional(self.pool())
        .await?;

        row.map(row_to_stats).transpose()
    }

    /// Merge a partial update into the user's row for one day
    ///
    /// A single conditional write: the insert seeds zero counters merged with
    /// the supplied fields, and on conflict with the existing `(user_id, date)`
    /// row each absent field keeps its stored value. Two concurrent calls with
    /// disjoint fields therefore end as one row holding the union of both.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails
    pub async fn upsert_daily_stats(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        patch: &DailyStatsPatch,
    ) -> AppResult<DailyStats> {
        let now = Utc::now();

        let row = sqlx::query(
            r"
            INSERT INTO daily_stats (
                user_id, date, steps, calories_burned, water_glasses,
                workouts_completed, weight_kg, created_at, updated_at
            )
            VALUES (
                $1, $2, COALESCE($3, 0), COALESCE($4, 0), COALESCE($5, 0),
                COALESCE($6, 0), $7, $8, $8
            )
            ON CONFLICT (user_id, date) DO UPDATE SET
                steps = COALESCE($3, daily_stats.steps),
                calories_burned = COALESCE($4, daily_stats.calories_burned),
                water_glasses = COALESCE($5, daily_stats.water_glasses),
                workouts_completed = COALESCE($6, daily_stats.workouts_completed),
                weight_kg = COALESCE($7, daily_stats.weight_kg),
                updated_at = $8
            RETURNING user_id, date, steps, calories_burned, water_glasses,
                      workouts_completed, weight_kg, created_at, updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(date)
        .bind(patch.steps)
        .bind(patch.calories_burned)
        .bind(patch.water_glasses)
        .bind(patch.workouts_completed)
        .bind(patch.weight_kg)
        .bind(now)
        .fetch_one(self.pool())
        .await?;

        row_to_stats(row)
    }
}

fn row_to_stats(row: SqliteRow) -> AppResult<DailyStats> {
    Ok(DailyStats {
        user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
        date: row.get::<NaiveDate, _>("date"),
        steps: row.get("steps"),
        calories_burned: row.get("calories_burned"),
        water_glasses: row.get("water_glasses"),
        workouts_completed: row.get("workouts_completed"),
        weight_kg: row.get("weight_kg"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    })
}
