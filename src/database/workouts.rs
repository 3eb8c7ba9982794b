// ABOUTME: Workout session database operations
// ABOUTME: Append-only log of completed workouts with recency-ordered listing

use super::{parse_uuid, Database};
use crate::errors::AppResult;
use crate::models::WorkoutSession;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// Fields supplied by the client when logging a workout
#[derive(Debug, Clone)]
pub struct NewWorkout {
    /// Workout name
    pub name: String,
    /// Workout type (strength, cardio, hiit, ...)
    pub workout_type: String,
    /// Duration in minutes
    pub duration_minutes: i64,
    /// Calories burned, when tracked
    pub calories_burned: Option<i64>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl Database {
    /// Create the workout sessions table
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                workout_type TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                calories_burned INTEGER,
                notes TEXT,
                completed_at TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workouts_user_completed \
             ON workout_sessions(user_id, completed_at DESC)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Append a completed workout
    ///
    /// Completion and creation timestamps are assigned here, not by the
    /// client.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn log_workout(
        &self,
        user_id: Uuid,
        workout: NewWorkout,
    ) -> AppResult<WorkoutSession> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO workout_sessions (
                id, user_id, name, workout_type, duration_minutes,
                calories_burned, notes, completed_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(&workout.name)
        .bind(&workout.workout_type)
        .bind(workout.duration_minutes)
        .bind(workout.calories_burned)
        .bind(&workout.notes)
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(WorkoutSession {
            id,
            user_id,
            name: workout.name,
            workout_type: workout.workout_type,
            duration_minutes: workout.duration_minutes,
            calories_burned: workout.calories_burned,
            notes: workout.notes,
            completed_at: now,
            created_at: now,
        })
    }

    /// List a user's workouts, most recent first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn recent_workouts(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<WorkoutSession>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, workout_type, duration_minutes,
                   calories_burned, notes, completed_at, created_at
            FROM workout_sessions
            WHERE user_id = $1
            ORDER BY completed_at DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(row_to_workout).collect()
    }

    /// Total workouts and minutes ever logged by a user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn workout_totals(&self, user_id: Uuid) -> AppResult<(i64, i64)> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS n, COALESCE(SUM(duration_minutes), 0) AS minutes \
             FROM workout_sessions WHERE user_id = $1",
        )
        .bind(user_id.to_string())
        .fetch_one(self.pool())
        .await?;

        Ok((row.get("n"), row.get("minutes")))
    }
}

fn row_to_workout(row: SqliteRow) -> AppResult<WorkoutSession> {
    Ok(WorkoutSession {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
        name: row.get("name"),
        workout_type: row.get("workout_type"),
        duration_minutes: row.get("duration_minutes"),
        calories_burned: row.get("calories_burned"),
        notes: row.get("notes"),
        completed_at: row.get::<DateTime<Utc>, _>("completed_at"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    })
}
