// ABOUTME: Food entry database operations
// ABOUTME: Append-only food log with a half-open day-window listing

use super::{parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{FoodEntry, MealType};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;
use uuid::Uuid;

/// Fields supplied by the client when logging a food item
#[derive(Debug, Clone)]
pub struct NewFoodEntry {
    /// Food name
    pub food_name: String,
    /// Meal slot
    pub meal_type: MealType,
    /// Calories
    pub calories: Option<i64>,
    /// Protein in grams
    pub protein_g: Option<f64>,
    /// Carbohydrates in grams
    pub carbs_g: Option<f64>,
    /// Fat in grams
    pub fat_g: Option<f64>,
    /// Serving quantity as entered
    pub quantity: Option<String>,
}

impl Database {
    /// Create the food entries table
    pub(super) async fn migrate_food(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS food_entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                food_name TEXT NOT NULL,
                meal_type TEXT NOT NULL CHECK (meal_type IN ('breakfast', 'lunch', 'dinner', 'snack')),
                calories INTEGER,
                protein_g REAL,
                carbs_g REAL,
                fat_g REAL,
                quantity TEXT,
                logged_at TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_food_user_logged \
             ON food_entries(user_id, logged_at DESC)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Append a food entry, stamped with the current time
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn log_food(&self, user_id: Uuid, food: NewFoodEntry) -> AppResult<FoodEntry> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO food_entries (
                id, user_id, food_name, meal_type, calories,
                protein_g, carbs_g, fat_g, quantity, logged_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(&food.food_name)
        .bind(food.meal_type.as_str())
        .bind(food.calories)
        .bind(food.protein_g)
        .bind(food.carbs_g)
        .bind(food.fat_g)
        .bind(&food.quantity)
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(FoodEntry {
            id,
            user_id,
            food_name: food.food_name,
            meal_type: food.meal_type,
            calories: food.calories,
            protein_g: food.protein_g,
            carbs_g: food.carbs_g,
            fat_g: food.fat_g,
            quantity: food.quantity,
            logged_at: now,
            created_at: now,
        })
    }

    /// List a user's food entries for one calendar day, most recent first
    ///
    /// The window is half-open: entries at `00:00:00` of the day are
    /// included, everything from the next day's midnight on is not, so
    /// adjacent days never leak in.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn food_entries_for_day(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<FoodEntry>> {
        let day_start = date.and_time(NaiveTime::MIN).and_utc();
        let day_end = day_start + chrono::Duration::days(1);

        let rows = sqlx::query(
            r"
            SELECT id, user_id, food_name, meal_type, calories,
                   protein_g, carbs_g, fat_g, quantity, logged_at, created_at
            FROM food_entries
            WHERE user_id = $1 AND logged_at >= $2 AND logged_at < $3
            ORDER BY logged_at DESC
            ",
        )
        .bind(user_id.to_string())
        .bind(day_start)
        .bind(day_end)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(row_to_food).collect()
    }

    /// Count food entries ever logged by a user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn food_entry_count(&self, user_id: Uuid) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM food_entries WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_one(self.pool())
            .await?;

        Ok(row.get("n"))
    }
}

fn row_to_food(row: SqliteRow) -> AppResult<FoodEntry> {
    let meal_raw: String = row.get("meal_type");
    let meal_type = MealType::from_str(&meal_raw)
        .map_err(|e| AppError::database(format!("Invalid meal type in database: {e}")))?;

    Ok(FoodEntry {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
        food_name: row.get("food_name"),
        meal_type,
        calories: row.get("calories"),
        protein_g: row.get("protein_g"),
        carbs_g: row.get("carbs_g"),
        fat_g: row.get("fat_g"),
        quantity: row.get("quantity"),
        logged_at: row.get::<DateTime<Utc>, _>("logged_at"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    })
}
