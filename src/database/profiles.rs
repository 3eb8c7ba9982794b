// ABOUTME: User profile database operations
// ABOUTME: One row per user, stored as a JSON document with explicit timestamps

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{UserProfile, UserProfilePatch};
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

/// Profile payload persisted as a JSON document
///
/// Everything except the key and timestamps lives in the document, so adding
/// an onboarding question never needs a schema migration.
#[derive(serde::Serialize, serde::Deserialize)]
struct ProfileDocument {
    full_name: String,
    nickname: Option<String>,
    gender: Option<crate::models::Gender>,
    date_of_birth: Option<chrono::NaiveDate>,
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
    unit_system: crate::models::UnitSystem,
    fitness_goal: Option<crate::models::FitnessGoal>,
    activity_level: Option<crate::models::ActivityLevel>,
    goes_to_gym: Option<bool>,
    gym_experience: Option<crate::models::GymExperience>,
    workout_time: Option<crate::models::WorkoutTime>,
    workout_days_per_week: Option<i64>,
    diet_type: Option<crate::models::DietType>,
    allergies: Vec<String>,
    meals_per_day: Option<i64>,
    uses_supplements: Option<bool>,
    motivation_level: Option<i64>,
    biggest_challenge: Option<String>,
    wants_reminders: Option<bool>,
    onboarding_completed: bool,
    onboarding_step: Option<i64>,
}

impl ProfileDocument {
    fn from_patch(patch: UserProfilePatch) -> AppResult<Self> {
        let full_name = patch
            .full_name
            .ok_or_else(|| AppError::invalid_input("full_name is required to create a profile"))?;
        Ok(Self {
            full_name,
            nickname: patch.nickname,
            gender: patch.gender,
            date_of_birth: patch.date_of_birth,
            height_cm: patch.height_cm,
            weight_kg: patch.weight_kg,
            unit_system: patch.unit_system.unwrap_or_default(),
            fitness_goal: patch.fitness_goal,
            activity_level: patch.activity_level,
            goes_to_gym: patch.goes_to_gym,
            gym_experience: patch.gym_experience,
            workout_time: patch.workout_time,
            workout_days_per_week: patch.workout_days_per_week,
            diet_type: patch.diet_type,
            allergies: patch.allergies.unwrap_or_default(),
            meals_per_day: patch.meals_per_day,
            uses_supplements: patch.uses_supplements,
            motivation_level: patch.motivation_level,
            biggest_challenge: patch.biggest_challenge,
            wants_reminders: patch.wants_reminders,
            onboarding_completed: patch.onboarding_completed.unwrap_or(false),
            onboarding_step: patch.onboarding_step,
        })
    }

    fn apply(&mut self, patch: UserProfilePatch) {
        if let Some(v) = patch.full_name {
            self.full_name = v;
        }
        if let Some(v) = patch.nickname {
            self.nickname = Some(v);
        }
        if let Some(v) = patch.gender {
            self.gender = Some(v);
        }
        if let Some(v) = patch.date_of_birth {
            self.date_of_birth = Some(v);
        }
        if let Some(v) = patch.height_cm {
            self.height_cm = Some(v);
        }
        if let Some(v) = patch.weight_kg {
            self.weight_kg = Some(v);
        }
        if let Some(v) = patch.unit_system {
            self.unit_system = v;
        }
        if let Some(v) = patch.fitness_goal {
            self.fitness_goal = Some(v);
        }
        if let Some(v) = patch.activity_level {
            self.activity_level = Some(v);
        }
        if let Some(v) = patch.goes_to_gym {
            self.goes_to_gym = Some(v);
        }
        if let Some(v) = patch.gym_experience {
            self.gym_experience = Some(v);
        }
        if let Some(v) = patch.workout_time {
            self.workout_time = Some(v);
        }
        if let Some(v) = patch.workout_days_per_week {
            self.workout_days_per_week = Some(v);
        }
        if let Some(v) = patch.diet_type {
            self.diet_type = Some(v);
        }
        if let Some(v) = patch.allergies {
            self.allergies = v;
        }
        if let Some(v) = patch.meals_per_day {
            self.meals_per_day = Some(v);
        }
        if let Some(v) = patch.uses_supplements {
            self.uses_supplements = Some(v);
        }
        if let Some(v) = patch.motivation_level {
            self.motivation_level = Some(v);
        }
        if let Some(v) = patch.biggest_challenge {
            self.biggest_challenge = Some(v);
        }
        if let Some(v) = patch.wants_reminders {
            self.wants_reminders = Some(v);
        }
        if let Some(v) = patch.onboarding_completed {
            self.onboarding_completed = v;
        }
        if let Some(v) = patch.onboarding_step {
            self.onboarding_step = Some(v);
        }
    }

    fn into_profile(
        self,
        user_id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> UserProfile {
        UserProfile {
            user_id,
            full_name: self.full_name,
            nickname: self.nickname,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            unit_system: self.unit_system,
            fitness_goal: self.fitness_goal,
            activity_level: self.activity_level,
            goes_to_gym: self.goes_to_gym,
            gym_experience: self.gym_experience,
            workout_time: self.workout_time,
            workout_days_per_week: self.workout_days_per_week,
            diet_type: self.diet_type,
            allergies: self.allergies,
            meals_per_day: self.meals_per_day,
            uses_supplements: self.uses_supplements,
            motivation_level: self.motivation_level,
            biggest_challenge: self.biggest_challenge,
            wants_reminders: self.wants_reminders,
            onboarding_completed: self.onboarding_completed,
            onboarding_step: self.onboarding_step,
            created_at,
            updated_at,
        }
    }
}

impl Database {
    /// Create the profile table
    pub(super) async fn migrate_profiles(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_profiles (
                user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                profile_data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get a user's profile
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored document is corrupt
    pub async fn get_user_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query(
            "SELECT profile_data, created_at, updated_at FROM user_profiles WHERE user_id = $1",
        )
        .bind(user_id.to_string())
        .fetch_optional(self.pool())
        .await?;

        row.map(|r| {
            let document: ProfileDocument = serde_json::from_str(&r.get::<String, _>("profile_data"))?;
            Ok(document.into_profile(
                user_id,
                r.get::<DateTime<Utc>, _>("created_at"),
                r.get::<DateTime<Utc>, _>("updated_at"),
            ))
        })
        .transpose()
    }

    /// Create a user's profile from onboarding data
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if a profile exists,
    /// `INVALID_INPUT` if the required name is missing, or a database error.
    pub async fn create_user_profile(
        &self,
        user_id: Uuid,
        patch: UserProfilePatch,
    ) -> AppResult<UserProfile> {
        if self.get_user_profile(user_id).await?.is_some() {
            return Err(AppError::already_exists("profile"));
        }

        let document = ProfileDocument::from_patch(patch)?;
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO user_profiles (user_id, profile_data, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            ",
        )
        .bind(user_id.to_string())
        .bind(serde_json::to_string(&document)?)
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(document.into_profile(user_id, now, now))
    }

    /// Apply a partial update to a user's profile
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if no profile exists yet, or a database
    /// error if the update fails.
    pub async fn update_user_profile(
        &self,
        user_id: Uuid,
        patch: UserProfilePatch,
    ) -> AppResult<UserProfile> {
        let existing = self
            .get_user_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("profile"))?;

        let created_at = existing.created_at;
        let mut document = ProfileDocument {
            full_name: existing.full_name,
            nickname: existing.nickname,
            gender: existing.gender,
            date_of_birth: existing.date_of_birth,
            height_cm: existing.height_cm,
            weight_kg: existing.weight_kg,
            unit_system: existing.unit_system,
            fitness_goal: existing.fitness_goal,
            activity_level: existing.activity_level,
            goes_to_gym: existing.goes_to_gym,
            gym_experience: existing.gym_experience,
            workout_time: existing.workout_time,
            workout_days_per_week: existing.workout_days_per_week,
            diet_type: existing.diet_type,
            allergies: existing.allergies,
            meals_per_day: existing.meals_per_day,
            uses_supplements: existing.uses_supplements,
            motivation_level: existing.motivation_level,
            biggest_challenge: existing.biggest_challenge,
            wants_reminders: existing.wants_reminders,
            onboarding_completed: existing.onboarding_completed,
            onboarding_step: existing.onboarding_step,
        };
        document.apply(patch);

        let now = Utc::now();

        sqlx::query(
            "UPDATE user_profiles SET profile_data = $2, updated_at = $3 WHERE user_id = $1",
        )
        .bind(user_id.to_string())
        .bind(serde_json::to_string(&document)?)
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(document.into_profile(user_id, created_at, now))
    }
}
