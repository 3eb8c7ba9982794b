// ABOUTME: Common data models for accounts and per-user health records
// ABOUTME: Plain records mirroring rows in the store, with wire-format enums
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Health

//! # Data Models
//!
//! Plain records with no behavior beyond construction helpers. Every per-user
//! record carries the owning `user_id`; timestamps are assigned by the
//! persistence layer, never by clients.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Accounts
// ============================================================================

/// A user account (the authentication principal)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique account identifier
    pub id: Uuid,
    /// Email address (unique)
    pub email: String,
    /// Optional display name attached at sign-up
    pub display_name: Option<String>,
    /// Bcrypt password hash
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the account can sign in
    pub is_active: bool,
    /// Account creation time
    pub created_at: DateTime<Utc>,
    /// Last successful authentication time
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new account with a fresh id and current timestamps
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash,
            is_active: true,
            created_at: now,
            last_active: now,
        }
    }
}

/// An authenticated session handed to a client after login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    /// Owning user
    pub user_id: Uuid,
    /// Session identifier (the token's `jti` claim)
    pub session_id: Uuid,
    /// Signed bearer token
    pub jwt_token: String,
    /// Expiry time of the token
    pub expires_at: DateTime<Utc>,
    /// Email of the authenticated user
    pub email: String,
}

// ============================================================================
// Profile vocabulary
// ============================================================================

/// Self-reported gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Non-binary
    NonBinary,
    /// Declined to answer
    PreferNotToSay,
}

/// Primary fitness goal selected at onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitnessGoal {
    /// Weight loss
    LoseWeight,
    /// Muscle gain
    BuildMuscle,
    /// General fitness maintenance
    StayFit,
    /// Browsing without a committed goal
    JustExploring,
}

/// Baseline activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    /// Little to no exercise
    Sedentary,
    /// Light exercise 1-2 days per week
    Light,
    /// Moderate exercise 3-4 days per week
    Moderate,
    /// Hard exercise most days
    VeryActive,
}

/// Dietary preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietType {
    /// Vegetarian
    Vegetarian,
    /// Vegan
    Vegan,
    /// Ketogenic
    Keto,
    /// High protein
    HighProtein,
    /// No stated preference
    NoPreference,
}

/// Time spent training in a gym so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GymExperience {
    /// Under one month
    #[serde(rename = "less-than-1-month")]
    LessThanOneMonth,
    /// One to three months
    #[serde(rename = "1-3-months")]
    OneToThreeMonths,
    /// Three to six months
    #[serde(rename = "3-6-months")]
    ThreeToSixMonths,
    /// More than six months
    #[serde(rename = "6-plus-months")]
    SixPlusMonths,
}

/// Preferred workout time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkoutTime {
    /// Mornings
    Morning,
    /// Afternoons
    Afternoon,
    /// Evenings
    Evening,
    /// No fixed schedule
    Varies,
}

/// Measurement unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UnitSystem {
    /// Centimetres and kilograms
    #[default]
    Metric,
    /// Feet/inches and pounds
    Imperial,
}

/// Meal slot a food entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MealType {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
    /// Anything in between
    Snack,
}

impl MealType {
    /// Wire/storage form of the meal slot
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

impl std::str::FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" => Ok(Self::Snack),
            other => Err(format!("unknown meal type: {other}")),
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// Per-user profile captured by the onboarding flow, one row per user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Owning user
    pub user_id: Uuid,
    /// Full name
    pub full_name: String,
    /// Preferred short name
    pub nickname: Option<String>,
    /// Self-reported gender
    pub gender: Option<Gender>,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Height in centimetres
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
    /// Measurement unit preference
    pub unit_system: UnitSystem,
    /// Primary fitness goal
    pub fitness_goal: Option<FitnessGoal>,
    /// Baseline activity level
    pub activity_level: Option<ActivityLevel>,
    /// Whether the user trains in a gym
    pub goes_to_gym: Option<bool>,
    /// Gym experience bracket
    pub gym_experience: Option<GymExperience>,
    /// Preferred workout time
    pub workout_time: Option<WorkoutTime>,
    /// Planned training days per week
    pub workout_days_per_week: Option<i64>,
    /// Dietary preference
    pub diet_type: Option<DietType>,
    /// Known food allergies
    pub allergies: Vec<String>,
    /// Meals eaten per day
    pub meals_per_day: Option<i64>,
    /// Whether the user takes supplements
    pub uses_supplements: Option<bool>,
    /// Self-rated motivation, 1-10
    pub motivation_level: Option<i64>,
    /// Free-text biggest challenge
    pub biggest_challenge: Option<String>,
    /// Whether the user opted into reminders
    pub wants_reminders: Option<bool>,
    /// Whether onboarding finished
    pub onboarding_completed: bool,
    /// Last completed onboarding step, while in progress
    pub onboarding_step: Option<i64>,
    /// Row creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating or updating a profile
///
/// Every field is optional; absent fields keep their stored value on update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfilePatch {
    /// Full name
    pub full_name: Option<String>,
    /// Preferred short name
    pub nickname: Option<String>,
    /// Self-reported gender
    pub gender: Option<Gender>,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Height in centimetres
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
    /// Measurement unit preference
    pub unit_system: Option<UnitSystem>,
    /// Primary fitness goal
    pub fitness_goal: Option<FitnessGoal>,
    /// Baseline activity level
    pub activity_level: Option<ActivityLevel>,
    /// Whether the user trains in a gym
    pub goes_to_gym: Option<bool>,
    /// Gym experience bracket
    pub gym_experience: Option<GymExperience>,
    /// Preferred workout time
    pub workout_time: Option<WorkoutTime>,
    /// Planned training days per week
    pub workout_days_per_week: Option<i64>,
    /// Dietary preference
    pub diet_type: Option<DietType>,
    /// Known food allergies
    pub allergies: Option<Vec<String>>,
    /// Meals eaten per day
    pub meals_per_day: Option<i64>,
    /// Whether the user takes supplements
    pub uses_supplements: Option<bool>,
    /// Self-rated motivation, 1-10
    pub motivation_level: Option<i64>,
    /// Free-text biggest challenge
    pub biggest_challenge: Option<String>,
    /// Whether the user opted into reminders
    pub wants_reminders: Option<bool>,
    /// Whether onboarding finished
    pub onboarding_completed: Option<bool>,
    /// Last completed onboarding step
    pub onboarding_step: Option<i64>,
}

/// Daily activity counters, one row per user per calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStats {
    /// Owning user
    pub user_id: Uuid,
    /// Calendar day this row aggregates
    pub date: NaiveDate,
    /// Steps taken
    pub steps: i64,
    /// Calories burned
    pub calories_burned: i64,
    /// Glasses of water drunk
    pub water_glasses: i64,
    /// Workouts completed
    pub workouts_completed: i64,
    /// Optional daily weight log, kilograms
    pub weight_kg: Option<f64>,
    /// Row creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to a day's counters
///
/// Absent fields keep their stored value; on first write the stored value is
/// the zero baseline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyStatsPatch {
    /// Steps taken
    pub steps: Option<i64>,
    /// Calories burned
    pub calories_burned: Option<i64>,
    /// Glasses of water drunk
    pub water_glasses: Option<i64>,
    /// Workouts completed
    pub workouts_completed: Option<i64>,
    /// Daily weight log, kilograms
    pub weight_kg: Option<f64>,
}

impl DailyStatsPatch {
    /// True when no field is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_none()
            && self.calories_burned.is_none()
            && self.water_glasses.is_none()
            && self.workouts_completed.is_none()
            && self.weight_kg.is_none()
    }
}

/// A completed workout, append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Unique row id
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
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
    /// When the workout was completed
    pub completed_at: DateTime<Utc>,
    /// Row creation time
    pub created_at: DateTime<Utc>,
}

/// A logged food item, append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntry {
    /// Unique row id
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
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
    /// When the food was logged
    pub logged_at: DateTime<Utc>,
    /// Row creation time
    pub created_at: DateTime<Utc>,
}

/// A wellbeing journal entry, append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique row id
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Mood score, 1-10
    pub mood: Option<i64>,
    /// Energy score, 1-10
    pub energy_level: Option<i64>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Calendar day the entry belongs to
    pub date: NaiveDate,
    /// Row creation time
    pub created_at: DateTime<Utc>,
}

/// One coach exchange (user message and coach reply), append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachExchange {
    /// Unique row id
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// What the user asked
    pub message: String,
    /// What the coach answered
    pub reply: String,
    /// Row creation time
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new_defaults() {
        let user = User::new("a@example.com".into(), "hash".into(), Some("Ada".into()));
        assert!(user.is_active);
        assert_eq!(user.email, "a@example.com");
        assert_eq!(user.created_at, user.last_active);
    }

    #[test]
    fn test_enum_wire_format() {
        let goal = serde_json::to_string(&FitnessGoal::LoseWeight).unwrap();
        assert_eq!(goal, "\"lose-weight\"");

        let exp: GymExperience = serde_json::from_str("\"6-plus-months\"").unwrap();
        assert_eq!(exp, GymExperience::SixPlusMonths);

        let meal: MealType = serde_json::from_str("\"snack\"").unwrap();
        assert_eq!(meal, MealType::Snack);
    }

    #[test]
    fn test_stats_patch_is_empty() {
        assert!(DailyStatsPatch::default().is_empty());
        let patch = DailyStatsPatch {
            steps: Some(1000),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
