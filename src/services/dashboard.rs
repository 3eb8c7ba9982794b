// ABOUTME: Progress dashboard aggregation and data-derived achievements
// ABOUTME: Computes weekly summaries and achievement progress from stored rows

use crate::database::Database;
use crate::errors::AppResult;
use crate::models::{DailyStats, WorkoutSession};
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

/// Rows of recent workouts inspected for streaks and summaries
const STREAK_SAMPLE: i64 = 100;

/// Daily water target used by the hydration achievement
const HYDRATION_TARGET: i64 = 8;

/// Workouts summary over the trailing seven days
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSummary {
    /// Workouts completed in the window
    pub workouts: i64,
    /// Total minutes trained in the window
    pub minutes: i64,
}

/// Progress toward one achievement, derived from stored data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementProgress {
    /// Stable identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// What the achievement rewards
    pub description: String,
    /// Emoji shown next to the title
    pub icon: String,
    /// Current progress, clamped to the target
    pub progress: i64,
    /// Progress needed to unlock
    pub target: i64,
    /// Whether the target has been reached
    pub unlocked: bool,
}

impl AchievementProgress {
    fn new(
        id: &str,
        title: &str,
        description: &str,
        icon: &str,
        progress: i64,
        target: i64,
    ) -> Self {
        let progress = progress.clamp(0, target);
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            description: description.to_owned(),
            icon: icon.to_owned(),
            progress,
            target,
            unlocked: progress >= target,
        }
    }
}

/// Everything the progress screen renders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOverview {
    /// Today's counters, when any have been written
    pub today: Option<DailyStats>,
    /// Trailing seven-day workout summary
    pub week: WeekSummary,
    /// Most recent workouts
    pub recent_workouts: Vec<WorkoutSession>,
    /// Achievement progress
    pub achievements: Vec<AchievementProgress>,
}

/// Progress dashboard service
///
/// Reads go straight to the database: the dashboard is an aggregation over
/// several entities and is recomputed per request rather than cached under a
/// single staleness window.
#[derive(Clone)]
pub struct DashboardService {
    database: Arc<Database>,
}

impl DashboardService {
    /// Create the service over shared persistence
    #[must_use]
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Build the full dashboard for a user
    ///
    /// # Errors
    ///
    /// Returns an error if any underlying read fails
    pub async fn overview(&self, user_id: Uuid, limit: i64) -> AppResult<DashboardOverview> {
        let today = Utc::now().date_naive();
        let week_start = Utc::now() - Duration::days(7);

        let today_stats = self.database.get_daily_stats(user_id, today).await?;
        let sample = self
            .database
            .recent_workouts(user_id, STREAK_SAMPLE)
            .await?;

        let week = WeekSummary {
            workouts: sample
                .iter()
                .filter(|w| w.completed_at >= week_start)
                .count() as i64,
            minutes: sample
                .iter()
                .filter(|w| w.completed_at >= week_start)
                .map(|w| w.duration_minutes)
                .sum(),
        };

        let achievements = self
            .achievements(user_id, today, today_stats.as_ref(), &sample)
            .await?;

        let recent_workouts = sample.into_iter().take(limit as usize).collect();

        Ok(DashboardOverview {
            today: today_stats,
            week,
            recent_workouts,
            achievements,
        })
    }

    /// Evaluate achievement progress from stored data
    async fn achievements(
        &self,
        user_id: Uuid,
        today: NaiveDate,
        today_stats: Option<&DailyStats>,
        workouts: &[WorkoutSession],
    ) -> AppResult<Vec<AchievementProgress>> {
        let (total_workouts, _) = self.database.workout_totals(user_id).await?;
        let meals_logged = self.database.food_entry_count(user_id).await?;
        let water_today = today_stats.map_or(0, |s| s.water_glasses);
        let streak = workout_streak(today, workouts);

        Ok(vec![
            AchievementProgress::new(
                "first-workout",
                "First Steps",
                "Complete your first workout",
                "🏃",
                total_workouts,
                1,
            ),
            AchievementProgress::new(
                "week-warrior",
                "Week Warrior",
                "Work out 7 days in a row",
                "🔥",
                streak,
                7,
            ),
            AchievementProgress::new(
                "meal-tracker",
                "Meal Tracker",
                "Log 10 meals",
                "🥗",
                meals_logged,
                10,
            ),
            AchievementProgress::new(
                "hydration-hero",
                "Hydration Hero",
                "Drink 8 glasses of water in a day",
                "💧",
                water_today,
                HYDRATION_TARGET,
            ),
        ])
    }
}

/// Length of the consecutive-day workout run ending today or yesterday
///
/// A streak survives until a full day passes with no workout, so a run that
/// ended yesterday still counts while today is in progress.
fn workout_streak(today: NaiveDate, workouts: &[WorkoutSession]) -> i64 {
    let days: BTreeSet<NaiveDate> = workouts
        .iter()
        .map(|w| w.completed_at.date_naive())
        .collect();

    let mut cursor = if days.contains(&today) {
        today
    } else if days.contains(&(today - Duration::days(1))) {
        today - Duration::days(1)
    } else {
        return 0;
    };

    let mut streak = 0i64;
    while days.contains(&cursor) {
        streak += 1;
        cursor = cursor - Duration::days(1);
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn workout_on(date: NaiveDate) -> WorkoutSession {
        let completed_at = Utc
            .from_utc_datetime(&date.and_hms_opt(10, 0, 0).unwrap());
        WorkoutSession {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Morning Run".into(),
            workout_type: "cardio".into(),
            duration_minutes: 30,
            calories_burned: Some(250),
            notes: None,
            completed_at,
            created_at: completed_at,
        }
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let workouts: Vec<_> = (0..3)
            .map(|back| workout_on(today - Duration::days(back)))
            .collect();

        assert_eq!(workout_streak(today, &workouts), 3);
    }

    #[test]
    fn test_streak_survives_a_rest_day_today() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let workouts: Vec<_> = (1..=2)
            .map(|back| workout_on(today - Duration::days(back)))
            .collect();

        assert_eq!(workout_streak(today, &workouts), 2);
    }

    #[test]
    fn test_streak_breaks_on_a_gap() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let workouts = vec![
            workout_on(today),
            workout_on(today - Duration::days(2)),
            workout_on(today - Duration::days(3)),
        ];

        assert_eq!(workout_streak(today, &workouts), 1);
    }

    #[test]
    fn test_no_workouts_no_streak() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        assert_eq!(workout_streak(today, &[]), 0);
    }

    #[test]
    fn test_achievement_progress_clamps_and_unlocks() {
        let unlocked = AchievementProgress::new("a", "A", "d", "⭐", 12, 10);
        assert!(unlocked.unlocked);
        assert_eq!(unlocked.progress, 10);

        let partial = AchievementProgress::new("b", "B", "d", "⭐", 3, 10);
        assert!(!partial.unlocked);
        assert_eq!(partial.progress, 3);
    }
}
