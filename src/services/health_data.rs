// ABOUTME: Cached health-data service: per-user reads and invalidating writes
// ABOUTME: One method per client operation, mirroring the data-access contract

use crate::cache::memory::InMemoryCache;
use crate::cache::reads::ReadCache;
use crate::cache::QueryKey;
use crate::database::{Database, NewFoodEntry, NewJournalEntry, NewWorkout};
use crate::errors::AppResult;
use crate::models::{
    DailyStats, DailyStatsPatch, FoodEntry, JournalEntry, UserProfile, UserProfilePatch,
    WorkoutSession,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Concrete read cache used by the services
pub type Reads = ReadCache<InMemoryCache>;

/// Per-user health data access with read-through caching
///
/// Reads are registered under an entity+user cache key; each successful
/// mutation invalidates the keys it affects so the next read refetches.
#[derive(Clone)]
pub struct HealthDataService {
    database: Arc<Database>,
    reads: Reads,
}

impl HealthDataService {
    /// Create the service over shared persistence and cache layers
    #[must_use]
    pub fn new(database: Arc<Database>, reads: Reads) -> Self {
        Self { database, reads }
    }

    /// Today's date in UTC, the default day scope for stats and food reads
    #[must_use]
    pub fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    // ========================================================================
    // Profile
    // ========================================================================

    /// Get a user's profile; `None` until onboarding creates it
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails and no cached value exists
    pub async fn profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let database = self.database.clone();
        self.reads
            .get_or_refresh(QueryKey::profile(user_id), || async move {
                database.get_user_profile(user_id).await
            })
            .await
    }

    /// Create the user's profile at onboarding completion
    ///
    /// # Errors
    ///
    /// Returns an error if the profile exists or the insert fails
    pub async fn create_profile(
        &self,
        user_id: Uuid,
        patch: UserProfilePatch,
    ) -> AppResult<UserProfile> {
        let profile = self.database.create_user_profile(user_id, patch).await?;
        self.reads.invalidate(QueryKey::profile(user_id)).await;
        Ok(profile)
    }

    /// Apply a partial update to the user's profile
    ///
    /// # Errors
    ///
    /// Returns an error if no profile exists or the update fails
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        patch: UserProfilePatch,
    ) -> AppResult<UserProfile> {
        let profile = self.database.update_user_profile(user_id, patch).await?;
        self.reads.invalidate(QueryKey::profile(user_id)).await;
        Ok(profile)
    }

    // ========================================================================
    // Daily stats
    // ========================================================================

    /// Get the user's stats for a day; `None` before the first write
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails and no cached value exists
    pub async fn stats_for(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<DailyStats>> {
        let database = self.database.clone();
        self.reads
            .get_or_refresh(QueryKey::daily_stats(user_id, date), || async move {
                database.get_daily_stats(user_id, date).await
            })
            .await
    }

    /// Merge a partial update into the user's stats row for a day
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails
    pub async fn upsert_stats(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        patch: &DailyStatsPatch,
    ) -> AppResult<DailyStats> {
        let stats = self.database.upsert_daily_stats(user_id, date, patch).await?;
        self.reads
            .invalidate(QueryKey::daily_stats(user_id, date))
            .await;
        Ok(stats)
    }

    // ========================================================================
    // Workouts
    // ========================================================================

    /// Append a completed workout
    ///
    /// Invalidates the workout lists and today's stats: the dashboard derives
    /// its counters from both.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn log_workout(
        &self,
        user_id: Uuid,
        workout: NewWorkout,
    ) -> AppResult<WorkoutSession> {
        let session = self.database.log_workout(user_id, workout).await?;
        self.reads
            .invalidate_pattern(&QueryKey::workouts_pattern(user_id))
            .await;
        self.reads
            .invalidate(QueryKey::daily_stats(user_id, Self::today()))
            .await;
        Ok(session)
    }

    /// List the user's workouts, most recent first
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails and no cached value exists
    pub async fn recent_workouts(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<WorkoutSession>> {
        let database = self.database.clone();
        self.reads
            .get_or_refresh(QueryKey::workouts(user_id, limit), || async move {
                database.recent_workouts(user_id, limit).await
            })
            .await
    }

    // ========================================================================
    // Food
    // ========================================================================

    /// Append a food entry
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn log_food(&self, user_id: Uuid, food: NewFoodEntry) -> AppResult<FoodEntry> {
        let entry = self.database.log_food(user_id, food).await?;
        self.reads
            .invalidate(QueryKey::food_day(user_id, entry.logged_at.date_naive()))
            .await;
        Ok(entry)
    }

    /// List the user's food entries for one day, most recent first
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails and no cached value exists
    pub async fn food_for_day(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<FoodEntry>> {
        let database = self.database.clone();
        self.reads
            .get_or_refresh(QueryKey::food_day(user_id, date), || async move {
                database.food_entries_for_day(user_id, date).await
            })
            .await
    }

    // ========================================================================
    // Journal
    // ========================================================================

    /// Append a journal entry
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the insert fails
    pub async fn create_journal_entry(
        &self,
        user_id: Uuid,
        entry: NewJournalEntry,
    ) -> AppResult<JournalEntry> {
        let created = self.database.create_journal_entry(user_id, entry).await?;
        self.reads
            .invalidate_pattern(&QueryKey::journal_pattern(user_id))
            .await;
        Ok(created)
    }

    /// List the user's journal entries, newest day first
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails and no cached value exists
    pub async fn recent_journal_entries(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<JournalEntry>> {
        let database = self.database.clone();
        self.reads
            .get_or_refresh(QueryKey::journal(user_id, limit), || async move {
                database.recent_journal_entries(user_id, limit).await
            })
            .await
    }
}
