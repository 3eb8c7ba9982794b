// ABOUTME: Query cache abstraction with per-user keys and pluggable backends
// ABOUTME: Defines the provider trait, key scheme, and cache configuration
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Health

//! # Query Cache
//!
//! Cached reads are keyed by entity tag plus the scoping user identifier.
//! The backend stores opaque serialized entries with a retention TTL; the
//! staleness semantics (fresh window, stale fallback) live in
//! [`reads::ReadCache`] on top.

/// In-memory cache implementation
pub mod memory;
/// Read-through layer with staleness semantics
pub mod reads;

use crate::constants::cache as cache_constants;
use crate::errors::AppResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Cache provider trait for pluggable backend implementations
#[async_trait::async_trait]
pub trait CacheProvider: Send + Sync + Clone {
    /// Store value in cache with TTL
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or storage fails
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &QueryKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>;

    /// Retrieve value from cache (`None` when absent or expired)
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails
    async fn get<T: for<'de> Deserialize<'de>>(&self, key: &QueryKey) -> AppResult<Option<T>>;

    /// Remove a single cache entry
    ///
    /// # Errors
    ///
    /// Returns an error if invalidation fails
    async fn invalidate(&self, key: &QueryKey) -> AppResult<()>;

    /// Remove all cache entries matching a glob pattern
    /// (e.g. `user:<id>:workouts:*`), returning how many were removed
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid
    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64>;

    /// Remaining TTL for a key, when present
    ///
    /// # Errors
    ///
    /// Returns an error if the check fails
    async fn ttl(&self, key: &QueryKey) -> AppResult<Option<Duration>>;

    /// Clear all cache entries (for testing/admin)
    ///
    /// # Errors
    ///
    /// Returns an error if the clear operation fails
    async fn clear_all(&self) -> AppResult<()>;
}

/// The cached read a key identifies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryResource {
    /// The user's profile
    Profile,
    /// Daily stats for one day
    DailyStats {
        /// Day the row aggregates
        date: NaiveDate,
    },
    /// Recent workouts at a given limit
    Workouts {
        /// Requested row bound
        limit: i64,
    },
    /// Food entries for one day
    FoodDay {
        /// Day window
        date: NaiveDate,
    },
    /// Recent journal entries at a given limit
    Journal {
        /// Requested row bound
        limit: i64,
    },
}

impl fmt::Display for QueryResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profile => write!(f, "profile"),
            Self::DailyStats { date } => write!(f, "stats:{date}"),
            Self::Workouts { limit } => write!(f, "workouts:{limit}"),
            Self::FoodDay { date } => write!(f, "food:{date}"),
            Self::Journal { limit } => write!(f, "journal:{limit}"),
        }
    }
}

/// Cache key: entity tag scoped by user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryKey {
    /// Scoping user
    pub user_id: Uuid,
    /// What is cached
    pub resource: QueryResource,
}

impl QueryKey {
    /// Key for a user's profile read
    #[must_use]
    pub fn profile(user_id: Uuid) -> Self {
        Self {
            user_id,
            resource: QueryResource::Profile,
        }
    }

    /// Key for a user's daily stats read
    #[must_use]
    pub fn daily_stats(user_id: Uuid, date: NaiveDate) -> Self {
        Self {
            user_id,
            resource: QueryResource::DailyStats { date },
        }
    }

    /// Key for a user's recent-workouts read
    #[must_use]
    pub fn workouts(user_id: Uuid, limit: i64) -> Self {
        Self {
            user_id,
            resource: QueryResource::Workouts { limit },
        }
    }

    /// Key for a user's food-day read
    #[must_use]
    pub fn food_day(user_id: Uuid, date: NaiveDate) -> Self {
        Self {
            user_id,
            resource: QueryResource::FoodDay { date },
        }
    }

    /// Key for a user's journal read
    #[must_use]
    pub fn journal(user_id: Uuid, limit: i64) -> Self {
        Self {
            user_id,
            resource: QueryResource::Journal { limit },
        }
    }

    /// Glob matching every key for one user
    #[must_use]
    pub fn user_pattern(user_id: Uuid) -> String {
        format!("user:{user_id}:*")
    }

    /// Glob matching every workouts key for one user, any limit
    #[must_use]
    pub fn workouts_pattern(user_id: Uuid) -> String {
        format!("user:{user_id}:workouts:*")
    }

    /// Glob matching every journal key for one user, any limit
    #[must_use]
    pub fn journal_pattern(user_id: Uuid) -> String {
        format!("user:{user_id}:journal:*")
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user:{}:{}", self.user_id, self.resource)
    }
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Bound on resident entries
    pub max_entries: usize,
    /// Interval between background sweeps of expired entries
    pub cleanup_interval: Duration,
    /// Whether to spawn the background sweep task
    pub enable_background_cleanup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: cache_constants::DEFAULT_MAX_ENTRIES,
            cleanup_interval: Duration::from_secs(cache_constants::CLEANUP_INTERVAL_SECS),
            enable_background_cleanup: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_rendering() {
        let user_id = Uuid::nil();
        let key = QueryKey::workouts(user_id, 10);
        assert_eq!(
            key.to_string(),
            format!("user:{user_id}:workouts:10")
        );

        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(
            QueryKey::daily_stats(user_id, date).to_string(),
            format!("user:{user_id}:stats:2025-06-01")
        );
    }

    #[test]
    fn test_user_pattern_matches_keys() {
        let user_id = Uuid::new_v4();
        let pattern = glob::Pattern::new(&QueryKey::user_pattern(user_id)).unwrap();

        assert!(pattern.matches(&QueryKey::profile(user_id).to_string()));
        assert!(pattern.matches(&QueryKey::journal(user_id, 5).to_string()));
        assert!(!pattern.matches(&QueryKey::profile(Uuid::new_v4()).to_string()));
    }
}
