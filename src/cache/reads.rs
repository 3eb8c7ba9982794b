// ABOUTME: Read-through cache layer with fresh-window and stale-fallback rules
// ABOUTME: Serves cached reads for 5 minutes, retains entries for 30 minutes

use super::{CacheProvider, QueryKey};
use crate::config::CacheSettings;
use crate::errors::AppResult;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Stored envelope: the value plus when it was fetched
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedRead<T> {
    value: T,
    fetched_at: i64,
}

/// Read-through cache with staleness semantics
///
/// A cached read is *fresh* for the configured window and served without
/// touching the database. Past the window it is *stale*: the next read
/// refetches and replaces it, falling back to the stale value when the
/// refetch fails. Entries unrefreshed for the retention period expire from
/// the backend outright.
#[derive(Clone)]
pub struct ReadCache<C: CacheProvider> {
    backend: C,
    stale_after: Duration,
    retain_for: Duration,
}

impl<C: CacheProvider> ReadCache<C> {
    /// Build a read cache over a backend with the given windows
    #[must_use]
    pub fn new(backend: C, settings: &CacheSettings) -> Self {
        Self {
            backend,
            stale_after: Duration::from_secs(settings.stale_after_secs),
            retain_for: Duration::from_secs(settings.retain_for_secs),
        }
    }

    /// Serve a read through the cache
    ///
    /// # Errors
    ///
    /// Returns the fetch error only when no stale value is available to fall
    /// back on; cache backend failures never fail the read.
    pub async fn get_or_refresh<T, F, Fut>(&self, key: QueryKey, fetch: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned + Clone + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = AppResult<T>> + Send,
    {
        let cached: Option<CachedRead<T>> = match self.backend.get(&key).await {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("cache read failed for {key}: {e}");
                None
            }
        };

        if let Some(entry) = &cached {
            let age = Utc::now().timestamp() - entry.fetched_at;
            if age >= 0 && (age as u64) < self.stale_after.as_secs() {
                tracing::debug!("cache hit (fresh) for {key}");
                return Ok(entry.value.clone());
            }
        }

        match fetch().await {
            Ok(value) => {
                self.store(key, &value).await;
                Ok(value)
            }
            Err(e) => {
                if let Some(entry) = cached {
                    tracing::warn!("refetch failed for {key}, serving stale value: {e}");
                    return Ok(entry.value);
                }
                Err(e)
            }
        }
    }

    /// Drop a single cached read
    pub async fn invalidate(&self, key: QueryKey) {
        if let Err(e) = self.backend.invalidate(&key).await {
            tracing::warn!("cache invalidation failed for {key}: {e}");
        }
    }

    /// Drop every cached read matching a glob pattern
    pub async fn invalidate_pattern(&self, pattern: &str) {
        match self.backend.invalidate_pattern(pattern).await {
            Ok(removed) if removed > 0 => {
                tracing::debug!("invalidated {removed} cached reads matching {pattern}");
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("cache pattern invalidation failed for {pattern}: {e}"),
        }
    }

    async fn store<T: Serialize + Send + Sync>(&self, key: QueryKey, value: &T) {
        let entry = CachedRead {
            value,
            fetched_at: Utc::now().timestamp(),
        };
        if let Err(e) = self.backend.set(&key, &entry, self.retain_for).await {
            tracing::warn!("cache store failed for {key}: {e}");
        }
    }
}
