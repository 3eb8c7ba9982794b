// ABOUTME: In-memory cache implementation with LRU eviction and TTL support
// ABOUTME: Includes a background cleanup task for expired entries

use super::{CacheConfig, CacheProvider, QueryKey};
use crate::errors::{AppError, AppResult};
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// In-memory cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<u8>,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(data: Vec<u8>, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    fn remaining_ttl(&self) -> Option<Duration> {
        self.expires_at.checked_duration_since(Instant::now())
    }
}

/// In-memory cache with LRU eviction and background cleanup
///
/// The store is shared behind `Arc<RwLock<..>>` because the cleanup task
/// needs concurrent access to drop expired entries. `LruCache` bounds
/// resident entries and evicts the least recently used on overflow.
#[derive(Clone)]
pub struct InMemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl InMemoryCache {
    const FALLBACK_CAPACITY: usize = 1000;

    /// Create a new in-memory cache, optionally with a background sweep task
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries)
            .or_else(|| NonZeroUsize::new(Self::FALLBACK_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);

        let store = Arc::new(RwLock::new(LruCache::new(capacity)));

        if config.enable_background_cleanup {
            let store_clone = Arc::downgrade(&store);
            let cleanup_interval = config.cleanup_interval;

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(cleanup_interval);
                interval.tick().await;
                loop {
                    interval.tick().await;
                    // Stop sweeping once every cache handle is gone
                    let Some(store) = store_clone.upgrade() else {
                        break;
                    };
                    Self::cleanup_expired(&store).await;
                }
            });
        }

        Self { store }
    }

    /// Remove all expired entries from the cache
    async fn cleanup_expired(store: &Arc<RwLock<LruCache<String, CacheEntry>>>) {
        let mut store_guard = store.write().await;

        // Collect expired keys first (can't modify while iterating)
        let expired_keys: Vec<String> = store_guard
            .iter()
            .filter_map(|(k, v)| v.is_expired().then(|| k.clone()))
            .collect();

        for key in &expired_keys {
            store_guard.pop(key);
        }

        let removed = expired_keys.len();
        drop(store_guard);
        if removed > 0 {
            tracing::debug!("Cleaned up {removed} expired cache entries");
        }
    }
}

#[async_trait::async_trait]
impl CacheProvider for InMemoryCache {
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &QueryKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()> {
        let serialized = serde_json::to_vec(value)?;
        let entry = CacheEntry::new(serialized, ttl);

        // LruCache evicts the least recently used entry on push
        self.store.write().await.push(key.to_string(), entry);

        Ok(())
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, key: &QueryKey) -> AppResult<Option<T>> {
        let mut store = self.store.write().await;

        // LruCache::get is mutable (updates access order)
        if let Some(entry) = store.get(&key.to_string()) {
            if entry.is_expired() {
                store.pop(&key.to_string());
                drop(store);
                return Ok(None);
            }

            let value: T = serde_json::from_slice(&entry.data)?;
            drop(store);
            return Ok(Some(value));
        }
        drop(store);

        Ok(None)
    }

    async fn invalidate(&self, key: &QueryKey) -> AppResult<()> {
        self.store.write().await.pop(&key.to_string());
        Ok(())
    }

    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64> {
        let glob_pattern = glob::Pattern::new(pattern)
            .map_err(|e| AppError::internal(format!("Invalid glob pattern '{pattern}': {e}")))?;

        let mut store = self.store.write().await;

        let keys_to_remove: Vec<String> = store
            .iter()
            .filter_map(|(k, _)| glob_pattern.matches(k).then(|| k.clone()))
            .collect();

        for key in &keys_to_remove {
            store.pop(key);
        }

        let removed = keys_to_remove.len() as u64;
        drop(store);
        Ok(removed)
    }

    async fn ttl(&self, key: &QueryKey) -> AppResult<Option<Duration>> {
        let store = self.store.write().await;

        // peek avoids disturbing the LRU order
        if let Some(entry) = store.peek(&key.to_string()) {
            if entry.is_expired() {
                return Ok(None);
            }
            let ttl = entry.remaining_ttl();
            drop(store);
            return Ok(ttl);
        }

        Ok(None)
    }

    async fn clear_all(&self) -> AppResult<()> {
        self.store.write().await.clear();
        Ok(())
    }
}
