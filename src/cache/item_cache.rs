//! Item Cache Module
//!
//! Read-through cache engine combining HashMap storage with LRU tracking and
//! TTL expiration. Any write to the item collection clears it wholesale.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::error::{ApiError, Result};
use crate::models::Item;

/// Cache handle shared between the service and its background cleanup task.
pub type SharedCache = Arc<RwLock<ItemCache>>;

// == Item Cache ==
/// Item snapshots keyed by identifier, bounded in size and in age.
#[derive(Debug)]
pub struct ItemCache {
    entries: HashMap<Uuid, CacheEntry>,
    lru: LruTracker,
    stats: CacheStats,
    max_entries: usize,
    default_ttl: Duration,
}

impl ItemCache {
    // == Constructor ==
    /// Creates a new cache holding at most `max_entries` items for `default_ttl`.
    ///
    /// Fails when the configuration leaves no room to cache anything; the
    /// service then runs without a cache.
    pub fn new(max_entries: usize, default_ttl: Duration) -> Result<Self> {
        if max_entries == 0 {
            return Err(ApiError::Internal(
                "cache capacity must be at least one entry".to_string(),
            ));
        }
        if default_ttl.is_zero() {
            return Err(ApiError::Internal("cache TTL must be non-zero".to_string()));
        }

        Ok(Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            default_ttl,
        })
    }

    /// Wraps the cache for sharing across tasks.
    pub fn shared(self) -> SharedCache {
        Arc::new(RwLock::new(self))
    }

    // == Get ==
    /// Returns the cached snapshot, or None on a miss.
    ///
    /// Expired entries count as misses and are evicted on the spot.
    pub fn get(&mut self, id: &Uuid) -> Option<Item> {
        match self.entries.get(id) {
            Some(entry) if !entry.is_expired() => {
                let item = entry.item.clone();
                self.stats.record_hit();
                self.lru.touch(id);
                Some(item)
            }
            Some(_) => {
                self.entries.remove(id);
                self.lru.remove(id);
                self.stats.record_expirations(1);
                self.stats.record_miss();
                self.stats.set_total_entries(self.entries.len());
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores a snapshot, overwriting any previous one for the same id.
    ///
    /// At capacity the least recently used entry is evicted first. `ttl`
    /// falls back to the cache default.
    pub fn put(&mut self, id: Uuid, item: Item, ttl: Option<Duration>) {
        let is_overwrite = self.entries.contains_key(&id);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
            }
        }

        let entry = CacheEntry::new(item, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(id, entry);
        self.lru.touch(&id);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Clear ==
    /// Drops every entry unconditionally. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.stats.record_invalidation();
        self.stats.set_total_entries(0);
        dropped
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries. Returns the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired: Vec<Uuid> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(id, _)| *id)
            .collect();

        for id in &expired {
            self.entries.remove(id);
            self.lru.remove(id);
        }

        self.stats.record_expirations(expired.len());
        self.stats.set_total_entries(self.entries.len());
        expired.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}
