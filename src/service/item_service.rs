//! Item Service
//!
//! Orchestrates the rate limiter, the read cache, the pagination engine and
//! the record store. The service owns the cache and the limiter; nothing
//! else mutates them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::catalog::sample_items;
use crate::cache::{CacheStats, ItemCache, SharedCache};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{CreateItemRequest, Item, ItemStats, UpdateItemRequest};
use crate::pagination::{paginate, ListQuery, Page};
use crate::ratelimit::KeyedRateLimiter;
use crate::store::{ItemStore, Predicate};

/// Items with stock strictly below this count as low stock
pub const LOW_STOCK_THRESHOLD: i32 = 10;

// == Item Service ==
pub struct ItemService {
    store: Arc<dyn ItemStore>,
    /// None when the cache could not be built
    cache: Option<SharedCache>,
    limiter: KeyedRateLimiter,
    /// Spans the emptiness check and the inserts of a seeding pass
    seed_lock: Mutex<()>,
}

impl ItemService {
    pub fn new(
        store: Arc<dyn ItemStore>,
        cache: Option<SharedCache>,
        limiter: KeyedRateLimiter,
    ) -> Self {
        Self {
            store,
            cache,
            limiter,
            seed_lock: Mutex::new(()),
        }
    }

    /// Builds the service from configuration.
    ///
    /// A cache that cannot be constructed is logged and left out; the
    /// service then reads straight from the store.
    pub fn from_config(config: &Config, store: Arc<dyn ItemStore>) -> Self {
        let cache = match ItemCache::new(
            config.cache_max_entries,
            Duration::from_secs(config.cache_ttl),
        ) {
            Ok(cache) => Some(cache.shared()),
            Err(e) => {
                warn!(error = %e, "read cache disabled");
                None
            }
        };
        let limiter =
            KeyedRateLimiter::new(config.rate_limit_requests, config.rate_limit_burst);

        Self::new(store, cache, limiter)
    }

    // == Admission ==
    /// Consumes one token for `caller`, failing with RateLimited when the
    /// caller's bucket is empty.
    pub fn admit(&self, caller: impl Into<String>) -> Result<()> {
        let caller = caller.into();
        if self.limiter.admit(&caller) {
            Ok(())
        } else {
            Err(ApiError::RateLimited(caller))
        }
    }

    // == Create ==
    #[instrument(skip(self, req), fields(item_name = %req.name))]
    pub async fn create(&self, req: CreateItemRequest) -> Result<Item> {
        if let Some(msg) = req.validate() {
            return Err(ApiError::Validation(msg));
        }

        let item = Item::new(req.name, req.stock, req.price);
        self.store
            .insert(&item)
            .await
            .map_err(ApiError::store("create item"))?;
        self.invalidate().await;

        info!(item_id = %item.id, "item created");
        Ok(item)
    }

    // == Read ==
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Item> {
        if let Some(cache) = &self.cache {
            if let Some(item) = cache.write().await.get(&id) {
                debug!("cache hit");
                return Ok(item);
            }
        }

        let item = self
            .store
            .find_by_id(id)
            .await
            .map_err(ApiError::store("get item"))?
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;

        if let Some(cache) = &self.cache {
            // Cached for the cache's configured TTL
            cache.write().await.put(id, item.clone(), None);
        }
        Ok(item)
    }

    // == Update ==
    /// Applies the fields present in `req`. An empty update returns the
    /// stored item untouched.
    #[instrument(skip(self, req), fields(item_id = %id))]
    pub async fn update(&self, id: Uuid, req: UpdateItemRequest) -> Result<Item> {
        if let Some(msg) = req.validate() {
            return Err(ApiError::Validation(msg));
        }

        let mut item = self
            .store
            .find_by_id(id)
            .await
            .map_err(ApiError::store("get item"))?
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;

        if item.apply_update(&req) {
            let affected = self
                .store
                .save(&item)
                .await
                .map_err(ApiError::store("update item"))?;
            // Deleted between the read and the write
            if affected == 0 {
                return Err(ApiError::NotFound(id.to_string()));
            }
            self.invalidate().await;
            info!("item updated");
        }
        Ok(item)
    }

    // == Delete ==
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let affected = self
            .store
            .delete_by_id(id)
            .await
            .map_err(ApiError::store("delete item"))?;
        if affected == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        self.invalidate().await;
        info!("item deleted");
        Ok(())
    }

    // == List ==
    pub async fn list(&self, query: &ListQuery) -> Result<Page> {
        paginate(self.store.as_ref(), query).await
    }

    // == Stats ==
    /// Aggregate inventory figures. Each figure is its own store query, so
    /// they may disagree under concurrent writes.
    pub async fn stats(&self) -> Result<ItemStats> {
        let all = Predicate::all();
        let total_items = self
            .store
            .count(&all)
            .await
            .map_err(ApiError::store("count items"))?;
        let aggregates = self
            .store
            .aggregate(&all)
            .await
            .map_err(ApiError::store("aggregate items"))?;
        let low_stock_items = self
            .store
            .count(&all.stock_below(LOW_STOCK_THRESHOLD))
            .await
            .map_err(ApiError::store("count low stock items"))?;

        Ok(ItemStats {
            total_items,
            total_value: aggregates.total_value,
            average_price: aggregates.average_price,
            low_stock_items,
        })
    }

    // == Seed ==
    /// Inserts the sample catalog into an empty store. Returns the number of
    /// items inserted, 0 when the store already holds items.
    ///
    /// Inserts run concurrently; every task is joined before the first
    /// failure, if any, is reported.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> Result<usize> {
        let _guard = self.seed_lock.lock().await;

        let existing = self
            .store
            .count(&Predicate::all())
            .await
            .map_err(ApiError::store("count items"))?;
        if existing > 0 {
            debug!(existing, "store already populated, skipping seed");
            return Ok(0);
        }

        let mut tasks = JoinSet::new();
        for item in sample_items() {
            let store = Arc::clone(&self.store);
            tasks.spawn(async move { store.insert(&item).await });
        }

        let mut inserted = 0;
        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok(result) => result.map_err(ApiError::store("seed item")),
                Err(e) => Err(ApiError::Internal(format!("seed task failed: {}", e))),
            };
            match outcome {
                Ok(()) => inserted += 1,
                Err(e) => {
                    warn!(error = %e, "seed insert failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        if inserted > 0 {
            self.invalidate().await;
        }
        match first_error {
            Some(e) => Err(e),
            None => {
                info!(inserted, "store seeded");
                Ok(inserted)
            }
        }
    }

    // == Health ==
    pub async fn health(&self) -> Result<()> {
        self.store
            .ping()
            .await
            .map_err(ApiError::store("reach store"))
    }

    pub async fn cache_stats(&self) -> Option<CacheStats> {
        match &self.cache {
            Some(cache) => Some(cache.read().await.stats()),
            None => None,
        }
    }

    /// Caller keys the rate limiter currently tracks.
    pub fn tracked_callers(&self) -> usize {
        self.limiter.len()
    }

    // == Maintenance ==
    /// Drops expired cache entries. Returns the number removed.
    pub async fn cleanup_cache(&self) -> usize {
        match &self.cache {
            Some(cache) => cache.write().await.cleanup_expired(),
            None => 0,
        }
    }

    /// Forgets rate-limit buckets that have fully refilled. Returns the
    /// number of keys removed.
    pub fn sweep_limiter(&self) -> usize {
        self.limiter.sweep()
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    async fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            let dropped = cache.write().await.clear();
            debug!(dropped, "read cache cleared");
        }
    }
}

impl std::fmt::Debug for ItemService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemService")
            .field("cache", &self.cache.is_some())
            .field("limiter", &self.limiter)
            .finish()
    }
}
