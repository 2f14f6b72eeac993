//! Cache Module
//!
//! Read-through cache of item snapshots with TTL expiration, LRU eviction and
//! wholesale invalidation on writes.

mod entry;
mod item_cache;
mod lru;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use item_cache::{ItemCache, SharedCache};
pub use lru::LruTracker;
pub use stats::CacheStats;

// == Public Constants ==
/// TTL applied to items cached by the read path
pub const DEFAULT_ITEM_TTL_SECS: u64 = 300;
