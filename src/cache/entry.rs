//! Cache Entry Module
//!
//! Defines the structure for individual cached item snapshots with TTL support.

use std::time::{Duration, Instant};

use crate::models::Item;

// == Cache Entry ==
/// A cached item snapshot and the instant it stops being served.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored snapshot
    pub item: Item,
    pub cached_at: Instant,
    pub expires_at: Instant,
}

impl CacheEntry {
    /// Creates a new cache entry that expires `ttl` from now.
    pub fn new(item: Item, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            item,
            cached_at: now,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current instant is
    /// greater than or equal to its expiry, so a fully elapsed TTL never
    /// serves a hit.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn sample() -> Item {
        Item::new("Keyboard", 150, 75.5)
    }

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(sample(), Duration::from_secs(60));

        assert_eq!(entry.item.name, "Keyboard");
        assert!(!entry.is_expired());
        assert!(entry.ttl_remaining() <= Duration::from_secs(60));
        assert!(entry.ttl_remaining() > Duration::from_secs(59));
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(sample(), Duration::from_millis(30));
        assert!(!entry.is_expired());

        sleep(Duration::from_millis(50));

        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Duration::ZERO);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        // Expires exactly at creation time
        let entry = CacheEntry::new(sample(), Duration::ZERO);
        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }
}
