//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for size-bounded cache eviction.

use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

// == LRU Tracker ==
/// Tracks access order of cached item ids.
///
/// Every touch stamps the id with a fresh tick. `order` maps ticks back to
/// ids, so the smallest tick is the least recently used id and touching,
/// removing or evicting costs O(log n).
#[derive(Debug, Default)]
pub struct LruTracker {
    ticks: HashMap<Uuid, u64>,
    order: BTreeMap<u64, Uuid>,
    next_tick: u64,
}

impl LruTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks an id as most recently used.
    pub fn touch(&mut self, id: &Uuid) {
        let tick = self.next_tick;
        self.next_tick += 1;

        if let Some(previous) = self.ticks.insert(*id, tick) {
            self.order.remove(&previous);
        }
        self.order.insert(tick, *id);
    }

    pub fn remove(&mut self, id: &Uuid) {
        if let Some(tick) = self.ticks.remove(id) {
            self.order.remove(&tick);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used id, None if empty.
    pub fn evict_oldest(&mut self) -> Option<Uuid> {
        let (_, id) = self.order.pop_first()?;
        self.ticks.remove(&id);
        Some(id)
    }

    /// Forgets every tracked id.
    pub fn clear(&mut self) {
        self.ticks.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.ticks.contains_key(id)
    }
}
