//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to check the item cache against a simple model.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use uuid::Uuid;

use crate::cache::ItemCache;
use crate::models::Item;

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 8;
const TEST_TTL: Duration = Duration::from_secs(300);
/// Ids are drawn from a small pool so operations collide
const KEY_POOL: usize = 12;

#[derive(Debug, Clone)]
enum CacheOp {
    Put { slot: usize, stock: i32 },
    Get { slot: usize },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (0..KEY_POOL, 0..1000i32).prop_map(|(slot, stock)| CacheOp::Put { slot, stock }),
        4 => (0..KEY_POOL).prop_map(|slot| CacheOp::Get { slot }),
        1 => Just(CacheOp::Clear),
    ]
}

fn key_pool() -> Vec<Uuid> {
    (0..KEY_POOL).map(|_| Uuid::new_v4()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Hits and misses always add up to the number of lookups, and the cache
    // never grows beyond its bound.
    #[test]
    fn prop_statistics_and_capacity(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let keys = key_pool();
        let mut cache = ItemCache::new(TEST_MAX_ENTRIES, TEST_TTL).unwrap();
        let mut lookups: u64 = 0;
        let mut hits: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Put { slot, stock } => {
                    let mut item = Item::new(format!("item-{slot}"), stock, 1.0);
                    item.id = keys[slot];
                    cache.put(item.id, item, None);
                }
                CacheOp::Get { slot } => {
                    lookups += 1;
                    if cache.get(&keys[slot]).is_some() {
                        hits += 1;
                    }
                }
                CacheOp::Clear => {
                    cache.clear();
                }
            }
            prop_assert!(cache.len() <= TEST_MAX_ENTRIES);
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.hits + stats.misses, lookups);
        prop_assert_eq!(stats.total_entries, cache.len());
    }

    // A hit always returns the most recent snapshot stored under that id, and
    // nothing stored before a clear is ever served after it.
    #[test]
    fn prop_hits_return_latest_snapshot(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let keys = key_pool();
        let mut cache = ItemCache::new(TEST_MAX_ENTRIES, TEST_TTL).unwrap();
        let mut latest: HashMap<usize, i32> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Put { slot, stock } => {
                    let mut item = Item::new(format!("item-{slot}"), stock, 1.0);
                    item.id = keys[slot];
                    cache.put(item.id, item, None);
                    latest.insert(slot, stock);
                }
                CacheOp::Get { slot } => {
                    if let Some(item) = cache.get(&keys[slot]) {
                        prop_assert_eq!(Some(&item.stock), latest.get(&slot));
                        prop_assert_eq!(item.id, keys[slot]);
                    }
                }
                CacheOp::Clear => {
                    cache.clear();
                    latest.clear();
                }
            }
        }
    }
}

// Concurrent get/put/clear through the shared handle must leave the map
// structurally sound.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn prop_concurrent_operations_keep_cache_consistent(
        ops in prop::collection::vec(cache_op_strategy(), 10..60)
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();

        rt.block_on(async {
            let keys = key_pool();
            let cache = ItemCache::new(TEST_MAX_ENTRIES, TEST_TTL).unwrap().shared();
            let mut handles = vec![];

            for op in ops {
                let cache = cache.clone();
                let keys = keys.clone();
                handles.push(tokio::spawn(async move {
                    let mut guard = cache.write().await;
                    match op {
                        CacheOp::Put { slot, stock } => {
                            let mut item = Item::new(format!("item-{slot}"), stock, 1.0);
                            item.id = keys[slot];
                            guard.put(item.id, item, None);
                        }
                        CacheOp::Get { slot } => {
                            if let Some(item) = guard.get(&keys[slot]) {
                                assert_eq!(item.id, keys[slot]);
                            }
                        }
                        CacheOp::Clear => {
                            guard.clear();
                        }
                    }
                }));
            }

            for handle in handles {
                prop_assert!(handle.await.is_ok(), "cache task panicked");
            }

            let guard = cache.read().await;
            let stats = guard.stats();
            prop_assert!(stats.total_entries <= TEST_MAX_ENTRIES);
            prop_assert!((0.0..=1.0).contains(&stats.hit_rate()));
            Ok(())
        })?;
    }
}
