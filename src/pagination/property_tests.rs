//! Property-Based Tests for Cursor Pagination
//!
//! Walks every page of a static dataset and checks the concatenation against
//! a plain sort of the same rows.

use chrono::Duration;
use proptest::prelude::*;

use crate::models::{now, Item};
use crate::pagination::{decode_cursor, paginate, ListQuery};
use crate::store::{ItemStore, MemoryStore, SortSpec};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

/// Creation offsets drawn from a narrow range so timestamps repeat.
fn offsets_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0..6i64, 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Following next_cursor from the first page visits every live row once,
    // in default order, with no page larger than the limit.
    #[test]
    fn prop_pages_cover_dataset_without_gaps(
        offsets in offsets_strategy(),
        limit in 1usize..=12,
    ) {
        let rt = runtime();
        rt.block_on(async {
            let store = MemoryStore::new();
            let base = now();
            let mut expected = Vec::new();
            for (i, offset) in offsets.iter().enumerate() {
                let mut item = Item::new(format!("Item {}", i), i as i32, 1.0);
                item.created_at = base - Duration::seconds(*offset);
                store.insert(&item).await.unwrap();
                expected.push(item);
            }
            let sort = SortSpec::default();
            expected.sort_by(|a, b| sort.compare(a, b));

            let mut query = ListQuery::default().with_limit(limit);
            let mut seen = Vec::new();
            loop {
                let page = paginate(&store, &query).await.unwrap();
                prop_assert!(page.items.len() <= limit);
                prop_assert_eq!(page.total, expected.len() as i64);
                prop_assert_eq!(page.has_more, page.next_cursor.is_some());
                seen.extend(page.items.iter().map(|i| i.id));

                // has_more iff a (limit + 1)-th row remains
                prop_assert_eq!(page.has_more, seen.len() < expected.len());

                match page.next_cursor {
                    Some(token) => query = query.with_cursor(decode_cursor(&token).unwrap()),
                    None => break,
                }
            }

            let expected_ids: Vec<_> = expected.iter().map(|i| i.id).collect();
            prop_assert_eq!(seen, expected_ids);
            Ok(())
        })?;
    }
}
