//! In-memory item store
//!
//! Used when no database is configured and throughout the test suite.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Aggregates, ItemStore, Predicate, SortSpec, StoreResult};
use crate::models::{now, Item};

/// Items held in a map behind an async RwLock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<Uuid, Item>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, soft-deleted ones included.
    pub async fn raw_len(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn insert(&self, item: &Item) -> StoreResult<()> {
        self.items.write().await.insert(item.id, item.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.get(&id).filter(|item| !item.is_deleted()).cloned())
    }

    async fn save(&self, item: &Item) -> StoreResult<u64> {
        let mut items = self.items.write().await;
        match items.get_mut(&item.id).filter(|s| !s.is_deleted()) {
            Some(stored) => {
                stored.name = item.name.clone();
                stored.stock = item.stock;
                stored.price = item.price;
                stored.updated_at = item.updated_at;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<u64> {
        let mut items = self.items.write().await;
        match items.get_mut(&id).filter(|item| !item.is_deleted()) {
            Some(item) => {
                item.deleted_at = Some(now());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn count(&self, predicate: &Predicate) -> StoreResult<i64> {
        let items = self.items.read().await;
        Ok(items.values().filter(|item| predicate.matches(item)).count() as i64)
    }

    async fn query(
        &self,
        predicate: &Predicate,
        sort: &SortSpec,
        limit: usize,
    ) -> StoreResult<Vec<Item>> {
        let items = self.items.read().await;
        let mut rows: Vec<Item> = items
            .values()
            .filter(|item| predicate.matches(item))
            .cloned()
            .collect();
        drop(items);

        rows.sort_by(|a, b| sort.compare(a, b));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn aggregate(&self, predicate: &Predicate) -> StoreResult<Aggregates> {
        let items = self.items.read().await;
        let (count, total_value, price_sum) = items
            .values()
            .filter(|item| predicate.matches(item))
            .fold((0usize, 0.0f64, 0.0f64), |(n, value, prices), item| {
                (n + 1, value + item.price * item.stock as f64, prices + item.price)
            });

        Ok(Aggregates {
            total_value,
            average_price: if count == 0 { 0.0 } else { price_sum / count as f64 },
        })
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ItemFilter, SortDirection, SortField};

    async fn seeded() -> (MemoryStore, Vec<Item>) {
        let store = MemoryStore::new();
        let items = vec![
            Item::new("Laptop Pro", 50, 999.99),
            Item::new("Gaming Mouse", 100, 49.99),
            Item::new("Wireless Keyboard", 25, 79.99),
        ];
        for item in &items {
            store.insert(item).await.unwrap();
        }
        (store, items)
    }

    #[tokio::test]
    async fn test_find_and_soft_delete() {
        let (store, items) = seeded().await;
        let id = items[0].id;

        assert_eq!(store.find_by_id(id).await.unwrap(), Some(items[0].clone()));
        assert_eq!(store.delete_by_id(id).await.unwrap(), 1);
        assert_eq!(store.delete_by_id(id).await.unwrap(), 0);
        assert!(store.find_by_id(id).await.unwrap().is_none());

        // Row is retained
        assert_eq!(store.raw_len().await, 3);
        assert_eq!(store.count(&Predicate::all()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_save_reports_missing_rows() {
        let (store, items) = seeded().await;
        let mut item = items[1].clone();

        item.stock = 2;
        assert_eq!(store.save(&item).await.unwrap(), 1);
        assert_eq!(store.find_by_id(item.id).await.unwrap().unwrap().stock, 2);

        store.delete_by_id(item.id).await.unwrap();
        item.stock = 1;
        assert_eq!(store.save(&item).await.unwrap(), 0);
        assert!(store.find_by_id(item.id).await.unwrap().is_none());

        let unknown = Item::new("Ghost", 1, 1.0);
        assert_eq!(store.save(&unknown).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_query_filters_and_sorts() {
        let (store, _) = seeded().await;
        let predicate = Predicate::filtered(ItemFilter {
            min_price: Some(50.0),
            max_price: Some(1000.0),
            ..Default::default()
        });
        let sort = SortSpec::new(SortField::Price, SortDirection::Asc);

        let rows = store.query(&predicate, &sort, 10).await.unwrap();
        let names: Vec<_> = rows.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Wireless Keyboard", "Laptop Pro"]);

        let limited = store.query(&predicate, &sort, 1).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_aggregates() {
        let store = MemoryStore::new();
        for (name, stock, price) in [("Item 1", 10, 100.0), ("Item 2", 5, 200.0), ("Item 3", 15, 300.0)] {
            store.insert(&Item::new(name, stock, price)).await.unwrap();
        }

        let agg = store.aggregate(&Predicate::all()).await.unwrap();
        assert_eq!(agg.total_value, 6000.0);
        assert_eq!(agg.average_price, 200.0);

        let low = store.count(&Predicate::all().stock_below(10)).await.unwrap();
        assert_eq!(low, 1);
    }

    #[tokio::test]
    async fn test_aggregates_on_empty_store() {
        let agg = MemoryStore::new().aggregate(&Predicate::all()).await.unwrap();
        assert_eq!(agg, Aggregates::default());
    }
}
