//! Record Store Module
//!
//! Ordered CRUD over the item collection. The service talks to storage only
//! through the [`ItemStore`] trait so the backend can be swapped.

mod memory;
mod postgres;
mod query;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::Item;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use query::{
    Aggregates, CursorPosition, ItemFilter, Predicate, SortDirection, SortField, SortSpec,
};

/// Convenience Result type for store adapters.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Data access interface for items.
///
/// Soft-deleted rows are invisible to every method except `insert`.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Persists a new item as given.
    async fn insert(&self, item: &Item) -> StoreResult<()>;

    /// Fetches a live item by id.
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Item>>;

    /// Overwrites the mutable fields of a live item. Returns the number of
    /// rows affected, 0 when the item is missing or soft-deleted.
    async fn save(&self, item: &Item) -> StoreResult<u64>;

    /// Soft-deletes a live item. Returns the number of rows affected.
    async fn delete_by_id(&self, id: Uuid) -> StoreResult<u64>;

    /// Counts rows matching `predicate`.
    async fn count(&self, predicate: &Predicate) -> StoreResult<i64>;

    /// Fetches at most `limit` rows matching `predicate` in `sort` order.
    async fn query(
        &self,
        predicate: &Predicate,
        sort: &SortSpec,
        limit: usize,
    ) -> StoreResult<Vec<Item>>;

    /// Computes value and price aggregates over rows matching `predicate`.
    async fn aggregate(&self, predicate: &Predicate) -> StoreResult<Aggregates>;

    /// Checks the store is reachable.
    async fn ping(&self) -> StoreResult<()>;
}
