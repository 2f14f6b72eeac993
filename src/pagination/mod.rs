//! Pagination & Filter Engine
//!
//! Turns a validated [`ListQuery`] into store range queries and an opaque
//! continuation cursor. Pages are fetched `limit + 1` rows at a time so
//! `has_more` needs no extra round trip.

mod cursor;
mod query;

#[cfg(test)]
mod property_tests;

use tracing::debug;

use crate::error::{ApiError, Result};
use crate::models::Item;
use crate::store::{CursorPosition, ItemStore, Predicate};

pub use cursor::{decode_cursor, encode_cursor};
pub use query::{ListQuery, DEFAULT_LIMIT, MAX_LIMIT};

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Item>,
    /// Present iff `has_more`
    pub next_cursor: Option<String>,
    pub has_more: bool,
    /// Matching rows ignoring the cursor. Counted separately from the row
    /// fetch, so it may disagree with `items` under concurrent writes.
    pub total: i64,
}

/// Fetches the page described by `query` from `store`.
pub async fn paginate(store: &dyn ItemStore, query: &ListQuery) -> Result<Page> {
    let base = Predicate::filtered(query.filter.clone());
    let total = store
        .count(&base)
        .await
        .map_err(ApiError::store("count items"))?;

    let predicate = match query.cursor {
        Some(position) => base.after(position),
        None => base,
    };

    let mut items = store
        .query(&predicate, &query.sort, query.limit + 1)
        .await
        .map_err(ApiError::store("list items"))?;

    let has_more = items.len() > query.limit;
    items.truncate(query.limit);

    let next_cursor = match items.last() {
        Some(last) if has_more => Some(encode_cursor(&CursorPosition::of(last))?),
        _ => None,
    };

    debug!(
        returned = items.len(),
        total,
        has_more,
        sort = %query.sort.field,
        "listed items"
    );

    Ok(Page {
        items,
        next_cursor,
        has_more,
        total,
    })
}
