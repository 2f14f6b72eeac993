//! The inventory item record

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::requests::UpdateItemRequest;

/// Current time truncated to the microsecond precision the database keeps.
///
/// Timestamps feed cursors, so a value must compare equal after a round trip
/// through the store.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A single inventory item.
///
/// An item with `deleted_at` set is soft-deleted: it stays in storage but is
/// invisible to every read and listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Unique identifier, immutable once assigned
    pub id: Uuid,
    /// Display name (1..=255 characters)
    pub name: String,
    /// Units in stock, never negative
    pub stock: i32,
    /// Unit price, never negative
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Item {
    /// Creates a live item with a fresh identifier and matching timestamps.
    pub fn new(name: impl Into<String>, stock: i32, price: f64) -> Self {
        let now = now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            stock,
            price,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Returns true once the item has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Applies the fields present in `update`, leaving the others untouched.
    ///
    /// `updated_at` only moves when at least one field was supplied. Returns
    /// whether anything was applied.
    pub fn apply_update(&mut self, update: &UpdateItemRequest) -> bool {
        if update.is_empty() {
            return false;
        }

        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        self.updated_at = now().max(self.updated_at);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_timestamps_match() {
        let item = Item::new("Laptop", 50, 999.99);
        assert_eq!(item.created_at, item.updated_at);
        assert!(!item.is_deleted());
        assert_eq!(item.created_at.timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn test_apply_partial_update() {
        let mut item = Item::new("Laptop", 50, 999.99);
        let update = UpdateItemRequest {
            stock: Some(75),
            ..Default::default()
        };

        assert!(item.apply_update(&update));
        assert_eq!(item.name, "Laptop");
        assert_eq!(item.stock, 75);
        assert_eq!(item.price, 999.99);
        assert!(item.updated_at >= item.created_at);
    }

    #[test]
    fn test_empty_update_keeps_timestamps() {
        let mut item = Item::new("Laptop", 50, 999.99);
        let before = item.clone();

        assert!(!item.apply_update(&UpdateItemRequest::default()));
        assert_eq!(item, before);
    }

    #[test]
    fn test_deleted_at_omitted_when_live() {
        let item = Item::new("Mouse", 200, 25.99);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("deleted_at").is_none());
        assert_eq!(json["name"], "Mouse");
    }
}
