//! Query vocabulary shared by the pagination engine and store adapters
//!
//! Sort fields and directions are a closed set: parsing anything else is a
//! validation error, never a silent fallback.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::Item;

/// Position of the last row of a page in `(created_at, id)` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub created_at: DateTime<Utc>,
    pub id: Uuid,
}

impl CursorPosition {
    pub fn of(item: &Item) -> Self {
        Self {
            created_at: item.created_at,
            id: item.id,
        }
    }

    /// True when `item` comes strictly after this position in
    /// `(created_at desc, id desc)` order.
    pub fn precedes(&self, item: &Item) -> bool {
        item.created_at < self.created_at
            || (item.created_at == self.created_at && item.id < self.id)
    }
}

/// Optional list filters, combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    pub min_stock: Option<i32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ItemFilter {
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(needle) = &self.name {
            if !item.name.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        self.min_stock.map_or(true, |min| item.stock >= min)
            && self.min_price.map_or(true, |min| item.price >= min)
            && self.max_price.map_or(true, |max| item.price <= max)
    }
}

/// Row selection handed to a store. Soft-deleted rows never match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    pub filter: ItemFilter,
    /// Only rows strictly after this position
    pub after: Option<CursorPosition>,
    /// Only rows with stock strictly below this value
    pub stock_below: Option<i32>,
}

impl Predicate {
    /// Every live row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filtered(filter: ItemFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn after(mut self, position: CursorPosition) -> Self {
        self.after = Some(position);
        self
    }

    pub fn stock_below(mut self, threshold: i32) -> Self {
        self.stock_below = Some(threshold);
        self
    }

    pub fn matches(&self, item: &Item) -> bool {
        !item.is_deleted()
            && self.filter.matches(item)
            && self.after.map_or(true, |pos| pos.precedes(item))
            && self.stock_below.map_or(true, |limit| item.stock < limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Name,
    Stock,
    Price,
    #[default]
    CreatedAt,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Stock => "stock",
            SortField::Price => "price",
            SortField::CreatedAt => "created_at",
        }
    }
}

impl FromStr for SortField {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "stock" => Ok(SortField::Stock),
            "price" => Ok(SortField::Price),
            "created_at" => Ok(SortField::CreatedAt),
            other => Err(ApiError::Validation(format!(
                "invalid sort_by '{}': expected one of name, stock, price, created_at",
                other
            ))),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(ApiError::Validation(format!(
                "invalid sort_order '{}': expected asc or desc",
                other
            ))),
        }
    }
}

/// Ordering of a listing.
///
/// Only `created_at` ordering is broken by identifier. Explicit sorts on
/// name, stock or price leave ties in store order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn breaks_ties_by_id(&self) -> bool {
        self.field == SortField::CreatedAt
    }

    /// Compares two items the way a store orders them.
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        let primary = match self.field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Stock => a.stock.cmp(&b.stock),
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        let ordering = if self.breaks_ties_by_id() {
            primary.then_with(|| a.id.cmp(&b.id))
        } else {
            primary
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Aggregates over a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aggregates {
    /// Sum of price * stock, 0 when nothing matches
    pub total_value: f64,
    /// Mean price, 0 when nothing matches
    pub average_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_sort_field_rejects_unknown() {
        assert_eq!("price".parse::<SortField>().unwrap(), SortField::Price);
        assert!(matches!(
            "invalid_field".parse::<SortField>(),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            "NAME".parse::<SortField>(),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_sort_direction_rejects_unknown() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_filter_matches_case_insensitive_substring() {
        let item = Item::new("Gaming Mouse", 100, 49.99);
        let filter = ItemFilter {
            name: Some("mOuSe".to_string()),
            min_stock: Some(50),
            ..Default::default()
        };
        assert!(filter.matches(&item));

        let too_cheap = ItemFilter {
            min_price: Some(50.0),
            ..Default::default()
        };
        assert!(!too_cheap.matches(&item));
    }

    #[test]
    fn test_predicate_excludes_soft_deleted() {
        let mut item = Item::new("Webcam", 80, 89.99);
        assert!(Predicate::all().matches(&item));

        item.deleted_at = Some(Utc::now());
        assert!(!Predicate::all().matches(&item));
    }

    #[test]
    fn test_cursor_position_breaks_ties_by_id() {
        let a = Item::new("a", 1, 1.0);
        let mut b = Item::new("b", 1, 1.0);
        b.created_at = a.created_at;

        let (low, high) = if a.id < b.id { (a, b) } else { (b, a) };
        let pos = CursorPosition::of(&high);
        assert!(pos.precedes(&low));
        assert!(!pos.precedes(&high));

        let mut older = Item::new("c", 1, 1.0);
        older.created_at = high.created_at - Duration::seconds(1);
        assert!(pos.precedes(&older));
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let mut old = Item::new("old", 1, 1.0);
        old.created_at -= Duration::seconds(10);
        let new = Item::new("new", 1, 1.0);

        assert_eq!(SortSpec::default().compare(&new, &old), Ordering::Less);
        let asc = SortSpec::new(SortField::CreatedAt, SortDirection::Asc);
        assert_eq!(asc.compare(&new, &old), Ordering::Greater);
    }
}
