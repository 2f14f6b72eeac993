//! Validation of list requests
//!
//! Turns raw query parameters into a [`ListQuery`]. All checks run before
//! the store is touched.

use crate::error::{ApiError, Result};
use crate::models::ListParams;
use crate::store::{CursorPosition, ItemFilter, SortDirection, SortField, SortSpec};

use super::cursor::decode_cursor;

/// Page size used when the caller sends none (or 0)
pub const DEFAULT_LIMIT: usize = 10;
/// Largest accepted page size
pub const MAX_LIMIT: usize = 100;

/// A validated list request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub limit: usize,
    pub cursor: Option<CursorPosition>,
    pub filter: ItemFilter,
    pub sort: SortSpec,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            cursor: None,
            filter: ItemFilter::default(),
            sort: SortSpec::default(),
        }
    }
}

impl ListQuery {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_cursor(mut self, cursor: CursorPosition) -> Self {
        self.cursor = Some(cursor);
        self
    }
}

impl TryFrom<ListParams> for ListQuery {
    type Error = ApiError;

    fn try_from(params: ListParams) -> Result<Self> {
        let limit = parse_limit(params.limit)?;

        let field = params
            .sort_by
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::parse::<SortField>)
            .transpose()?
            .unwrap_or_default();
        let direction = params
            .sort_order
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::parse::<SortDirection>)
            .transpose()?
            .unwrap_or_default();

        let filter = ItemFilter {
            name: params.name.filter(|n| !n.is_empty()),
            min_stock: non_negative("min_stock", params.min_stock)?,
            min_price: non_negative_price("min_price", params.min_price)?,
            max_price: non_negative_price("max_price", params.max_price)?,
        };

        let cursor = params
            .cursor
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(decode_cursor)
            .transpose()?;

        Ok(Self {
            limit,
            cursor,
            filter,
            sort: SortSpec::new(field, direction),
        })
    }
}

fn parse_limit(limit: Option<i64>) -> Result<usize> {
    match limit {
        None | Some(0) => Ok(DEFAULT_LIMIT),
        Some(n) if (1..=MAX_LIMIT as i64).contains(&n) => Ok(n as usize),
        Some(n) => Err(ApiError::Validation(format!(
            "invalid limit {}: must be between 1 and {}",
            n, MAX_LIMIT
        ))),
    }
}

fn non_negative(name: &str, value: Option<i32>) -> Result<Option<i32>> {
    match value {
        Some(v) if v < 0 => Err(ApiError::Validation(format!(
            "{} cannot be negative",
            name
        ))),
        other => Ok(other),
    }
}

fn non_negative_price(name: &str, value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(ApiError::Validation(format!(
            "{} must be a non-negative number",
            name
        ))),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;
    use crate::pagination::encode_cursor;

    fn params() -> ListParams {
        ListParams::default()
    }

    #[test]
    fn test_defaults() {
        let query = ListQuery::try_from(params()).unwrap();
        assert_eq!(query, ListQuery::default());
        assert_eq!(query.sort.field, SortField::CreatedAt);
        assert_eq!(query.sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_limit_bounds() {
        let with_limit = |limit| ListParams {
            limit: Some(limit),
            ..params()
        };

        assert_eq!(ListQuery::try_from(with_limit(0)).unwrap().limit, DEFAULT_LIMIT);
        assert_eq!(ListQuery::try_from(with_limit(1)).unwrap().limit, 1);
        assert_eq!(ListQuery::try_from(with_limit(100)).unwrap().limit, 100);
        assert!(ListQuery::try_from(with_limit(-1)).is_err());
        assert!(ListQuery::try_from(with_limit(101)).is_err());
    }

    #[test]
    fn test_invalid_sort_is_rejected() {
        let bad_field = ListParams {
            sort_by: Some("invalid_field".to_string()),
            ..params()
        };
        let bad_order = ListParams {
            sort_order: Some("invalid".to_string()),
            ..params()
        };

        assert!(matches!(
            ListQuery::try_from(bad_field),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            ListQuery::try_from(bad_order),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_negative_filters_are_rejected() {
        let cases = [
            ListParams {
                min_stock: Some(-1),
                ..params()
            },
            ListParams {
                min_price: Some(-1.0),
                ..params()
            },
            ListParams {
                max_price: Some(f64::NAN),
                ..params()
            },
        ];

        for case in cases {
            assert!(matches!(
                ListQuery::try_from(case),
                Err(ApiError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_cursor_is_decoded() {
        let item = Item::new("Laptop", 1, 1.0);
        let position = CursorPosition::of(&item);
        let query = ListQuery::try_from(ListParams {
            cursor: Some(encode_cursor(&position).unwrap()),
            ..params()
        })
        .unwrap();

        assert_eq!(query.cursor, Some(position));
    }

    #[test]
    fn test_bad_cursor_is_not_a_reset() {
        let result = ListQuery::try_from(ListParams {
            cursor: Some("%%%".to_string()),
            ..params()
        });
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_full_query() {
        let query = ListQuery::try_from(ListParams {
            limit: Some(25),
            name: Some("Mouse".to_string()),
            min_stock: Some(50),
            sort_by: Some("price".to_string()),
            sort_order: Some("asc".to_string()),
            ..params()
        })
        .unwrap();

        assert_eq!(query.limit, 25);
        assert_eq!(query.filter.name.as_deref(), Some("Mouse"));
        assert_eq!(query.sort, SortSpec::new(SortField::Price, SortDirection::Asc));
    }
}
