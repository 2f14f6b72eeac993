//! Response DTOs for the inventory API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use super::Item;
use crate::cache::CacheStats;
use crate::pagination::Page;

/// Response body of the list endpoint (GET /api/v1/inventory)
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse {
    pub items: Vec<Item>,
    /// Present iff more results exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
    /// Matching rows before pagination; approximate under concurrent writes
    pub total: i64,
}

impl From<Page> for PaginatedResponse {
    fn from(page: Page) -> Self {
        Self {
            items: page.items,
            next_cursor: page.next_cursor,
            has_more: page.has_more,
            total: page.total,
        }
    }
}

/// Aggregate inventory statistics (GET /api/v1/inventory/stats)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemStats {
    pub total_items: i64,
    /// Sum of price * stock over live items
    pub total_value: f64,
    pub average_price: f64,
    /// Items with stock below the low-stock threshold
    pub low_stock_items: i64,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Read cache statistics, absent when running cache-less
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheStats>,
    /// Caller keys currently tracked by the rate limiter
    pub rate_limited_keys: usize,
}

impl HealthResponse {
    /// Creates a healthy HealthResponse with current timestamp
    pub fn healthy(cache: Option<CacheStats>, rate_limited_keys: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            error: None,
            cache,
            rate_limited_keys,
        }
    }

    /// Creates an unhealthy HealthResponse carrying the failure
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            error: Some(error.into()),
            cache: None,
            rate_limited_keys: 0,
        }
    }
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Stable error category (e.g. "not_found")
    pub error: String,
    /// Human readable detail
    pub message: String,
    /// HTTP status code
    pub code: u16,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>, message: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            code,
        }
    }
}
