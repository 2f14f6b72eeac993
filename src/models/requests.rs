//! Request DTOs for the inventory API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

/// Maximum item name length in characters
pub const MAX_NAME_LENGTH: usize = 255;

/// Request body for creating an item (POST /api/v1/inventory)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub stock: i32,
    pub price: f64,
}

impl CreateItemRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_name(&self.name)
            .or_else(|| validate_stock(self.stock))
            .or_else(|| validate_price(self.price))
    }
}

/// Request body for a partial update (PUT /api/v1/inventory/:id)
///
/// Absent fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stock: Option<i32>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl UpdateItemRequest {
    /// Validates every field that is present.
    pub fn validate(&self) -> Option<String> {
        self.name
            .as_deref()
            .and_then(validate_name)
            .or_else(|| self.stock.and_then(validate_stock))
            .or_else(|| self.price.and_then(validate_price))
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.stock.is_none() && self.price.is_none()
    }
}

/// Query string of the list endpoint (GET /api/v1/inventory)
///
/// Values are kept raw here; `pagination::ListQuery` validates them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub cursor: Option<String>,
    pub name: Option<String>,
    pub min_stock: Option<i32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

fn validate_name(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        return Some("Name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Some(format!(
            "Name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        ));
    }
    None
}

fn validate_stock(stock: i32) -> Option<String> {
    (stock < 0).then(|| "Stock cannot be negative".to_string())
}

fn validate_price(price: f64) -> Option<String> {
    if !price.is_finite() {
        return Some("Price must be a finite number".to_string());
    }
    (price < 0.0).then(|| "Price cannot be negative".to_string())
}
