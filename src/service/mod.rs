//! Service Module
//!
//! Business operations over the item collection.

mod catalog;
mod item_service;

pub use catalog::{sample_items, SAMPLE_CATALOG};
pub use item_service::{ItemService, LOW_STOCK_THRESHOLD};
