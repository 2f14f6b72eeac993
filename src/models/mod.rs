//! Item model and the request/response DTOs of the inventory API
//!
//! This module defines the stored record type plus the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod item;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use item::{now, Item};
pub use requests::{CreateItemRequest, ListParams, UpdateItemRequest, MAX_NAME_LENGTH};
pub use responses::{
    ErrorResponse, HealthResponse, ItemStats, MessageResponse, PaginatedResponse,
};
