//! API Module
//!
//! HTTP handlers, middleware and routing for the inventory REST API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET|POST /api/v1/inventory` - List or create items
//! - `GET /api/v1/inventory/stats` - Inventory statistics
//! - `POST /api/v1/inventory/seed` - Seed sample items
//! - `GET|PUT|DELETE /api/v1/inventory/:id` - Single item operations

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
