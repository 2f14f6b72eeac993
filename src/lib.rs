//! Inventory API - a rate-limited, cached inventory service
//!
//! Item CRUD with cursor pagination over a pluggable record store, a
//! write-invalidated read cache and per-caller token-bucket limiting.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod ratelimit;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{ApiError, Result, StoreError};
pub use service::ItemService;
pub use store::{ItemStore, MemoryStore, PgStore};
pub use tasks::{spawn_cleanup_task, spawn_limiter_sweep_task};
