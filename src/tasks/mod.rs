//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache cleanup: removes expired read-cache entries
//! - Limiter sweep: forgets rate-limit buckets of idle callers

mod cleanup;
mod sweep;

pub use cleanup::spawn_cleanup_task;
pub use sweep::spawn_limiter_sweep_task;
