//! Rate Limiting Module
//!
//! Per-caller token buckets, created lazily on first sight of a key and
//! swept once idle.

mod limiter;

pub use limiter::KeyedRateLimiter;
