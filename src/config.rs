//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Sustained requests per second allowed for each caller
    pub rate_limit_requests: u32,
    /// Burst size of each caller's token bucket
    pub rate_limit_burst: u32,
    /// Interval in seconds between idle rate-limit bucket sweeps
    pub rate_limit_sweep_interval: u64,
    /// Maximum number of items the read cache can hold (0 disables the cache)
    pub cache_max_entries: usize,
    /// TTL in seconds for cached items
    pub cache_ttl: u64,
    /// Background cache cleanup interval in seconds
    pub cleanup_interval: u64,
    /// Postgres connection URL; the in-memory store is used when absent
    pub database_url: Option<String>,
    /// Maximum connections in the Postgres pool
    pub db_max_connections: u32,
    /// Whether to insert the sample catalog into an empty store at startup
    pub seed_on_startup: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `RATE_LIMIT_REQUESTS` - Requests per second per caller (default: 1)
    /// - `RATE_LIMIT_BURST` - Burst size per caller (default: 5)
    /// - `RATE_LIMIT_SWEEP_INTERVAL` - Idle bucket sweep in seconds (default: 60)
    /// - `CACHE_MAX_ENTRIES` - Maximum cached items (default: 10000)
    /// - `CACHE_TTL` - Cached item TTL in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - Cache cleanup frequency in seconds (default: 30)
    /// - `DATABASE_URL` - Postgres URL (default: unset, in-memory store)
    /// - `DB_MAX_CONNECTIONS` - Pool size (default: 100)
    /// - `SEED_ON_STARTUP` - Seed an empty store at startup (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            rate_limit_requests: env_or("RATE_LIMIT_REQUESTS", defaults.rate_limit_requests)
                .max(1),
            rate_limit_burst: env_or("RATE_LIMIT_BURST", defaults.rate_limit_burst).max(1),
            rate_limit_sweep_interval: env_or(
                "RATE_LIMIT_SWEEP_INTERVAL",
                defaults.rate_limit_sweep_interval,
            ),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", defaults.db_max_connections),
            seed_on_startup: env_or("SEED_ON_STARTUP", defaults.seed_on_startup),
        }
    }
}

/// Reads and parses an environment variable, falling back on absence or parse failure.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            rate_limit_requests: 1,
            rate_limit_burst: 5,
            rate_limit_sweep_interval: 60,
            cache_max_entries: 10_000,
            cache_ttl: crate::cache::DEFAULT_ITEM_TTL_SECS,
            cleanup_interval: 30,
            database_url: None,
            db_max_connections: 100,
            seed_on_startup: true,
        }
    }
}
