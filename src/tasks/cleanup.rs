//! Cache Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::service::ItemService;

/// Spawns a background task that drops expired read-cache entries every
/// `cleanup_interval_secs` seconds (at least one).
///
/// The returned handle is aborted during graceful shutdown.
pub fn spawn_cleanup_task(service: Arc<ItemService>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = service.cleanup_cache().await;
            if removed > 0 {
                info!("Cache cleanup: removed {} expired entries", removed);
            } else {
                debug!("Cache cleanup: no expired entries found");
            }
        }
    })
}
