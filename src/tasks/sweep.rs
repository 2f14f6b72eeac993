//! Rate limiter sweep task
//!
//! Keeps the per-caller bucket map from growing without bound.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::service::ItemService;

/// Spawns a task forgetting idle rate-limit buckets every
/// `sweep_interval_secs` seconds (at least one).
pub fn spawn_limiter_sweep_task(service: Arc<ItemService>, sweep_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting rate limiter sweep task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = service.sweep_limiter();
            if removed > 0 {
                info!(
                    removed,
                    remaining = service.tracked_callers(),
                    "Rate limiter sweep: dropped idle callers"
                );
            } else {
                debug!("Rate limiter sweep: no idle callers");
            }
        }
    })
}
