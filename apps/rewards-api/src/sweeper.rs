//! Background expiry sweep.
//!
//! Reads already ignore expired entries; the sweep only frees their memory.

use std::time::Duration;

use rewards_store::Stores;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

/// Spawns a task that purges expired entries every `period`.
///
/// The task runs until the returned handle is aborted.
pub fn spawn_sweeper(stores: Stores, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // First tick completes immediately
        ticker.tick().await;

        info!(period_secs = period.as_secs(), "Expiry sweeper started");

        loop {
            ticker.tick().await;

            match stores.purge_expired() {
                Ok(stats) => debug!(
                    receipts = stats.receipts,
                    markers = stats.markers,
                    "Expired entries purged"
                ),
                Err(e) => error!(error = %e, "Expiry sweep failed"),
            }
        }
    })
}
