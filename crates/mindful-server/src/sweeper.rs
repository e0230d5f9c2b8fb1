//! Periodic removal of expired price cache entries.

use std::sync::Arc;
use std::time::Duration;

use mindful_scraper::PriceService;
use tokio::task::JoinHandle;

/// Spawns a task that sweeps the price cache every `every`.
///
/// The returned handle must be kept alive (or aborted) by the caller; the
/// task runs until the runtime shuts down.
pub fn spawn_cache_sweeper(prices: Arc<PriceService>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = prices.sweep_cache().await;
            if removed > 0 {
                tracing::debug!(removed, "sweeper: dropped expired price cache entries");
            }
        }
    })
}
