//! Staleness Revalidation Task
//!
//! Background task that periodically marks elapsed cache entries stale, so
//! optimistic state that was never reconciled (because an invalidation was
//! lost or a refetch kept failing) is eventually replaced by server truth.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that periodically sweeps the query cache.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. Each sweep acquires a write lock and marks every fresh
/// entry whose staleness window has elapsed.
///
/// # Arguments
/// * `cache` - shared query cache handle
/// * `interval_secs` - interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during teardown.
pub fn spawn_revalidate_task(cache: SharedCache, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting revalidation task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let marked = {
                let mut store = cache.write().await;
                store.mark_elapsed_stale()
            };

            if marked > 0 {
                info!("Revalidation sweep: marked {} entries stale", marked);
            } else {
                debug!("Revalidation sweep: no elapsed entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache;
    use serde_json::json;

    #[tokio::test]
    async fn test_revalidate_task_marks_elapsed_entries() {
        // One-second staleness window so the entry elapses quickly
        let cache = cache::shared(Duration::from_secs(1));
        cache.write().await.put("favorites", &json!(["p1"])).unwrap();

        let handle = spawn_revalidate_task(cache.clone(), 1);

        tokio::time::sleep(Duration::from_millis(2500)).await;

        {
            let mut store = cache.write().await;
            assert!(
                store.lookup_as::<serde_json::Value>("favorites").is_none(),
                "Elapsed entry should have been marked stale"
            );
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_revalidate_task_preserves_fresh_entries() {
        let cache = cache::shared(Duration::from_secs(3600));
        cache.write().await.put("cart", &json!([])).unwrap();

        let handle = spawn_revalidate_task(cache.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let mut store = cache.write().await;
            assert!(
                store.lookup_as::<serde_json::Value>("cart").is_some(),
                "Fresh entry should not be marked stale"
            );
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_revalidate_task_can_be_aborted() {
        let cache = cache::shared(Duration::from_secs(60));

        let handle = spawn_revalidate_task(cache, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
