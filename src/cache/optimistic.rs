//! Optimistic update utility.
//!
//! One shared implementation of the snapshot / apply / dispatch / reconcile
//! sequence used by every favorites and cart mutation:
//!
//! 1. snapshot the affected entry (including "absent"),
//! 2. apply the typed transform synchronously under the write lock,
//! 3. await the network request,
//! 4. on success invalidate the affected keys so the next read replaces
//!    synthetic data with server truth,
//! 5. on failure restore the snapshot verbatim and surface the error.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::cache::SharedCache;
use crate::error::Result;

// == With Optimistic Update ==
/// Runs a mutation with an optimistic local apply and rollback on failure.
///
/// `key` is the entry the transform edits; `also_invalidate` lists
/// cross-cutting keys whose collections the mutation changes server-side
/// (e.g. moving a favorite into the cart touches both).
///
/// The snapshot and apply happen in one lock scope, so no reader or
/// concurrent mutation ever observes a half-applied state.
pub async fn with_optimistic_update<T, R, F, Fut>(
    cache: &SharedCache,
    key: &str,
    also_invalidate: &[&str],
    apply: F,
    request: Fut,
) -> Result<R>
where
    T: Serialize + DeserializeOwned + Default,
    F: FnOnce(&mut T),
    Fut: Future<Output = Result<R>>,
{
    let snapshot = {
        let mut store = cache.write().await;
        let snapshot = store.snapshot(key);
        let mut collection: T = snapshot
            .as_ref()
            .and_then(|entry| serde_json::from_value(entry.data.clone()).ok())
            .unwrap_or_default();
        apply(&mut collection);
        store.put(key, &collection)?;
        snapshot
    };

    match request.await {
        Ok(result) => {
            let mut store = cache.write().await;
            store.invalidate(key);
            for other in also_invalidate {
                store.invalidate(other);
            }
            Ok(result)
        }
        Err(err) => {
            debug!(key, error = %err, "mutation failed, rolling back optimistic update");
            cache.write().await.restore(key, snapshot);
            Err(err)
        }
    }
}
