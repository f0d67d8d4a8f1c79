//! Read-through query helper.
//!
//! A fresh cache entry is served directly; otherwise the fetcher runs and its
//! result replaces the entry. When a refetch of an existing entry fails
//! transiently, the stale data stays visible rather than surfacing an error.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::cache::SharedCache;
use crate::error::Result;

// == Query ==
/// Reads `key` through the cache, fetching from the server on miss or
/// staleness.
pub async fn query<T, F, Fut>(cache: &SharedCache, key: &str, fetcher: F) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    {
        let mut store = cache.write().await;
        if let Some(data) = store.lookup_as::<T>(key) {
            return Ok(data);
        }
        store.mark_fetching(key);
    }

    match fetcher().await {
        Ok(data) => {
            cache.write().await.put(key, &data)?;
            Ok(data)
        }
        Err(err) => {
            let mut store = cache.write().await;
            if let Some(stale) = store.any_data_as::<T>(key) {
                warn!(key, error = %err, "refetch failed, serving stale data");
                store.settle_stale(key);
                Ok(stale)
            } else {
                store.settle_stale(key);
                Err(err)
            }
        }
    }
}
