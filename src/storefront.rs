//! Storefront Facade
//!
//! Owns the shared HTTP client and query cache and hands out the per-resource
//! service surfaces. One instance per process; all consumers share the same
//! session state and cache.

use std::sync::Arc;

use crate::cache::{self, CacheStats, SharedCache};
use crate::config::Config;
use crate::error::Result;
use crate::http::ApiClient;
use crate::services::{AuthApi, CartApi, FavoritesApi, PaymentApi, UsersApi};
use crate::tasks::spawn_revalidate_task;

// == Storefront ==
/// Entry point of the client core.
#[derive(Debug, Clone)]
pub struct Storefront {
    client: Arc<ApiClient>,
    cache: SharedCache,
    revalidate_interval_secs: u64,
}

impl Storefront {
    // == Constructor ==
    /// Creates a storefront from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Arc::new(ApiClient::new(config)?);
        let cache = cache::shared(config.stale_time());
        Ok(Self {
            client,
            cache,
            revalidate_interval_secs: config.revalidate_interval_secs,
        })
    }

    /// Creates a storefront from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(&Config::from_env())
    }

    // == Service Surfaces ==
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(Arc::clone(&self.client))
    }

    pub fn users(&self) -> UsersApi {
        UsersApi::new(Arc::clone(&self.client), Arc::clone(&self.cache))
    }

    pub fn favorites(&self) -> FavoritesApi {
        FavoritesApi::new(Arc::clone(&self.client), Arc::clone(&self.cache))
    }

    pub fn cart(&self) -> CartApi {
        CartApi::new(Arc::clone(&self.client), Arc::clone(&self.cache))
    }

    pub fn payment(&self) -> PaymentApi {
        PaymentApi::new(Arc::clone(&self.client), Arc::clone(&self.cache))
    }

    // == Shared State ==
    /// The underlying HTTP client.
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// The shared query cache.
    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    /// Current cache statistics.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    // == Background Revalidation ==
    /// Starts the staleness revalidation sweep.
    ///
    /// The returned handle should be aborted at teardown.
    pub fn start_revalidation(&self) -> tokio::task::JoinHandle<()> {
        spawn_revalidate_task(Arc::clone(&self.cache), self.revalidate_interval_secs)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_storefront_new() {
        let storefront = Storefront::new(&Config::default()).unwrap();
        let stats = storefront.cache_stats().await;
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test]
    async fn test_surfaces_share_cache() {
        let storefront = Storefront::new(&Config::default()).unwrap();
        storefront
            .cache()
            .write()
            .await
            .put("favorites", &serde_json::json!([]))
            .unwrap();

        let stats = storefront.cache_stats().await;
        assert_eq!(stats.total_entries, 1);
    }
}
