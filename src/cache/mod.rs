//! Cache Module
//!
//! Client-side query cache with read-through fetching, invalidation, and
//! optimistic updates with rollback.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

mod entry;
mod optimistic;
mod query;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, EntryStatus};
pub use optimistic::with_optimistic_update;
pub use query::query;
pub use stats::CacheStats;
pub use store::QueryCache;

// == Query Keys ==
/// Cache key of the favorites collection.
pub const FAVORITES_KEY: &str = "favorites";

/// Cache key of the cart collection.
pub const CART_KEY: &str = "cart";

/// Cache key of the user profile probe.
pub const PROFILE_KEY: &str = "profile";

/// Cache key of a single product's saved-status.
pub fn favorite_status_key(product_id: &str) -> String {
    format!("favorite-status:{}", product_id)
}

// == Shared Handle ==
/// Shared, process-wide cache handle used by all service consumers.
pub type SharedCache = Arc<RwLock<QueryCache>>;

/// Creates a shared cache with the given staleness window.
pub fn shared(stale_time: Duration) -> SharedCache {
    Arc::new(RwLock::new(QueryCache::new(stale_time)))
}
