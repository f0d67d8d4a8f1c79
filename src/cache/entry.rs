//! Cache Entry Module
//!
//! Defines the structure for individual query cache entries.

use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

// == Entry Status ==
/// Lifecycle status of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Last known-good value, serve without refetching
    Fresh,
    /// Marked for refetch; data stays visible until replaced
    Stale,
    /// A refetch is in flight
    Fetching,
}

// == Cache Entry ==
/// A single cached server response keyed by a logical query key.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Last known-good value (raw JSON, typed at the boundary)
    pub data: Value,
    pub status: EntryStatus,
    /// When the data was last written from server truth or an optimistic apply
    pub last_fetched_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a fresh entry holding the given value.
    pub fn fresh(data: Value) -> Self {
        Self {
            data,
            status: EntryStatus::Fresh,
            last_fetched_at: Instant::now(),
        }
    }

    // == Mark Stale ==
    /// Marks the entry for refetch. Data stays visible.
    pub fn mark_stale(&mut self) {
        self.status = EntryStatus::Stale;
    }

    // == Age ==
    /// Time since the entry was last written.
    pub fn age(&self) -> Duration {
        self.last_fetched_at.elapsed()
    }

    // == Has Elapsed ==
    /// Checks whether the staleness window has fully passed.
    ///
    /// Boundary condition: an entry is considered elapsed when its age is
    /// greater than or equal to the window, so the entry becomes refetchable
    /// the moment the window closes.
    pub fn has_elapsed(&self, stale_time: Duration) -> bool {
        self.age() >= stale_time
    }

    // == Is Servable ==
    /// True when the entry can be served without a refetch.
    pub fn is_servable(&self, stale_time: Duration) -> bool {
        self.status == EntryStatus::Fresh && !self.has_elapsed(stale_time)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fresh_entry() {
        let entry = CacheEntry::fresh(json!(["a"]));
        assert_eq!(entry.status, EntryStatus::Fresh);
        assert!(entry.is_servable(Duration::from_secs(60)));
    }

    #[test]
    fn test_mark_stale_keeps_data() {
        let mut entry = CacheEntry::fresh(json!({"k": 1}));
        entry.mark_stale();
        assert_eq!(entry.status, EntryStatus::Stale);
        assert_eq!(entry.data, json!({"k": 1}));
        assert!(!entry.is_servable(Duration::from_secs(60)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_boundary() {
        let entry = CacheEntry::fresh(json!(null));
        assert!(!entry.has_elapsed(Duration::from_secs(60)));

        tokio::time::advance(Duration::from_secs(60)).await;

        // Elapsed exactly at the window boundary
        assert!(entry.has_elapsed(Duration::from_secs(60)));
        assert!(!entry.is_servable(Duration::from_secs(60)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_age_grows() {
        let entry = CacheEntry::fresh(json!(null));
        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(entry.age(), Duration::from_secs(5));
    }
}
