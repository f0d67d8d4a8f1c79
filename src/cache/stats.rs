//! Cache Statistics Module
//!
//! Tracks cache behavior metrics including hits, misses, invalidations, and
//! optimistic rollbacks.

use serde::Serialize;

// == Cache Stats ==
/// Tracks query cache metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of reads served from a fresh entry
    pub hits: u64,
    /// Number of reads that needed a fetch (missing or stale entry)
    pub misses: u64,
    /// Number of entries marked stale by invalidation or the revalidation sweep
    pub invalidations: u64,
    /// Number of optimistic updates rolled back after a failed mutation
    pub rollbacks: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Invalidation ==
    /// Increments the invalidation counter.
    pub fn record_invalidation(&mut self) {
        self.invalidations += 1;
    }

    // == Record Rollback ==
    /// Increments the rollback counter.
    pub fn record_rollback(&mut self) {
        self.rollbacks += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.invalidations, 0);
        assert_eq!(stats.rollbacks, 0);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_reads() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_record_invalidation() {
        let mut stats = CacheStats::new();
        stats.record_invalidation();
        stats.record_invalidation();
        assert_eq!(stats.invalidations, 2);
    }

    #[test]
    fn test_record_rollback() {
        let mut stats = CacheStats::new();
        stats.record_rollback();
        assert_eq!(stats.rollbacks, 1);
    }

    #[test]
    fn test_set_total_entries() {
        let mut stats = CacheStats::new();
        stats.set_total_entries(7);
        assert_eq!(stats.total_entries, 7);
    }
}
