//! Query Cache Store Module
//!
//! String-keyed cache of server responses backing the query and optimistic
//! mutation layers. Entries are created on first read and never deleted
//! except by a rollback of an optimistic insert or process teardown.

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::cache::{CacheEntry, CacheStats, EntryStatus};
use crate::error::Result;

// == Query Cache ==
/// Main query cache, one entry per logical query key.
#[derive(Debug)]
pub struct QueryCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Behavior statistics
    stats: CacheStats,
    /// How long an entry stays servable without a refetch
    stale_time: Duration,
}

impl QueryCache {
    // == Constructor ==
    /// Creates a new QueryCache with the given staleness window.
    pub fn new(stale_time: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            stale_time,
        }
    }

    // == Lookup ==
    /// Returns the cached value for `key` if it is servable.
    ///
    /// Records a hit for a fresh entry, a miss for a missing, stale, or
    /// undecodable one. An entry whose data no longer decodes as `T` is
    /// marked stale so the next read refetches it.
    pub fn lookup_as<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let stale_time = self.stale_time;
        match self.entries.get_mut(key) {
            Some(entry) if entry.is_servable(stale_time) => {
                match serde_json::from_value(entry.data.clone()) {
                    Ok(data) => {
                        self.stats.record_hit();
                        Some(data)
                    }
                    Err(err) => {
                        warn!(key, error = %err, "cached data no longer decodes, refetching");
                        entry.mark_stale();
                        self.stats.record_miss();
                        None
                    }
                }
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Returns the cached value regardless of freshness, without touching
    /// statistics. Used to keep stale data visible when a refetch fails.
    pub fn any_data_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entry = self.entries.get(key)?;
        serde_json::from_value(entry.data.clone()).ok()
    }

    // == Put ==
    /// Stores a value under `key` as a fresh entry.
    pub fn put<T: Serialize>(&mut self, key: &str, data: &T) -> Result<()> {
        let value = serde_json::to_value(data)?;
        self.entries.insert(key.to_string(), CacheEntry::fresh(value));
        self.stats.set_total_entries(self.entries.len());
        Ok(())
    }

    // == Invalidate ==
    /// Marks an entry stale, forcing the next read to refetch.
    ///
    /// Invalidating a key with no entry is a no-op; returns whether an entry
    /// was marked.
    pub fn invalidate(&mut self, key: &str) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.mark_stale();
                self.stats.record_invalidation();
                true
            }
            None => false,
        }
    }

    // == Fetch Bookkeeping ==
    /// Flags an existing entry as having a refetch in flight.
    pub fn mark_fetching(&mut self, key: &str) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.status = EntryStatus::Fetching;
        }
    }

    /// Returns a fetching entry to stale after a failed refetch, keeping its
    /// data visible for the next attempt.
    pub fn settle_stale(&mut self, key: &str) {
        if let Some(entry) = self.entries.get_mut(key) {
            if entry.status == EntryStatus::Fetching {
                entry.mark_stale();
            }
        }
    }

    // == Snapshot / Restore ==
    /// Captures the current entry for `key` verbatim, for rollback.
    pub fn snapshot(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).cloned()
    }

    /// Restores a snapshot taken before an optimistic apply and counts the
    /// rollback. A `None` snapshot removes the entry the apply created.
    pub fn restore(&mut self, key: &str, snapshot: Option<CacheEntry>) {
        match snapshot {
            Some(entry) => {
                self.entries.insert(key.to_string(), entry);
            }
            None => {
                self.entries.remove(key);
            }
        }
        self.stats.record_rollback();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Revalidation Sweep ==
    /// Marks every fresh entry whose staleness window has elapsed as stale.
    ///
    /// Returns the number of entries marked.
    pub fn mark_elapsed_stale(&mut self) -> usize {
        let stale_time = self.stale_time;
        let mut marked = 0;
        for entry in self.entries.values_mut() {
            if entry.status == EntryStatus::Fresh && entry.has_elapsed(stale_time) {
                entry.mark_stale();
                marked += 1;
            }
        }
        for _ in 0..marked {
            self.stats.record_invalidation();
        }
        marked
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
