//! Cache Statistics Module
//!
//! Tracks lifetime cache counters for hit-rate observability.
//!
//! Counters live in a `StatsCell` of atomics so `gets` can be bumped while
//! only a shared grant (or no grant at all) is held on the cache structure;
//! no increment is ever lost to a race. They are monotonic for the life of
//! the cache and deliberately survive `clear`.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Stats Cell ==
/// Live atomic counters owned by the cache.
#[derive(Debug, Default)]
pub(crate) struct StatsCell {
    /// Total lookups, hit or not
    gets: AtomicU64,
    /// Lookups that returned a live value
    hits: AtomicU64,
    /// Entries displaced by the capacity bound
    evictions: AtomicU64,
    /// Entries removed after their deadline passed
    expirations: AtomicU64,
}

impl StatsCell {
    pub fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_expiration(&self) {
        self.expirations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn gets(&self) -> u64 {
        self.gets.load(Ordering::Relaxed)
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    // == Snapshot ==
    /// Point-in-time copy of the counters.
    pub fn snapshot(&self, entries: usize) -> CacheStats {
        CacheStats {
            gets: self.gets(),
            hits: self.hits(),
            evictions: self.evictions.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            entries,
        }
    }
}

// == Cache Stats ==
/// Point-in-time cache statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of lookups performed
    pub gets: u64,
    /// Number of lookups that found a live entry
    pub hits: u64,
    /// Number of entries evicted by the capacity bound
    pub evictions: u64,
    /// Number of entries removed on expiry
    pub expirations: u64,
    /// Entry count at snapshot time
    pub entries: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Lookup hit rate, `hits / gets`. Returns 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.gets == 0 {
            0.0
        } else {
            self.hits as f64 / self.gets as f64
        }
    }
}
