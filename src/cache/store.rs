//! Cache Core Module
//!
//! The unsynchronized cache engine: a key index (`HashMap`) over a
//! `RecencyList`, with capacity enforcement and lazy TTL expiration.
//! `LruCache` wraps this behind a readers-writer lock.
//!
//! The index and the list are a bijection: every indexed key points at
//! exactly one live list slot holding that key, and every live slot is
//! indexed. All mutations here preserve that, including the failure path
//! of `set` (the entry is validated before either structure is touched).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::entry::CacheEntry;
use crate::cache::order::RecencyList;
use crate::error::Result;

// == Lookup Outcome ==
/// What a mutating lookup found. `Expired` means the entry was present but
/// past its deadline and has been removed.
#[derive(Debug)]
pub(crate) enum Lookup<V> {
    Hit(V),
    Expired,
    Miss,
}

// == Probe Outcome ==
/// What a read-only probe found. Unlike `Lookup`, probing an expired entry
/// leaves it in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Probe {
    Live,
    Expired,
    Absent,
}

// == Cache Core ==
/// Cache engine combining the key index with the recency list.
#[derive(Debug)]
pub(crate) struct CacheCore<V> {
    /// Key to list-handle index
    index: HashMap<String, usize>,
    /// Entries in recency order
    order: RecencyList<V>,
    /// Maximum entry count, 0 = unbounded
    capacity: usize,
}

impl<V: Clone> CacheCore<V> {
    // == Constructor ==
    /// Creates an empty core with the given capacity bound (0 = unbounded).
    pub fn new(capacity: usize) -> Self {
        Self {
            index: HashMap::new(),
            order: RecencyList::new(),
            capacity,
        }
    }

    // == Probe ==
    /// Read-only presence check as of `now`. Never mutates order or
    /// structure, so it is safe under a shared grant.
    pub fn probe(&self, key: &str, now: Instant) -> Probe {
        match self.index.get(key).and_then(|&h| self.order.get(h)) {
            Some(entry) if entry.is_expired(now) => Probe::Expired,
            Some(_) => Probe::Live,
            None => Probe::Absent,
        }
    }

    // == Lookup ==
    /// Mutating lookup as of `now`: a live hit is promoted to the front and
    /// its value cloned out; an expired entry is removed from both the index
    /// and the list.
    pub fn lookup(&mut self, key: &str, now: Instant) -> Lookup<V> {
        let handle = match self.index.get(key) {
            Some(&h) => h,
            None => return Lookup::Miss,
        };

        let expired = match self.order.get(handle) {
            Some(entry) => entry.is_expired(now),
            None => return Lookup::Miss,
        };

        if expired {
            self.index.remove(key);
            self.order.remove(handle);
            return Lookup::Expired;
        }

        self.order.move_to_front(handle);
        match self.order.get(handle) {
            Some(entry) => Lookup::Hit(entry.value.clone()),
            None => Lookup::Miss,
        }
    }

    // == Set ==
    /// Inserts or replaces `key`. An existing entry keeps its list slot: the
    /// value is swapped in place, the deadline refreshed or cleared per the
    /// new `ttl`, and the slot promoted to the front. A new entry is pushed
    /// to the front and indexed; if that pushes the length past a non-zero
    /// capacity, the back entry is evicted and its key returned.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidTtl` if the deadline overflows; neither
    /// structure is touched in that case.
    pub fn set(
        &mut self,
        key: String,
        value: V,
        ttl: Option<Duration>,
        now: Instant,
    ) -> Result<Option<String>> {
        let entry = CacheEntry::new(key, value, ttl, now)?;

        if let Some(&handle) = self.index.get(&entry.key) {
            if let Some(existing) = self.order.get_mut(handle) {
                existing.value = entry.value;
                existing.expires_at = entry.expires_at;
                self.order.move_to_front(handle);
                return Ok(None);
            }
        }

        let key = entry.key.clone();
        let handle = self.order.push_front(entry);
        self.index.insert(key, handle);

        if self.capacity > 0 && self.order.len() > self.capacity {
            return Ok(self.evict_back());
        }
        Ok(None)
    }

    // == TTL ==
    /// Remaining TTL for a live entry as of `now`. None for absent keys,
    /// expired entries and entries without a deadline. Read-only.
    pub fn ttl_remaining(&self, key: &str, now: Instant) -> Option<Duration> {
        let entry = self.index.get(key).and_then(|&h| self.order.get(h))?;
        if entry.is_expired(now) {
            return None;
        }
        entry.ttl_remaining(now)
    }

    // == Remove ==
    /// Removes `key` if present. Returns whether anything was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(handle) => self.order.remove(handle).is_some(),
            None => false,
        }
    }

    // == Length ==
    /// Current entry count.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Keys ==
    /// Snapshot of all keys in recency order, most recent first.
    pub fn keys(&self) -> Vec<String> {
        self.order.iter().map(|entry| entry.key.clone()).collect()
    }

    // == Clear ==
    /// Drops every entry.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    // == Capacity ==
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Internal: eviction ==
    /// Removes the least recently used entry, returning its key.
    fn evict_back(&mut self) -> Option<String> {
        let handle = self.order.back_handle()?;
        let entry = self.order.remove(handle)?;
        self.index.remove(&entry.key);
        Some(entry.key)
    }

    // == Test support ==
    /// Asserts the index/list bijection and the capacity bound.
    #[cfg(test)]
    pub fn assert_invariants(&self) {
        assert_eq!(self.index.len(), self.order.len(), "index/list size skew");
        for (key, &handle) in &self.index {
            let entry = self.order.get(handle).expect("index points at free slot");
            assert_eq!(&entry.key, key, "index key does not match slot key");
        }
        if self.capacity > 0 {
            assert!(self.order.len() <= self.capacity, "capacity exceeded");
        }
    }
}
