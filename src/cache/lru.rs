//! LRU Cache Module
//!
//! The public, thread-safe cache: a `CacheCore` behind one readers-writer
//! lock, plus atomic lifetime counters.
//!
//! A single lock guards the key index and the recency list as one unit;
//! their bijection spans both, so they are never guarded separately. `len`,
//! `keys` and `contains_key` take a shared grant. `get` probes under a
//! shared grant and, unless the key is absent, escalates to an exclusive
//! grant for the move-to-front (or expiry removal), re-checking presence
//! after the escalation since the key may have been deleted or evicted in
//! the window. `set`, `delete` and `clear` hold an exclusive grant for
//! their full duration. Every hold is O(1) pointer and index work.

use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::cache::stats::{CacheStats, StatsCell};
use crate::cache::store::{CacheCore, Lookup, Probe};
use crate::error::Result;

// == LRU Cache ==
/// A fixed-capacity key-value cache with LRU eviction and optional
/// per-entry TTL expiration.
///
/// Capacity is counted in entries; `0` means unbounded (only `delete`,
/// `clear` and expiry remove entries). Values are cloned out on `get`, so
/// share large payloads via `Arc`. Expired entries are discovered lazily:
/// they linger until a lookup touches them, there is no background sweep.
///
/// All methods take `&self`; wrap the cache in an [`std::sync::Arc`] to
/// share it across threads.
///
/// # Examples
/// ```
/// use lru_ttl_cache::LruCache;
///
/// let cache = LruCache::new(2);
/// cache.set("a", 1, None).unwrap();
/// cache.set("b", 2, None).unwrap();
/// cache.set("c", 3, None).unwrap(); // evicts "a"
///
/// assert_eq!(cache.get("a"), None);
/// assert_eq!(cache.get("c"), Some(3));
/// assert_eq!(cache.keys(), vec!["c", "b"]);
/// ```
#[derive(Debug)]
pub struct LruCache<V> {
    /// Index + recency list, guarded as one unit
    core: RwLock<CacheCore<V>>,
    /// Lifetime counters, outside the lock
    stats: StatsCell,
}

impl<V: Clone> LruCache<V> {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of `0` disables eviction by size entirely.
    pub fn new(capacity: usize) -> Self {
        Self {
            core: RwLock::new(CacheCore::new(capacity)),
            stats: StatsCell::default(),
        }
    }

    // == Get ==
    /// Retrieves the value stored under `key`, promoting the entry to most
    /// recently used.
    ///
    /// Counts toward `gets` unconditionally. A live hit also counts toward
    /// `hits` and returns a clone of the value. An entry past its deadline
    /// is removed as part of this call and reported as `None`, without
    /// counting as a hit.
    pub fn get(&self, key: &str) -> Option<V> {
        self.stats.record_get();

        // Fast miss under a shared grant; anything else needs to mutate.
        if self.core.read().probe(key, Instant::now()) == Probe::Absent {
            return None;
        }

        // The entry may have been deleted, evicted or replaced between the
        // grants; lookup re-checks under the exclusive one.
        match self.core.write().lookup(key, Instant::now()) {
            Lookup::Hit(value) => {
                self.stats.record_hit();
                Some(value)
            }
            Lookup::Expired => {
                self.stats.record_expiration();
                trace!("removed expired entry {key} on access");
                None
            }
            Lookup::Miss => None,
        }
    }

    // == Set ==
    /// Stores `value` under `key`, marking it most recently used.
    ///
    /// An existing entry is replaced in place and its deadline refreshed,
    /// or cleared when `ttl` is `None`. A new entry that pushes the cache
    /// past a non-zero capacity evicts exactly the least recently used
    /// entry.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidTtl` if `now + ttl` overflows the
    /// clock; the cache is left untouched.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) -> Result<()> {
        let evicted = self
            .core
            .write()
            .set(key.into(), value, ttl, Instant::now())?;

        if let Some(evicted) = evicted {
            self.stats.record_eviction();
            debug!("evicted least recently used entry {evicted}");
        }
        Ok(())
    }

    // == Delete ==
    /// Removes `key` if present. Deleting an absent key is a no-op.
    pub fn delete(&self, key: &str) {
        self.core.write().remove(key);
    }

    // == Length ==
    /// Current number of entries, expired-but-undiscovered ones included.
    pub fn len(&self) -> usize {
        self.core.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Keys ==
    /// Snapshot of all keys in recency order, most recent first.
    pub fn keys(&self) -> Vec<String> {
        self.core.read().keys()
    }

    // == Contains ==
    /// Whether a live (unexpired) entry exists for `key`. Does not promote
    /// the entry and does not count toward `gets`/`hits`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.core.read().probe(key, Instant::now()) == Probe::Live
    }

    // == TTL ==
    /// Remaining time-to-live for `key`, if it holds a live entry with a
    /// deadline. Like [`contains_key`](Self::contains_key), this neither
    /// promotes the entry nor counts as a lookup.
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        self.core.read().ttl_remaining(key, Instant::now())
    }

    // == Clear ==
    /// Discards all entries. Lifetime counters are unaffected.
    pub fn clear(&self) {
        let mut core = self.core.write();
        let dropped = core.len();
        core.clear();
        debug!("cleared {dropped} entries");
    }

    // == Capacity ==
    /// The capacity bound this cache was created with (0 = unbounded).
    pub fn capacity(&self) -> usize {
        self.core.read().capacity()
    }

    // == Counters ==
    /// Total lookups performed over the cache's lifetime.
    pub fn gets(&self) -> u64 {
        self.stats.gets()
    }

    /// Total lookups that returned a live value.
    pub fn hits(&self) -> u64 {
        self.stats.hits()
    }

    // == Stats ==
    /// Point-in-time statistics snapshot.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len())
    }
}

impl<V: Clone> Default for LruCache<V> {
    /// An unbounded cache, for callers who only want TTL and explicit
    /// removal semantics.
    fn default() -> Self {
        Self::new(0)
    }
}
