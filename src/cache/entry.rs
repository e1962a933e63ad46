//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

use crate::error::{CacheError, Result};

// == Cache Entry ==
/// A single cache entry: the key it is stored under, its value, and an
/// optional expiry deadline.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry<V> {
    /// The key this entry is indexed by
    pub key: String,
    /// The stored value
    pub value: V,
    /// Expiry deadline, None = never expires
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry with an optional TTL, measured from `now`.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidTtl` if `now + ttl` overflows the clock.
    pub fn new(key: String, value: V, ttl: Option<Duration>, now: Instant) -> Result<Self> {
        let expires_at = match ttl {
            Some(ttl) => Some(now.checked_add(ttl).ok_or(CacheError::InvalidTtl(ttl))?),
            None => None,
        };

        Ok(Self {
            key,
            value,
            expires_at,
        })
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now`.
    ///
    /// An entry is expired once `now` is at or past its deadline; an entry
    /// without a deadline never expires.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL as of `now`, or None if no deadline is set.
    ///
    /// Returns `Some(Duration::ZERO)` once the deadline has passed.
    pub fn ttl_remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
