//! LRU TTL Cache - a bounded in-process key-value cache
//!
//! Provides Least-Recently-Used eviction with optional per-entry TTL
//! expiration. All operations are synchronous and safe to call from
//! multiple threads.

pub mod cache;
pub mod error;

pub use cache::{CacheStats, LruCache};
pub use error::{CacheError, Result};
