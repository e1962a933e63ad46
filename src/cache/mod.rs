//! Cache Module
//!
//! Provides in-memory caching with LRU eviction and lazy TTL expiration.

mod entry;
mod lru;
mod order;
mod stats;
mod store;


// Re-export public types
pub use lru::LruCache;
pub use stats::CacheStats;
