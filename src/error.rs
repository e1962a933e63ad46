//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Missing keys are not errors: `get` reports them as `None` and `delete`
/// is a silent no-op. The only fail-fast condition is a caller-supplied
/// TTL whose deadline cannot be represented on the monotonic clock.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CacheError {
    /// TTL is so large that `now + ttl` overflows the clock
    #[error("Invalid TTL: deadline for {0:?} is not representable")]
    InvalidTtl(Duration),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
