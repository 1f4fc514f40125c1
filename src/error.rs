//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key is present but its TTL has elapsed
    #[error("Key expired: {0}")]
    Expired(String),

    /// A sweep was requested on an empty cache
    #[error("No items available")]
    NoItemsAvailable,

    /// A sweep found nothing eligible for removal
    #[error("No expired items found")]
    NoExpiredItemsFound,

    /// Head (most recently used) entry requested on an empty cache
    #[error("Head entry is not available")]
    HeadNotAvailable,

    /// Tail (eviction candidate) entry requested on an empty cache
    #[error("Tail entry is not available")]
    TailNotAvailable,

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Eviction policy identifier is not recognized
    #[error("Unknown eviction policy: {0}")]
    UnknownPolicy(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
