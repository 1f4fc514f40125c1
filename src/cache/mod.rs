//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and capacity eviction.
//!
//! Every eviction policy implements the same [`Cache`] contract; the
//! diagnostic [`Inspect`] view is kept separate so production callers only
//! see the operations they need.

mod clock;
mod entry;
mod fifo;
mod lru;
mod ordered;
mod policy;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

use std::collections::HashMap;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{Entry, Expiry, Ttl};
pub use fifo::FifoCache;
pub use lru::LruCache;
pub use policy::{build, build_with_clock, PolicyCache};
pub use stats::CacheStats;

use crate::error::Result;

// == Public Constants ==
/// Sentinel seconds value meaning "never expires"
pub const NO_EXPIRE: i64 = -1;

/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 100;

/// Default TTL in seconds (20 minutes)
pub const DEFAULT_EXPIRE: i64 = 1200;

// == Cache Contract ==
/// Operations every eviction policy provides.
///
/// All methods are safe to call from many threads at once; each call runs
/// under the instance's lock and sees both indices in a consistent state.
pub trait Cache<V>: Send + Sync {
    /// Returns the value for `key` if present and not expired.
    ///
    /// An expired entry yields [`CacheError::Expired`](crate::CacheError::Expired)
    /// and stays stored until deleted or swept.
    fn get(&self, key: &str) -> Result<V>;

    /// Inserts or replaces `key` using the cache's default TTL.
    fn set(&self, key: &str, value: V);

    /// Inserts or replaces `key` with an explicit TTL.
    fn set_with_expire(&self, key: &str, value: V, ttl: Ttl);

    /// Returns every entry that has not expired, without touching order.
    fn get_all(&self) -> HashMap<String, V>;

    /// Returns the number of stored entries, expired-but-unswept included.
    fn count(&self) -> usize;

    /// Removes `key` whether or not it has expired.
    fn delete(&self, key: &str) -> Result<()>;

    /// Removes all expired entries and returns how many were removed.
    fn delete_expired(&self) -> Result<usize>;

    /// Returns current cache statistics.
    fn stats(&self) -> CacheStats;
}

// == Diagnostics ==
/// Introspection of the eviction order, for tests and debugging.
pub trait Inspect<V> {
    /// The most recently touched entry.
    fn head(&self) -> Result<Entry<V>>;

    /// The entry that the next capacity eviction would remove.
    fn tail(&self) -> Result<Entry<V>>;
}
