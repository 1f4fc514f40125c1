//! Heap Cache - An embedded, thread-safe in-memory cache
//!
//! Provides bounded key/value storage with LRU (or FIFO) eviction and
//! per-entry TTL expiration. Expiration is checked lazily on reads;
//! expired entries are only removed by a caller-driven sweep
//! ([`Cache::delete_expired`]).
//!
//! ```
//! use heap_cache::{build, Cache, Config, Ttl};
//! use std::time::Duration;
//!
//! let cache = build::<String>(&Config::default()).unwrap();
//! cache.set("greeting", "hello".to_string());
//! cache.set_with_expire("token", "abc".to_string(), Ttl::After(Duration::from_secs(60)));
//!
//! assert_eq!(cache.get("greeting").unwrap(), "hello");
//! assert_eq!(cache.count(), 2);
//! ```

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{
    build, build_with_clock, Cache, CacheStats, Clock, Entry, Expiry, FifoCache, Inspect,
    LruCache, ManualClock, PolicyCache, SystemClock, Ttl, DEFAULT_CAPACITY, DEFAULT_EXPIRE,
    NO_EXPIRE,
};
pub use config::{Config, EvictionPolicy};
pub use error::{CacheError, Result};
