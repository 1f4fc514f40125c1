//! LRU Cache Module
//!
//! Least Recently Used policy: every successful read or write moves the
//! entry to the front, and capacity eviction removes the back.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::cache::store::Store;
use crate::cache::{Cache, CacheStats, Clock, Entry, Inspect, SystemClock, Ttl};
use crate::error::Result;

// == LRU Cache ==
/// Thread-safe LRU cache with per-entry expiration.
///
/// A single `RwLock` guards the store. `get` takes the write lock because a
/// hit reorders the recency list; `get_all` and `count` only read.
#[derive(Debug)]
pub struct LruCache<V> {
    store: RwLock<Store<V>>,
}

impl<V: Clone> LruCache<V> {
    // == Constructor ==
    /// Creates a new LruCache using the system clock.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries the cache can hold
    /// * `default_ttl` - TTL applied by [`Cache::set`]
    pub fn new(capacity: NonZeroUsize, default_ttl: Ttl) -> Self {
        Self::with_clock(capacity, default_ttl, Arc::new(SystemClock))
    }

    /// Creates a new LruCache stamping expirations with `clock`.
    pub fn with_clock(capacity: NonZeroUsize, default_ttl: Ttl, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RwLock::new(Store::new(capacity, default_ttl, clock)),
        }
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.store.read().capacity()
    }
}

impl<V: Clone + Send + Sync> Cache<V> for LruCache<V> {
    fn get(&self, key: &str) -> Result<V> {
        self.store.write().lookup(key)
    }

    fn set(&self, key: &str, value: V) {
        let mut store = self.store.write();
        let ttl = store.default_ttl();
        store.upsert(key, value, ttl);
    }

    fn set_with_expire(&self, key: &str, value: V, ttl: Ttl) {
        self.store.write().upsert(key, value, ttl);
    }

    fn get_all(&self) -> HashMap<String, V> {
        self.store.read().snapshot()
    }

    fn count(&self) -> usize {
        self.store.read().len()
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.store.write().remove(key)
    }

    fn delete_expired(&self) -> Result<usize> {
        self.store.write().remove_expired()
    }

    fn stats(&self) -> CacheStats {
        self.store.read().stats()
    }
}

impl<V: Clone> Inspect<V> for LruCache<V> {
    fn head(&self) -> Result<Entry<V>> {
        self.store.read().head()
    }

    fn tail(&self) -> Result<Entry<V>> {
        self.store.read().tail()
    }
}
