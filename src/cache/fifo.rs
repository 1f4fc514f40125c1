//! FIFO Cache Module
//!
//! Insertion-order policy: reads never reorder entries, writes (including
//! overwrites) queue the entry at the front, and capacity eviction removes
//! the back.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::cache::store::Store;
use crate::cache::{Cache, CacheStats, Clock, Entry, Inspect, SystemClock, Ttl};
use crate::error::Result;

// == FIFO Cache ==
/// Thread-safe FIFO cache with per-entry expiration.
///
/// Since a hit does not move anything, `get` only needs the read lock.
#[derive(Debug)]
pub struct FifoCache<V> {
    store: RwLock<Store<V>>,
}

impl<V: Clone> FifoCache<V> {
    /// Creates a new FifoCache using the system clock.
    pub fn new(capacity: NonZeroUsize, default_ttl: Ttl) -> Self {
        Self::with_clock(capacity, default_ttl, Arc::new(SystemClock))
    }

    /// Creates a new FifoCache stamping expirations with `clock`.
    pub fn with_clock(capacity: NonZeroUsize, default_ttl: Ttl, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RwLock::new(Store::new(capacity, default_ttl, clock)),
        }
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.store.read().capacity()
    }
}

impl<V: Clone + Send + Sync> Cache<V> for FifoCache<V> {
    fn get(&self, key: &str) -> Result<V> {
        self.store.read().peek(key)
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

impl<V: Clone> Inspect<V> for FifoCache<V> {
    fn head(&self) -> Result<Entry<V>> {
        self.store.read().head()
    }

    fn tail(&self) -> Result<Entry<V>> {
        self.store.read().tail()
    }
}
