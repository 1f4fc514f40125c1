//! Cache Store Module
//!
//! Single-threaded cache engine combining the ordered index with capacity
//! eviction and TTL expiration. Policies wrap it in a lock.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::debug;

use crate::cache::ordered::OrderedIndex;
use crate::cache::stats::StatsRecorder;
use crate::cache::{CacheStats, Clock, Entry, Ttl};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Cache storage with capacity eviction and lazy TTL checks.
#[derive(Debug)]
pub(crate) struct Store<V> {
    /// Entries ordered by recency, with key lookup
    index: OrderedIndex<V>,
    /// Performance statistics
    stats: StatsRecorder,
    /// Maximum number of entries allowed
    capacity: NonZeroUsize,
    /// TTL applied by `set`
    default_ttl: Ttl,
    /// Time source for expiration stamps
    clock: Arc<dyn Clock>,
}

impl<V: Clone> Store<V> {
    // == Constructor ==
    /// Creates a new Store.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries the cache can hold
    /// * `default_ttl` - TTL used for writes that don't carry their own
    /// * `clock` - Time source for expiration
    pub fn new(capacity: NonZeroUsize, default_ttl: Ttl, clock: Arc<dyn Clock>) -> Self {
        Self {
            index: OrderedIndex::with_capacity(capacity.get()),
            stats: StatsRecorder::new(),
            capacity,
            default_ttl,
            clock,
        }
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    pub fn default_ttl(&self) -> Ttl {
        self.default_ttl
    }

    // == Lookup ==
    /// Retrieves a live value and promotes it to the front.
    ///
    /// Expired entries are reported but left in place.
    pub fn lookup(&mut self, key: &str) -> Result<V> {
        let value = self.peek(key)?;
        self.index.move_to_front(key);
        Ok(value)
    }

    // == Peek ==
    /// Retrieves a live value without touching recency order.
    pub fn peek(&self, key: &str) -> Result<V> {
        let Some(entry) = self.index.get(key) else {
            self.stats.record_miss();
            return Err(CacheError::NotFound(key.to_string()));
        };

        if entry.is_expired(self.clock.now()) {
            self.stats.record_miss();
            return Err(CacheError::Expired(key.to_string()));
        }

        self.stats.record_hit();
        Ok(entry.value.clone())
    }

    // == Upsert ==
    /// Stores a key-value pair, resolving `ttl` against the current time.
    ///
    /// If the key already exists, value and expiry are replaced and the entry
    /// moves to the front. If the key is new and the cache is at capacity,
    /// the back entry is evicted first whether or not it has expired.
    pub fn upsert(&mut self, key: &str, value: V, ttl: Ttl) {
        let expire_at = ttl.expire_at(self.clock.now());

        if let Some(entry) = self.index.get_mut(key) {
            entry.value = value;
            entry.expire_at = expire_at;
            self.index.move_to_front(key);
            return;
        }

        if self.index.len() >= self.capacity.get() {
            if let Some(evicted) = self.index.pop_back() {
                debug!(key = %evicted.key, "evicted entry at capacity");
                self.stats.record_eviction();
            }
        }

        self.index
            .push_front(Entry::new(key.to_string(), value, expire_at));
    }

    // == Snapshot ==
    /// Returns every live key-value pair as of now.
    pub fn snapshot(&self) -> HashMap<String, V> {
        let now = self.clock.now();
        self.index
            .iter()
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }

    // == Length ==
    /// Returns the number of stored entries, expired-but-unswept included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Remove ==
    /// Removes an entry by key regardless of its expiry.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.index
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    // == Remove Expired ==
    /// Removes all entries whose TTL has elapsed.
    ///
    /// Returns the number of entries removed.
    pub fn remove_expired(&mut self) -> Result<usize> {
        if self.index.is_empty() {
            return Err(CacheError::NoItemsAvailable);
        }

        let now = self.clock.now();
        let removed = self.index.retain(|entry| !entry.is_expired(now));

        if removed == 0 {
            debug!("expiration sweep: no expired entries found");
            return Err(CacheError::NoExpiredItemsFound);
        }

        self.stats.record_expirations(removed);
        debug!(removed, remaining = self.index.len(), "expiration sweep");
        Ok(removed)
    }

    // == Head / Tail ==
    /// Returns a copy of the most recently touched entry.
    pub fn head(&self) -> Result<Entry<V>> {
        self.index.front().cloned().ok_or(CacheError::HeadNotAvailable)
    }

    /// Returns a copy of the next eviction candidate.
    pub fn tail(&self) -> Result<Entry<V>> {
        self.index.back().cloned().ok_or(CacheError::TailNotAvailable)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.index.len())
    }

    #[cfg(test)]
    pub fn expiry_of(&self, key: &str) -> Option<crate::cache::Expiry> {
        self.index.get(key).map(|entry| entry.expire_at)
    }
}
