//! Policy Dispatch Module
//!
//! Builds a cache from a [`Config`] and dispatches the contract to the
//! selected policy through a tagged enum.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::cache::{Cache, CacheStats, Clock, Entry, FifoCache, Inspect, LruCache, SystemClock, Ttl};
use crate::config::{Config, EvictionPolicy};
use crate::error::Result;

// == Policy Cache ==
/// A cache built from configuration, tagged with its eviction policy.
#[derive(Debug)]
pub enum PolicyCache<V> {
    Lru(LruCache<V>),
    Fifo(FifoCache<V>),
}

impl<V> PolicyCache<V> {
    pub fn policy(&self) -> EvictionPolicy {
        match self {
            PolicyCache::Lru(_) => EvictionPolicy::Lru,
            PolicyCache::Fifo(_) => EvictionPolicy::Fifo,
        }
    }
}

// == Builders ==
/// Builds a cache from `config` using the system clock.
///
/// # Errors
/// Returns [`CacheError::InvalidConfig`](crate::CacheError::InvalidConfig) for a
/// zero capacity or a negative expiry other than `NO_EXPIRE`.
pub fn build<V: Clone>(config: &Config) -> Result<PolicyCache<V>> {
    build_with_clock(config, Arc::new(SystemClock))
}

/// Builds a cache from `config` stamping expirations with `clock`.
pub fn build_with_clock<V: Clone>(config: &Config, clock: Arc<dyn Clock>) -> Result<PolicyCache<V>> {
    let (capacity, ttl) = config.resolve()?;

    info!(
        capacity = capacity.get(),
        expire = config.expire,
        policy = %config.eviction_policy,
        "building cache"
    );

    Ok(match config.eviction_policy {
        EvictionPolicy::Lru => PolicyCache::Lru(LruCache::with_clock(capacity, ttl, clock)),
        EvictionPolicy::Fifo => PolicyCache::Fifo(FifoCache::with_clock(capacity, ttl, clock)),
    })
}

impl<V: Clone + Send + Sync> Cache<V> for PolicyCache<V> {
    fn get(&self, key: &str) -> Result<V> {
        match self {
            PolicyCache::Lru(c) => c.get(key),
            PolicyCache::Fifo(c) => c.get(key),
        }
    }

    fn set(&self, key: &str, value: V) {
        match self {
            PolicyCache::Lru(c) => c.set(key, value),
            PolicyCache::Fifo(c) => c.set(key, value),
        }
    }

    fn set_with_expire(&self, key: &str, value: V, ttl: Ttl) {
        match self {
            PolicyCache::Lru(c) => c.set_with_expire(key, value, ttl),
            PolicyCache::Fifo(c) => c.set_with_expire(key, value, ttl),
        }
    }

    fn get_all(&self) -> HashMap<String, V> {
        match self {
            PolicyCache::Lru(c) => c.get_all(),
            PolicyCache::Fifo(c) => c.get_all(),
        }
    }

    fn count(&self) -> usize {
        match self {
            PolicyCache::Lru(c) => c.count(),
            PolicyCache::Fifo(c) => c.count(),
        }
    }

    fn delete(&self, key: &str) -> Result<()> {
        match self {
            PolicyCache::Lru(c) => c.delete(key),
            PolicyCache::Fifo(c) => c.delete(key),
        }
    }

    fn delete_expired(&self) -> Result<usize> {
        match self {
            PolicyCache::Lru(c) => c.delete_expired(),
            PolicyCache::Fifo(c) => c.delete_expired(),
        }
    }

    fn stats(&self) -> CacheStats {
        match self {
            PolicyCache::Lru(c) => c.stats(),
            PolicyCache::Fifo(c) => c.stats(),
        }
    }
}

impl<V: Clone> Inspect<V> for PolicyCache<V> {
    fn head(&self) -> Result<Entry<V>> {
        match self {
            PolicyCache::Lru(c) => c.head(),
            PolicyCache::Fifo(c) => c.head(),
        }
    }

    fn tail(&self) -> Result<Entry<V>> {
        match self {
            PolicyCache::Lru(c) => c.tail(),
            PolicyCache::Fifo(c) => c.tail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::NO_EXPIRE;
    use crate::error::CacheError;

    #[test]
    fn test_build_default_is_lru() {
        let cache: PolicyCache<u32> = build(&Config::default()).unwrap();
        assert_eq!(cache.policy(), EvictionPolicy::Lru);
        assert!(matches!(cache, PolicyCache::Lru(ref c) if c.capacity().get() == 100));
    }

    #[test]
    fn test_build_fifo() {
        let config = Config {
            capacity: 3,
            expire: NO_EXPIRE,
            eviction_policy: EvictionPolicy::Fifo,
        };
        let cache: PolicyCache<u32> = build(&config).unwrap();
        assert_eq!(cache.policy(), EvictionPolicy::Fifo);
    }

    #[test]
    fn test_build_rejects_zero_capacity() {
        let config = Config {
            capacity: 0,
            ..Config::default()
        };
        let result = build::<u32>(&config);
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_dispatch_follows_policy() {
        let lru_config = Config {
            capacity: 2,
            expire: NO_EXPIRE,
            eviction_policy: EvictionPolicy::Lru,
        };
        let fifo_config = Config {
            eviction_policy: EvictionPolicy::Fifo,
            ..lru_config.clone()
        };

        for (config, survivor) in [(lru_config, "a"), (fifo_config, "b")] {
            let cache: PolicyCache<u32> = build(&config).unwrap();
            cache.set("a", 1);
            cache.set("b", 2);
            let _ = cache.get("a");
            cache.set("c", 3);

            assert_eq!(cache.count(), 2);
            assert_eq!(cache.head().unwrap().key(), "c");
            assert_eq!(cache.tail().unwrap().key(), survivor);

            // A hit only reorders under LRU
            assert!(cache.get(survivor).is_ok(), "{} should survive", survivor);
            let expected_head = match cache.policy() {
                EvictionPolicy::Lru => survivor,
                EvictionPolicy::Fifo => "c",
            };
            assert_eq!(cache.head().unwrap().key(), expected_head);
        }
    }
}
