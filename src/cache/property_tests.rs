//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check eviction order, capacity bounds and expiration
//! semantics against simple reference models.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet, VecDeque};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{Cache, FifoCache, Inspect, LruCache, ManualClock, Ttl};
use crate::error::CacheError;

// == Test Configuration ==
const TEST_CAPACITY: usize = 8;

// == Strategies ==
/// Generates cache keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-j]{1,2}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = u32> {
    any::<u32>()
}

/// A single cache operation
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: u32 },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        2 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

fn lru(capacity: usize) -> (LruCache<u32>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let cache = LruCache::with_clock(NonZeroUsize::new(capacity).unwrap(), Ttl::Never, clock.clone());
    (cache, clock)
}

// == Reference Model ==
/// Recency list kept as a plain deque: front = most recent.
#[derive(Default)]
struct Model {
    order: VecDeque<(String, u32)>,
    capacity: usize,
    promote_on_get: bool,
}

impl Model {
    fn position(&self, key: &str) -> Option<usize> {
        self.order.iter().position(|(k, _)| k == key)
    }

    fn set(&mut self, key: String, value: u32) {
        if let Some(pos) = self.position(&key) {
            self.order.remove(pos);
        } else if self.order.len() == self.capacity {
            self.order.pop_back();
        }
        self.order.push_front((key, value));
    }

    fn get(&mut self, key: &str) -> Option<u32> {
        let pos = self.position(key)?;
        if self.promote_on_get {
            let item = self.order.remove(pos)?;
            let value = item.1;
            self.order.push_front(item);
            Some(value)
        } else {
            Some(self.order[pos].1)
        }
    }

    fn delete(&mut self, key: &str) -> bool {
        match self.position(key) {
            Some(pos) => {
                self.order.remove(pos);
                true
            }
            None => false,
        }
    }
}

fn run_against_model<C>(cache: &C, model: &mut Model, ops: Vec<CacheOp>) -> Result<(), TestCaseError>
where
    C: Cache<u32> + Inspect<u32>,
{
    for op in ops {
        match op {
            CacheOp::Set { key, value } => {
                cache.set(&key, value);
                model.set(key, value);
            }
            CacheOp::Get { key } => {
                prop_assert_eq!(cache.get(&key).ok(), model.get(&key));
            }
            CacheOp::Delete { key } => {
                prop_assert_eq!(cache.delete(&key).is_ok(), model.delete(&key));
            }
        }

        prop_assert_eq!(cache.count(), model.order.len());
        prop_assert!(cache.count() <= model.capacity);
        let (head, tail) = (cache.head(), cache.tail());
        match model.order.front() {
            Some((key, _)) => prop_assert_eq!(head.map(|e| e.key().to_string()), Ok(key.clone())),
            None => prop_assert_eq!(head, Err(CacheError::HeadNotAvailable)),
        }
        match model.order.back() {
            Some((key, _)) => prop_assert_eq!(tail.map(|e| e.key().to_string()), Ok(key.clone())),
            None => prop_assert_eq!(tail, Err(CacheError::TailNotAvailable)),
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // For any sequence of operations, the LRU cache agrees with a deque model
    // on values, size and both ends of the recency order.
    #[test]
    fn prop_lru_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..120)) {
        let (cache, _) = lru(TEST_CAPACITY);
        let mut model = Model { capacity: TEST_CAPACITY, promote_on_get: true, ..Model::default() };
        run_against_model(&cache, &mut model, ops)?;
    }

    // Same as above for FIFO, where reads never reorder.
    #[test]
    fn prop_fifo_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..120)) {
        let cache = FifoCache::with_clock(
            NonZeroUsize::new(TEST_CAPACITY).unwrap(),
            Ttl::Never,
            Arc::new(ManualClock::new()),
        );
        let mut model = Model { capacity: TEST_CAPACITY, promote_on_get: false, ..Model::default() };
        run_against_model(&cache, &mut model, ops)?;
    }

    // For any sequence of writes, the count never exceeds capacity.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..200),
        capacity in 1usize..20
    ) {
        let (cache, _) = lru(capacity);

        for (key, value) in entries {
            cache.set(&key, value);
            prop_assert!(
                cache.count() <= capacity,
                "Cache size {} exceeds capacity {}",
                cache.count(),
                capacity
            );
        }
    }

    // Inserting a new key into a full cache evicts exactly the entry that
    // tail() reported beforehand.
    #[test]
    fn prop_eviction_removes_reported_tail(
        keys in prop::collection::vec(key_strategy(), 2..12),
        touches in prop::collection::vec(0usize..12, 0..6)
    ) {
        let unique: Vec<String> = keys
            .into_iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        prop_assume!(unique.len() >= 2);

        let (cache, _) = lru(unique.len());
        for key in &unique {
            cache.set(key, 0);
        }
        for t in touches {
            let _ = cache.get(&unique[t % unique.len()]);
        }

        let victim = cache.tail().unwrap().key().to_string();
        cache.set("zz-new", 1);

        prop_assert_eq!(cache.count(), unique.len());
        prop_assert!(matches!(cache.get(&victim), Err(CacheError::NotFound(_))));
        for key in unique.iter().filter(|k| **k != victim) {
            prop_assert!(cache.get(key).is_ok(), "Key '{}' should still exist", key);
        }
    }

    // Expired entries are hidden from get/get_all but still counted until a
    // sweep removes exactly them.
    #[test]
    fn prop_expiration_layers(
        ttls in prop::collection::vec(prop::option::of(1u64..10), 1..TEST_CAPACITY),
        elapsed in 0u64..12
    ) {
        let (cache, clock) = lru(TEST_CAPACITY);
        let mut live = HashMap::new();

        for (i, ttl) in ttls.iter().enumerate() {
            let key = format!("key{}", i);
            let ttl = ttl.map_or(Ttl::Never, |s| Ttl::After(Duration::from_secs(s)));
            cache.set_with_expire(&key, i as u32, ttl);
            if !matches!(ttl, Ttl::After(d) if d.as_secs() <= elapsed) {
                live.insert(key, i as u32);
            }
        }
        clock.advance(Duration::from_secs(elapsed));

        let expired = ttls.len() - live.len();
        prop_assert_eq!(cache.get_all(), live.clone());
        prop_assert_eq!(cache.count(), ttls.len());

        match cache.delete_expired() {
            Ok(removed) => prop_assert_eq!(removed, expired),
            Err(CacheError::NoExpiredItemsFound) => prop_assert_eq!(expired, 0),
            Err(e) => prop_assert!(false, "unexpected sweep error: {}", e),
        }
        prop_assert_eq!(cache.count(), live.len());
    }
}

// Concurrent access with fewer cases, each spawns threads
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // For any set of concurrent operations, the cache stays within capacity
    // and its diagnostics stay consistent with its count.
    #[test]
    fn prop_concurrent_operation_consistency(
        batches in prop::collection::vec(prop::collection::vec(cache_op_strategy(), 10..50), 2..6)
    ) {
        let (cache, _) = lru(TEST_CAPACITY);

        std::thread::scope(|s| {
            for ops in &batches {
                let cache = &cache;
                s.spawn(move || {
                    for op in ops {
                        match op {
                            CacheOp::Set { key, value } => cache.set(key, *value),
                            CacheOp::Get { key } => {
                                let _ = cache.get(key);
                            }
                            CacheOp::Delete { key } => {
                                let _ = cache.delete(key);
                            }
                        }
                    }
                });
            }
        });

        let count = cache.count();
        prop_assert!(count <= TEST_CAPACITY);
        prop_assert_eq!(cache.get_all().len(), count);
        prop_assert_eq!(cache.head().is_ok(), count > 0);
        prop_assert_eq!(cache.tail().is_ok(), count > 0);

        let stats = cache.stats();
        let hit_rate = stats.hit_rate();
        prop_assert!((0.0..=1.0).contains(&hit_rate));
        prop_assert_eq!(stats.total_entries, count);
    }
}
