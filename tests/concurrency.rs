// ==============================================
// CONCURRENT ORDERED MAP TESTS (integration)
// ==============================================
//
// Requires the `concurrency` feature.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use linkedhashmap::builder::OrderedMapBuilder;
use linkedhashmap::map::ConcurrentOrderedMap;
use linkedhashmap::policy::CapacityPolicy;

/// Fixed capacity that counts expirations through a shared counter.
#[derive(Debug, Clone)]
struct CountingPolicy {
    expired: Arc<AtomicU64>,
}

impl CapacityPolicy<u64, u64> for CountingPolicy {
    fn on_expired(&mut self, _key: u64, _value: u64) {
        self.expired.fetch_add(1, Ordering::Relaxed);
    }

    fn compute_capacity(&mut self, cap: u64, _len: u64, _h: Option<&u64>, _t: Option<&u64>) -> u64 {
        cap
    }
}

#[test]
fn concurrent_pushes_respect_capacity() {
    let expired = Arc::new(AtomicU64::new(0));
    let map: Arc<ConcurrentOrderedMap<u64, u64, CountingPolicy>> = Arc::new(
        OrderedMapBuilder::new(64).build_concurrent(CountingPolicy {
            expired: Arc::clone(&expired),
        }),
    );
    let num_threads = 8u64;
    let per_thread = 500u64;

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for i in 0..per_thread {
                    map.push(thread_id * per_thread + i, i);
                    assert!(map.len() <= 64);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let total = num_threads * per_thread;
    assert_eq!(map.len(), 64);
    assert_eq!(expired.load(Ordering::Relaxed) + map.len(), total);

    let map = Arc::try_unwrap(map).unwrap().into_inner();
    map.check_invariants().unwrap();
}

#[test]
fn concurrent_mixed_operations_keep_invariants() {
    let expired = Arc::new(AtomicU64::new(0));
    let map = Arc::new(ConcurrentOrderedMap::new(
        32,
        CountingPolicy {
            expired: Arc::clone(&expired),
        },
    ));

    let handles: Vec<_> = (0..4u64)
        .map(|thread_id| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for i in 0..400u64 {
                    let key = (thread_id * 7 + i) % 48;
                    match i % 5 {
                        0 | 1 => {
                            map.push(key, i);
                        },
                        2 => {
                            let _ = map.get(&key);
                        },
                        3 => {
                            let _ = map.pull_key(&key);
                        },
                        _ => {
                            let _ = map.pull_head();
                        },
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(map.len() <= 32);
    let distinct: HashSet<u64> = map.with_map(|inner| inner.keys().copied().collect());
    assert_eq!(distinct.len() as u64, map.len());
    map.with_map(|inner| inner.check_invariants()).unwrap();
}
