//! Ordered hash map with a policy-driven capacity.
//!
//! ## Architecture
//!
//! ```text
//!   OrderedMap<K, V, P>
//!   ┌───────────────────────────────┐     ┌────────────────────────────────────────┐
//!   │ index: FxHashMap<K, SlotId>   │────►│ list: OrderedList<K, V>                │
//!   │                               │     │   head (oldest) ◄──► ... ◄──► tail     │
//!   ├───────────────────────────────┤     └────────────────────────────────────────┘
//!   │ capacity: u64  (0 = no bound) │
//!   │ policy: P: CapacityPolicy     │
//!   └───────────────────────────────┘
//! ```
//!
//! The index holds copies of the list's `SlotId` handles; the list owns the
//! entries. Both are updated together by every operation, so
//! `index.len() == list.len()` holds between calls.
//!
//! ## Operations
//!
//! | Operation     | Reorders | Recomputes capacity | Sweeps |
//! |---------------|----------|---------------------|--------|
//! | `push`        | yes      | yes                 | yes    |
//! | `pull_head`   | -        | yes                 | yes    |
//! | `resize`      | -        | no (sets directly)  | yes    |
//! | `pull_key`    | -        | no                  | no     |
//! | `get`/`peek_*`| no       | no                  | no     |
//!
//! The sweep removes the head while `capacity > 0 && len > capacity`. After
//! each removal the capacity is recomputed from the new boundaries and the
//! entry is handed to [`CapacityPolicy::on_expired`].
//!
//! `pull_key` leaves the capacity untouched and never sweeps; the policy is
//! next consulted by the following `push` or `pull_head`.
//!
//! ## Example
//!
//! ```
//! use linkedhashmap::map::OrderedMap;
//! use linkedhashmap::policy::FixedCapacity;
//!
//! let mut map = OrderedMap::new(2, FixedCapacity);
//! map.push(1, "a");
//! map.push(2, "b");
//! map.push(3, "c"); // evicts 1
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.peek_head(), Ok((&2, &"b")));
//! assert_eq!(map.get(&1), None);
//! ```

use std::borrow::Borrow;
use std::hash::Hash;
use std::mem;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::ds::ordered_list::{Iter, OrderedList};
use crate::ds::slot_arena::SlotId;
use crate::error::{InvariantError, MapError};
use crate::policy::CapacityPolicy;

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::OrderedMapMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::OrderedMapMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsSnapshotProvider, OrderedMapMetricsReadRecorder, OrderedMapMetricsRecorder,
};

/// Hash map that remembers touch order and evicts its oldest entries.
#[derive(Debug)]
pub struct OrderedMap<K, V, P> {
    index: FxHashMap<K, SlotId>,
    list: OrderedList<K, V>,
    capacity: u64,
    policy: P,
    #[cfg(feature = "metrics")]
    metrics: OrderedMapMetrics,
}

impl<K, V, P> OrderedMap<K, V, P>
where
    K: Eq + Hash + Clone,
    P: CapacityPolicy<K, V>,
{
    /// Creates an empty map. `initial_capacity == 0` disables eviction.
    pub fn new(initial_capacity: u64, policy: P) -> Self {
        Self::with_reserved(initial_capacity, 0, policy)
    }

    /// Creates an empty map with room for `reserve` entries before reallocating.
    pub fn with_reserved(initial_capacity: u64, reserve: usize, policy: P) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            list: OrderedList::with_capacity(reserve),
            capacity: initial_capacity,
            policy,
            #[cfg(feature = "metrics")]
            metrics: OrderedMapMetrics::default(),
        }
    }

    /// Inserts or updates `key`, making it the newest resident.
    ///
    /// Returns the previous value when `key` was already present. Capacity is
    /// recomputed and the eviction sweep runs for updates as well as inserts.
    pub fn push(&mut self, key: K, value: V) -> Option<V> {
        let previous = if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_push_update();

            let old = self.list.get_mut(id).map(|slot| mem::replace(slot, value));
            self.list.move_to_tail(id);
            old
        } else {
            #[cfg(feature = "metrics")]
            self.metrics.record_push_new();

            let id = self.list.push_tail(key.clone(), value);
            self.index.insert(key, id);
            None
        };

        self.recompute_capacity();
        self.sweep();
        previous
    }

    /// Looks up `key` without changing its position.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let found = self
            .index
            .get(key)
            .and_then(|&id| self.list.get(id))
            .map(|(_, value)| value);

        #[cfg(feature = "metrics")]
        self.record_get(found.is_some());

        found
    }

    /// Mutable lookup; like [`get`](Self::get) it is not a touch.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.list.get_mut(id)
    }

    /// Returns `true` if `key` is resident.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Removes and returns the oldest resident, then recomputes capacity and sweeps.
    pub fn pull_head(&mut self) -> Result<(K, V), MapError> {
        let pulled = self.list.pull_head();

        #[cfg(feature = "metrics")]
        self.metrics.record_pull_head(pulled.is_ok());

        let (key, value) = pulled?;
        self.index.remove(&key);
        self.recompute_capacity();
        self.sweep();
        Ok((key, value))
    }

    /// Removes `key` if resident.
    ///
    /// Neither recomputes capacity nor sweeps.
    pub fn pull_key<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self
            .index
            .remove(key)
            .and_then(|id| self.list.detach(id))
            .map(|(_, value)| value);

        #[cfg(feature = "metrics")]
        self.metrics.record_pull_key(removed.is_some());

        removed
    }

    /// Returns the oldest resident.
    pub fn peek_head(&self) -> Result<(&K, &V), MapError> {
        let head = self.list.peek_head();
        #[cfg(feature = "metrics")]
        self.metrics.record_peek(head.is_ok());
        head
    }

    /// Returns the newest resident.
    pub fn peek_tail(&self) -> Result<(&K, &V), MapError> {
        let tail = self.list.peek_tail();
        #[cfg(feature = "metrics")]
        self.metrics.record_peek(tail.is_ok());
        tail
    }

    /// Overrides the capacity without consulting the policy, then sweeps.
    pub fn resize(&mut self, capacity: u64) {
        #[cfg(feature = "metrics")]
        self.metrics.record_resize();

        trace!(old = self.capacity, new = capacity, "resize");
        self.capacity = capacity;
        self.sweep();
    }

    /// Number of residents.
    pub fn len(&self) -> u64 {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Current capacity; `0` means eviction is disabled.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Iterates residents from oldest to newest.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.list.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.list.iter().map(|(_, value)| value)
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    /// Consumes the map and returns its policy.
    pub fn into_policy(self) -> P {
        self.policy
    }

    /// Verifies that the index and the list describe the same residents.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;

        let list_len = self.list.len();
        if self.index.len() as u64 != list_len {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} elements",
                self.index.len(),
                list_len
            )));
        }

        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some((stored, _)) if stored == key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "slot {} stores a different key than its index entry",
                        id.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index entry points at free slot {}",
                        id.index()
                    )));
                },
            }
        }

        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("ordered map invariant violated: {err}");
        }
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> OrderedMapMetricsSnapshot {
        self.metrics.snapshot(self.list.len(), self.capacity)
    }

    #[cfg(feature = "metrics")]
    fn record_get(&self, hit: bool) {
        if hit {
            self.metrics.record_get_hit();
        } else {
            self.metrics.record_get_miss();
        }
    }

    fn recompute_capacity(&mut self) {
        let len = self.list.len();
        let next = self.policy.compute_capacity(
            self.capacity,
            len,
            self.list.head_value(),
            self.list.tail_value(),
        );

        #[cfg(feature = "metrics")]
        self.metrics.record_capacity_recompute(next != self.capacity);

        if next != self.capacity {
            trace!(old = self.capacity, new = next, len, "capacity recomputed");
        }
        self.capacity = next;
    }

    fn sweep(&mut self) {
        let mut evicted = 0u64;
        while self.capacity > 0 && self.list.len() > self.capacity {
            let Ok((key, value)) = self.list.pull_head() else {
                break;
            };
            self.index.remove(&key);
            evicted += 1;

            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();

            trace!(len = self.list.len(), capacity = self.capacity, "evicted head");
            self.recompute_capacity();
            self.policy.on_expired(key, value);
        }

        if evicted > 0 {
            #[cfg(feature = "metrics")]
            self.metrics.record_sweep();

            debug!(
                evicted,
                len = self.list.len(),
                capacity = self.capacity,
                "eviction sweep finished"
            );
        }
    }
}

impl<'a, K, V, P> IntoIterator for &'a OrderedMap<K, V, P>
where
    K: Eq + Hash + Clone,
    P: CapacityPolicy<K, V>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "metrics")]
impl<K, V, P> MetricsSnapshotProvider<OrderedMapMetricsSnapshot> for OrderedMap<K, V, P>
where
    K: Eq + Hash + Clone,
    P: CapacityPolicy<K, V>,
{
    fn snapshot(&self) -> OrderedMapMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
pub use concurrent::ConcurrentOrderedMap;

#[cfg(feature = "concurrency")]
mod concurrent {
    use std::borrow::Borrow;
    use std::hash::Hash;

    use parking_lot::Mutex;

    use super::OrderedMap;
    use crate::error::MapError;
    use crate::policy::CapacityPolicy;

    /// `OrderedMap` behind a `parking_lot::Mutex`.
    ///
    /// The lock is held for the whole call, including the eviction sweep and
    /// every policy callback it triggers. The lock is not reentrant: a policy
    /// must not call back into the same `ConcurrentOrderedMap`.
    #[derive(Debug)]
    pub struct ConcurrentOrderedMap<K, V, P> {
        inner: Mutex<OrderedMap<K, V, P>>,
    }

    impl<K, V, P> ConcurrentOrderedMap<K, V, P>
    where
        K: Eq + Hash + Clone,
        P: CapacityPolicy<K, V>,
    {
        pub fn new(initial_capacity: u64, policy: P) -> Self {
            Self::from_map(OrderedMap::new(initial_capacity, policy))
        }

        pub fn from_map(map: OrderedMap<K, V, P>) -> Self {
            Self {
                inner: Mutex::new(map),
            }
        }

        pub fn push(&self, key: K, value: V) -> Option<V> {
            let mut map = self.inner.lock();
            map.push(key, value)
        }

        /// Pushes without blocking; hands the entry back if the lock is held.
        pub fn try_push(&self, key: K, value: V) -> Result<Option<V>, (K, V)> {
            match self.inner.try_lock() {
                Some(mut map) => Ok(map.push(key, value)),
                None => Err((key, value)),
            }
        }

        /// Returns a clone of the value for `key`.
        pub fn get<Q>(&self, key: &Q) -> Option<V>
        where
            K: Borrow<Q>,
            Q: Hash + Eq + ?Sized,
            V: Clone,
        {
            let map = self.inner.lock();
            map.get(key).cloned()
        }

        /// Runs `f` on the value for `key`, if resident.
        pub fn get_with<Q, R>(&self, key: &Q, f: impl FnOnce(&V) -> R) -> Option<R>
        where
            K: Borrow<Q>,
            Q: Hash + Eq + ?Sized,
        {
            let map = self.inner.lock();
            map.get(key).map(f)
        }

        pub fn contains_key<Q>(&self, key: &Q) -> bool
        where
            K: Borrow<Q>,
            Q: Hash + Eq + ?Sized,
        {
            let map = self.inner.lock();
            map.contains_key(key)
        }

        pub fn pull_head(&self) -> Result<(K, V), MapError> {
            let mut map = self.inner.lock();
            map.pull_head()
        }

        pub fn pull_key<Q>(&self, key: &Q) -> Option<V>
        where
            K: Borrow<Q>,
            Q: Hash + Eq + ?Sized,
        {
            let mut map = self.inner.lock();
            map.pull_key(key)
        }

        /// Runs `f` on the oldest resident.
        pub fn peek_head_with<R>(&self, f: impl FnOnce(&K, &V) -> R) -> Result<R, MapError> {
            let map = self.inner.lock();
            map.peek_head().map(|(k, v)| f(k, v))
        }

        /// Runs `f` on the newest resident.
        pub fn peek_tail_with<R>(&self, f: impl FnOnce(&K, &V) -> R) -> Result<R, MapError> {
            let map = self.inner.lock();
            map.peek_tail().map(|(k, v)| f(k, v))
        }

        pub fn resize(&self, capacity: u64) {
            let mut map = self.inner.lock();
            map.resize(capacity);
        }

        pub fn len(&self) -> u64 {
            let map = self.inner.lock();
            map.len()
        }

        pub fn is_empty(&self) -> bool {
            let map = self.inner.lock();
            map.is_empty()
        }

        pub fn capacity(&self) -> u64 {
            let map = self.inner.lock();
            map.capacity()
        }

        /// Runs `f` with exclusive access to the underlying map.
        pub fn with_map<R>(&self, f: impl FnOnce(&mut OrderedMap<K, V, P>) -> R) -> R {
            let mut map = self.inner.lock();
            f(&mut map)
        }

        pub fn into_inner(self) -> OrderedMap<K, V, P> {
            self.inner.into_inner()
        }
    }

    #[cfg(test)]
    mod tests {
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::sync::{Arc, OnceLock, Weak};

        use super::*;
        use crate::policy::FixedCapacity;

        type SelfReferencing = ConcurrentOrderedMap<u32, u32, LockedDuringCallbacks>;

        /// Tries to push into its own map from every callback and counts refusals.
        #[derive(Debug, Default)]
        struct LockedDuringCallbacks {
            map: Arc<OnceLock<Weak<SelfReferencing>>>,
            refused_expirations: Arc<AtomicU64>,
            refused_recomputes: Arc<AtomicU64>,
        }

        impl LockedDuringCallbacks {
            fn try_reenter(&self, counter: &AtomicU64) {
                let Some(map) = self.map.get().and_then(Weak::upgrade) else {
                    return;
                };
                if map.try_push(u32::MAX, 0).is_err() {
                    counter.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        impl CapacityPolicy<u32, u32> for LockedDuringCallbacks {
            fn on_expired(&mut self, _key: u32, _value: u32) {
                self.try_reenter(&self.refused_expirations);
            }

            fn compute_capacity(
                &mut self,
                current_capacity: u64,
                _current_len: u64,
                _head: Option<&u32>,
                _tail: Option<&u32>,
            ) -> u64 {
                self.try_reenter(&self.refused_recomputes);
                current_capacity
            }
        }

        #[test]
        fn concurrent_map_basic_ops() {
            let map = ConcurrentOrderedMap::new(2, FixedCapacity);
            assert_eq!(map.push(1, "a"), None);
            assert_eq!(map.try_push(2, "b"), Ok(None));
            map.push(3, "c");

            assert_eq!(map.len(), 2);
            assert_eq!(map.get(&1), None);
            assert_eq!(map.get(&3), Some("c"));
            assert_eq!(map.peek_head_with(|k, v| (*k, *v)), Ok((2, "b")));
            assert_eq!(map.peek_tail_with(|k, _| *k), Ok(3));
            assert_eq!(map.pull_key(&2), Some("b"));
            assert_eq!(map.pull_head(), Ok((3, "c")));
            assert!(map.is_empty());
            assert_eq!(map.pull_head(), Err(MapError::EmptyContainer));
        }

        #[test]
        fn concurrent_lock_is_held_across_sweep_and_callbacks() {
            let policy = LockedDuringCallbacks::default();
            let slot = Arc::clone(&policy.map);
            let refused_expirations = Arc::clone(&policy.refused_expirations);
            let refused_recomputes = Arc::clone(&policy.refused_recomputes);

            let map = Arc::new(ConcurrentOrderedMap::new(2, policy));
            assert!(slot.set(Arc::downgrade(&map)).is_ok());

            map.push(1, 1);
            map.push(2, 2);
            map.push(3, 3);
            map.pull_head().unwrap();

            // three pushes, one eviction during the third, one pull
            assert_eq!(refused_recomputes.load(Ordering::Relaxed), 5);
            assert_eq!(refused_expirations.load(Ordering::Relaxed), 1);
            assert!(!map.contains_key(&u32::MAX));
            assert_eq!(map.len(), 1);

            // outside any callback the lock is free again
            assert_eq!(map.try_push(4, 4), Ok(None));
            map.with_map(|inner| inner.debug_validate_invariants());
        }

        #[test]
        fn concurrent_try_push_hands_back_entry_when_locked() {
            let map = ConcurrentOrderedMap::new(0, FixedCapacity);
            map.with_map(|inner| {
                inner.push(1, 1);
            });
            let guard = map.inner.lock();
            assert_eq!(map.try_push(2, 2), Err((2, 2)));
            drop(guard);
            assert_eq!(map.len(), 1);
            map.into_inner().debug_validate_invariants();
        }
    }
}
