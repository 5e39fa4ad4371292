//! Builder for [`OrderedMap`] instances.
//!
//! Collects construction settings in one place and offers shorthands for the
//! built-in policies.
//!
//! ## Example
//!
//! ```rust
//! use linkedhashmap::builder::OrderedMapBuilder;
//!
//! let mut map = OrderedMapBuilder::new(100).reserve(128).build_fixed::<u64, String>();
//! map.push(1, "hello".to_string());
//! assert_eq!(map.get(&1), Some(&"hello".to_string()));
//! assert_eq!(map.capacity(), 100);
//! ```

use std::hash::Hash;

use crate::map::OrderedMap;
use crate::policy::{CapacityPolicy, FixedCapacity, FnPolicy};

#[cfg(feature = "concurrency")]
use crate::map::ConcurrentOrderedMap;

/// Builder for creating ordered map instances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderedMapBuilder {
    initial_capacity: u64,
    reserve: usize,
}

impl OrderedMapBuilder {
    /// Starts a builder with the given initial capacity (`0` disables eviction).
    pub fn new(initial_capacity: u64) -> Self {
        Self {
            initial_capacity,
            reserve: 0,
        }
    }

    /// Pre-sizes the index and the element arena for `additional` entries.
    pub fn reserve(mut self, additional: usize) -> Self {
        self.reserve = additional;
        self
    }

    /// Builds a map driven by `policy`.
    pub fn build<K, V, P>(self, policy: P) -> OrderedMap<K, V, P>
    where
        K: Eq + Hash + Clone,
        P: CapacityPolicy<K, V>,
    {
        OrderedMap::with_reserved(self.initial_capacity, self.reserve, policy)
    }

    /// Builds a map whose capacity only changes through `resize`.
    pub fn build_fixed<K, V>(self) -> OrderedMap<K, V, FixedCapacity>
    where
        K: Eq + Hash + Clone,
    {
        self.build(FixedCapacity)
    }

    /// Builds a map driven by a pair of closures.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linkedhashmap::builder::OrderedMapBuilder;
    ///
    /// // grow by one slot per resident until 8, then hold
    /// let mut map = OrderedMapBuilder::new(1).build_with(
    ///     |_key: u32, _value: u32| {},
    ///     |cap, len, _head, _tail| if len < 8 { cap.max(len + 1) } else { cap },
    /// );
    /// for k in 0..20 {
    ///     map.push(k, k);
    /// }
    /// assert_eq!(map.len(), 8);
    /// ```
    pub fn build_with<K, V, E, C>(
        self,
        on_expired: E,
        compute_capacity: C,
    ) -> OrderedMap<K, V, FnPolicy<K, V, E, C>>
    where
        K: Eq + Hash + Clone,
        E: FnMut(K, V),
        C: FnMut(u64, u64, Option<&V>, Option<&V>) -> u64,
    {
        self.build(FnPolicy::new(on_expired, compute_capacity))
    }

    /// Builds a lock-wrapped map driven by `policy`.
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent<K, V, P>(self, policy: P) -> ConcurrentOrderedMap<K, V, P>
    where
        K: Eq + Hash + Clone,
        P: CapacityPolicy<K, V>,
    {
        ConcurrentOrderedMap::from_map(self.build(policy))
    }
}
