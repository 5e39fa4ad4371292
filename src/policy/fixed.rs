use crate::policy::CapacityPolicy;

/// Keeps whatever capacity the map currently has.
///
/// Expired entries are dropped. Use [`OrderedMap::resize`](crate::map::OrderedMap::resize)
/// to change the bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedCapacity;

impl<K, V> CapacityPolicy<K, V> for FixedCapacity {
    #[inline]
    fn on_expired(&mut self, _key: K, _value: V) {}

    #[inline]
    fn compute_capacity(
        &mut self,
        current_capacity: u64,
        _current_len: u64,
        _head: Option<&V>,
        _tail: Option<&V>,
    ) -> u64 {
        current_capacity
    }
}

/// Drives capacity to `0` on the first recompute, disabling eviction.
///
/// An explicit `resize` still bounds the map until the next recompute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unbounded;

impl<K, V> CapacityPolicy<K, V> for Unbounded {
    #[inline]
    fn on_expired(&mut self, _key: K, _value: V) {}

    #[inline]
    fn compute_capacity(
        &mut self,
        _current_capacity: u64,
        _current_len: u64,
        _head: Option<&V>,
        _tail: Option<&V>,
    ) -> u64 {
        0
    }
}
