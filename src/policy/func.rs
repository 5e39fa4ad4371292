use std::fmt;
use std::marker::PhantomData;

use crate::policy::CapacityPolicy;

/// Policy assembled from a pair of closures.
///
/// # Example
///
/// ```
/// use linkedhashmap::map::OrderedMap;
/// use linkedhashmap::policy::FnPolicy;
///
/// let mut expired = Vec::new();
/// {
///     let policy = FnPolicy::new(
///         |key: u32, _value| expired.push(key),
///         |cap, _len, _head, _tail| cap,
///     );
///     let mut map = OrderedMap::new(1, policy);
///     map.push(1, "a");
///     map.push(2, "b");
/// }
/// assert_eq!(expired, vec![1]);
/// ```
pub struct FnPolicy<K, V, E, C> {
    on_expired: E,
    compute_capacity: C,
    _marker: PhantomData<fn(K, V)>,
}

impl<K, V, E, C> FnPolicy<K, V, E, C>
where
    E: FnMut(K, V),
    C: FnMut(u64, u64, Option<&V>, Option<&V>) -> u64,
{
    /// Creates a policy from an expiration callback and a capacity function.
    pub fn new(on_expired: E, compute_capacity: C) -> Self {
        Self {
            on_expired,
            compute_capacity,
            _marker: PhantomData,
        }
    }
}

impl<K, V, E, C> CapacityPolicy<K, V> for FnPolicy<K, V, E, C>
where
    E: FnMut(K, V),
    C: FnMut(u64, u64, Option<&V>, Option<&V>) -> u64,
{
    #[inline]
    fn on_expired(&mut self, key: K, value: V) {
        (self.on_expired)(key, value)
    }

    #[inline]
    fn compute_capacity(
        &mut self,
        current_capacity: u64,
        current_len: u64,
        head: Option<&V>,
        tail: Option<&V>,
    ) -> u64 {
        (self.compute_capacity)(current_capacity, current_len, head, tail)
    }
}

impl<K, V, E, C> fmt::Debug for FnPolicy<K, V, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPolicy").finish_non_exhaustive()
    }
}
