//! # Capacity Policy
//!
//! An [`OrderedMap`](crate::map::OrderedMap) does not know any particular
//! eviction strategy. Instead it consults a [`CapacityPolicy`] after each
//! capacity-relevant mutation, and hands every evicted entry back to it.
//!
//! ## Call Sequence
//!
//! ```text
//!   push / pull_head
//!        │
//!        ▼
//!   ┌──────────────────────────┐
//!   │ mutate list + index      │
//!   └────────────┬─────────────┘
//!                ▼
//!   ┌──────────────────────────────────────────────────────────┐
//!   │ capacity = compute_capacity(capacity, len, head, tail)   │
//!   └────────────┬─────────────────────────────────────────────┘
//!                ▼
//!   ┌──────────────────────────────────────────────────────────┐
//!   │ while capacity > 0 && len > capacity:                    │
//!   │     (k, v) = pull head                                   │
//!   │     on_expired(k, v)                                     │
//!   └──────────────────────────────────────────────────────────┘
//! ```
//!
//! `resize` skips the `compute_capacity` step; `pull_key` skips both steps.
//!
//! ## Contract
//!
//! - `compute_capacity` may raise or lower the capacity by any amount.
//!   Returning `0` disables eviction until a later call returns a positive
//!   value.
//! - Both methods run while the map is mutably borrowed, so they cannot call
//!   back into it. Side effects such as logging are allowed and run under the
//!   same writer discipline as the triggering mutation.
//! - A panic in either method aborts the in-progress operation. The map's
//!   index and list are consistent at every point where the policy is called.
//!
//! ## Built-in Policies
//!
//! | Policy            | Capacity                     | Expired entries |
//! |-------------------|------------------------------|-----------------|
//! | [`FixedCapacity`] | unchanged                    | dropped         |
//! | [`Unbounded`]     | always `0`                   | never produced  |
//! | [`FnPolicy`]      | caller closure               | caller closure  |

mod fixed;
mod func;

pub use fixed::{FixedCapacity, Unbounded};
pub use func::FnPolicy;

/// Capability supplied by the caller to drive capacity and eviction.
pub trait CapacityPolicy<K, V> {
    /// Receives an entry evicted because the resident count exceeded capacity.
    ///
    /// Called once per evicted entry, oldest first. The entry is already
    /// unlinked from the map.
    fn on_expired(&mut self, key: K, value: V);

    /// Returns the next capacity from the post-mutation state.
    ///
    /// `head` and `tail` are the oldest and newest resident values; both are
    /// `None` only when the map is empty.
    fn compute_capacity(
        &mut self,
        current_capacity: u64,
        current_len: u64,
        head: Option<&V>,
        tail: Option<&V>,
    ) -> u64;
}

impl<K, V, P> CapacityPolicy<K, V> for &mut P
where
    P: CapacityPolicy<K, V> + ?Sized,
{
    #[inline]
    fn on_expired(&mut self, key: K, value: V) {
        (**self).on_expired(key, value)
    }

    #[inline]
    fn compute_capacity(
        &mut self,
        current_capacity: u64,
        current_len: u64,
        head: Option<&V>,
        tail: Option<&V>,
    ) -> u64 {
        (**self).compute_capacity(current_capacity, current_len, head, tail)
    }
}

impl<K, V, P> CapacityPolicy<K, V> for Box<P>
where
    P: CapacityPolicy<K, V> + ?Sized,
{
    #[inline]
    fn on_expired(&mut self, key: K, value: V) {
        (**self).on_expired(key, value)
    }

    #[inline]
    fn compute_capacity(
        &mut self,
        current_capacity: u64,
        current_len: u64,
        head: Option<&V>,
        tail: Option<&V>,
    ) -> u64 {
        (**self).compute_capacity(current_capacity, current_len, head, tail)
    }
}
