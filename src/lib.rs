//! linkedhashmap: an ordered hash map whose capacity is driven by a pluggable policy.
//!
//! [`OrderedMap`] combines O(1) hash lookup with a touch-ordered list. After
//! each qualifying mutation it asks its [`CapacityPolicy`] for a new capacity
//! and evicts the oldest residents until the bound holds, handing each one to
//! the policy's expiration callback.
//!
//! ```
//! use linkedhashmap::prelude::*;
//!
//! let mut map = OrderedMap::new(2, FixedCapacity);
//! map.push("a", 1);
//! map.push("b", 2);
//! map.push("a", 10); // touch: "a" becomes newest
//! map.push("c", 3); // evicts "b"
//!
//! assert_eq!(map.get(&"b"), None);
//! assert_eq!(map.peek_head(), Ok((&"a", &10)));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod map;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;

pub use crate::ds::{OrderedList, SlotArena, SlotId};
pub use crate::error::{InvariantError, MapError};
#[cfg(feature = "concurrency")]
pub use crate::map::ConcurrentOrderedMap;
pub use crate::map::OrderedMap;
pub use crate::policy::{CapacityPolicy, FixedCapacity, FnPolicy, Unbounded};
