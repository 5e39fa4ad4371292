//! Error types for the linkedhashmap library.
//!
//! ## Key Components
//!
//! - [`MapError`]: Returned by boundary operations (`pull_head`, `peek_head`,
//!   `peek_tail`) when the container holds no residents.
//! - [`InvariantError`]: Returned by `check_invariants` when the index and the
//!   list disagree.
//!
//! Absent keys are not errors: `get` and `pull_key` return `None`.
//!
//! ## Example Usage
//!
//! ```
//! use linkedhashmap::error::MapError;
//! use linkedhashmap::map::OrderedMap;
//! use linkedhashmap::policy::FixedCapacity;
//!
//! let mut map: OrderedMap<u64, &str, _> = OrderedMap::new(4, FixedCapacity);
//! assert_eq!(map.pull_head(), Err(MapError::EmptyContainer));
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// MapError
// ---------------------------------------------------------------------------

/// Error returned by operations that need at least one resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// The list (or map) has zero elements.
    #[error("container is empty")]
    EmptyContainer,
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal map invariants are violated.
///
/// Produced by [`OrderedMap::check_invariants`](crate::map::OrderedMap::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
