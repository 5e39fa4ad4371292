use std::sync::atomic::{AtomicU64, Ordering};

/// A metrics-only counter that can be bumped through `&self`.
///
/// Used for read paths (`get`, `peek_*`) that only borrow the map shared.
/// Relaxed atomics keep `OrderedMap` `Sync` whether or not the `metrics`
/// feature is enabled; counts are exact but carry no ordering with other
/// memory operations.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}
