//! # Metrics Traits
//!
//! Recorders only write counters; providers only read them.
//!
//! ```text
//!   ┌─────────────────────────────────┐   ┌─────────────────────────────────┐
//!   │  OrderedMapMetricsRecorder      │   │  OrderedMapMetricsReadRecorder  │
//!   │  (&mut self: push/pull/sweep)   │   │  (&self: get/peek)              │
//!   └─────────────────────────────────┘   └─────────────────────────────────┘
//!
//!   ┌─────────────────────────────────┐
//!   │  MetricsSnapshotProvider<S>     │
//!   │  (tests / benches)              │
//!   └─────────────────────────────────┘
//! ```

/// Counters recorded by mutating map operations.
pub trait OrderedMapMetricsRecorder {
    fn record_push_new(&mut self);
    fn record_push_update(&mut self);
    fn record_pull_head(&mut self, found: bool);
    fn record_pull_key(&mut self, found: bool);
    fn record_capacity_recompute(&mut self, changed: bool);
    fn record_resize(&mut self);
    fn record_sweep(&mut self);
    fn record_evicted_entry(&mut self);
}

/// Counters recorded by `&self` accessors (uses interior mutability).
pub trait OrderedMapMetricsReadRecorder {
    fn record_get_hit(&self);
    fn record_get_miss(&self);
    fn record_peek(&self, found: bool);
}

/// Produces a point-in-time copy of the counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
