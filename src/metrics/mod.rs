//! Operation counters for [`OrderedMap`](crate::map::OrderedMap).
//!
//! Compiled only with the `metrics` feature. Recording is split from
//! snapshotting the same way as the rest of the crate's traits:
//!
//! ```text
//!   OrderedMap ──record_*──► OrderedMapMetrics ──snapshot()──► OrderedMapMetricsSnapshot
//! ```

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::OrderedMapMetrics;
pub use snapshot::OrderedMapMetricsSnapshot;
pub use traits::{MetricsSnapshotProvider, OrderedMapMetricsReadRecorder, OrderedMapMetricsRecorder};
