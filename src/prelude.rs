pub use crate::builder::OrderedMapBuilder;
pub use crate::error::MapError;
#[cfg(feature = "concurrency")]
pub use crate::map::ConcurrentOrderedMap;
pub use crate::map::OrderedMap;
#[cfg(feature = "metrics")]
pub use crate::metrics::{MetricsSnapshotProvider, OrderedMapMetricsSnapshot};
pub use crate::policy::{CapacityPolicy, FixedCapacity, FnPolicy, Unbounded};
