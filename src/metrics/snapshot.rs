#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OrderedMapMetricsSnapshot {
    pub push_calls: u64,
    pub push_new: u64,
    pub push_updates: u64,

    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub peek_calls: u64,
    pub peek_found: u64,

    pub pull_head_calls: u64,
    pub pull_head_found: u64,
    pub pull_key_calls: u64,
    pub pull_key_found: u64,

    pub capacity_recomputes: u64,
    pub capacity_changes: u64,
    pub resize_calls: u64,

    pub sweeps: u64, // sweeps that evicted at least one entry
    pub evicted_entries: u64,

    // gauges captured at snapshot time
    pub len: u64,
    pub capacity: u64,
}
