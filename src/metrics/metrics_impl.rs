use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::OrderedMapMetricsSnapshot;
use crate::metrics::traits::{OrderedMapMetricsReadRecorder, OrderedMapMetricsRecorder};

#[derive(Debug, Default)]
pub struct OrderedMapMetrics {
    pub push_new: u64,
    pub push_updates: u64,
    pub get_hits: MetricsCell,
    pub get_misses: MetricsCell,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
    pub pull_head_calls: u64,
    pub pull_head_found: u64,
    pub pull_key_calls: u64,
    pub pull_key_found: u64,
    pub capacity_recomputes: u64,
    pub capacity_changes: u64,
    pub resize_calls: u64,
    pub sweeps: u64,
    pub evicted_entries: u64,
}

impl OrderedMapMetrics {
    /// Copies the counters; gauges are filled in by the caller.
    pub fn snapshot(&self, len: u64, capacity: u64) -> OrderedMapMetricsSnapshot {
        let get_hits = self.get_hits.get();
        let get_misses = self.get_misses.get();
        OrderedMapMetricsSnapshot {
            push_calls: self.push_new + self.push_updates,
            push_new: self.push_new,
            push_updates: self.push_updates,
            get_calls: get_hits + get_misses,
            get_hits,
            get_misses,
            peek_calls: self.peek_calls.get(),
            peek_found: self.peek_found.get(),
            pull_head_calls: self.pull_head_calls,
            pull_head_found: self.pull_head_found,
            pull_key_calls: self.pull_key_calls,
            pull_key_found: self.pull_key_found,
            capacity_recomputes: self.capacity_recomputes,
            capacity_changes: self.capacity_changes,
            resize_calls: self.resize_calls,
            sweeps: self.sweeps,
            evicted_entries: self.evicted_entries,
            len,
            capacity,
        }
    }
}

impl OrderedMapMetricsRecorder for OrderedMapMetrics {
    fn record_push_new(&mut self) {
        self.push_new += 1;
    }

    fn record_push_update(&mut self) {
        self.push_updates += 1;
    }

    fn record_pull_head(&mut self, found: bool) {
        self.pull_head_calls += 1;
        if found {
            self.pull_head_found += 1;
        }
    }

    fn record_pull_key(&mut self, found: bool) {
        self.pull_key_calls += 1;
        if found {
            self.pull_key_found += 1;
        }
    }

    fn record_capacity_recompute(&mut self, changed: bool) {
        self.capacity_recomputes += 1;
        if changed {
            self.capacity_changes += 1;
        }
    }

    fn record_resize(&mut self) {
        self.resize_calls += 1;
    }

    fn record_sweep(&mut self) {
        self.sweeps += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
}

impl OrderedMapMetricsReadRecorder for OrderedMapMetrics {
    fn record_get_hit(&self) {
        self.get_hits.incr();
    }

    fn record_get_miss(&self) {
        self.get_misses.incr();
    }

    fn record_peek(&self, found: bool) {
        self.peek_calls.incr();
        if found {
            self.peek_found.incr();
        }
    }
}
