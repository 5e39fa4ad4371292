// ==============================================
// ORDERED MAP SCENARIOS (integration)
// ==============================================
//
// End-to-end behaviour through the public API, with tracing output routed
// to the test writer.

use std::cell::RefCell;
use std::rc::Rc;

use linkedhashmap::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

type Log = Rc<RefCell<Vec<(u64, &'static str)>>>;

fn logging_fixed(log: &Log) -> impl CapacityPolicy<u64, &'static str> {
    let log = Rc::clone(log);
    FnPolicy::new(
        move |k, v| log.borrow_mut().push((k, v)),
        |cap, _len, _head, _tail| cap,
    )
}

#[test]
fn third_push_expires_first_key() {
    init_tracing();
    let log = Log::default();
    let mut map: OrderedMap<u64, &str, _> = OrderedMap::new(2, logging_fixed(&log));

    map.push(1, "a");
    map.push(2, "b");
    map.push(3, "c");

    assert_eq!(*log.borrow(), vec![(1, "a")]);
    assert_eq!(map.len(), 2);
    assert_eq!(map.peek_head(), Ok((&2, &"b")));
    assert_eq!(map.peek_tail(), Ok((&3, &"c")));
}

#[test]
fn repeated_key_is_updated_in_place() {
    init_tracing();
    let log = Log::default();
    let mut map: OrderedMap<u64, &str, _> = OrderedMap::new(5, logging_fixed(&log));

    map.push(1, "a");
    map.push(1, "b");

    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&1), Some(&"b"));
    assert!(log.borrow().is_empty());
}

#[test]
fn pull_head_on_fresh_map_is_empty_container() {
    let mut map: OrderedMap<u64, &str, _> = OrderedMapBuilder::new(4).build_fixed();
    assert_eq!(map.pull_head(), Err(MapError::EmptyContainer));
    assert_eq!(map.peek_head(), Err(MapError::EmptyContainer));
    assert_eq!(map.peek_tail(), Err(MapError::EmptyContainer));
    assert!(map.is_empty());
}

#[test]
fn zero_capacity_from_policy_stops_eviction() {
    init_tracing();
    // bounded to 3 until value 9 is pushed, then unbounded
    let mut map = OrderedMapBuilder::new(3).build_with(
        |_k: u64, _v: u64| {},
        |cap, _len, _head, tail: Option<&u64>| {
            if tail.copied().unwrap_or(0) >= 9 { 0 } else { cap }
        },
    );

    for k in 0..9 {
        map.push(k, k);
    }
    assert_eq!(map.len(), 3);

    for k in 9..40 {
        map.push(k, k);
    }
    assert_eq!(map.capacity(), 0);
    assert_eq!(map.len(), 34);
}

#[derive(Debug, Clone)]
struct Group {
    last_seen: u64,
    messages: Vec<u64>,
}

/// Keeps only groups whose newest message is within `window` of the newest group.
struct TimeWindow {
    window: u64,
    flushed: Vec<(u64, usize)>,
}

impl CapacityPolicy<u64, Group> for TimeWindow {
    fn on_expired(&mut self, key: u64, value: Group) {
        self.flushed.push((key, value.messages.len()));
    }

    fn compute_capacity(
        &mut self,
        _current_capacity: u64,
        current_len: u64,
        head: Option<&Group>,
        tail: Option<&Group>,
    ) -> u64 {
        match (head, tail) {
            (Some(head), Some(tail))
                if tail.last_seen.saturating_sub(head.last_seen) > self.window =>
            {
                current_len - 1
            },
            _ => 0,
        }
    }
}

#[test]
fn time_window_aggregation_flushes_stale_groups() {
    init_tracing();
    let mut map = OrderedMap::new(
        0,
        TimeWindow {
            window: 10,
            flushed: Vec::new(),
        },
    );

    let messages = [(1, 0), (2, 1), (1, 5), (3, 8), (2, 12), (3, 14), (4, 30)];
    for (id, (group, ts)) in messages.into_iter().enumerate() {
        let mut entry = map.get(&group).cloned().unwrap_or(Group {
            last_seen: 0,
            messages: Vec::new(),
        });
        entry.last_seen = entry.last_seen.max(ts);
        entry.messages.push(id as u64);
        map.push(group, entry);
    }

    // group 4 arriving at 30 pushes groups 1, 2 and 3 out of the window,
    // one recompute at a time
    assert_eq!(map.policy().flushed, vec![(1, 2), (2, 2), (3, 2)]);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![4]);
    map.check_invariants().unwrap();
}

#[test]
fn pull_key_does_not_rebalance_capacity() {
    let log = Log::default();
    let mut map: OrderedMap<u64, &str, _> = OrderedMap::new(3, logging_fixed(&log));
    map.push(1, "a");
    map.push(2, "b");
    map.push(3, "c");

    map.resize(5);
    assert_eq!(map.pull_key(&2), Some("b"));
    assert_eq!(map.pull_key(&2), None);
    assert_eq!(map.capacity(), 5);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
    assert!(log.borrow().is_empty());
}
