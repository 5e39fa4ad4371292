#![no_main]

use libfuzzer_sys::fuzz_target;
use linkedhashmap::map::OrderedMap;
use linkedhashmap::policy::FnPolicy;

// Fuzz arbitrary operation sequences on OrderedMap
//
// The capacity function is driven by the input itself, so capacity jumps
// up, down and to zero. After every step the index/list invariants must
// hold and a positive capacity must bound the length.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let bias = u64::from(data[0]);
    let mut expired = 0u64;
    let policy = FnPolicy::new(
        |_k: u8, _v: u8| expired += 1,
        move |cap: u64, len: u64, head: Option<&u8>, tail: Option<&u8>| {
            let h = head.copied().map_or(0, u64::from);
            let t = tail.copied().map_or(0, u64::from);
            match (h + t + bias) % 4 {
                0 => 0,
                1 => cap + 1,
                2 => cap.saturating_sub(1),
                _ => len / 2 + 1,
            }
        },
    );
    let mut map = OrderedMap::new(bias % 8, policy);

    for pair in data[1..].chunks_exact(2) {
        let op = pair[0] % 5;
        let key = pair[1] % 32;

        match op {
            0 | 1 => {
                map.push(key, pair[0]);
            }
            2 => {
                let _ = map.get(&key);
            }
            3 => {
                let had = map.contains_key(&key);
                let capacity = map.capacity();
                assert_eq!(map.pull_key(&key).is_some(), had);
                assert_eq!(map.capacity(), capacity);
            }
            _ => {
                let was_empty = map.is_empty();
                assert_eq!(map.pull_head().is_err(), was_empty);
            }
        }

        map.check_invariants().unwrap();
        if map.capacity() > 0 {
            assert!(map.len() <= map.capacity());
        }
    }

    drop(map);
    let _ = expired;
});
