#![no_main]

use libfuzzer_sys::fuzz_target;
use linkedhashmap::ds::OrderedList;
use linkedhashmap::error::MapError;

// Fuzz arbitrary operation sequences on OrderedList
//
// Tests random sequences of push_tail, pull_head, move_to_tail, detach,
// peek and clear operations, validating links after every step.
fuzz_target!(|data: &[u8]| {
    let mut list: OrderedList<u32, u32> = OrderedList::new();
    let mut all_ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 6;
        let value = u32::from(pair[1]);

        match op {
            0 => {
                // push_tail
                let id = list.push_tail(value, value);
                all_ids.push(id);
                assert_eq!(list.peek_tail(), Ok((&value, &value)));
                assert_eq!(list.tail_id(), Some(id));
            }
            1 => {
                // pull_head
                let old_len = list.len();
                match list.pull_head() {
                    Ok(_) => assert_eq!(list.len(), old_len - 1),
                    Err(err) => {
                        assert_eq!(err, MapError::EmptyContainer);
                        assert_eq!(old_len, 0);
                    }
                }
            }
            2 => {
                // move_to_tail
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let old_len = list.len();
                    if list.move_to_tail(id) {
                        assert_eq!(list.tail_id(), Some(id));
                    }
                    assert_eq!(list.len(), old_len);
                }
            }
            3 => {
                // detach
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let old_len = list.len();
                    if list.detach(id).is_some() {
                        assert_eq!(list.len(), old_len - 1);
                        assert!(!list.contains(id));
                    }
                }
            }
            4 => {
                // peek consistency
                assert_eq!(list.is_empty(), list.peek_head().is_err());
                assert_eq!(list.is_empty(), list.peek_tail().is_err());
            }
            5 => {
                list.clear();
                all_ids.clear();
                assert!(list.is_empty());
            }
            _ => unreachable!(),
        }

        list.check_invariants().unwrap();
        assert_eq!(list.iter().count() as u64, list.len());
    }
});
