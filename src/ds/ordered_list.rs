//! Doubly linked list of key/value elements backed by `SlotArena`.
//!
//! Elements live in a `SlotArena` and are linked by `SlotId`, so a handle
//! returned from [`OrderedList::push_tail`] stays valid until the element is
//! removed. Handles allow O(1) relocate/detach without searching.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Element<K, V>>)
//!   ┌────────┬──────────────────────────────────────────────────────┐
//!   │ SlotId │ Element { key, value, prev, next }                   │
//!   ├────────┼──────────────────────────────────────────────────────┤
//!   │ id_1   │ { key: 1, value: A, prev: None, next: Some(id_2) }   │
//!   │ id_2   │ { key: 2, value: B, prev: Some(id_1), next: id_3 }   │
//!   │ id_3   │ { key: 3, value: C, prev: Some(id_2), next: None }   │
//!   └────────┴──────────────────────────────────────────────────────┘
//!
//!   head (oldest) ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail (newest)
//! ```
//!
//! ## Operations
//! - `push_tail(k, v)`: allocate + attach at tail
//! - `pull_head()`: unlink head + free slot
//! - `move_to_tail(id)`: unlink + attach at tail
//! - `detach(id)`: unlink + free slot
//!
//! ## Performance
//! - `push_tail` / `pull_head` / `peek_*`: O(1)
//! - `move_to_tail` / `detach`: O(1)
//! - `iter` / `check_invariants`: O(n)

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::{InvariantError, MapError};

#[derive(Debug)]
struct Element<K, V> {
    key: K,
    value: V,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Ordered sequence of key/value elements, oldest at the head.
#[derive(Debug)]
pub struct OrderedList<K, V> {
    arena: SlotArena<Element<K, V>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<K, V> OrderedList<K, V> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of elements in the list.
    pub fn len(&self) -> u64 {
        self.arena.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` refers to a live element of this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    pub fn head_id(&self) -> Option<SlotId> {
        self.head
    }

    pub fn tail_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Returns the key and value stored at `id`.
    pub fn get(&self, id: SlotId) -> Option<(&K, &V)> {
        self.arena.get(id).map(|el| (&el.key, &el.value))
    }

    /// Returns a mutable reference to the value stored at `id`.
    ///
    /// The key is not exposed mutably; it must keep matching the map index.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut V> {
        self.arena.get_mut(id).map(|el| &mut el.value)
    }

    /// Returns the head (oldest) entry.
    pub fn peek_head(&self) -> Result<(&K, &V), MapError> {
        self.head
            .and_then(|id| self.get(id))
            .ok_or(MapError::EmptyContainer)
    }

    /// Returns the tail (newest) entry.
    pub fn peek_tail(&self) -> Result<(&K, &V), MapError> {
        self.tail
            .and_then(|id| self.get(id))
            .ok_or(MapError::EmptyContainer)
    }

    pub(crate) fn head_value(&self) -> Option<&V> {
        self.head
            .and_then(|id| self.arena.get(id))
            .map(|el| &el.value)
    }

    pub(crate) fn tail_value(&self) -> Option<&V> {
        self.tail
            .and_then(|id| self.arena.get(id))
            .map(|el| &el.value)
    }

    /// Appends a new element at the tail and returns its handle.
    pub fn push_tail(&mut self, key: K, value: V) -> SlotId {
        let id = self.arena.insert(Element {
            key,
            value,
            prev: self.tail,
            next: None,
        });
        if let Some(tail) = self.tail {
            if let Some(el) = self.arena.get_mut(tail) {
                el.next = Some(id);
            }
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
        id
    }

    /// Removes the head element and returns its key and value.
    pub fn pull_head(&mut self) -> Result<(K, V), MapError> {
        let id = self.head.ok_or(MapError::EmptyContainer)?;
        self.detach(id).ok_or(MapError::EmptyContainer)
    }

    /// Moves an element to the tail; returns `false` if `id` is stale.
    pub fn move_to_tail(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if Some(id) == self.tail {
            return true;
        }
        self.unlink(id);
        self.attach_tail(id);
        true
    }

    /// Removes the element `id` and returns its contents.
    pub fn detach(&mut self, id: SlotId) -> Option<(K, V)> {
        self.unlink(id)?;
        self.arena.remove(id).map(|el| (el.key, el.value))
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates entries from head (oldest) to tail (newest).
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            current: self.head,
            remaining: self.arena.len(),
        }
    }

    /// Walks the list in both directions and checks link consistency.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || !self.arena.is_empty() {
                return Err(InvariantError::new(
                    "empty list must have neither head nor tail",
                ));
            }
            return Ok(());
        }

        let len = self.arena.len();

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let el = self.arena.get(id).ok_or_else(|| {
                InvariantError::new(format!("dangling link to slot {}", id.index()))
            })?;
            if el.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {} has a prev link that does not mirror its predecessor",
                    id.index()
                )));
            }
            count += 1;
            if count > len {
                return Err(InvariantError::new("cycle in forward traversal"));
            }
            prev = Some(id);
            current = el.next;
        }
        if prev != self.tail {
            return Err(InvariantError::new("forward traversal does not end at tail"));
        }
        if count != len {
            return Err(InvariantError::new(format!(
                "forward traversal visited {count} elements, expected {len}"
            )));
        }

        let mut count = 0usize;
        let mut current = self.tail;
        let mut last = None;
        while let Some(id) = current {
            let el = self.arena.get(id).ok_or_else(|| {
                InvariantError::new(format!("dangling link to slot {}", id.index()))
            })?;
            count += 1;
            if count > len {
                return Err(InvariantError::new("cycle in backward traversal"));
            }
            last = Some(id);
            current = el.prev;
        }
        if last != self.head || count != len {
            return Err(InvariantError::new(
                "backward traversal does not mirror forward traversal",
            ));
        }

        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("ordered list invariant violated: {err}");
        }
    }

    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let el = self.arena.get(id)?;
            (el.prev, el.next)
        };

        if let Some(prev_id) = prev {
            if let Some(prev_el) = self.arena.get_mut(prev_id) {
                prev_el.next = next;
            }
        } else {
            self.head = next;
        }

        if let Some(next_id) = next {
            if let Some(next_el) = self.arena.get_mut(next_id) {
                next_el.prev = prev;
            }
        } else {
            self.tail = prev;
        }

        if let Some(el) = self.arena.get_mut(id) {
            el.prev = None;
            el.next = None;
        }

        Some(())
    }

    fn attach_tail(&mut self, id: SlotId) -> Option<()> {
        let old_tail = self.tail;
        let el = self.arena.get_mut(id)?;
        el.next = None;
        el.prev = old_tail;
        if let Some(old_tail) = old_tail {
            if let Some(tail_el) = self.arena.get_mut(old_tail) {
                tail_el.next = Some(id);
            }
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
        Some(())
    }
}

impl<K, V> Default for OrderedList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(&K, &V)` from head to tail.
pub struct Iter<'a, K, V> {
    list: &'a OrderedList<K, V>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let el = self.list.arena.get(id)?;
        self.current = el.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&el.key, &el.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
