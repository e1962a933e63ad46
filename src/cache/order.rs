//! Recency List Module
//!
//! The ordering sequence behind the cache: a doubly-linked list of entries
//! kept in recency order, front = most recently touched, back = eviction
//! candidate.
//!
//! Nodes live in a slot arena (`Vec`) and link to each other by slot index,
//! so push-front, move-to-front, remove and peek-back are all O(1) without
//! any `unsafe`. Freed slots are recycled through a free list. A slot index
//! is the stable handle the key index maps to.

use crate::cache::entry::CacheEntry;

/// Sentinel for null links in the arena.
const NIL: usize = usize::MAX;

// == Arena Node ==
/// One slot in the arena. `entry` is None while the slot sits on the free
/// list; live handles always point at an occupied slot.
#[derive(Debug)]
struct Node<V> {
    entry: Option<CacheEntry<V>>,
    prev: usize,
    next: usize,
}

// == Recency List ==
/// Doubly-linked sequence of cache entries in recency order.
#[derive(Debug)]
pub(crate) struct RecencyList<V> {
    slots: Vec<Node<V>>,
    /// Most recently touched entry
    head: usize,
    /// Least recently touched entry
    tail: usize,
    /// Head of the free-slot list, chained through `next`
    free: usize,
    len: usize,
}

impl<V> RecencyList<V> {
    // == Constructor ==
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Push Front ==
    /// Inserts an entry at the front (most recent) and returns its handle.
    pub fn push_front(&mut self, entry: CacheEntry<V>) -> usize {
        let idx = self.alloc(entry);
        self.link_front(idx);
        self.len += 1;
        idx
    }

    // == Move To Front ==
    /// Marks the entry behind `handle` as most recently touched.
    pub fn move_to_front(&mut self, handle: usize) {
        if handle == self.head {
            return;
        }
        self.unlink(handle);
        self.link_front(handle);
    }

    // == Remove ==
    /// Removes the entry behind `handle` and returns it. Returns None if
    /// the slot is already free.
    pub fn remove(&mut self, handle: usize) -> Option<CacheEntry<V>> {
        let entry = self.slots[handle].entry.take()?;
        self.unlink(handle);
        self.slots[handle].next = self.free;
        self.free = handle;
        self.len -= 1;
        Some(entry)
    }

    // == Peek Back ==
    /// Returns the least recently touched entry without removing it.
    #[allow(dead_code)]
    pub fn back(&self) -> Option<&CacheEntry<V>> {
        if self.tail == NIL {
            None
        } else {
            self.slots[self.tail].entry.as_ref()
        }
    }

    // == Back Handle ==
    /// Returns the handle of the least recently touched entry.
    pub fn back_handle(&self) -> Option<usize> {
        if self.tail == NIL {
            None
        } else {
            Some(self.tail)
        }
    }

    // == Lookup ==
    /// Returns the entry behind `handle`, if the slot is live.
    pub fn get(&self, handle: usize) -> Option<&CacheEntry<V>> {
        self.slots.get(handle).and_then(|node| node.entry.as_ref())
    }

    /// Returns the entry behind `handle` mutably, if the slot is live.
    pub fn get_mut(&mut self, handle: usize) -> Option<&mut CacheEntry<V>> {
        self.slots
            .get_mut(handle)
            .and_then(|node| node.entry.as_mut())
    }

    // == Iterate ==
    /// Iterates entries front (most recent) to back (least recent).
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Clear ==
    /// Drops every entry and slot, resetting to the empty state.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = NIL;
        self.tail = NIL;
        self.free = NIL;
        self.len = 0;
    }

    // == Internal: slot allocation ==
    /// Places `entry` in a recycled slot if one is free, otherwise grows
    /// the arena. The slot is returned unlinked.
    fn alloc(&mut self, entry: CacheEntry<V>) -> usize {
        if self.free != NIL {
            let idx = self.free;
            self.free = self.slots[idx].next;
            self.slots[idx] = Node {
                entry: Some(entry),
                prev: NIL,
                next: NIL,
            };
            idx
        } else {
            self.slots.push(Node {
                entry: Some(entry),
                prev: NIL,
                next: NIL,
            });
            self.slots.len() - 1
        }
    }

    // == Internal: linking ==
    /// Links an unlinked slot in at the head.
    fn link_front(&mut self, idx: usize) {
        self.slots[idx].prev = NIL;
        self.slots[idx].next = self.head;
        if self.head != NIL {
            self.slots[self.head].prev = idx;
        }
        self.head = idx;
        if self.tail == NIL {
            self.tail = idx;
        }
    }

    /// Detaches a slot from the chain, fixing head/tail as needed.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);
        if prev != NIL {
            self.slots[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.slots[next].prev = prev;
        } else {
            self.tail = prev;
        }
        self.slots[idx].prev = NIL;
        self.slots[idx].next = NIL;
    }
}

impl<V> Default for RecencyList<V> {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
/// Front-to-back iterator over a `RecencyList`.
pub(crate) struct Iter<'a, V> {
    list: &'a RecencyList<V>,
    cursor: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a CacheEntry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let node = &self.list.slots[self.cursor];
        self.cursor = node.next;
        node.entry.as_ref()
    }
}
