//! LRU Recency List Module
//!
//! Implements the recency order for LRU eviction as an arena-backed
//! doubly-linked list addressed by stable slot handles.

use crate::cache::entry::Entry;

/// Null link in the list.
const NIL: usize = usize::MAX;

// == Node ==
/// A slot in the arena. Vacant slots keep `entry == None` and chain through
/// `next` to form the free list.
#[derive(Debug)]
struct Node<V> {
    entry: Option<Entry<V>>,
    prev: usize,
    next: usize,
}

// == Recency List ==
/// Tracks access order for LRU eviction strategy.
///
/// Entries are linked where:
/// - Front (head) = Most recently used
/// - Back (tail) = Least recently used
///
/// A handle returned by [`RecencyList::push_front`] stays valid until the
/// entry is removed, so the cache index can store it directly.
#[derive(Debug)]
pub struct RecencyList<V> {
    nodes: Vec<Node<V>>,
    head: usize,
    tail: usize,
    /// Head of the vacant slot chain
    free: usize,
    len: usize,
}

impl<V> Default for RecencyList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RecencyList<V> {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an entry as the most recently used and returns its handle.
    ///
    /// Vacant slots are reused before the arena grows.
    pub fn push_front(&mut self, entry: Entry<V>) -> usize {
        let handle = if self.free != NIL {
            let handle = self.free;
            let slot = &mut self.nodes[handle];
            self.free = slot.next;
            slot.entry = Some(entry);
            handle
        } else {
            self.nodes.push(Node {
                entry: Some(entry),
                prev: NIL,
                next: NIL,
            });
            self.nodes.len() - 1
        };

        self.link_front(handle);
        self.len += 1;
        handle
    }

    // == Move To Front ==
    /// Marks the entry behind `handle` as most recently used.
    pub fn move_to_front(&mut self, handle: usize) {
        if handle == self.head || !self.is_occupied(handle) {
            return;
        }
        self.unlink(handle);
        self.link_front(handle);
    }

    // == Remove ==
    /// Removes the entry behind `handle` and frees its slot.
    ///
    /// Returns None if the handle does not point at a live entry.
    pub fn remove(&mut self, handle: usize) -> Option<Entry<V>> {
        if !self.is_occupied(handle) {
            return None;
        }
        self.unlink(handle);

        let slot = &mut self.nodes[handle];
        let entry = slot.entry.take();
        slot.prev = NIL;
        slot.next = self.free;
        self.free = handle;
        self.len -= 1;
        entry
    }

    // == Pop Back ==
    /// Returns and removes the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<Entry<V>> {
        if self.tail == NIL {
            return None;
        }
        self.remove(self.tail)
    }

    // == Accessors ==
    pub fn get(&self, handle: usize) -> Option<&Entry<V>> {
        self.nodes.get(handle).and_then(|node| node.entry.as_ref())
    }

    pub fn get_mut(&mut self, handle: usize) -> Option<&mut Entry<V>> {
        self.nodes.get_mut(handle).and_then(|node| node.entry.as_mut())
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iter ==
    /// Iterates live entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn is_occupied(&self, handle: usize) -> bool {
        self.get(handle).is_some()
    }

    fn link_front(&mut self, handle: usize) {
        let old_head = self.head;
        {
            let node = &mut self.nodes[handle];
            node.prev = NIL;
            node.next = old_head;
        }
        if old_head != NIL {
            self.nodes[old_head].prev = handle;
        } else {
            self.tail = handle;
        }
        self.head = handle;
    }

    fn unlink(&mut self, handle: usize) {
        let (prev, next) = {
            let node = &self.nodes[handle];
            (node.prev, node.next)
        };
        if prev != NIL {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }
    }
}

// == Iterator ==
/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, V> {
    list: &'a RecencyList<V>,
    cursor: usize,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let node = &self.list.nodes[self.cursor];
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        node.entry.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
