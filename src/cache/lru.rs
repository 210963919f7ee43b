//! LRU Recency List Module
//!
//! Arena-backed doubly linked list that keeps entries in access order.

use crate::cache::Entry;

// == Node ==
/// A slot in the arena. `entry` is `None` while the slot sits on the free list.
#[derive(Debug)]
struct Node<V> {
    entry: Option<Entry<V>>,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Owns cache entries in access order.
///
/// - Front (head) = Most recently used
/// - Back (tail) = Least recently used
///
/// Entries are addressed by the `usize` handle returned from `push_front`.
/// A handle stays valid until its entry is removed; freed slots are reused.
#[derive(Debug)]
pub struct RecencyList<V> {
    /// Slot storage, linked through `prev`/`next`
    nodes: Vec<Node<V>>,
    head: Option<usize>,
    tail: Option<usize>,
    /// Head of the chain of free slots (linked through `next`)
    free: Option<usize>,
    len: usize,
}

impl<V> Default for RecencyList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RecencyList<V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
            tail: None,
            free: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an entry as most recently used and returns its handle.
    pub fn push_front(&mut self, entry: Entry<V>) -> usize {
        let node = Node {
            entry: Some(entry),
            prev: None,
            next: None,
        };
        let idx = match self.free {
            Some(idx) => {
                self.free = self.nodes[idx].next;
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.link_front(idx);
        self.len += 1;
        idx
    }

    // == Move To Front ==
    /// Marks the entry at `idx` as most recently used.
    pub fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) || !self.is_live(idx) {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    // == Remove ==
    /// Unlinks and returns the entry at `idx`, freeing its slot.
    pub fn remove(&mut self, idx: usize) -> Option<Entry<V>> {
        if !self.is_live(idx) {
            return None;
        }
        self.unlink(idx);
        let entry = self.nodes[idx].entry.take();
        self.nodes[idx].next = self.free;
        self.free = Some(idx);
        self.len -= 1;
        entry
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<Entry<V>> {
        self.tail.and_then(|idx| self.remove(idx))
    }

    // == Back ==
    /// Handle of the least recently used entry, without removing it.
    pub fn back(&self) -> Option<usize> {
        self.tail
    }

    pub fn get(&self, idx: usize) -> Option<&Entry<V>> {
        self.nodes.get(idx).and_then(|node| node.entry.as_ref())
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Entry<V>> {
        self.nodes.get_mut(idx).and_then(|node| node.entry.as_mut())
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iter ==
    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    fn is_live(&self, idx: usize) -> bool {
        self.nodes
            .get(idx)
            .is_some_and(|node| node.entry.is_some())
    }

    fn link_front(&mut self, idx: usize) {
        self.nodes[idx].prev = None;
        self.nodes[idx].next = self.head;
        if let Some(head) = self.head {
            self.nodes[head].prev = Some(idx);
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev.take();
        let next = self.nodes[idx].next.take();

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
    }
}

// == Iterator ==
/// Iterator over entries, most recently used first.
pub struct Iter<'a, V> {
    list: &'a RecencyList<V>,
    current: Option<usize>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        let node = &self.list.nodes[idx];
        self.current = node.next;
        node.entry.as_ref()
    }
}
