//! Ordered Index Module
//!
//! Recency-ranked sequence of entries paired with a key → handle lookup.
//!
//! Entries live in an arena and are addressed by stable generational
//! handles. The sequence is an intrusive doubly linked list over those
//! handles:
//! - Front (head) = most recently touched
//! - Back (tail) = eviction candidate
//!
//! A lookup handle that does not resolve in the arena means the two indices
//! disagree; indexing the arena panics in that case.

use std::collections::HashMap;

use generational_arena::{Arena, Index};

use crate::cache::Entry;

#[derive(Debug)]
struct Node<V> {
    entry: Entry<V>,
    prev: Option<Index>,
    next: Option<Index>,
}

// == Ordered Index ==
#[derive(Debug)]
pub(crate) struct OrderedIndex<V> {
    nodes: Arena<Node<V>>,
    lookup: HashMap<String, Index>,
    head: Option<Index>,
    tail: Option<Index>,
}

impl<V> OrderedIndex<V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            lookup: HashMap::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.lookup.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Entry<V>> {
        let index = *self.lookup.get(key)?;
        Some(&self.nodes[index].entry)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Entry<V>> {
        let index = *self.lookup.get(key)?;
        Some(&mut self.nodes[index].entry)
    }

    pub fn front(&self) -> Option<&Entry<V>> {
        self.head.map(|index| &self.nodes[index].entry)
    }

    pub fn back(&self) -> Option<&Entry<V>> {
        self.tail.map(|index| &self.nodes[index].entry)
    }

    // == Push Front ==
    /// Inserts a new entry at the front.
    ///
    /// The key must not already be present.
    pub fn push_front(&mut self, entry: Entry<V>) {
        debug_assert!(!self.lookup.contains_key(&entry.key));

        let key = entry.key.clone();
        let index = self.nodes.insert(Node {
            entry,
            prev: None,
            next: None,
        });
        self.lookup.insert(key, index);
        self.link_front(index);
    }

    // == Move To Front ==
    /// Marks a key as most recently touched.
    ///
    /// Returns false if the key is not present.
    pub fn move_to_front(&mut self, key: &str) -> bool {
        let Some(&index) = self.lookup.get(key) else {
            return false;
        };

        if self.head != Some(index) {
            self.unlink(index);
            self.link_front(index);
        }
        true
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) -> Option<Entry<V>> {
        let index = self.lookup.remove(key)?;
        Some(self.detach(index))
    }

    // == Pop Back ==
    /// Removes and returns the eviction candidate.
    pub fn pop_back(&mut self) -> Option<Entry<V>> {
        let index = self.tail?;
        let entry = self.detach(index);
        self.lookup.remove(&entry.key);
        Some(entry)
    }

    // == Retain ==
    /// Keeps only the entries for which `keep` returns true.
    ///
    /// Returns the number of entries removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Entry<V>) -> bool,
    {
        let doomed: Vec<Index> = self
            .nodes
            .iter()
            .filter(|(_, node)| !keep(&node.entry))
            .map(|(index, _)| index)
            .collect();

        for &index in &doomed {
            let entry = self.detach(index);
            self.lookup.remove(&entry.key);
        }
        doomed.len()
    }

    /// Iterates entries from front (most recent) to back.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            index: self,
            cursor: self.head,
        }
    }

    fn detach(&mut self, index: Index) -> Entry<V> {
        self.unlink(index);
        self.nodes
            .remove(index)
            .map(|node| node.entry)
            .unwrap_or_else(|| panic!("ordered index lost node {:?}", index))
    }

    fn unlink(&mut self, index: Index) {
        let node = &self.nodes[index];
        let (prev, next) = (node.prev, node.next);

        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }

        let node = &mut self.nodes[index];
        node.prev = None;
        node.next = None;
    }

    fn link_front(&mut self, index: Index) {
        let old_head = self.head;
        {
            let node = &mut self.nodes[index];
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old) => self.nodes[old].prev = Some(index),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
    }
}

// == Iterator ==
pub(crate) struct Iter<'a, V> {
    index: &'a OrderedIndex<V>,
    cursor: Option<Index>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index;
        let node = &index.nodes[self.cursor?];
        self.cursor = node.next;
        Some(&node.entry)
    }
}
