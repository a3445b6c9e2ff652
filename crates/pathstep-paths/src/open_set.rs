//! Priority frontier for best-first searches.
//!
//! Entries are stored in a min-heap keyed by `(key, insertion_order)`.
//! Lower keys are popped first; equal keys come out in insertion order
//! (FIFO), which makes every search deterministic for a given grid.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Entry<T> {
    item: T,
    key: f64,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Natural order: smaller key first, then earlier insertion. The heap
        // wraps entries in `Reverse`.
        self.key
            .total_cmp(&other.key)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A min-priority queue with FIFO tie-breaking and a real `peek`.
///
/// Searches push duplicates instead of decreasing keys; stale entries are
/// skipped by the caller on pop or dropped with [`prune`](Self::prune).
pub struct OpenSet<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    seq: u64,
}

impl<T> OpenSet<T> {
    /// Create an empty open set.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Push an item with the given key.
    pub fn push(&mut self, item: T, key: f64) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { item, key, seq }));
    }

    /// Pop the item with the lowest key (ties broken FIFO).
    pub fn pop(&mut self) -> Option<(T, f64)> {
        self.heap.pop().map(|Reverse(e)| (e.item, e.key))
    }

    /// The lowest key, without removing its entry.
    pub fn peek_key(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(e)| e.key)
    }

    /// The item with the lowest key, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|Reverse(e)| &e.item)
    }

    /// Pop entries off the top while `stale` holds for them.
    ///
    /// Only the top is inspected, so this is cheap to call before every
    /// [`peek_key`](Self::peek_key).
    pub fn prune(&mut self, stale: impl Fn(&T) -> bool) {
        while self.peek().is_some_and(&stale) {
            self.heap.pop();
        }
    }

    /// Whether the open set is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for OpenSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_key_first() {
        let mut q = OpenSet::new();
        q.push("a", 3.0);
        q.push("b", 1.0);
        q.push("c", 2.0);

        assert_eq!(q.pop(), Some(("b", 1.0)));
        assert_eq!(q.pop(), Some(("c", 2.0)));
        assert_eq!(q.pop(), Some(("a", 3.0)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn fifo_on_equal_keys() {
        let mut q = OpenSet::new();
        q.push("first", 1.5);
        q.push("second", 1.5);
        q.push("third", 1.5);

        assert_eq!(q.pop().map(|(s, _)| s), Some("first"));
        assert_eq!(q.pop().map(|(s, _)| s), Some("second"));
        assert_eq!(q.pop().map(|(s, _)| s), Some("third"));
    }

    #[test]
    fn peek_does_not_remove() {
        let mut q = OpenSet::new();
        assert_eq!(q.peek_key(), None);
        q.push(7, 4.0);
        q.push(9, 2.0);
        assert_eq!(q.peek_key(), Some(2.0));
        assert_eq!(q.peek(), Some(&9));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn prune_drops_only_stale_tops() {
        let mut q = OpenSet::new();
        q.push(1, 1.0);
        q.push(2, 2.0);
        q.push(3, 3.0);
        q.push(4, 0.5);

        // 4 and 1 are stale; 2 is live and stops the pruning even though 3
        // would also count as stale.
        q.prune(|&i| i != 2);
        assert_eq!(q.peek(), Some(&2));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn is_empty_and_len() {
        let mut q = OpenSet::<u8>::new();
        assert!(q.is_empty());
        q.push(1, 0.0);
        assert!(!q.is_empty());
        assert_eq!(q.len(), 1);
        q.pop();
        assert!(q.is_empty());
    }
}
