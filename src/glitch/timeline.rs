//! Deferred task queue ordered by due time.
//!
//! Stands in for a host timer queue: tasks are scheduled for an absolute time
//! and handed back once the clock passes it. Tasks due at the same instant come
//! back in scheduling order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry<T> {
    due_ms: f64,
    seq: u64,
    task: T,
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
    // Reversed so the max-heap pops the earliest entry first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .total_cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-queue of tasks keyed by due time in milliseconds
pub struct Timeline<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn schedule(&mut self, due_ms: f64, task: T) {
        self.heap.push(Entry {
            due_ms,
            seq: self.next_seq,
            task,
        });
        self.next_seq += 1;
    }

    /// Remove and return the earliest task whose due time is `<= now_ms`
    pub fn pop_due(&mut self, now_ms: f64) -> Option<T> {
        if self.heap.peek()?.due_ms <= now_ms {
            self.heap.pop().map(|entry| entry.task)
        } else {
            None
        }
    }

    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|entry| entry.due_ms)
    }

    /// Drop every task for which `keep` returns false
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.heap.retain(|entry| keep(&entry.task));
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_due_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(30.0, "c");
        timeline.schedule(10.0, "a");
        timeline.schedule(20.0, "b");

        assert_eq!(timeline.pop_due(100.0), Some("a"));
        assert_eq!(timeline.pop_due(100.0), Some("b"));
        assert_eq!(timeline.pop_due(100.0), Some("c"));
        assert_eq!(timeline.pop_due(100.0), None);
    }

    #[test]
    fn test_holds_tasks_until_due() {
        let mut timeline = Timeline::new();
        timeline.schedule(40.0, 1);

        assert_eq!(timeline.pop_due(39.9), None);
        assert_eq!(timeline.next_due(), Some(40.0));
        assert_eq!(timeline.pop_due(40.0), Some(1));
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_same_due_time_keeps_schedule_order() {
        let mut timeline = Timeline::new();
        for i in 0..5 {
            timeline.schedule(5.0, i);
        }
        let order: Vec<i32> = std::iter::from_fn(|| timeline.pop_due(5.0)).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_retain_drops_tasks() {
        let mut timeline = Timeline::new();
        for i in 0..6 {
            timeline.schedule(i as f64, i);
        }
        timeline.retain(|task| task % 2 == 0);
        assert_eq!(timeline.len(), 3);
    }
}
