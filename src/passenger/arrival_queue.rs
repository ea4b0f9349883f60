//! Arrival ordering for passengers
//!
//! A binary min-heap keyed by appearance time, with an insertion sequence as
//! the tie breaker so that simultaneous arrivals keep the order they were
//! added in.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::simulation::clock::SimInstant;

/// Priority queue of passenger indices ordered by (appearance, insertion)
#[derive(Debug, Clone, Default)]
pub struct ArrivalQueue {
    heap: BinaryHeap<Reverse<(SimInstant, u64, usize)>>,
    next_sequence: u64,
}

impl ArrivalQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue the passenger stored at `index`
    pub fn push(&mut self, appear_time: SimInstant, index: usize) {
        self.heap.push(Reverse((appear_time, self.next_sequence, index)));
        self.next_sequence += 1;
    }

    /// Dequeue the earliest arrival
    pub fn pop(&mut self) -> Option<(SimInstant, usize)> {
        self.heap.pop().map(|Reverse((time, _, index))| (time, index))
    }

    /// Earliest arrival without removing it
    pub fn peek(&self) -> Option<(SimInstant, usize)> {
        self.heap.peek().map(|Reverse((time, _, index))| (*time, *index))
    }

    /// Number of queued arrivals
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drain the queue in arrival order
    pub fn drain_ordered(&mut self) -> Vec<usize> {
        std::iter::from_fn(|| self.pop().map(|(_, index)| index)).collect()
    }
}
