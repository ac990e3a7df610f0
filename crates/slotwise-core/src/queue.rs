//! Deadline-ordered work queue.
//!
//! Keeps pending lab reports (or any dated deliverable) ordered by due date,
//! with higher-credit subjects winning ties. Insertion order never affects
//! pop order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A queued deliverable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedReport {
    pub id: i32,
    pub title: String,
    pub subject: String,
    pub due: NaiveDate,
    pub credits: u32,
}

/// Heap entry ordered so the max-heap pops the earliest deadline first,
/// then the highest credits, then the lowest id.
#[derive(Debug, Clone)]
struct Entry(QueuedReport);

impl Entry {
    fn key_cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .due
            .cmp(&self.0.due)
            .then(self.0.credits.cmp(&other.0.credits))
            .then(other.0.id.cmp(&self.0.id))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_cmp(other)
    }
}

/// Priority queue over pending deliverables.
#[derive(Debug, Clone, Default)]
pub struct DeadlineQueue {
    heap: BinaryHeap<Entry>,
}

impl DeadlineQueue {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, report: QueuedReport) {
        self.heap.push(Entry(report));
    }

    /// Remove and return the most urgent deliverable.
    pub fn pop(&mut self) -> Option<QueuedReport> {
        self.heap.pop().map(|entry| entry.0)
    }

    /// The most urgent deliverable without removing it.
    pub fn peek(&self) -> Option<&QueuedReport> {
        self.heap.peek().map(|entry| &entry.0)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drain the queue in urgency order.
    pub fn drain_ordered(&mut self) -> Vec<QueuedReport> {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some(report) = self.pop() {
            out.push(report);
        }
        out
    }
}
