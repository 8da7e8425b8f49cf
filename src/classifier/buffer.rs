//! Rolling prediction history for consensus voting
//!
//! Stores the last N top-ranked classification results in insertion order.
//! Oldest entries are evicted first.

use std::collections::VecDeque;

use super::model::ClassificationResult;

/// Bounded FIFO of recent classification results
#[derive(Clone, Debug)]
pub struct PredictionHistory {
    entries: VecDeque<ClassificationResult>,
    capacity: usize,
}

impl PredictionHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a result, evicting the oldest once over capacity.
    /// Returns the evicted entry, if any.
    pub fn push(&mut self, result: ClassificationResult) -> Option<ClassificationResult> {
        self.entries.push_back(result);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Window length N
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the window has been filled
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&ClassificationResult> {
        self.entries.back()
    }

    /// Clear the history (session start)
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for PredictionHistory {
    fn default() -> Self {
        Self::new(2)
    }
}
