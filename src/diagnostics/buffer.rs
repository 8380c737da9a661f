// SPDX-License-Identifier: MPL-2.0
//! Bounded history storage for the interaction monitor.

use std::collections::VecDeque;

/// Fixed-capacity ring buffer, oldest entry first.
///
/// Pushing into a full buffer evicts the oldest entry.
///
/// # Example
///
/// ```
/// use compare_lens::diagnostics::CircularBuffer;
///
/// let mut history = CircularBuffer::new(2);
/// history.push("drag-start");
/// history.push("drop-success");
/// history.push("drag-start");
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.recent(1).next(), Some(&"drag-start"));
/// ```
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> CircularBuffer<T> {
    /// Creates an empty buffer holding at most `capacity` entries (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(item);
    }

    /// Iterates over all entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterates over the newest `count` entries, oldest of them first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &T> {
        self.data.iter().skip(self.data.len().saturating_sub(count))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}
