// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bounded FIFO histories.

use std::collections::VecDeque;

/// A growable buffer that never holds more than `capacity` items.
///
/// Pushing into a full history evicts the oldest item.
#[derive(Debug, Clone)]
pub struct BoundedHistory<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    /// Creates an empty history. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Appends an item, returning the evicted one if the history was full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// Number of retained items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the next push will evict.
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Maximum number of retained items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest-to-newest iteration.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    /// The most recent item.
    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    /// Drops every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> BoundedHistory<T> {
    /// A copy of the retained items, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

impl BoundedHistory<f64> {
    /// Arithmetic mean, or zero when empty.
    pub fn average(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.items.iter().sum::<f64>() / self.items.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_evicts_oldest() {
        let mut history = BoundedHistory::new(3);
        assert_eq!(history.push(1), None);
        history.push(2);
        history.push(3);
        assert!(history.is_full());
        assert_eq!(history.push(4), Some(1));
        assert_eq!(history.to_vec(), vec![2, 3, 4]);
        assert_eq!(history.latest(), Some(&4));
    }

    #[test]
    fn test_average() {
        let mut history = BoundedHistory::new(4);
        assert_eq!(history.average(), 0.0);
        for v in [10.0, 20.0, 30.0] {
            history.push(v);
        }
        assert_eq!(history.average(), 20.0);
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut history = BoundedHistory::new(0);
        history.push("a");
        history.push("b");
        assert_eq!(history.len(), 1);
        assert_eq!(history.capacity(), 1);
    }
}
