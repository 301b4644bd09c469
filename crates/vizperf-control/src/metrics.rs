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

//! Rolling storage for frame-rate readings.

use std::collections::VecDeque;

/// A circular buffer of `f64` samples with a capacity chosen at runtime.
///
/// Pushing into a full buffer overwrites the oldest value.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    data: VecDeque<f64>,
    capacity: usize,
}

impl RingBuffer {
    /// Creates an empty buffer. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a new value, overwriting the oldest if full.
    pub fn push(&mut self, value: f64) {
        if self.data.len() == self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(value);
    }

    /// Returns the number of elements currently in the buffer.
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// Maximum number of values retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` once `capacity` values have been pushed since the last clear.
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    /// Drops every value.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Values in chronological order (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }

    /// Arithmetic mean, or 0 if empty.
    pub fn average(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// Population variance of the values.
    pub fn variance(&self) -> f64 {
        if self.data.len() < 2 {
            return 0.0;
        }
        let avg = self.average();
        let sum_sq: f64 = self.data.iter().map(|v| (v - avg) * (v - avg)).sum();
        sum_sq / self.data.len() as f64
    }
}
