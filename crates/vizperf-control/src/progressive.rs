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

//! Chunked execution of queued render work.

use std::fmt;

/// A unit of deferred render work.
pub type RenderTask = Box<dyn FnOnce() + Send + 'static>;

/// Spreads a list of render tasks over several frames.
pub struct ProgressiveRenderer {
    tasks: Vec<Option<RenderTask>>,
    cursor: usize,
    chunk_size: usize,
}

impl ProgressiveRenderer {
    /// Creates an empty renderer running `chunk_size` tasks per chunk (at least one).
    pub fn new(chunk_size: usize) -> Self {
        Self {
            tasks: Vec::new(),
            cursor: 0,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Replaces the queue. Any unexecuted tasks of a previous queue are dropped.
    pub fn setup(&mut self, tasks: Vec<RenderTask>) {
        self.tasks = tasks.into_iter().map(Some).collect();
        self.cursor = 0;
    }

    /// Runs up to `chunk_size` pending tasks in order.
    ///
    /// Returns `true` if tasks remain afterwards.
    pub fn execute_chunk(&mut self) -> bool {
        let end = (self.cursor + self.chunk_size).min(self.tasks.len());
        for slot in &mut self.tasks[self.cursor..end] {
            if let Some(task) = slot.take() {
                task();
            }
        }
        self.cursor = end;
        self.has_pending()
    }

    /// Fraction of the queue executed, `1.0` for an empty queue.
    pub fn progress(&self) -> f64 {
        if self.tasks.is_empty() {
            1.0
        } else {
            self.cursor as f64 / self.tasks.len() as f64
        }
    }

    /// Returns `true` while tasks remain.
    pub fn has_pending(&self) -> bool {
        self.cursor < self.tasks.len()
    }

    /// Total number of queued tasks, executed or not.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Drops the queue.
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.cursor = 0;
    }
}

impl fmt::Debug for ProgressiveRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressiveRenderer")
            .field("tasks", &self.tasks.len())
            .field("cursor", &self.cursor)
            .field("chunk_size", &self.chunk_size)
            .finish()
    }
}
