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

//! Pooled frame requests.
//!
//! Every request made through the pool is tracked until it fires or is
//! cancelled, so [`FramePool::cancel_all`] can tear everything down. With
//! coalescing on, all callbacks requested before the next refresh share one
//! platform request and run in request order.

use ahash::AHashMap;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use vizperf_core::platform::{FrameCallback, FrameHandle, FrameScheduler};

/// Identifies a request made through a [`FramePool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRequestId(pub u64);

#[derive(Default)]
struct PoolState {
    next_id: u64,
    /// Callbacks waiting on the shared request, when coalescing.
    queued: BTreeMap<u64, FrameCallback>,
    shared_handle: Option<FrameHandle>,
    /// One platform request per callback, when not coalescing.
    direct: AHashMap<u64, FrameHandle>,
}

impl PoolState {
    fn pending(&self) -> usize {
        self.queued.len() + self.direct.len()
    }
}

/// Tracks the frame requests of one owner.
pub struct FramePool {
    scheduler: Option<Arc<dyn FrameScheduler>>,
    coalesce: bool,
    state: Arc<Mutex<PoolState>>,
}

impl std::fmt::Debug for FramePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramePool")
            .field("available", &self.scheduler.is_some())
            .field("coalesce", &self.coalesce)
            .field("pending", &self.pending())
            .finish()
    }
}

fn lock(state: &Mutex<PoolState>) -> MutexGuard<'_, PoolState> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl FramePool {
    /// Creates a pool. Without a scheduler every request is skipped.
    pub fn new(scheduler: Option<Arc<dyn FrameScheduler>>, coalesce: bool) -> Self {
        Self {
            scheduler,
            coalesce,
            state: Arc::new(Mutex::new(PoolState::default())),
        }
    }

    /// Requests `callback` on the next frame.
    ///
    /// Returns `None` when the platform has no frame scheduler.
    pub fn request<F>(&self, callback: F) -> Option<FrameRequestId>
    where
        F: FnOnce(f64) + Send + 'static,
    {
        let scheduler = self.scheduler.as_ref()?;
        let mut state = lock(&self.state);
        let id = state.next_id;
        state.next_id += 1;

        if self.coalesce {
            state.queued.insert(id, Box::new(callback));
            if state.shared_handle.is_none() {
                let shared = Arc::clone(&self.state);
                let handle = scheduler.request_frame(Box::new(move |timestamp| {
                    let ready = {
                        let mut state = lock(&shared);
                        state.shared_handle = None;
                        std::mem::take(&mut state.queued)
                    };
                    for (_, callback) in ready {
                        callback(timestamp);
                    }
                }));
                state.shared_handle = Some(handle);
            }
        } else {
            let shared = Arc::clone(&self.state);
            let handle = scheduler.request_frame(Box::new(move |timestamp| {
                lock(&shared).direct.remove(&id);
                callback(timestamp);
            }));
            state.direct.insert(id, handle);
        }
        Some(FrameRequestId(id))
    }

    /// Cancels one request. Unknown or already-fired ids are ignored.
    pub fn cancel(&self, id: FrameRequestId) {
        let Some(scheduler) = self.scheduler.as_ref() else {
            return;
        };
        let mut state = lock(&self.state);
        if let Some(handle) = state.direct.remove(&id.0) {
            scheduler.cancel_frame(handle);
            return;
        }
        if state.queued.remove(&id.0).is_some() && state.queued.is_empty() {
            if let Some(handle) = state.shared_handle.take() {
                scheduler.cancel_frame(handle);
            }
        }
    }

    /// Cancels every outstanding request.
    pub fn cancel_all(&self) {
        let Some(scheduler) = self.scheduler.as_ref() else {
            return;
        };
        let mut state = lock(&self.state);
        for (_, handle) in state.direct.drain() {
            scheduler.cancel_frame(handle);
        }
        state.queued.clear();
        if let Some(handle) = state.shared_handle.take() {
            scheduler.cancel_frame(handle);
        }
    }

    /// Number of requests that have neither fired nor been cancelled.
    pub fn pending(&self) -> usize {
        lock(&self.state).pending()
    }
}

impl Drop for FramePool {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
