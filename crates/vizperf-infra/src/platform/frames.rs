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

//! A frame scheduler driven by the host's refresh loop.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use vizperf_core::platform::{FrameCallback, FrameHandle, FrameScheduler};

/// Queues frame callbacks until the host calls [`pump`](Self::pump).
///
/// Callbacks run in request order. A callback that requests another frame
/// while being pumped is queued for the next pump.
#[derive(Default)]
pub struct QueuedFrameScheduler {
    next_handle: AtomicU64,
    queue: Mutex<BTreeMap<FrameHandle, FrameCallback>>,
}

impl std::fmt::Debug for QueuedFrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedFrameScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

impl QueuedFrameScheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self) -> MutexGuard<'_, BTreeMap<FrameHandle, FrameCallback>> {
        match self.queue.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Runs every callback queued before this call. Returns how many ran.
    pub fn pump(&self, timestamp_ms: f64) -> usize {
        let ready = std::mem::take(&mut *self.queue());
        let count = ready.len();
        for (_, callback) in ready {
            callback(timestamp_ms);
        }
        if count > 0 {
            log::trace!("Frame scheduler: ran {count} callbacks at {timestamp_ms:.1}ms");
        }
        count
    }

    /// Number of queued callbacks.
    pub fn pending(&self) -> usize {
        self.queue().len()
    }
}

impl FrameScheduler for QueuedFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        self.queue().insert(handle, callback);
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        // Drop the callback outside the lock.
        let removed = self.queue().remove(&handle);
        drop(removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_pump_runs_in_request_order() {
        let scheduler = QueuedFrameScheduler::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for tag in 0..3 {
            let seen = Arc::clone(&seen);
            scheduler.request_frame(Box::new(move |ts| seen.lock().unwrap().push((tag, ts))));
        }
        assert_eq!(scheduler.pump(16.0), 3);
        assert_eq!(*seen.lock().unwrap(), vec![(0, 16.0), (1, 16.0), (2, 16.0)]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_cancelled_callback_never_runs() {
        let scheduler = QueuedFrameScheduler::new();
        let handle = scheduler.request_frame(Box::new(|_| panic!("cancelled callback ran")));
        scheduler.cancel_frame(handle);
        assert_eq!(scheduler.pump(0.0), 0);
    }

    #[test]
    fn test_requests_made_while_pumping_wait_for_next_pump() {
        let scheduler = Arc::new(QueuedFrameScheduler::new());
        let inner = Arc::clone(&scheduler);
        scheduler.request_frame(Box::new(move |_| {
            inner.request_frame(Box::new(|_| {}));
        }));
        assert_eq!(scheduler.pump(0.0), 1);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.pump(16.0), 1);
        assert_eq!(scheduler.pending(), 0);
    }
}
