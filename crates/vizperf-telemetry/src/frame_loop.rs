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

//! A self-rescheduling frame counter on top of the platform frame scheduler.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use vizperf_core::platform::{FrameHandle, FrameScheduler};

#[derive(Debug, Default)]
struct Shared {
    active: AtomicBool,
    frames: AtomicU64,
    pending: Mutex<Option<FrameHandle>>,
}

/// Counts display refreshes by keeping one frame request in flight.
///
/// Each callback increments the counter and requests the next frame. The
/// counter is drained by the owner on its own cadence. Dropping or stopping
/// the loop cancels the pending request.
#[derive(Debug)]
pub struct FrameLoop {
    scheduler: Arc<dyn FrameScheduler>,
    shared: Arc<Shared>,
}

impl FrameLoop {
    /// Creates an inactive loop on the given scheduler.
    pub fn new(scheduler: Arc<dyn FrameScheduler>) -> Self {
        Self {
            scheduler,
            shared: Arc::new(Shared::default()),
        }
    }

    /// Starts counting. Does nothing if already running.
    pub fn start(&self) {
        if self.shared.active.swap(true, Ordering::SeqCst) {
            return;
        }
        self.shared.frames.store(0, Ordering::SeqCst);
        schedule(&self.scheduler, &self.shared);
    }

    /// Stops counting and cancels the in-flight request.
    pub fn stop(&self) {
        if !self.shared.active.swap(false, Ordering::SeqCst) {
            return;
        }
        let pending = match self.shared.pending.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = pending {
            self.scheduler.cancel_frame(handle);
        }
    }

    /// Returns the frames counted since the last call and resets the counter.
    pub fn take_frames(&self) -> u64 {
        self.shared.frames.swap(0, Ordering::SeqCst)
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule(scheduler: &Arc<dyn FrameScheduler>, shared: &Arc<Shared>) {
    if !shared.active.load(Ordering::SeqCst) {
        return;
    }
    let next_scheduler = Arc::clone(scheduler);
    let next_shared = Arc::clone(shared);
    let handle = scheduler.request_frame(Box::new(move |_timestamp| {
        if !next_shared.active.load(Ordering::SeqCst) {
            return;
        }
        next_shared.frames.fetch_add(1, Ordering::SeqCst);
        schedule(&next_scheduler, &next_shared);
    }));
    match shared.pending.lock() {
        Ok(mut guard) => *guard = Some(handle),
        Err(poisoned) => *poisoned.into_inner() = Some(handle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use vizperf_core::platform::FrameCallback;

    #[derive(Default)]
    struct TestScheduler {
        next_id: AtomicU64,
        queue: Mutex<BTreeMap<FrameHandle, FrameCallback>>,
    }

    impl std::fmt::Debug for TestScheduler {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("TestScheduler")
                .field("pending", &self.pending())
                .finish()
        }
    }

    impl TestScheduler {
        fn pump(&self, timestamp: f64) {
            let ready = std::mem::take(&mut *self.queue.lock().unwrap());
            for (_, callback) in ready {
                callback(timestamp);
            }
        }

        fn pending(&self) -> usize {
            self.queue.lock().unwrap().len()
        }
    }

    impl FrameScheduler for TestScheduler {
        fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
            let handle = FrameHandle(self.next_id.fetch_add(1, Ordering::SeqCst));
            self.queue.lock().unwrap().insert(handle, callback);
            handle
        }

        fn cancel_frame(&self, handle: FrameHandle) {
            self.queue.lock().unwrap().remove(&handle);
        }
    }

    #[test]
    fn test_counts_frames_until_stopped() {
        let scheduler = Arc::new(TestScheduler::default());
        let frame_loop = FrameLoop::new(scheduler.clone());
        frame_loop.start();
        for i in 0..5 {
            scheduler.pump(i as f64 * 16.0);
        }
        assert_eq!(frame_loop.take_frames(), 5);
        assert_eq!(frame_loop.take_frames(), 0);

        frame_loop.stop();
        assert_eq!(scheduler.pending(), 0);
        scheduler.pump(100.0);
        assert_eq!(frame_loop.take_frames(), 0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let scheduler = Arc::new(TestScheduler::default());
        let frame_loop = FrameLoop::new(scheduler.clone());
        frame_loop.start();
        frame_loop.start();
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_debug_reports_in_flight_request() {
        let scheduler = Arc::new(TestScheduler::default());
        let frame_loop = FrameLoop::new(scheduler.clone());
        frame_loop.start();
        let rendered = format!("{frame_loop:?}");
        assert!(rendered.contains("TestScheduler { pending: 1 }"));
    }

    #[test]
    fn test_drop_cancels_pending_request() {
        let scheduler = Arc::new(TestScheduler::default());
        {
            let frame_loop = FrameLoop::new(scheduler.clone());
            frame_loop.start();
        }
        assert_eq!(scheduler.pending(), 0);
    }
}
