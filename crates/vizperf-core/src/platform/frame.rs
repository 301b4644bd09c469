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

//! The frame-synchronised callback primitive.

use std::fmt::Debug;

/// Identifies a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// A callback invoked once on the next display refresh with the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64) + Send + 'static>;

/// Schedules callbacks on the next display refresh.
///
/// Implementations must never invoke a callback from inside `request_frame`.
pub trait FrameScheduler: Send + Sync + Debug {
    /// Queues a callback for the next frame.
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Cancels a pending callback. Unknown or already-fired handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}
