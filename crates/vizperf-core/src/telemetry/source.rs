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

//! The read-only seam between the profiler and its consumers.

/// Live frame-rate figures, as read by the adaptive quality controller.
pub trait FrameMetricsSource {
    /// Frames per second averaged over the last full second of wall-clock time.
    fn current_fps(&self) -> f64;

    /// Rolling average frame time in milliseconds.
    fn average_frame_time(&self) -> f64;
}

/// A fixed reading, useful for hosts that measure frame rate themselves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedFrameMetrics {
    /// Reported fps.
    pub fps: f64,
    /// Reported frame time in milliseconds.
    pub frame_time: f64,
}

impl FixedFrameMetrics {
    /// A reading consistent with the given fps.
    pub fn from_fps(fps: f64) -> Self {
        let frame_time = if fps > 0.0 { 1000.0 / fps } else { 0.0 };
        Self { fps, frame_time }
    }
}

impl FrameMetricsSource for FixedFrameMetrics {
    fn current_fps(&self) -> f64 {
        self.fps
    }

    fn average_frame_time(&self) -> f64 {
        self.frame_time
    }
}
