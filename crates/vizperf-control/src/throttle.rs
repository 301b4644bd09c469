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

//! Frame throttling advice.

/// Frame time over target above which throttling is advised.
pub const THROTTLE_RATIO: f64 = 1.5;

/// Milliseconds a caller could wait before the next frame.
///
/// Zero unless `frame_time` exceeds `THROTTLE_RATIO` times the target frame time.
pub fn delay(frame_time: f64, target_fps: f64) -> f64 {
    if target_fps <= 0.0 || !frame_time.is_finite() {
        return 0.0;
    }
    let target = 1000.0 / target_fps;
    if frame_time > target * THROTTLE_RATIO {
        (frame_time - target).max(0.0)
    } else {
        0.0
    }
}
