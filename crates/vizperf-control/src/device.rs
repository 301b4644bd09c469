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

//! Device capability scoring.
//!
//! Each signal contributes to a 0..=7 score:
//!
//! | Signal | Points |
//! |--------|--------|
//! | 3D context | 1 (webgl) or 2 (webgl2) |
//! | pixel ratio >= 2 | 1 |
//! | logical cores | 1 (>= 4) or 2 (>= 8) |
//! | heap ceiling | 1 (>= 1 GiB) or 2 (>= 2 GiB) |

use vizperf_core::control::QualityLevel;
use vizperf_core::platform::DeviceProfile;

/// Highest attainable score.
pub const MAX_SCORE: u8 = 7;

const HIGH_DENSITY_PIXEL_RATIO: f64 = 2.0;
const MANY_CORES: usize = 8;
const SOME_CORES: usize = 4;
const LARGE_HEAP_MB: f64 = 2048.0;
const MEDIUM_HEAP_MB: f64 = 1024.0;

/// Scores a device. `heap_limit_mb` overrides the profile's own ceiling when the
/// profile does not know it.
pub fn score(device: Option<&dyn DeviceProfile>, heap_limit_mb: Option<f64>) -> u8 {
    let mut score = 0;

    if let Some(device) = device {
        if device.supports_webgl2() {
            score += 2;
        } else if device.supports_webgl() {
            score += 1;
        }

        if device.pixel_ratio() >= HIGH_DENSITY_PIXEL_RATIO {
            score += 1;
        }

        let cores = device.logical_cores();
        if cores >= MANY_CORES {
            score += 2;
        } else if cores >= SOME_CORES {
            score += 1;
        }
    }

    let heap = device.and_then(|d| d.heap_limit_mb()).or(heap_limit_mb);
    match heap {
        Some(mb) if mb >= LARGE_HEAP_MB => score += 2,
        Some(mb) if mb >= MEDIUM_HEAP_MB => score += 1,
        _ => {}
    }

    score.min(MAX_SCORE)
}

/// Maps a score to a quality tier.
pub fn level_for_score(score: u8) -> QualityLevel {
    match score {
        6.. => QualityLevel::Ultra,
        4..=5 => QualityLevel::High,
        2..=3 => QualityLevel::Medium,
        _ => QualityLevel::Low,
    }
}
