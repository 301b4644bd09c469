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

//! Adaptive quality configuration.

use serde::{Deserialize, Serialize};
use vizperf_core::control::QualityLevel;

/// Configuration for [`AdaptiveQuality`](crate::AdaptiveQuality).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QualityConfig {
    /// When false, `start()` does nothing and ticks never evaluate.
    pub enabled: bool,
    /// The frame rate the controller steers towards.
    pub target_fps: f64,
    /// Dead band around `target_fps` inside which the level is held.
    pub fps_tolerance: f64,
    /// Milliseconds between two evaluations.
    pub adjustment_interval: f64,
    /// Step down when the average falls below the dead band.
    pub auto_downgrade: bool,
    /// Step up when the average rises above the dead band.
    pub auto_upgrade: bool,
    /// Lowest level the controller may select.
    pub min_quality: QualityLevel,
    /// Highest level the controller may select.
    pub max_quality: QualityLevel,
    /// Level applied at construction, clamped to the band.
    pub initial_quality: QualityLevel,
    /// Spread queued render work across frames.
    pub progressive_rendering: bool,
    /// Work items run per progressive chunk.
    pub progressive_chunk_size: usize,
    /// Evaluations averaged before any decision.
    pub fps_window_size: usize,
    /// Capacity of each change subscriber's channel.
    pub event_buffer_size: usize,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            target_fps: 60.0,
            fps_tolerance: 5.0,
            adjustment_interval: 2000.0,
            auto_downgrade: true,
            auto_upgrade: true,
            min_quality: QualityLevel::Low,
            max_quality: QualityLevel::Ultra,
            initial_quality: QualityLevel::High,
            progressive_rendering: false,
            progressive_chunk_size: 50,
            fps_window_size: 5,
            event_buffer_size: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_deserialize_from_names() {
        let config: QualityConfig = serde_json::from_str(
            r#"{"minQuality": "medium", "maxQuality": "high", "fpsTolerance": 2.5}"#,
        )
        .unwrap();
        assert_eq!(config.min_quality, QualityLevel::Medium);
        assert_eq!(config.max_quality, QualityLevel::High);
        assert_eq!(config.fps_tolerance, 2.5);
        assert_eq!(config.fps_window_size, 5);
    }
}
