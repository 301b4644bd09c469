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

//! Profiler configuration.

use serde::{Deserialize, Serialize};

/// The limits a running visualization is measured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PerformanceThresholds {
    /// The frame rate the renderer aims for.
    pub target_fps: f64,
    /// Below this frame rate a `warning` is raised.
    pub warning_fps: f64,
    /// Below this frame rate a `critical` warning is raised.
    pub critical_fps: f64,
    /// Longest acceptable frame, in milliseconds.
    pub max_frame_time: f64,
    /// Heap ceiling in megabytes.
    pub max_memory_usage: f64,
}

impl Default for PerformanceThresholds {
    fn default() -> Self {
        Self {
            target_fps: 60.0,
            warning_fps: 30.0,
            critical_fps: 15.0,
            max_frame_time: 33.33,
            max_memory_usage: 512.0,
        }
    }
}

/// Configuration for the [`Profiler`](crate::Profiler).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfilerConfig {
    /// When false, `start()` does nothing.
    pub enabled: bool,
    /// Milliseconds between two samples.
    pub sample_interval: f64,
    /// Number of samples retained; the oldest are dropped first.
    pub max_samples: usize,
    /// Alerting limits.
    pub thresholds: PerformanceThresholds,
    /// Query the platform heap usage for each sample.
    pub enable_memory_profiling: bool,
    /// Surface new warnings at `warn`/`error` level instead of `debug`.
    pub enable_logging: bool,
    /// Number of recent frame times averaged into the rolling frame time.
    pub frame_window: usize,
    /// Number of warnings retained; the oldest are dropped first.
    pub max_warnings: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sample_interval: 1000.0,
            max_samples: 300,
            thresholds: PerformanceThresholds::default(),
            enable_memory_profiling: true,
            enable_logging: false,
            frame_window: 60,
            max_warnings: 100,
        }
    }
}
