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

//! Immutable performance snapshots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of the rendering state taken on the profiler's sampling cadence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSample {
    /// Clock time at which the sample was taken, in milliseconds.
    pub timestamp: f64,
    /// Frames per second averaged over the last full second.
    pub fps: f64,
    /// Rolling average frame time in milliseconds.
    pub frame_time: f64,
    /// Heap usage in megabytes, zero when unavailable.
    pub memory_usage: f64,
    /// Scene node count as last reported by the renderer.
    pub node_count: i64,
    /// Scene edge count as last reported by the renderer.
    pub edge_count: i64,
    /// Named custom telemetry merged into the sample.
    #[serde(default)]
    pub custom_metrics: BTreeMap<String, f64>,
}
