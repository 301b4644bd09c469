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

//! The exported performance report.
//!
//! The JSON shape of [`PerformanceReport`] is a contract with external
//! dashboards: top-level `timestamp`, `duration`, `summary`, `samples`,
//! `warnings` and `recommendations`, with camelCase summary fields.

use super::{PerformanceSample, PerformanceWarning};
use serde::{Deserialize, Serialize};

/// Aggregate statistics over all retained samples.
///
/// The two tail fields hold the *worst* 5% and 1% fps values (ascending sort,
/// indexed at `floor(n * 0.05)` and `floor(n * 0.01)`). Lower fps is worse, so
/// these are low percentiles; they keep the `p95Fps` / `p99Fps` names on the
/// wire for compatibility with existing consumers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Mean fps.
    pub avg_fps: f64,
    /// Lowest observed fps.
    pub min_fps: f64,
    /// Highest observed fps.
    pub max_fps: f64,
    /// Fps at the 5th percentile from the bottom.
    #[serde(rename = "p95Fps")]
    pub worst_5_percent_fps: f64,
    /// Fps at the 1st percentile from the bottom.
    #[serde(rename = "p99Fps")]
    pub worst_1_percent_fps: f64,
    /// Mean of the sampled rolling frame times, in milliseconds.
    pub avg_frame_time: f64,
    /// Largest sampled rolling frame time, in milliseconds.
    pub max_frame_time: f64,
    /// Mean heap usage in megabytes.
    pub avg_memory_usage: f64,
    /// Peak heap usage in megabytes.
    pub max_memory_usage: f64,
}

/// A full statistical report over the profiler's retained history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    /// Clock time at which the report was generated, in milliseconds.
    pub timestamp: f64,
    /// Length of the profiling session covered, in milliseconds.
    pub duration: f64,
    /// Aggregate statistics.
    pub summary: ReportSummary,
    /// All retained samples, oldest first.
    pub samples: Vec<PerformanceSample>,
    /// All retained warnings, oldest first.
    pub warnings: Vec<PerformanceWarning>,
    /// De-duplicated, rule-based recommendations.
    pub recommendations: Vec<String>,
}
