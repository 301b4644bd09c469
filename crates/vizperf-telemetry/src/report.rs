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

//! Report generation from the retained sample history.
//!
//! `summarize` computes the aggregate statistics and `recommend` runs a fixed
//! list of rules over them. Rules fire at fixed numeric cutoffs and each
//! recommendation appears at most once.

use crate::config::PerformanceThresholds;
use vizperf_core::telemetry::{PerformanceSample, ReportSummary};

/// Node count above which virtual scrolling is recommended.
const LARGE_NODE_COUNT: i64 = 1_000;
/// Node count above which GPU rendering is recommended.
const HUGE_NODE_COUNT: i64 = 5_000;
/// Edge count above which edge culling and bundling are recommended.
const LARGE_EDGE_COUNT: i64 = 2_000;
/// Fraction of the heap ceiling above which memory is considered under pressure.
const MEMORY_PRESSURE_RATIO: f64 = 0.8;
/// Ratio of max to average frame time indicating stutter.
const STUTTER_RATIO: f64 = 2.0;

/// Computes summary statistics, or `None` for an empty history.
pub fn summarize(samples: &[PerformanceSample]) -> Option<ReportSummary> {
    if samples.is_empty() {
        return None;
    }
    let n = samples.len() as f64;

    let mut fps: Vec<f64> = samples.iter().map(|s| s.fps).collect();
    fps.sort_by(|a, b| a.total_cmp(b));

    let sum = |f: fn(&PerformanceSample) -> f64| samples.iter().map(f).sum::<f64>();
    let max = |f: fn(&PerformanceSample) -> f64| samples.iter().map(f).fold(f64::MIN, f64::max);

    Some(ReportSummary {
        avg_fps: fps.iter().sum::<f64>() / n,
        min_fps: fps[0],
        max_fps: fps[fps.len() - 1],
        worst_5_percent_fps: fps[worst_tail_index(fps.len(), 0.05)],
        worst_1_percent_fps: fps[worst_tail_index(fps.len(), 0.01)],
        avg_frame_time: sum(|s| s.frame_time) / n,
        max_frame_time: max(|s| s.frame_time),
        avg_memory_usage: sum(|s| s.memory_usage) / n,
        max_memory_usage: max(|s| s.memory_usage),
    })
}

/// Index of the low-tail percentile in an ascending sort of `len` values.
fn worst_tail_index(len: usize, fraction: f64) -> usize {
    ((len as f64 * fraction).floor() as usize).min(len.saturating_sub(1))
}

/// Produces de-duplicated recommendations for the given history.
pub fn recommend(
    summary: &ReportSummary,
    samples: &[PerformanceSample],
    thresholds: &PerformanceThresholds,
) -> Vec<String> {
    let mut recommendations = Vec::new();
    let mut add = |text: String| {
        if !recommendations.contains(&text) {
            recommendations.push(text);
        }
    };

    if summary.avg_fps < thresholds.target_fps {
        add(format!(
            "Average FPS ({:.1}) is below target ({:.0}): lower the quality level or enable viewport culling",
            summary.avg_fps, thresholds.target_fps
        ));
    }
    if summary.worst_1_percent_fps < thresholds.critical_fps {
        add(
            "Severe frame drops detected: enable progressive rendering for large updates"
                .to_string(),
        );
    }
    if summary.max_frame_time > thresholds.max_frame_time {
        add(format!(
            "Frame time peaked at {:.1}ms (limit {:.1}ms): batch rendering work across frames",
            summary.max_frame_time, thresholds.max_frame_time
        ));
    }
    if summary.avg_frame_time > 0.0
        && summary.max_frame_time > summary.avg_frame_time * STUTTER_RATIO
    {
        add("Inconsistent frame times detected: enable dirty rectangle rendering".to_string());
    }
    if summary.max_memory_usage > thresholds.max_memory_usage * MEMORY_PRESSURE_RATIO {
        add(format!(
            "Memory usage peaked at {:.0}MB: reduce cached render layers or texture scale",
            summary.max_memory_usage
        ));
    }

    let max_nodes = samples.iter().map(|s| s.node_count).max().unwrap_or(0);
    let max_edges = samples.iter().map(|s| s.edge_count).max().unwrap_or(0);
    if max_nodes > LARGE_NODE_COUNT {
        add("Large node count: enable virtual scrolling".to_string());
    }
    if max_nodes > HUGE_NODE_COUNT {
        add("Very large node count: switch to the WebGL or hybrid render strategy".to_string());
    }
    if max_edges > LARGE_EDGE_COUNT {
        add("Large edge count: cull edges outside the viewport and reduce edge detail".to_string());
    }

    recommendations
}
