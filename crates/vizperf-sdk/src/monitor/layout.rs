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

//! Text layouts for the status surface.

use super::config::{DisplayMode, MonitorConfig};
use super::sparkline::sparkline;
use super::MonitorSnapshot;
use std::fmt::Write;

/// Recent warnings listed by the detailed and dashboard layouts.
const MAX_LISTED_WARNINGS: usize = 5;

pub(crate) struct Graphs<'a> {
    pub fps: &'a [f64],
    pub memory: &'a [f64],
}

pub(crate) fn render(
    snapshot: &MonitorSnapshot,
    graphs: &Graphs<'_>,
    config: &MonitorConfig,
) -> String {
    match config.display_mode {
        DisplayMode::Compact => compact(snapshot),
        DisplayMode::Detailed => detailed(snapshot, graphs, config, false),
        DisplayMode::Dashboard => detailed(snapshot, graphs, config, true),
        DisplayMode::Overlay => overlay(snapshot, graphs, config),
    }
}

fn quality_label(snapshot: &MonitorSnapshot) -> &'static str {
    snapshot.quality.map(|q| q.as_str()).unwrap_or("n/a")
}

fn compact(s: &MonitorSnapshot) -> String {
    format!(
        "FPS {:.1} | {:.2} ms | {:.0} MB | {} nodes | {}",
        s.fps,
        s.frame_time,
        s.memory_usage,
        s.node_count,
        quality_label(s)
    )
}

fn overlay(s: &MonitorSnapshot, graphs: &Graphs<'_>, config: &MonitorConfig) -> String {
    let mut out = format!("[{}]\n{}", config.position, compact(s));
    if config.show_fps_graph {
        let _ = write!(out, "\n{}", sparkline(graphs.fps, config.graph_history_length));
    }
    out
}

fn detailed(
    s: &MonitorSnapshot,
    graphs: &Graphs<'_>,
    config: &MonitorConfig,
    full: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "FPS: {:.1} ({:.2} ms)", s.fps, s.frame_time);
    let _ = writeln!(out, "Memory: {:.1} MB", s.memory_usage);
    let _ = writeln!(out, "Scene: {} nodes, {} edges", s.node_count, s.edge_count);
    let _ = writeln!(out, "Quality: {}", quality_label(s));
    let _ = writeln!(
        out,
        "Optimizer: {} | culled {} nodes, {} edges | {} batches | {} layers",
        s.stats.strategy,
        s.stats.culled_nodes,
        s.stats.culled_edges,
        s.stats.batch_count,
        s.stats.layer_count
    );

    if config.show_fps_graph {
        let _ = writeln!(out, "FPS    {}", sparkline(graphs.fps, config.graph_history_length));
    }
    if config.show_memory_graph {
        let _ = writeln!(
            out,
            "Memory {}",
            sparkline(graphs.memory, config.graph_history_length)
        );
    }

    if config.show_warnings && !s.warnings.is_empty() {
        let _ = writeln!(out, "Warnings:");
        let skip = s.warnings.len().saturating_sub(MAX_LISTED_WARNINGS);
        for warning in s.warnings.iter().skip(skip) {
            let _ = writeln!(out, "  {}", warning);
        }
    }

    if full && config.show_recommendations && !s.recommendations.is_empty() {
        let _ = writeln!(out, "Recommendations:");
        for rec in &s.recommendations {
            let _ = writeln!(out, "  - {}", rec);
        }
    }

    out.truncate(out.trim_end().len());
    out
}
