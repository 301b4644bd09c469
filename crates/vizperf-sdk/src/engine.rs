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

//! The engine orchestrator.

use crate::config::EngineConfig;
use crate::monitor::{DashboardInputs, KeyChord, MonitorAction, PerformanceMonitor};
use anyhow::{Context, Result};
use vizperf_control::AdaptiveQuality;
use vizperf_core::graph::{VisualEdge, VisualNode};
use vizperf_core::math::Aabb;
use vizperf_core::platform::Platform;
use vizperf_core::Stopwatch;
use vizperf_lanes::{index_nodes, RenderBatch, RenderOptimizer};
use vizperf_telemetry::Profiler;

/// What one [`VizPerf::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The profiler collected a sample.
    pub sampled: bool,
    /// The quality level changed.
    pub quality_changed: bool,
    /// The dashboard refreshed.
    pub dashboard_updated: bool,
}

/// The output of one cull-then-batch pass.
#[derive(Debug)]
pub struct RenderPass<'a, T = ()> {
    /// Batches to draw, in input order.
    pub batches: Vec<RenderBatch<'a, T>>,
    /// Nodes that survived culling.
    pub visible_nodes: usize,
    /// Edges that survived culling.
    pub visible_edges: usize,
    /// Wall-clock time spent culling and batching, in milliseconds.
    pub elapsed_ms: f64,
}

/// Owns the profiler, optimizer, quality controller and dashboard, and
/// drives them in a fixed order.
///
/// Call [`tick`](Self::tick) once per frame. Within a tick the profiler runs
/// first, so the quality controller and the dashboard always read this
/// frame's figures.
#[derive(Debug)]
pub struct VizPerf {
    platform: Platform,
    profiler: Profiler,
    optimizer: RenderOptimizer,
    quality: AdaptiveQuality,
    monitor: PerformanceMonitor,
}

impl VizPerf {
    /// Builds every component over the same platform.
    pub fn new(config: EngineConfig, platform: Platform) -> Self {
        let EngineConfig {
            profiler,
            optimizer,
            quality,
            monitor,
        } = config;
        Self {
            profiler: Profiler::new(profiler, platform.clone()),
            optimizer: RenderOptimizer::new(optimizer, platform.clone()),
            quality: AdaptiveQuality::new(quality, platform.clone()),
            monitor: PerformanceMonitor::new(monitor, platform.clone()),
            platform,
        }
    }

    /// Builds with default configuration on a headless platform.
    pub fn headless() -> Self {
        Self::new(EngineConfig::default(), Platform::headless())
    }

    /// The shared platform.
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    // --- Lifecycle ---

    /// Starts the profiler, the quality controller and the dashboard.
    pub fn start(&mut self) {
        self.profiler.start();
        self.quality.start();
        self.monitor.start();
        log::info!("VizPerf: started");
    }

    /// Stops every periodic task. Accumulated state is kept.
    pub fn stop(&mut self) {
        self.monitor.stop();
        self.quality.stop();
        self.profiler.stop();
        log::info!("VizPerf: stopped");
    }

    /// Stops everything and releases layers, dirty state and pending frame requests.
    pub fn destroy(&mut self) {
        self.stop();
        self.monitor.destroy();
        self.optimizer.destroy();
        log::info!("VizPerf: destroyed");
    }

    /// Drives every component. Call once per frame.
    pub fn tick(&mut self) -> TickOutcome {
        let sampled = self.profiler.tick();
        let quality_changed = self.quality.tick(&self.profiler);
        let dashboard_updated = self.monitor.tick(DashboardInputs {
            profiler: &self.profiler,
            optimizer: &self.optimizer,
            quality: Some(&self.quality),
        });
        TickOutcome {
            sampled,
            quality_changed,
            dashboard_updated,
        }
    }

    // --- Frames ---

    /// Marks the start of a rendered frame.
    pub fn begin_frame(&mut self) {
        self.profiler.mark_frame_start();
    }

    /// Marks the end of a rendered frame.
    pub fn end_frame(&mut self) {
        self.profiler.mark_frame_end();
    }

    /// Culls nodes and edges against `viewport`, batches the survivors and
    /// reports the scene size to the profiler.
    ///
    /// Edge endpoints are resolved against the full node set, so an edge
    /// between an on-screen and an off-screen node is kept.
    pub fn render_pass<'a, T>(
        &mut self,
        nodes: &'a [VisualNode<T>],
        edges: &'a [VisualEdge],
        viewport: &Aabb,
    ) -> RenderPass<'a, T> {
        let stopwatch = Stopwatch::new();

        let visible_nodes = self.optimizer.cull_nodes(nodes, viewport);
        let index = index_nodes(nodes);
        let visible_edges = self.optimizer.cull_edges(edges, &index, viewport);
        let (node_count, edge_count) = (visible_nodes.len(), visible_edges.len());
        let batches = self.optimizer.create_batches(visible_nodes, visible_edges);

        self.profiler
            .update_counts(count(nodes.len()), count(edges.len()));

        RenderPass {
            batches,
            visible_nodes: node_count,
            visible_edges: edge_count,
            elapsed_ms: stopwatch.elapsed_ms_f64(),
        }
    }

    // --- Dashboard ---

    /// Routes a key chord to the dashboard, applying a reset if requested.
    pub fn handle_key(&mut self, chord: KeyChord) -> Option<MonitorAction> {
        let action = self.monitor.handle_key(chord)?;
        if action == MonitorAction::Reset {
            self.reset();
        }
        Some(action)
    }

    /// Clears profiler history and optimizer counters.
    pub fn reset(&mut self) {
        self.monitor.reset(&mut self.profiler, &mut self.optimizer);
        self.quality.reset();
    }

    /// The rendered dashboard, if visible.
    pub fn render_dashboard(&self) -> Option<&str> {
        self.monitor.render()
    }

    /// The full JSON report.
    pub fn export_report(&self) -> Result<String> {
        self.monitor
            .export_report(DashboardInputs {
                profiler: &self.profiler,
                optimizer: &self.optimizer,
                quality: Some(&self.quality),
            })
            .context("VizPerf report export failed")
    }

    // --- Components ---

    /// The profiler.
    pub fn profiler(&self) -> &Profiler {
        &self.profiler
    }

    /// The profiler, mutably.
    pub fn profiler_mut(&mut self) -> &mut Profiler {
        &mut self.profiler
    }

    /// The optimizer.
    pub fn optimizer(&self) -> &RenderOptimizer {
        &self.optimizer
    }

    /// The optimizer, mutably.
    pub fn optimizer_mut(&mut self) -> &mut RenderOptimizer {
        &mut self.optimizer
    }

    /// The quality controller.
    pub fn quality(&self) -> &AdaptiveQuality {
        &self.quality
    }

    /// The quality controller, mutably.
    pub fn quality_mut(&mut self) -> &mut AdaptiveQuality {
        &mut self.quality
    }

    /// The dashboard.
    pub fn monitor(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    /// The dashboard, mutably.
    pub fn monitor_mut(&mut self) -> &mut PerformanceMonitor {
        &mut self.monitor
    }
}

fn count(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vizperf_core::control::QualityLevel;
    use vizperf_core::math::{Vec2, Vec3};
    use vizperf_core::platform::ManualClock;

    fn engine() -> (VizPerf, ManualClock) {
        let clock = ManualClock::new();
        let platform = Platform::with_clock(Arc::new(clock.clone()));
        (VizPerf::new(EngineConfig::default(), platform), clock)
    }

    #[test]
    fn test_tick_order_feeds_quality_from_profiler() {
        let (mut vp, clock) = engine();
        vp.start();
        let mut changes = 0;
        for _ in 0..600 {
            vp.begin_frame();
            clock.advance(25.0);
            vp.end_frame();
            if vp.tick().quality_changed {
                changes += 1;
            }
        }
        // 15 s at 40 fps: one full window, one step down.
        assert_eq!(changes, 1);
        assert_eq!(vp.quality().current_quality(), QualityLevel::Medium);
        assert!(vp.render_dashboard().unwrap().ends_with("medium"));
    }

    #[test]
    fn test_render_pass_keeps_cross_viewport_edges() {
        let (mut vp, _) = engine();
        let nodes = vec![
            VisualNode::new("a", (), Vec3::new(10.0, 10.0, 0.0)),
            VisualNode::new("b", (), Vec3::new(5_000.0, 10.0, 0.0)),
        ];
        let edges = vec![VisualEdge::new("ab", "a", "b"), VisualEdge::new("ax", "a", "x")];
        let viewport = Aabb::from_min_max(Vec2::ZERO, Vec2::new(100.0, 100.0));

        let pass = vp.render_pass(&nodes, &edges, &viewport);
        assert_eq!(pass.visible_nodes, 1);
        assert_eq!(pass.visible_edges, 1);
        assert_eq!(pass.batches.len(), 1);
        assert_eq!(pass.batches[0].edges[0].id, "ab");
        assert_eq!(vp.profiler().counts(), (2, 2));
    }

    #[test]
    fn test_reset_shortcut() {
        let (mut vp, clock) = engine();
        vp.start();
        for _ in 0..100 {
            vp.begin_frame();
            clock.advance(20.0);
            vp.end_frame();
            vp.tick();
        }
        assert!(!vp.profiler().samples().is_empty());
        assert_eq!(
            vp.handle_key(KeyChord::ctrl_shift('R')),
            Some(MonitorAction::Reset)
        );
        assert!(vp.profiler().samples().is_empty());
    }

    #[test]
    fn test_destroy_cancels_everything() {
        let (mut vp, clock) = engine();
        vp.start();
        vp.destroy();
        assert!(!vp.profiler().is_running());
        assert!(!vp.quality().is_running());
        assert!(!vp.monitor().is_running());
        clock.advance(10_000.0);
        assert_eq!(vp.tick(), TickOutcome::default());
    }
}
