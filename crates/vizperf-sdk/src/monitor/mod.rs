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

//! The performance dashboard.
//!
//! [`PerformanceMonitor`] holds no algorithmic logic. On its own cadence it
//! copies what the profiler, optimizer and quality controller report into a
//! [`MonitorSnapshot`] and renders it to a text status surface.

pub mod config;
mod layout;
pub mod shortcuts;
pub mod sparkline;

pub use config::{DisplayMode, MonitorConfig, OverlayPosition};
pub use shortcuts::{KeyChord, MonitorAction};

use anyhow::{Context, Result};
use serde::Serialize;
use vizperf_control::AdaptiveQuality;
use vizperf_core::control::QualityLevel;
use vizperf_core::platform::Platform;
use vizperf_core::telemetry::{PerformanceReport, PerformanceWarning};
use vizperf_core::IntervalTimer;
use vizperf_lanes::{RenderOptimizer, RenderStats};
use vizperf_telemetry::{report, BoundedHistory, Profiler};

/// Borrowed views of the components the dashboard reads from.
#[derive(Clone, Copy)]
pub struct DashboardInputs<'a> {
    /// The profiler.
    pub profiler: &'a Profiler,
    /// The optimizer.
    pub optimizer: &'a RenderOptimizer,
    /// The quality controller, if one is in use.
    pub quality: Option<&'a AdaptiveQuality>,
}

/// What the dashboard displayed at its last refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSnapshot {
    /// Clock time of the refresh.
    pub timestamp: f64,
    /// Profiler fps.
    pub fps: f64,
    /// Profiler rolling frame time.
    pub frame_time: f64,
    /// Profiler heap reading in megabytes.
    pub memory_usage: f64,
    /// Scene node count.
    pub node_count: i64,
    /// Scene edge count.
    pub edge_count: i64,
    /// Active quality level.
    pub quality: Option<QualityLevel>,
    /// Optimizer counters.
    pub stats: RenderStats,
    /// Retained profiler warnings.
    pub warnings: Vec<PerformanceWarning>,
    /// Recommendations over the retained samples.
    pub recommendations: Vec<String>,
}

impl MonitorSnapshot {
    fn capture(inputs: DashboardInputs<'_>, timestamp: f64) -> Self {
        let profiler = inputs.profiler;
        let samples = profiler.samples();
        let recommendations = report::summarize(&samples)
            .map(|summary| report::recommend(&summary, &samples, &profiler.config().thresholds))
            .unwrap_or_default();
        let (node_count, edge_count) = profiler.counts();
        Self {
            timestamp,
            fps: profiler.current_fps(),
            frame_time: profiler.average_frame_time(),
            memory_usage: profiler.memory_usage_mb(),
            node_count,
            edge_count,
            quality: inputs.quality.map(|q| q.current_quality()),
            stats: inputs.optimizer.get_stats(),
            warnings: profiler.warnings(),
            recommendations,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardExport<'a> {
    report: PerformanceReport,
    optimizer: RenderStats,
    quality: Option<QualityLevel>,
    snapshot: Option<&'a MonitorSnapshot>,
}

/// A status dashboard refreshed on a fixed interval.
#[derive(Debug)]
pub struct PerformanceMonitor {
    config: MonitorConfig,
    platform: Platform,
    timer: IntervalTimer,
    running: bool,
    visible: bool,
    fps_history: BoundedHistory<f64>,
    memory_history: BoundedHistory<f64>,
    snapshot: Option<MonitorSnapshot>,
    surface: String,
}

impl PerformanceMonitor {
    /// Creates a stopped, visible dashboard.
    pub fn new(config: MonitorConfig, platform: Platform) -> Self {
        Self {
            timer: IntervalTimer::new(config.update_interval),
            fps_history: BoundedHistory::new(config.graph_history_length),
            memory_history: BoundedHistory::new(config.graph_history_length),
            config,
            platform,
            running: false,
            visible: true,
            snapshot: None,
            surface: String::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Starts periodic refreshes.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.timer.start(self.platform.now_ms());
        log::debug!(
            "Monitor: started ({:?}, every {} ms)",
            self.config.display_mode,
            self.config.update_interval
        );
    }

    /// Stops periodic refreshes. The last surface stays available.
    pub fn stop(&mut self) {
        self.timer.stop();
        self.running = false;
    }

    /// Stops and discards all displayed state.
    pub fn destroy(&mut self) {
        self.stop();
        self.snapshot = None;
        self.surface.clear();
        self.fps_history.clear();
        self.memory_history.clear();
        log::debug!("Monitor: destroyed");
    }

    /// Whether periodic refreshes are active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Shows the surface.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hides the surface. Hidden dashboards skip refreshes.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Flips visibility and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Whether the surface is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Changes the layout and re-renders the last snapshot.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.config.display_mode = mode;
        self.redraw();
    }

    /// Refreshes when the update interval has elapsed. Returns `true` on refresh.
    pub fn tick(&mut self, inputs: DashboardInputs<'_>) -> bool {
        if !self.running || !self.timer.poll(self.platform.now_ms()) || !self.visible {
            return false;
        }
        self.update(inputs);
        true
    }

    /// Refreshes immediately.
    pub fn update(&mut self, inputs: DashboardInputs<'_>) {
        let snapshot = MonitorSnapshot::capture(inputs, self.platform.now_ms());
        self.fps_history.push(snapshot.fps);
        self.memory_history.push(snapshot.memory_usage);
        self.snapshot = Some(snapshot);
        self.redraw();
        log::trace!("Monitor: refreshed");
    }

    fn redraw(&mut self) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        let fps = self.fps_history.to_vec();
        let memory = self.memory_history.to_vec();
        let graphs = layout::Graphs {
            fps: &fps,
            memory: &memory,
        };
        self.surface = layout::render(snapshot, &graphs, &self.config);
    }

    /// The data behind the last refresh.
    pub fn snapshot(&self) -> Option<&MonitorSnapshot> {
        self.snapshot.as_ref()
    }

    /// The rendered surface, or `None` when hidden or never refreshed.
    pub fn render(&self) -> Option<&str> {
        (self.visible && self.snapshot.is_some()).then_some(self.surface.as_str())
    }

    /// Fps readings shown by the graph, oldest first.
    pub fn fps_history(&self) -> Vec<f64> {
        self.fps_history.to_vec()
    }

    /// Clears profiler history, optimizer counters and the dashboard's graphs.
    pub fn reset(&mut self, profiler: &mut Profiler, optimizer: &mut RenderOptimizer) {
        profiler.reset();
        optimizer.reset_stats();
        self.fps_history.clear();
        self.memory_history.clear();
        self.snapshot = None;
        self.surface.clear();
        log::info!("Monitor: reset");
    }

    /// Handles a key chord. Toggling is applied here; a `Reset` action is
    /// returned for the owner of the components to apply.
    pub fn handle_key(&mut self, chord: KeyChord) -> Option<MonitorAction> {
        if !self.config.enable_keyboard_shortcuts {
            return None;
        }
        let action = shortcuts::action_for(chord)?;
        if action == MonitorAction::ToggleVisibility {
            self.toggle();
        }
        Some(action)
    }

    /// Exports the profiler report, optimizer counters and last snapshot as JSON.
    pub fn export_report(&self, inputs: DashboardInputs<'_>) -> Result<String> {
        let export = DashboardExport {
            report: inputs
                .profiler
                .generate_report()
                .context("Cannot export a dashboard report")?,
            optimizer: inputs.optimizer.get_stats(),
            quality: inputs.quality.map(|q| q.current_quality()),
            snapshot: self.snapshot.as_ref(),
        };
        serde_json::to_string_pretty(&export).context("Failed to serialize dashboard report")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vizperf_control::QualityConfig;
    use vizperf_core::platform::ManualClock;
    use vizperf_lanes::OptimizerConfig;
    use vizperf_telemetry::ProfilerConfig;

    struct Components {
        profiler: Profiler,
        optimizer: RenderOptimizer,
        quality: AdaptiveQuality,
    }

    impl Components {
        fn inputs(&self) -> DashboardInputs<'_> {
            DashboardInputs {
                profiler: &self.profiler,
                optimizer: &self.optimizer,
                quality: Some(&self.quality),
            }
        }
    }

    struct Rig {
        clock: ManualClock,
        parts: Components,
        monitor: PerformanceMonitor,
    }

    impl Rig {
        fn new(config: MonitorConfig) -> Self {
            let clock = ManualClock::new();
            let platform = Platform::with_clock(Arc::new(clock.clone()));
            Self {
                parts: Components {
                    profiler: Profiler::new(ProfilerConfig::default(), platform.clone()),
                    optimizer: RenderOptimizer::new(OptimizerConfig::default(), platform.clone()),
                    quality: AdaptiveQuality::new(QualityConfig::default(), platform.clone()),
                },
                monitor: PerformanceMonitor::new(config, platform),
                clock,
            }
        }

        fn run(&mut self, frames: usize, frame_ms: f64) {
            for _ in 0..frames {
                self.parts.profiler.mark_frame_start();
                self.clock.advance(frame_ms);
                self.parts.profiler.mark_frame_end();
                self.parts.profiler.tick();
                self.monitor.tick(self.parts.inputs());
            }
        }
    }

    #[test]
    fn test_refreshes_on_interval() {
        let mut rig = Rig::new(MonitorConfig::default());
        rig.parts.profiler.start();
        assert!(!rig.monitor.tick(rig.parts.inputs()));

        rig.monitor.start();
        rig.clock.advance(499.0);
        assert!(!rig.monitor.tick(rig.parts.inputs()));
        rig.clock.advance(1.0);
        assert!(rig.monitor.tick(rig.parts.inputs()));
        assert!(rig.monitor.render().is_some());
    }

    #[test]
    fn test_compact_surface_reflects_components() {
        let mut rig = Rig::new(MonitorConfig::default());
        rig.parts.profiler.start();
        rig.parts.profiler.update_counts(5000, 9000);
        rig.monitor.start();
        rig.run(120, 20.0);

        let surface = rig.monitor.render().unwrap();
        assert!(surface.starts_with("FPS 50.0"), "{surface}");
        assert!(surface.contains("5000 nodes"));
        assert!(surface.ends_with("high"));
        assert_eq!(rig.monitor.snapshot().unwrap().quality, Some(QualityLevel::High));
    }

    #[test]
    fn test_dashboard_layout_sections() {
        let mut rig = Rig::new(MonitorConfig {
            display_mode: DisplayMode::Dashboard,
            show_memory_graph: true,
            ..Default::default()
        });
        rig.parts.profiler.start();
        rig.parts.profiler.update_counts(6000, 100);
        rig.monitor.start();
        rig.run(200, 20.0);

        let surface = rig.monitor.render().unwrap();
        assert!(surface.contains("Quality: high"));
        assert!(surface.contains("FPS    "));
        assert!(surface.contains("Memory "));
        assert!(surface.contains("Recommendations:"));
        assert!(surface.contains("virtual scrolling"));
    }

    #[test]
    fn test_overlay_shows_position() {
        let mut rig = Rig::new(MonitorConfig {
            display_mode: DisplayMode::Overlay,
            position: OverlayPosition::BottomLeft,
            ..Default::default()
        });
        rig.monitor.update(rig.parts.inputs());
        assert!(rig.monitor.render().unwrap().starts_with("[bottom-left]"));
    }

    #[test]
    fn test_hidden_monitor_skips_refresh() {
        let mut rig = Rig::new(MonitorConfig::default());
        rig.monitor.start();
        rig.monitor.hide();
        rig.clock.advance(1000.0);
        assert!(!rig.monitor.tick(rig.parts.inputs()));
        assert!(rig.monitor.render().is_none());

        assert!(rig.monitor.toggle());
        rig.clock.advance(500.0);
        assert!(rig.monitor.tick(rig.parts.inputs()));
    }

    #[test]
    fn test_shortcuts() {
        let mut rig = Rig::new(MonitorConfig::default());
        assert_eq!(
            rig.monitor.handle_key(KeyChord::ctrl_shift('p')),
            Some(MonitorAction::ToggleVisibility)
        );
        assert!(!rig.monitor.is_visible());
        assert_eq!(
            rig.monitor.handle_key(KeyChord::ctrl_shift('r')),
            Some(MonitorAction::Reset)
        );

        let mut quiet = Rig::new(MonitorConfig {
            enable_keyboard_shortcuts: false,
            ..Default::default()
        });
        assert_eq!(quiet.monitor.handle_key(KeyChord::ctrl_shift('p')), None);
        assert!(quiet.monitor.is_visible());
    }

    #[test]
    fn test_reset_delegates() {
        let mut rig = Rig::new(MonitorConfig::default());
        rig.parts.profiler.start();
        rig.monitor.start();
        rig.run(100, 20.0);
        let nodes = [vizperf_core::graph::VisualNode::new(
            "far",
            (),
            vizperf_core::math::Vec3::new(1.0e6, 0.0, 0.0),
        )];
        let viewport = vizperf_core::math::Aabb::from_min_max(
            vizperf_core::math::Vec2::ZERO,
            vizperf_core::math::Vec2::new(100.0, 100.0),
        );
        rig.parts.optimizer.cull_nodes(&nodes, &viewport);
        assert_eq!(rig.parts.optimizer.get_stats().culled_nodes, 1);
        assert!(!rig.parts.profiler.samples().is_empty());

        rig.monitor.reset(&mut rig.parts.profiler, &mut rig.parts.optimizer);
        assert!(rig.parts.profiler.samples().is_empty());
        assert_eq!(rig.parts.optimizer.get_stats().culled_nodes, 0);
        assert!(rig.monitor.fps_history().is_empty());
        assert!(rig.monitor.render().is_none());
    }

    #[test]
    fn test_export_report() {
        let mut rig = Rig::new(MonitorConfig::default());
        assert!(rig.monitor.export_report(rig.parts.inputs()).is_err());

        rig.parts.profiler.start();
        rig.monitor.start();
        rig.run(100, 20.0);
        let json = rig.monitor.export_report(rig.parts.inputs()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["report"]["summary"]["avgFps"].is_number());
        assert_eq!(value["quality"], "high");
        assert_eq!(value["optimizer"]["strategy"], "canvas-2d");
    }
}
