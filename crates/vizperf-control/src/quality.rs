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

//! The adaptive quality controller.

use crate::analysis::{Decision, HoldReason, QualityHeuristics};
use crate::config::QualityConfig;
use crate::device;
use crate::error::{QualityError, Result};
use crate::events::{ChangeBroadcaster, ChangeReason, QualityChange};
use crate::metrics::RingBuffer;
use crate::progressive::{ProgressiveRenderer, RenderTask};
use crate::throttle;
use crossbeam_channel::Receiver;
use serde::Serialize;
use vizperf_core::control::{Direction, LodSettings, PresetTable, QualityLevel, QualityPreset};
use vizperf_core::platform::Platform;
use vizperf_core::telemetry::FrameMetricsSource;
use vizperf_core::IntervalTimer;

/// Performance budget of the active preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedLimits {
    /// Recommended upper bound on rendered nodes.
    pub max_nodes: usize,
    /// Recommended upper bound on rendered edges.
    pub max_edges: usize,
    /// Frame rate the preset is expected to sustain.
    pub target_fps: f64,
}

/// Steps a discrete quality level up or down from sustained frame-rate history.
///
/// Every `adjustment_interval` the controller reads the current fps from a
/// [`FrameMetricsSource`] into a rolling window. Nothing happens until the
/// window is full. Then the window average is compared with
/// `target_fps ± fps_tolerance` and at most one step is taken, within the
/// `[min_quality, max_quality]` band. The window is cleared after every
/// successful transition.
#[derive(Debug)]
pub struct AdaptiveQuality {
    config: QualityConfig,
    platform: Platform,
    presets: PresetTable,
    current: QualityPreset,
    window: RingBuffer,
    timer: IntervalTimer,
    running: bool,
    last_frame_time: f64,
    progressive: ProgressiveRenderer,
    events: ChangeBroadcaster,
}

impl AdaptiveQuality {
    /// Creates a stopped controller with the built-in presets.
    pub fn new(config: QualityConfig, platform: Platform) -> Self {
        let presets = PresetTable::builtin();
        let level = config
            .initial_quality
            .clamp_to(config.min_quality, config.max_quality);
        let current = QualityPreset::builtin(level);
        Self::assemble(config, platform, presets, current)
    }

    /// Creates a stopped controller over a custom preset table.
    ///
    /// Fails if the (band-clamped) initial level has no preset.
    pub fn with_presets(
        config: QualityConfig,
        platform: Platform,
        presets: PresetTable,
    ) -> Result<Self> {
        let level = config
            .initial_quality
            .clamp_to(config.min_quality, config.max_quality);
        let current = *presets
            .get(level)
            .ok_or(QualityError::UnregisteredLevel(level))?;
        Ok(Self::assemble(config, platform, presets, current))
    }

    /// Creates a controller with default configuration on a headless platform.
    pub fn headless() -> Self {
        Self::new(QualityConfig::default(), Platform::headless())
    }

    fn assemble(
        config: QualityConfig,
        platform: Platform,
        presets: PresetTable,
        current: QualityPreset,
    ) -> Self {
        Self {
            window: RingBuffer::new(config.fps_window_size),
            timer: IntervalTimer::new(config.adjustment_interval),
            progressive: ProgressiveRenderer::new(config.progressive_chunk_size),
            events: ChangeBroadcaster::new(config.event_buffer_size),
            config,
            platform,
            presets,
            current,
            running: false,
            last_frame_time: 0.0,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    // --- Lifecycle ---

    /// Starts periodic evaluation. Does nothing if disabled or already running.
    pub fn start(&mut self) {
        if !self.config.enabled || self.running {
            return;
        }
        self.running = true;
        self.timer.start(self.platform.now_ms());
        log::debug!(
            "AdaptiveQuality: started at '{}' (every {} ms)",
            self.current.level,
            self.config.adjustment_interval
        );
    }

    /// Stops periodic evaluation.
    pub fn stop(&mut self) {
        self.timer.stop();
        if self.running {
            self.running = false;
            log::debug!("AdaptiveQuality: stopped");
        }
    }

    /// Whether periodic evaluation is active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Clears the rolling window without touching the level or configuration.
    pub fn reset(&mut self) {
        self.window.clear();
        self.last_frame_time = 0.0;
    }

    /// Drives the controller. Call once per frame.
    ///
    /// Records the source's frame time for throttling advice and, when the
    /// adjustment interval has elapsed, evaluates its current fps. Returns
    /// `true` if the level changed.
    pub fn tick(&mut self, source: &dyn FrameMetricsSource) -> bool {
        if !self.running {
            return false;
        }
        self.last_frame_time = source.average_frame_time();
        if !self.timer.poll(self.platform.now_ms()) {
            return false;
        }
        self.evaluate(source.current_fps())
    }

    /// Pushes one fps reading and applies the resulting decision.
    ///
    /// Non-finite or negative readings are ignored. Returns `true` if the
    /// level changed.
    pub fn evaluate(&mut self, fps: f64) -> bool {
        if !fps.is_finite() || fps < 0.0 {
            log::debug!("AdaptiveQuality: ignoring invalid fps reading {}", fps);
            return false;
        }
        self.window.push(fps);

        let assessment = QualityHeuristics::assess(&self.window, &self.config);
        for alert in &assessment.alerts {
            log::debug!("AdaptiveQuality: {}", alert);
        }

        match assessment.decision {
            Decision::Step(direction) => self.transition(
                direction,
                ChangeReason::Automatic {
                    average_fps: assessment.average_fps,
                },
            ),
            Decision::Hold(HoldReason::ColdStart) => {
                log::debug!(
                    "AdaptiveQuality: warming up ({}/{} readings)",
                    self.window.count(),
                    self.window.capacity()
                );
                false
            }
            Decision::Hold(reason) => {
                log::trace!(
                    "AdaptiveQuality: holding '{}' at {:.1} fps ({:?})",
                    self.current.level,
                    assessment.average_fps,
                    reason
                );
                false
            }
        }
    }

    // --- Level control ---

    /// The active quality level.
    pub fn current_quality(&self) -> QualityLevel {
        self.current.level
    }

    /// The active preset.
    pub fn current_preset(&self) -> &QualityPreset {
        &self.current
    }

    /// The registered presets.
    pub fn presets(&self) -> &PresetTable {
        &self.presets
    }

    /// Steps one level up. Returns `false` at the top of the band.
    pub fn upgrade_quality(&mut self) -> bool {
        self.transition(Direction::Up, ChangeReason::Manual)
    }

    /// Steps one level down. Returns `false` at the bottom of the band.
    pub fn downgrade_quality(&mut self) -> bool {
        self.transition(Direction::Down, ChangeReason::Manual)
    }

    /// Applies a level immediately, ignoring the band.
    ///
    /// Fails if no preset is registered for `level`.
    pub fn set_quality(&mut self, level: QualityLevel) -> Result<()> {
        let preset = *self
            .presets
            .get(level)
            .ok_or(QualityError::UnregisteredLevel(level))?;
        self.apply(preset, ChangeReason::Manual);
        Ok(())
    }

    /// Parses a level name and applies it with [`set_quality`](Self::set_quality).
    pub fn set_quality_by_name(&mut self, name: &str) -> Result<()> {
        let level = name
            .parse::<QualityLevel>()
            .map_err(|_| QualityError::UnknownLevel(name.to_string()))?;
        self.set_quality(level)
    }

    /// Registers (or replaces) a preset. Replacing the active level's preset
    /// takes effect immediately.
    pub fn register_preset(&mut self, preset: QualityPreset) {
        self.presets.register(preset);
        if preset.level == self.current.level {
            if let Some(stored) = self.presets.get(preset.level) {
                self.current = *stored;
            }
        }
    }

    /// Subscribes to quality changes.
    ///
    /// The channel is bounded; when a subscriber falls behind, newer events
    /// are dropped for it.
    pub fn subscribe(&mut self) -> Receiver<QualityChange> {
        self.events.subscribe()
    }

    fn transition(&mut self, direction: Direction, reason: ChangeReason) -> bool {
        let Some(next) =
            self.current
                .level
                .step(direction, self.config.min_quality, self.config.max_quality)
        else {
            log::debug!(
                "AdaptiveQuality: cannot step {:?} from '{}' within [{}, {}]",
                direction,
                self.current.level,
                self.config.min_quality,
                self.config.max_quality
            );
            return false;
        };
        let Some(preset) = self.presets.get(next).copied() else {
            log::warn!("AdaptiveQuality: no preset registered for '{}'", next);
            return false;
        };
        self.apply(preset, reason);
        true
    }

    fn apply(&mut self, preset: QualityPreset, reason: ChangeReason) {
        let from = self.current.level;
        self.current = preset;
        self.window.clear();
        if from == preset.level {
            return;
        }
        match reason {
            ChangeReason::Automatic { average_fps } => log::info!(
                "AdaptiveQuality: '{}' -> '{}' (average {:.1} fps)",
                from,
                preset.level,
                average_fps
            ),
            ChangeReason::Manual => {
                log::info!("AdaptiveQuality: '{}' -> '{}' (manual)", from, preset.level)
            }
        }
        self.events.emit(QualityChange {
            from,
            to: preset.level,
            reason,
            timestamp: self.platform.now_ms(),
        });
    }

    // --- Level-of-detail queries ---

    fn lod(&self) -> &LodSettings {
        &self.current.lod
    }

    /// Whether a node at `distance` is drawn in full. Non-positive distances always are.
    pub fn should_render_node(&self, distance: f32) -> bool {
        distance <= 0.0 || distance <= self.lod().node_simplification_distance
    }

    /// Whether an edge at `distance` is drawn in full. Non-positive distances always are.
    pub fn should_render_edge(&self, distance: f32) -> bool {
        distance <= 0.0 || distance <= self.lod().edge_simplification_distance
    }

    /// Whether a label at `distance` is shown. Non-positive distances always are.
    pub fn should_show_label(&self, distance: f32) -> bool {
        distance <= 0.0 || distance <= self.lod().label_visibility_distance
    }

    /// Animation fidelity factor in `[0, 1]`.
    pub fn animation_quality(&self) -> f32 {
        self.lod().animation_quality
    }

    /// Texture resolution factor in `[0, 1]`.
    pub fn texture_scale(&self) -> f32 {
        self.lod().texture_scale
    }

    /// Whether antialiasing is enabled.
    pub fn antialiasing(&self) -> bool {
        self.lod().antialiasing
    }

    /// Whether shadows are drawn.
    pub fn shadows(&self) -> bool {
        self.lod().shadows
    }

    /// Whether particle effects are drawn.
    pub fn particles(&self) -> bool {
        self.lod().particles
    }

    /// Budget of the active preset.
    pub fn recommended_limits(&self) -> RecommendedLimits {
        RecommendedLimits {
            max_nodes: self.current.max_nodes,
            max_edges: self.current.max_edges,
            target_fps: self.current.target_fps,
        }
    }

    // --- Advice ---

    /// Suggests a level from the platform's device profile. Never applied automatically.
    pub fn detect_optimal_quality(&self) -> QualityLevel {
        let heap = self
            .platform
            .memory
            .as_ref()
            .and_then(|m| m.heap_limit_mb());
        let score = device::score(self.platform.device.as_deref(), heap);
        let level = device::level_for_score(score);
        log::debug!(
            "AdaptiveQuality: device score {}/{} suggests '{}'",
            score,
            device::MAX_SCORE,
            level
        );
        level
    }

    /// Milliseconds a caller could wait before the next frame, from the last observed frame time.
    pub fn throttle_delay(&self) -> f64 {
        throttle::delay(self.last_frame_time, self.config.target_fps)
    }

    /// Whether [`throttle_delay`](Self::throttle_delay) is non-zero.
    pub fn should_throttle(&self) -> bool {
        self.throttle_delay() > 0.0
    }

    // --- Progressive rendering ---

    /// Queues render work. With progressive rendering off, every task runs now.
    pub fn setup_progressive_render(&mut self, tasks: Vec<RenderTask>) {
        if !self.config.progressive_rendering {
            self.progressive.clear();
            for task in tasks {
                task();
            }
            return;
        }
        log::trace!(
            "AdaptiveQuality: queued {} tasks in chunks of {}",
            tasks.len(),
            self.progressive.chunk_size()
        );
        self.progressive.setup(tasks);
    }

    /// Runs the next chunk of queued work. Returns `true` if work remains.
    pub fn execute_progressive_chunk(&mut self) -> bool {
        self.progressive.execute_chunk()
    }

    /// Fraction of queued work done, `1.0` when nothing is queued.
    pub fn progressive_progress(&self) -> f64 {
        self.progressive.progress()
    }
}
