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

//! The frame profiler.

use crate::config::ProfilerConfig;
use crate::error::{ProfilerError, Result};
use crate::frame_loop::FrameLoop;
use crate::history::BoundedHistory;
use crate::report;
use std::collections::BTreeMap;
use vizperf_core::platform::Platform;
use vizperf_core::telemetry::{
    FrameMetricsSource, PerformanceReport, PerformanceSample, PerformanceWarning, Severity,
};
use vizperf_core::IntervalTimer;

/// Interval between two frame-rate recomputations, in milliseconds.
const FPS_UPDATE_INTERVAL_MS: f64 = 1000.0;
/// A single frame slower than this multiple of `max_frame_time` raises its own warning.
const SLOW_FRAME_FACTOR: f64 = 2.0;

/// Samples frame timing, memory and scene size on a fixed cadence.
///
/// The profiler is driven by its host: `mark_frame_start`/`mark_frame_end`
/// bracket each render, and `tick` is called once per frame to recompute the
/// frame rate and collect samples when the sampling interval has elapsed.
///
/// When the platform has a frame scheduler, frames are counted by a
/// [`FrameLoop`] kept alive between `start` and `stop`. Otherwise every
/// `mark_frame_end` (or `record_frame`) counts as one frame.
#[derive(Debug)]
pub struct Profiler {
    config: ProfilerConfig,
    platform: Platform,
    running: bool,
    sample_timer: IntervalTimer,
    frame_loop: Option<FrameLoop>,

    samples: BoundedHistory<PerformanceSample>,
    warnings: BoundedHistory<PerformanceWarning>,
    frame_times: BoundedHistory<f64>,

    session_start: f64,
    frame_start: Option<f64>,
    last_frame_time: f64,
    frames_since_update: u64,
    last_fps_update: f64,
    current_fps: f64,
    memory_usage: f64,
    node_count: i64,
    edge_count: i64,
    custom_metrics: BTreeMap<String, f64>,
}

impl Profiler {
    /// Creates a stopped profiler.
    pub fn new(config: ProfilerConfig, platform: Platform) -> Self {
        let frame_loop = platform.frames.clone().map(FrameLoop::new);
        let now = platform.now_ms();
        Self {
            sample_timer: IntervalTimer::new(config.sample_interval),
            samples: BoundedHistory::new(config.max_samples),
            warnings: BoundedHistory::new(config.max_warnings),
            frame_times: BoundedHistory::new(config.frame_window),
            config,
            platform,
            running: false,
            frame_loop,
            session_start: now,
            frame_start: None,
            last_frame_time: 0.0,
            frames_since_update: 0,
            last_fps_update: now,
            current_fps: 0.0,
            memory_usage: 0.0,
            node_count: 0,
            edge_count: 0,
            custom_metrics: BTreeMap::new(),
        }
    }

    /// Creates a profiler with default configuration on a headless platform.
    pub fn headless() -> Self {
        Self::new(ProfilerConfig::default(), Platform::headless())
    }

    /// The active configuration.
    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Whether a sampling session is active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begins a sampling session. Does nothing if already running or disabled.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        if !self.config.enabled {
            log::debug!("Profiler: start ignored, profiling is disabled");
            return;
        }
        let now = self.platform.now_ms();
        self.running = true;
        self.session_start = now;
        self.last_fps_update = now;
        self.frames_since_update = 0;
        self.frame_start = None;
        self.sample_timer.start(now);
        if let Some(frame_loop) = &self.frame_loop {
            frame_loop.start();
        }
        log::info!(
            "Profiler: started (sample interval {}ms, {} samples retained)",
            self.config.sample_interval,
            self.config.max_samples
        );
    }

    /// Ends the sampling session and cancels its timer and frame requests.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.sample_timer.stop();
        if let Some(frame_loop) = &self.frame_loop {
            frame_loop.stop();
        }
        log::info!("Profiler: stopped after {} samples", self.samples.len());
    }

    /// Clears samples, warnings and frame statistics. Configuration, scene
    /// counts and custom metrics are kept.
    pub fn reset(&mut self) {
        let now = self.platform.now_ms();
        self.samples.clear();
        self.warnings.clear();
        self.frame_times.clear();
        self.current_fps = 0.0;
        self.last_frame_time = 0.0;
        self.frames_since_update = 0;
        self.last_fps_update = now;
        self.session_start = now;
        self.frame_start = None;
        if let Some(frame_loop) = &self.frame_loop {
            frame_loop.take_frames();
        }
        log::debug!("Profiler: history reset");
    }

    /// Drives the profiler. Returns `true` when a sample was collected.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let now = self.platform.now_ms();
        if let Some(frame_loop) = &self.frame_loop {
            self.frames_since_update += frame_loop.take_frames();
        }
        self.update_fps(now);
        if self.sample_timer.poll(now) {
            self.collect_sample(now);
            true
        } else {
            false
        }
    }

    /// Marks the beginning of a render.
    pub fn mark_frame_start(&mut self) {
        self.frame_start = Some(self.platform.now_ms());
    }

    /// Marks the end of a render started with [`mark_frame_start`](Self::mark_frame_start).
    ///
    /// Without a matching start the call is ignored.
    pub fn mark_frame_end(&mut self) {
        let Some(start) = self.frame_start.take() else {
            return;
        };
        let now = self.platform.now_ms();
        let frame_time = (now - start).max(0.0);
        self.last_frame_time = frame_time;
        self.frame_times.push(frame_time);

        let limit = self.config.thresholds.max_frame_time * SLOW_FRAME_FACTOR;
        if self.running && frame_time > limit {
            self.raise(PerformanceWarning {
                severity: Severity::Warning,
                message: format!("Slow frame detected: {frame_time:.2}ms"),
                metric: "frameTime".to_string(),
                value: frame_time,
                threshold: limit,
                timestamp: now,
                suggestions: vec![
                    "Split expensive work across frames with progressive rendering".to_string(),
                ],
            });
        }

        if self.frame_loop.is_none() {
            self.count_frame(now);
        }
    }

    /// Counts one displayed frame for hosts that do not bracket renders.
    pub fn record_frame(&mut self) {
        let now = self.platform.now_ms();
        self.count_frame(now);
    }

    fn count_frame(&mut self, now: f64) {
        if !self.running {
            return;
        }
        self.frames_since_update += 1;
        self.update_fps(now);
    }

    /// Records the current scene size. Any value is accepted.
    pub fn update_counts(&mut self, nodes: i64, edges: i64) {
        self.node_count = nodes;
        self.edge_count = edges;
    }

    /// Sets a named custom metric, included in every following sample.
    pub fn set_metric(&mut self, name: impl Into<String>, value: f64) {
        self.custom_metrics.insert(name.into(), value);
    }

    /// Reads a custom metric.
    pub fn get_metric(&self, name: &str) -> Option<f64> {
        self.custom_metrics.get(name).copied()
    }

    /// Frames per second over the last full second.
    pub fn current_fps(&self) -> f64 {
        self.current_fps
    }

    /// Rolling average of the recent frame times, in milliseconds.
    pub fn average_frame_time(&self) -> f64 {
        self.frame_times.average()
    }

    /// Duration of the most recent bracketed frame, in milliseconds.
    pub fn last_frame_time(&self) -> f64 {
        self.last_frame_time
    }

    /// Heap usage as of the last measurement, in megabytes.
    pub fn memory_usage_mb(&self) -> f64 {
        self.memory_usage
    }

    /// The last reported `(nodes, edges)`.
    pub fn counts(&self) -> (i64, i64) {
        (self.node_count, self.edge_count)
    }

    /// A copy of the retained samples, oldest first.
    pub fn samples(&self) -> Vec<PerformanceSample> {
        self.samples.to_vec()
    }

    /// The most recent sample.
    pub fn latest_sample(&self) -> Option<&PerformanceSample> {
        self.samples.latest()
    }

    /// A copy of the retained warnings, oldest first.
    pub fn warnings(&self) -> Vec<PerformanceWarning> {
        self.warnings.to_vec()
    }

    /// Forgets all warnings.
    pub fn clear_warnings(&mut self) {
        self.warnings.clear();
    }

    /// Aggregates the retained samples into a report.
    ///
    /// Fails with [`ProfilerError::NoSamples`] before the first sample.
    pub fn generate_report(&self) -> Result<PerformanceReport> {
        let samples = self.samples.to_vec();
        let summary = report::summarize(&samples).ok_or(ProfilerError::NoSamples)?;
        let recommendations = report::recommend(&summary, &samples, &self.config.thresholds);
        let now = self.platform.now_ms();
        Ok(PerformanceReport {
            timestamp: now,
            duration: (now - self.session_start).max(0.0),
            summary,
            samples,
            warnings: self.warnings.to_vec(),
            recommendations,
        })
    }

    /// Serializes a fresh report to pretty-printed JSON.
    pub fn export_report(&self) -> Result<String> {
        let report = self.generate_report()?;
        Ok(serde_json::to_string_pretty(&report)?)
    }

    fn update_fps(&mut self, now: f64) {
        let elapsed = now - self.last_fps_update;
        if elapsed < FPS_UPDATE_INTERVAL_MS {
            return;
        }
        self.current_fps = self.frames_since_update as f64 * 1000.0 / elapsed;
        self.frames_since_update = 0;
        self.last_fps_update = now;
        self.refresh_memory();
        self.check_thresholds(now);
    }

    fn refresh_memory(&mut self) {
        if !self.config.enable_memory_profiling {
            self.memory_usage = 0.0;
            return;
        }
        self.memory_usage = self
            .platform
            .memory
            .as_ref()
            .and_then(|monitor| monitor.used_heap_mb())
            .unwrap_or(0.0);
    }

    fn check_thresholds(&mut self, now: f64) {
        let thresholds = self.config.thresholds.clone();
        let fps = self.current_fps;

        if fps < thresholds.critical_fps {
            self.raise(PerformanceWarning {
                severity: Severity::Critical,
                message: format!("Critical FPS drop: {fps:.1} fps"),
                metric: "fps".to_string(),
                value: fps,
                threshold: thresholds.critical_fps,
                timestamp: now,
                suggestions: vec![
                    "Lower the quality level".to_string(),
                    "Enable viewport culling".to_string(),
                    "Reduce the number of visible nodes".to_string(),
                ],
            });
        } else if fps < thresholds.warning_fps {
            self.raise(PerformanceWarning {
                severity: Severity::Warning,
                message: format!("Low FPS: {fps:.1} fps"),
                metric: "fps".to_string(),
                value: fps,
                threshold: thresholds.warning_fps,
                timestamp: now,
                suggestions: vec!["Enable render batching".to_string()],
            });
        }

        if self.memory_usage > thresholds.max_memory_usage {
            self.raise(PerformanceWarning {
                severity: Severity::Warning,
                message: format!("High memory usage: {:.0}MB", self.memory_usage),
                metric: "memoryUsage".to_string(),
                value: self.memory_usage,
                threshold: thresholds.max_memory_usage,
                timestamp: now,
                suggestions: vec!["Release unused render layers".to_string()],
            });
        }
    }

    fn raise(&mut self, warning: PerformanceWarning) {
        if self.config.enable_logging {
            match warning.severity {
                Severity::Critical => log::error!("Profiler: {warning}"),
                _ => log::warn!("Profiler: {warning}"),
            }
        } else {
            log::debug!("Profiler: {warning}");
        }
        self.warnings.push(warning);
    }

    fn collect_sample(&mut self, now: f64) {
        self.refresh_memory();
        let custom_metrics = self
            .custom_metrics
            .iter()
            .filter(|(name, value)| {
                let keep = value.is_finite();
                if !keep {
                    log::debug!("Profiler: skipping non-finite metric '{name}'");
                }
                keep
            })
            .map(|(name, value)| (name.clone(), *value))
            .collect();

        let evicted = self.samples.push(PerformanceSample {
            timestamp: now,
            fps: self.current_fps,
            frame_time: self.frame_times.average(),
            memory_usage: self.memory_usage,
            node_count: self.node_count,
            edge_count: self.edge_count,
            custom_metrics,
        });
        if evicted.is_some() {
            log::trace!("Profiler: sample history full, dropped oldest sample");
        }
    }
}

impl FrameMetricsSource for Profiler {
    fn current_fps(&self) -> f64 {
        Profiler::current_fps(self)
    }

    fn average_frame_time(&self) -> f64 {
        Profiler::average_frame_time(self)
    }
}

impl Drop for Profiler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PerformanceThresholds;
    use approx::assert_relative_eq;
    use std::sync::Arc;
    use vizperf_core::platform::{ManualClock, MemoryMonitor};

    #[derive(Debug)]
    struct FixedMemory(f64);

    impl MemoryMonitor for FixedMemory {
        fn used_heap_mb(&self) -> Option<f64> {
            Some(self.0)
        }
    }

    fn profiler_with(config: ProfilerConfig) -> (Profiler, ManualClock) {
        let clock = ManualClock::new();
        let platform = Platform::with_clock(Arc::new(clock.clone()));
        (Profiler::new(config, platform), clock)
    }

    /// Renders `frames` frames of `frame_ms` each.
    fn render(profiler: &mut Profiler, clock: &ManualClock, frames: usize, frame_ms: f64) {
        for _ in 0..frames {
            profiler.mark_frame_start();
            clock.advance(frame_ms);
            profiler.mark_frame_end();
            profiler.tick();
        }
    }

    #[test]
    fn test_start_and_stop_are_idempotent() {
        let (mut profiler, _clock) = profiler_with(ProfilerConfig::default());
        profiler.start();
        profiler.start();
        assert!(profiler.is_running());
        profiler.stop();
        profiler.stop();
        assert!(!profiler.is_running());
        assert!(!profiler.tick());
    }

    #[test]
    fn test_disabled_profiler_does_not_start() {
        let (mut profiler, _clock) = profiler_with(ProfilerConfig {
            enabled: false,
            ..Default::default()
        });
        profiler.start();
        assert!(!profiler.is_running());
    }

    #[test]
    fn test_fps_is_computed_once_per_second() {
        let (mut profiler, clock) = profiler_with(ProfilerConfig::default());
        profiler.start();
        render(&mut profiler, &clock, 59, 16.0);
        // 944ms elapsed: no recomputation yet.
        assert_eq!(profiler.current_fps(), 0.0);
        render(&mut profiler, &clock, 4, 16.0);
        // Recomputed at 1008ms with 63 frames.
        assert_relative_eq!(profiler.current_fps(), 63.0 * 1000.0 / 1008.0);
        assert_relative_eq!(profiler.average_frame_time(), 16.0);
    }

    #[test]
    fn test_frame_window_is_bounded() {
        let (mut profiler, clock) = profiler_with(ProfilerConfig {
            frame_window: 3,
            ..Default::default()
        });
        profiler.start();
        render(&mut profiler, &clock, 3, 10.0);
        render(&mut profiler, &clock, 3, 20.0);
        assert_relative_eq!(profiler.average_frame_time(), 20.0);
        assert_eq!(profiler.last_frame_time(), 20.0);
    }

    #[test]
    fn test_mark_frame_end_without_start_is_ignored() {
        let (mut profiler, _clock) = profiler_with(ProfilerConfig::default());
        profiler.start();
        profiler.mark_frame_end();
        assert_eq!(profiler.average_frame_time(), 0.0);
    }

    #[test]
    fn test_samples_reflect_latest_counts_and_metrics() {
        let (mut profiler, clock) = profiler_with(ProfilerConfig::default());
        profiler.start();
        profiler.update_counts(-5, 0);
        profiler.set_metric("layout", 3.5);
        profiler.set_metric("broken", f64::NAN);
        clock.advance(1000.0);
        assert!(profiler.tick());

        let sample = profiler.latest_sample().unwrap().clone();
        assert_eq!(sample.timestamp, 1000.0);
        assert_eq!(sample.node_count, -5);
        assert_eq!(sample.edge_count, 0);
        assert_eq!(sample.custom_metrics.get("layout"), Some(&3.5));
        assert!(!sample.custom_metrics.contains_key("broken"));
        assert_eq!(profiler.get_metric("layout"), Some(3.5));
        assert_eq!(profiler.counts(), (-5, 0));
    }

    #[test]
    fn test_sample_history_is_bounded_fifo() {
        let (mut profiler, clock) = profiler_with(ProfilerConfig {
            max_samples: 3,
            sample_interval: 100.0,
            ..Default::default()
        });
        profiler.start();
        for _ in 0..5 {
            clock.advance(100.0);
            profiler.tick();
        }
        let timestamps: Vec<f64> = profiler.samples().iter().map(|s| s.timestamp).collect();
        assert_eq!(timestamps, vec![300.0, 400.0, 500.0]);
    }

    #[test]
    fn test_report_requires_samples() {
        let (profiler, _clock) = profiler_with(ProfilerConfig::default());
        assert!(matches!(
            profiler.generate_report(),
            Err(ProfilerError::NoSamples)
        ));
        assert!(matches!(
            profiler.export_report(),
            Err(ProfilerError::NoSamples)
        ));
    }

    #[test]
    fn test_critical_and_warning_fps() {
        let (mut profiler, clock) = profiler_with(ProfilerConfig::default());
        profiler.start();
        // 10 frames in one second: critical.
        render(&mut profiler, &clock, 10, 100.0);
        let warnings = profiler.warnings();
        let fps_warning = warnings.iter().find(|w| w.metric == "fps").unwrap();
        assert_eq!(fps_warning.severity, Severity::Critical);
        assert!(!fps_warning.suggestions.is_empty());

        profiler.clear_warnings();
        // 20 frames in the next second: warning only.
        render(&mut profiler, &clock, 20, 50.0);
        let warnings = profiler.warnings();
        let fps_warning = warnings.iter().find(|w| w.metric == "fps").unwrap();
        assert_eq!(fps_warning.severity, Severity::Warning);
        assert_eq!(fps_warning.threshold, 30.0);
    }

    #[test]
    fn test_slow_frame_raises_its_own_warning() {
        let (mut profiler, clock) = profiler_with(ProfilerConfig::default());
        profiler.start();
        profiler.mark_frame_start();
        clock.advance(70.0);
        profiler.mark_frame_end();
        let warnings = profiler.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].metric, "frameTime");
        assert_relative_eq!(warnings[0].threshold, 66.66);
    }

    #[test]
    fn test_memory_usage_and_ceiling() {
        let clock = ManualClock::new();
        let platform = Platform::with_clock(Arc::new(clock.clone()))
            .memory(Arc::new(FixedMemory(600.0)));
        let mut profiler = Profiler::new(
            ProfilerConfig {
                thresholds: PerformanceThresholds {
                    critical_fps: 0.0,
                    warning_fps: 0.0,
                    ..Default::default()
                },
                ..Default::default()
            },
            platform,
        );
        profiler.start();
        clock.advance(1000.0);
        profiler.tick();
        assert_eq!(profiler.memory_usage_mb(), 600.0);
        let warnings = profiler.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].metric, "memoryUsage");
        assert_eq!(profiler.latest_sample().unwrap().memory_usage, 600.0);
    }

    #[test]
    fn test_missing_memory_monitor_reports_zero() {
        let (mut profiler, clock) = profiler_with(ProfilerConfig::default());
        profiler.start();
        clock.advance(1000.0);
        profiler.tick();
        assert_eq!(profiler.latest_sample().unwrap().memory_usage, 0.0);
    }

    #[test]
    fn test_warning_log_is_capped() {
        let (mut profiler, clock) = profiler_with(ProfilerConfig {
            max_warnings: 5,
            ..Default::default()
        });
        profiler.start();
        for _ in 0..10 {
            profiler.mark_frame_start();
            clock.advance(100.0);
            profiler.mark_frame_end();
        }
        assert_eq!(profiler.warnings().len(), 5);
    }

    #[test]
    fn test_reset_keeps_configuration() {
        let (mut profiler, clock) = profiler_with(ProfilerConfig {
            max_samples: 7,
            ..Default::default()
        });
        profiler.start();
        render(&mut profiler, &clock, 70, 16.0);
        assert!(!profiler.samples().is_empty());
        profiler.reset();
        assert!(profiler.samples().is_empty());
        assert!(profiler.warnings().is_empty());
        assert_eq!(profiler.current_fps(), 0.0);
        assert_eq!(profiler.config().max_samples, 7);
        assert!(profiler.is_running());
    }

    #[test]
    fn test_report_round_trip_through_json() {
        let (mut profiler, clock) = profiler_with(ProfilerConfig::default());
        profiler.start();
        render(&mut profiler, &clock, 130, 16.0);
        let report = profiler.generate_report().unwrap();
        assert_eq!(report.samples.len(), 2);
        assert_relative_eq!(report.duration, 130.0 * 16.0);

        let json = profiler.export_report().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["summary"]["p95Fps"].is_number());
        assert!(value["recommendations"].is_array());
    }

    #[test]
    fn test_record_frame_counts_without_brackets() {
        let (mut profiler, clock) = profiler_with(ProfilerConfig::default());
        profiler.start();
        for _ in 0..50 {
            clock.advance(20.0);
            profiler.record_frame();
        }
        assert_relative_eq!(profiler.current_fps(), 50.0);
    }
}
