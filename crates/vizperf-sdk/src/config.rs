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

//! Combined engine configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use vizperf_control::QualityConfig;
use vizperf_lanes::OptimizerConfig;
use vizperf_telemetry::ProfilerConfig;

use crate::monitor::MonitorConfig;

/// Configuration for every component, keyed by component.
///
/// Missing keys, at any depth, fall back to defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Profiler settings.
    pub profiler: ProfilerConfig,
    /// Optimizer settings.
    pub optimizer: OptimizerConfig,
    /// Adaptive quality settings.
    pub quality: QualityConfig,
    /// Dashboard settings.
    pub monitor: MonitorConfig,
}

impl EngineConfig {
    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse engine configuration")
    }

    /// Reads and parses a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file '{}'", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Invalid configuration in '{}'", path.display()))
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize engine configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::DisplayMode;
    use approx::assert_relative_eq;
    use vizperf_core::control::QualityLevel;
    use vizperf_lanes::RenderStrategy;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_partial_sections_merge_with_defaults() {
        let config = EngineConfig::from_json(
            r#"{
                "profiler": { "sampleInterval": 250, "thresholds": { "targetFps": 30 } },
                "optimizer": { "strategy": "hybrid", "webglThreshold": 2000 },
                "quality": { "minQuality": "medium" },
                "monitor": { "displayMode": "dashboard" }
            }"#,
        )
        .unwrap();
        assert_relative_eq!(config.profiler.sample_interval, 250.0);
        assert_relative_eq!(config.profiler.thresholds.target_fps, 30.0);
        assert_relative_eq!(config.profiler.thresholds.critical_fps, 15.0);
        assert_eq!(config.optimizer.strategy, RenderStrategy::Hybrid);
        assert_eq!(config.optimizer.webgl_threshold, 2000);
        assert_eq!(config.quality.min_quality, QualityLevel::Medium);
        assert_eq!(config.monitor.display_mode, DisplayMode::Dashboard);
        assert_relative_eq!(config.monitor.update_interval, 500.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = EngineConfig::from_json(r#"{ "quality": { "minQuality": "extreme" } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("engine configuration"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = EngineConfig::from_file("/nonexistent/vizperf.json").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/vizperf.json"));
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }
}
