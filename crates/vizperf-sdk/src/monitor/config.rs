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

//! Dashboard configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dashboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// A single status line.
    #[default]
    Compact,
    /// Metrics, quality and optimizer state, one per line.
    Detailed,
    /// Every section, with graphs.
    Dashboard,
    /// A compact block pinned to a screen corner.
    Overlay,
}

/// Screen corner the overlay is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayPosition {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    #[default]
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

impl fmt::Display for OverlayPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OverlayPosition::TopLeft => "top-left",
            OverlayPosition::TopRight => "top-right",
            OverlayPosition::BottomLeft => "bottom-left",
            OverlayPosition::BottomRight => "bottom-right",
        })
    }
}

/// Configuration for the [`PerformanceMonitor`](super::PerformanceMonitor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonitorConfig {
    /// Layout of the status surface.
    pub display_mode: DisplayMode,
    /// Milliseconds between two refreshes.
    pub update_interval: f64,
    /// Draw the fps sparkline.
    pub show_fps_graph: bool,
    /// Draw the memory sparkline.
    pub show_memory_graph: bool,
    /// List recent profiler warnings.
    pub show_warnings: bool,
    /// List report recommendations.
    pub show_recommendations: bool,
    /// Readings kept for each graph.
    pub graph_history_length: usize,
    /// Corner used by the overlay layout.
    pub position: OverlayPosition,
    /// Honour Ctrl+Shift+P and Ctrl+Shift+R.
    pub enable_keyboard_shortcuts: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::Compact,
            update_interval: 500.0,
            show_fps_graph: true,
            show_memory_graph: false,
            show_warnings: true,
            show_recommendations: true,
            graph_history_length: 60,
            position: OverlayPosition::TopRight,
            enable_keyboard_shortcuts: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        let config: MonitorConfig =
            serde_json::from_str(r#"{"displayMode": "overlay", "position": "bottom-left"}"#)
                .unwrap();
        assert_eq!(config.display_mode, DisplayMode::Overlay);
        assert_eq!(config.position, OverlayPosition::BottomLeft);
        assert_eq!(config.graph_history_length, 60);
    }
}
