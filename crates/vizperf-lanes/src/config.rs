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

//! Optimizer configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the host renders the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RenderStrategy {
    /// Immediate-mode 2D canvas.
    #[default]
    #[serde(rename = "canvas-2d")]
    Canvas2d,
    /// GPU point rendering.
    #[serde(rename = "webgl")]
    WebGl,
    /// Retained vector graphics.
    #[serde(rename = "svg")]
    Svg,
    /// 2D canvas for small scenes, WebGL past the configured threshold.
    #[serde(rename = "hybrid")]
    Hybrid,
}

impl fmt::Display for RenderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RenderStrategy::Canvas2d => "canvas-2d",
            RenderStrategy::WebGl => "webgl",
            RenderStrategy::Svg => "svg",
            RenderStrategy::Hybrid => "hybrid",
        })
    }
}

/// Configuration for the [`RenderOptimizer`](crate::RenderOptimizer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptimizerConfig {
    /// Rendering backend in use.
    pub strategy: RenderStrategy,
    /// Accumulate and merge dirty rectangles.
    pub enable_dirty_rectangles: bool,
    /// Back layers with their own surfaces.
    pub enable_layering: bool,
    /// Drop elements outside the padded viewport.
    pub enable_culling: bool,
    /// Split nodes into fixed-size batches.
    pub enable_batching: bool,
    /// Coalesce frame requests into one platform request per frame.
    pub enable_raf_pooling: bool,
    /// Reserved worker-pool extension point. Reported in stats only.
    pub enable_web_workers: bool,
    /// Reported in stats only; virtualised lists are the host's concern.
    pub enable_virtual_scrolling: bool,
    /// Node count at which the hybrid strategy switches to WebGL.
    pub webgl_threshold: usize,
    /// Margin added around the viewport before culling, in scene units.
    pub viewport_padding: f32,
    /// Maximum number of nodes per batch.
    pub max_batch_size: usize,
    /// Fail layer creation when the platform has no surfaces.
    pub require_surfaces: bool,
    /// Margin added around dirty node and edge rectangles, in pixels.
    pub dirty_padding: f32,
    /// Size assumed for nodes without a style size.
    pub default_node_size: f32,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            strategy: RenderStrategy::Canvas2d,
            enable_dirty_rectangles: true,
            enable_layering: true,
            enable_culling: true,
            enable_batching: true,
            enable_raf_pooling: true,
            enable_web_workers: false,
            enable_virtual_scrolling: false,
            webgl_threshold: 5000,
            viewport_padding: 100.0,
            max_batch_size: 100,
            require_surfaces: false,
            dirty_padding: 2.0,
            default_node_size: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_wire_names() {
        let config: OptimizerConfig =
            serde_json::from_str(r#"{"strategy": "hybrid", "maxBatchSize": 25}"#).unwrap();
        assert_eq!(config.strategy, RenderStrategy::Hybrid);
        assert_eq!(config.max_batch_size, 25);
        assert_eq!(config.viewport_padding, 100.0);
        assert_eq!(
            serde_json::to_string(&RenderStrategy::Canvas2d).unwrap(),
            "\"canvas-2d\""
        );
        assert_eq!(RenderStrategy::WebGl.to_string(), "webgl");
    }

    #[test]
    fn test_defaults_disable_workers_and_virtual_scrolling() {
        let config = OptimizerConfig::default();
        assert!(config.enable_culling && config.enable_batching && config.enable_raf_pooling);
        assert!(!config.enable_web_workers);
        assert!(!config.enable_virtual_scrolling);
    }
}
