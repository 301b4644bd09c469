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

//! Optimizer statistics.

use crate::config::{OptimizerConfig, RenderStrategy};
use serde::Serialize;

/// Which techniques are switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechniqueFlags {
    /// Dirty rectangles.
    pub dirty_rectangles: bool,
    /// Layering.
    pub layering: bool,
    /// Viewport culling.
    pub culling: bool,
    /// Batching.
    pub batching: bool,
    /// Frame request pooling.
    pub raf_pooling: bool,
    /// Worker offloading.
    pub web_workers: bool,
    /// Virtual scrolling.
    pub virtual_scrolling: bool,
}

impl From<&OptimizerConfig> for TechniqueFlags {
    fn from(config: &OptimizerConfig) -> Self {
        Self {
            dirty_rectangles: config.enable_dirty_rectangles,
            layering: config.enable_layering,
            culling: config.enable_culling,
            batching: config.enable_batching,
            raf_pooling: config.enable_raf_pooling,
            web_workers: config.enable_web_workers,
            virtual_scrolling: config.enable_virtual_scrolling,
        }
    }
}

/// A snapshot of the optimizer's counters.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderStats {
    /// Active rendering strategy.
    pub strategy: RenderStrategy,
    /// Active techniques.
    pub techniques: TechniqueFlags,
    /// Nodes removed by the last node cull.
    pub culled_nodes: usize,
    /// Edges removed by the last edge cull.
    pub culled_edges: usize,
    /// Batches produced by the last batching pass.
    pub batch_count: usize,
    /// Live layers.
    pub layer_count: usize,
    /// Pending dirty regions.
    pub dirty_region_count: usize,
    /// Frame requests not yet fired.
    pub pending_frames: usize,
    /// Whether the GPU program is initialised.
    pub webgl_ready: bool,
}
