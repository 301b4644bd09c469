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

//! # VizPerf Lanes
//!
//! Hot-path techniques that reduce the cost of drawing a visualization.
//!
//! Every technique is independently usable through the [`RenderOptimizer`]:
//! viewport culling, dirty-rectangle merging, canvas layering, render
//! batching, frame-request pooling and WebGL readiness. The optimizer holds
//! no scene state between calls; its only state is the layer registry, the
//! dirty-region accumulator, pending frame requests and counters.

#![warn(missing_docs)]

pub mod batching;
pub mod config;
pub mod culling;
pub mod dirty;
pub mod error;
pub mod frame_pool;
pub mod layers;
pub mod optimizer;
pub mod stats;
pub mod webgl;

pub use batching::{create_batches, RenderBatch};
pub use config::{OptimizerConfig, RenderStrategy};
pub use culling::{index_nodes, NodeIndex};
pub use dirty::DirtyRegionTracker;
pub use error::{OptimizerError, Result};
pub use frame_pool::{FramePool, FrameRequestId};
pub use layers::{LayerRegistry, RenderLayer};
pub use optimizer::RenderOptimizer;
pub use stats::{RenderStats, TechniqueFlags};
