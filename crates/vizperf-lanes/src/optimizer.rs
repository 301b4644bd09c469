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

//! The render optimizer.

use crate::batching::{self, RenderBatch};
use crate::config::OptimizerConfig;
use crate::culling::{self, NodeIndex};
use crate::dirty::DirtyRegionTracker;
use crate::error::{OptimizerError, Result};
use crate::frame_pool::{FramePool, FrameRequestId};
use crate::layers::{LayerRegistry, RenderLayer};
use crate::stats::{RenderStats, TechniqueFlags};
use crate::webgl::{self, WebGlResources};
use vizperf_core::graph::{VisualEdge, VisualNode};
use vizperf_core::math::{Aabb, DirtyRect};
use vizperf_core::platform::{Platform, ProgramHandle};

/// A toolbox of independent rendering-cost reductions.
///
/// Scene content is never retained between calls: nodes, edges and the
/// viewport are passed in fresh each time.
#[derive(Debug)]
pub struct RenderOptimizer {
    config: OptimizerConfig,
    platform: Platform,
    layers: LayerRegistry,
    dirty: DirtyRegionTracker,
    frames: FramePool,
    webgl: Option<WebGlResources>,
    culled_nodes: usize,
    culled_edges: usize,
    batch_count: usize,
}

impl RenderOptimizer {
    /// Creates an optimizer on the given platform.
    pub fn new(config: OptimizerConfig, platform: Platform) -> Self {
        let frames = FramePool::new(platform.frames.clone(), config.enable_raf_pooling);
        log::debug!(
            "Optimizer: created (strategy {}, batch size {}, padding {})",
            config.strategy,
            config.max_batch_size,
            config.viewport_padding
        );
        Self {
            config,
            platform,
            layers: LayerRegistry::new(),
            dirty: DirtyRegionTracker::new(),
            frames,
            webgl: None,
            culled_nodes: 0,
            culled_edges: 0,
            batch_count: 0,
        }
    }

    /// Creates an optimizer with default configuration on a headless platform.
    pub fn headless() -> Self {
        Self::new(OptimizerConfig::default(), Platform::headless())
    }

    /// The active configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    // --- Dirty rectangles ---

    /// Adds a region to redraw, merging it with any overlapping region.
    pub fn mark_dirty(&mut self, rect: DirtyRect) {
        if !self.config.enable_dirty_rectangles {
            return;
        }
        self.dirty.mark(rect);
    }

    /// Marks the padded bounds of a node dirty.
    pub fn mark_node_dirty<T>(&mut self, node: &VisualNode<T>) {
        let bounds = node.bounds(self.config.default_node_size);
        self.mark_dirty(DirtyRect::from(bounds).padded(self.config.dirty_padding));
    }

    /// Marks the padded span of an edge dirty. Returns `false` when an
    /// endpoint does not resolve.
    pub fn mark_edge_dirty<T>(&mut self, edge: &VisualEdge, index: &NodeIndex<'_, T>) -> bool {
        let (Some(source), Some(target)) = (
            index.get(edge.source.as_str()),
            index.get(edge.target.as_str()),
        ) else {
            return false;
        };
        let size = self.config.default_node_size;
        let span = source.bounds(size).merge(&target.bounds(size));
        self.mark_dirty(DirtyRect::from(span).padded(self.config.dirty_padding));
        true
    }

    /// Returns the accumulated regions and clears them.
    pub fn get_dirty_regions(&mut self) -> Vec<DirtyRect> {
        self.dirty.take()
    }

    /// Number of regions waiting to be consumed.
    pub fn dirty_region_count(&self) -> usize {
        self.dirty.len()
    }

    // --- Layering ---

    /// Returns the layer `id`, creating it if needed.
    ///
    /// Fails when layering is disabled, or when `require_surfaces` is set and
    /// the platform has no surface.
    pub fn create_layer(
        &mut self,
        id: &str,
        width: u32,
        height: u32,
        z_index: i32,
        opacity: f32,
    ) -> Result<&mut RenderLayer> {
        if !self.config.enable_layering {
            log::debug!("Optimizer: layering disabled, skipping layer '{id}'");
            return Err(OptimizerError::LayeringDisabled {
                layer: id.to_owned(),
            });
        }
        self.layers.get_or_create(
            id,
            width,
            height,
            z_index,
            opacity,
            self.platform.graphics.as_ref(),
            self.config.require_surfaces,
        )
    }

    /// Looks up a layer.
    pub fn layer(&self, id: &str) -> Option<&RenderLayer> {
        self.layers.get(id)
    }

    /// Looks up a layer for drawing.
    pub fn layer_mut(&mut self, id: &str) -> Option<&mut RenderLayer> {
        self.layers.get_mut(id)
    }

    /// All layers, back to front.
    pub fn get_layers(&self) -> Vec<&RenderLayer> {
        self.layers.sorted()
    }

    /// Removes a layer and releases its surface.
    pub fn remove_layer(&mut self, id: &str) -> bool {
        self.layers.remove(id)
    }

    /// Flags a layer for redraw. Returns `false` for unknown ids.
    pub fn mark_layer_dirty(&mut self, id: &str) -> bool {
        match self.layers.get_mut(id) {
            Some(layer) => {
                layer.mark_dirty();
                true
            }
            None => false,
        }
    }

    /// Resizes every layer, e.g. after the host canvas changed size.
    pub fn resize_layers(&mut self, width: u32, height: u32) {
        self.layers.resize_all(width, height);
    }

    // --- Culling ---

    /// Keeps the nodes intersecting the padded viewport.
    ///
    /// Records `input - output` as the culled node count, replacing the
    /// previous value.
    pub fn cull_nodes<'a, T>(
        &mut self,
        nodes: &'a [VisualNode<T>],
        viewport: &Aabb,
    ) -> Vec<&'a VisualNode<T>> {
        let visible = if self.config.enable_culling {
            culling::cull_nodes(
                nodes,
                viewport,
                self.config.viewport_padding,
                self.config.default_node_size,
            )
        } else {
            nodes.iter().collect()
        };
        self.culled_nodes = nodes.len() - visible.len();
        log::trace!(
            "Optimizer: culled {} of {} nodes",
            self.culled_nodes,
            nodes.len()
        );
        visible
    }

    /// Keeps the resolvable edges intersecting the padded viewport.
    ///
    /// Edges with an unresolved endpoint are dropped even when culling is off.
    pub fn cull_edges<'a, T>(
        &mut self,
        edges: &'a [VisualEdge],
        index: &NodeIndex<'_, T>,
        viewport: &Aabb,
    ) -> Vec<&'a VisualEdge> {
        let visible = if self.config.enable_culling {
            culling::cull_edges(edges, index, viewport, self.config.viewport_padding)
        } else {
            culling::resolvable_edges(edges, index)
        };
        self.culled_edges = edges.len() - visible.len();
        visible
    }

    // --- Batching ---

    /// Splits nodes into batches of `max_batch_size`, in input order.
    ///
    /// With batching off a single batch holds everything.
    pub fn create_batches<'a, T: 'a>(
        &mut self,
        nodes: impl IntoIterator<Item = &'a VisualNode<T>>,
        edges: impl IntoIterator<Item = &'a VisualEdge>,
    ) -> Vec<RenderBatch<'a, T>> {
        let size = self.config.default_node_size;
        let batches = if self.config.enable_batching {
            batching::create_batches(nodes, edges, self.config.max_batch_size, size)
        } else {
            vec![batching::single_batch(nodes, edges, size)]
        };
        self.batch_count = batches.len();
        batches
    }

    // --- Frame pooling ---

    /// Requests a callback on the next frame. `None` when the platform cannot schedule frames.
    pub fn request_frame<F>(&mut self, callback: F) -> Option<FrameRequestId>
    where
        F: FnOnce(f64) + Send + 'static,
    {
        self.frames.request(callback)
    }

    /// Cancels one pending frame request.
    pub fn cancel_frame(&mut self, id: FrameRequestId) {
        self.frames.cancel(id);
    }

    /// Cancels every pending frame request.
    pub fn cancel_all_frames(&mut self) {
        self.frames.cancel_all();
    }

    /// Number of frame requests not yet fired.
    pub fn pending_frames(&self) -> usize {
        self.frames.pending()
    }

    // --- WebGL ---

    /// Whether the GPU path should be used for `node_count` nodes.
    pub fn should_use_webgl(&self, node_count: usize) -> bool {
        webgl::should_use_webgl(self.config.strategy, node_count, self.config.webgl_threshold)
    }

    /// Creates the GPU context and links the point-sprite program.
    ///
    /// Calling it again replaces the previous program.
    pub fn init_webgl(&mut self, width: u32, height: u32) -> Result<ProgramHandle> {
        let resources = WebGlResources::init(self.platform.graphics.as_deref(), width, height)?;
        let program = resources.program();
        if let Some(previous) = self.webgl.replace(resources) {
            previous.release();
        }
        Ok(program)
    }

    /// The initialised GPU resources, if any.
    pub fn webgl_mut(&mut self) -> Option<&mut WebGlResources> {
        self.webgl.as_mut()
    }

    // --- Statistics ---

    /// A snapshot of the active techniques and counters.
    pub fn get_stats(&self) -> RenderStats {
        RenderStats {
            strategy: self.config.strategy,
            techniques: TechniqueFlags::from(&self.config),
            culled_nodes: self.culled_nodes,
            culled_edges: self.culled_edges,
            batch_count: self.batch_count,
            layer_count: self.layers.len(),
            dirty_region_count: self.dirty.len(),
            pending_frames: self.frames.pending(),
            webgl_ready: self.webgl.is_some(),
        }
    }

    /// Zeroes the counters. Configuration and layers are kept.
    pub fn reset_stats(&mut self) {
        self.culled_nodes = 0;
        self.culled_edges = 0;
        self.batch_count = 0;
    }

    /// Cancels all frame requests, releases every layer and the GPU program,
    /// and drops pending dirty regions.
    pub fn destroy(&mut self) {
        self.frames.cancel_all();
        self.layers.clear();
        self.dirty.clear();
        if let Some(resources) = self.webgl.take() {
            resources.release();
        }
        self.reset_stats();
        log::debug!("Optimizer: destroyed");
    }
}

impl Drop for RenderOptimizer {
    fn drop(&mut self) {
        self.frames.cancel_all();
    }
}
