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

//! Canvas layers.
//!
//! Each layer is a named surface with a paint order. Static content (a grid,
//! a background graph) can live on a layer that is only redrawn when marked
//! dirty, while animated content repaints every frame on its own layer.

use crate::error::{OptimizerError, Result};
use std::sync::Arc;
use vizperf_core::platform::{GraphicsProvider, RenderSurface};

/// A named drawing surface with a paint order.
#[derive(Debug)]
pub struct RenderLayer {
    id: String,
    width: u32,
    height: u32,
    z_index: i32,
    opacity: f32,
    dirty: bool,
    surface: Option<Box<dyn RenderSurface>>,
}

impl RenderLayer {
    /// The layer id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Paint order; lower values are painted first.
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Compositing opacity in `[0, 1]`.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the layer must be redrawn.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flags the layer for redraw.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clears the redraw flag, typically after the renderer repainted the layer.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Changes the paint order.
    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    /// Changes the opacity, clamped to `[0, 1]`.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
        if let Some(surface) = self.surface.as_mut() {
            surface.set_opacity(self.opacity);
        }
        self.dirty = true;
    }

    /// The backing surface, absent on headless platforms.
    pub fn surface(&self) -> Option<&dyn RenderSurface> {
        self.surface.as_deref()
    }

    /// Mutable access to the backing surface for drawing.
    pub fn surface_mut(&mut self) -> Option<&mut (dyn RenderSurface + 'static)> {
        self.surface.as_deref_mut()
    }

    /// Whether a surface backs this layer.
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(width, height);
        }
        self.dirty = true;
    }
}

/// Owns the layers of one optimizer.
#[derive(Debug, Default)]
pub struct LayerRegistry {
    layers: Vec<RenderLayer>,
}

impl LayerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the layer with `id`, creating it if needed.
    ///
    /// An existing layer is returned unchanged. A new layer asks `graphics` for
    /// a surface; when none is available the layer is created without one,
    /// unless `require_surface` is set.
    #[allow(clippy::too_many_arguments)]
    pub fn get_or_create(
        &mut self,
        id: &str,
        width: u32,
        height: u32,
        z_index: i32,
        opacity: f32,
        graphics: Option<&Arc<dyn GraphicsProvider>>,
        require_surface: bool,
    ) -> Result<&mut RenderLayer> {
        if let Some(pos) = self.position(id) {
            return Ok(&mut self.layers[pos]);
        }

        let opacity = opacity.clamp(0.0, 1.0);
        let mut surface = graphics.and_then(|g| g.create_surface(width, height));
        match surface.as_mut() {
            Some(surface) => surface.set_opacity(opacity),
            None if require_surface => {
                return Err(OptimizerError::SurfaceUnavailable {
                    layer: id.to_string(),
                });
            }
            None => log::debug!("Optimizer: layer '{id}' created without a surface"),
        }

        self.layers.push(RenderLayer {
            id: id.to_string(),
            width,
            height,
            z_index,
            opacity,
            dirty: true,
            surface,
        });
        let last = self.layers.len() - 1;
        Ok(&mut self.layers[last])
    }

    /// Looks up a layer.
    pub fn get(&self, id: &str) -> Option<&RenderLayer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    /// Looks up a layer for mutation.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut RenderLayer> {
        self.layers.iter_mut().find(|layer| layer.id == id)
    }

    /// All layers in paint order. Layers with equal z-index keep creation order.
    pub fn sorted(&self) -> Vec<&RenderLayer> {
        let mut layers: Vec<&RenderLayer> = self.layers.iter().collect();
        layers.sort_by_key(|layer| layer.z_index);
        layers
    }

    /// Removes a layer and releases its surface. Returns `false` for unknown ids.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(pos) => {
                self.layers.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Resizes every layer.
    pub fn resize_all(&mut self, width: u32, height: u32) {
        for layer in &mut self.layers {
            layer.resize(width, height);
        }
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether there are no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Releases every layer.
    pub fn clear(&mut self) {
        self.layers.clear();
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::any::Any;

    #[derive(Debug)]
    struct NullSurface {
        width: u32,
        height: u32,
        opacity: f32,
    }

    impl RenderSurface for NullSurface {
        fn width(&self) -> u32 {
            self.width
        }
        fn height(&self) -> u32 {
            self.height
        }
        fn resize(&mut self, width: u32, height: u32) {
            self.width = width;
            self.height = height;
        }
        fn clear(&mut self) {}
        fn set_opacity(&mut self, opacity: f32) {
            self.opacity = opacity;
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[derive(Debug)]
    struct NullGraphics;

    impl GraphicsProvider for NullGraphics {
        fn create_surface(&self, width: u32, height: u32) -> Option<Box<dyn RenderSurface>> {
            Some(Box::new(NullSurface {
                width,
                height,
                opacity: 1.0,
            }))
        }
    }

    #[test]
    fn test_creation_is_idempotent_by_id() {
        let mut registry = LayerRegistry::new();
        registry
            .get_or_create("nodes", 100, 100, 2, 1.0, None, false)
            .unwrap();
        let again = registry
            .get_or_create("nodes", 999, 999, 7, 0.1, None, false)
            .unwrap();
        assert_eq!(again.z_index(), 2);
        assert_eq!(again.width(), 100);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_sorted_by_z_index() {
        let mut registry = LayerRegistry::new();
        for (id, z) in [("top", 10), ("bottom", -1), ("middle", 3)] {
            registry.get_or_create(id, 10, 10, z, 1.0, None, false).unwrap();
        }
        let order: Vec<&str> = registry.sorted().iter().map(|l| l.id()).collect();
        assert_eq!(order, vec!["bottom", "middle", "top"]);
    }

    #[test]
    fn test_required_surface_missing_is_an_error() {
        let mut registry = LayerRegistry::new();
        let err = registry
            .get_or_create("nodes", 10, 10, 0, 1.0, None, true)
            .unwrap_err();
        assert_eq!(
            err,
            OptimizerError::SurfaceUnavailable {
                layer: "nodes".to_string()
            }
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_surface_backed_layer_resize_and_opacity() {
        let graphics: Arc<dyn GraphicsProvider> = Arc::new(NullGraphics);
        let mut registry = LayerRegistry::new();
        let layer = registry
            .get_or_create("edges", 10, 20, 0, 1.5, Some(&graphics), true)
            .unwrap();
        assert!(layer.has_surface());
        assert_relative_eq!(layer.opacity(), 1.0);
        layer.mark_clean();
        layer.set_opacity(0.5);
        assert!(layer.is_dirty());

        registry.resize_all(64, 32);
        let layer = registry.get("edges").unwrap();
        assert_eq!(layer.width(), 64);
        let surface = layer
            .surface()
            .unwrap()
            .as_any()
            .downcast_ref::<NullSurface>()
            .unwrap();
        assert_eq!((surface.width, surface.height), (64, 32));
        assert_relative_eq!(surface.opacity, 0.5);
    }

    #[test]
    fn test_remove_forgets_layer() {
        let mut registry = LayerRegistry::new();
        registry.get_or_create("a", 1, 1, 0, 1.0, None, false).unwrap();
        assert!(registry.remove("a"));
        assert!(!registry.remove("a"));
        assert!(registry.get("a").is_none());
    }
}
