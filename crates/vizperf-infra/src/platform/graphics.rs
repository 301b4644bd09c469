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

//! In-memory RGBA surfaces.

use std::any::Any;
use vizperf_core::platform::{GraphicsProvider, RenderSurface};

/// A CPU-side RGBA8 surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftwareSurface {
    width: u32,
    height: u32,
    opacity: f32,
    pixels: Vec<u8>,
}

impl SoftwareSurface {
    /// Creates a transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            opacity: 1.0,
            pixels: vec![0; Self::byte_len(width, height)],
        }
    }

    fn byte_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * 4
    }

    /// Compositing opacity.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Fills a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, rgba: [u8; 4]) {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (x.saturating_add(width as i32)).clamp(0, self.width as i32) as u32;
        let y1 = (y.saturating_add(height as i32)).clamp(0, self.height as i32) as u32;
        for row in y0..y1 {
            for col in x0..x1 {
                let i = (row as usize * self.width as usize + col as usize) * 4;
                self.pixels[i..i + 4].copy_from_slice(&rgba);
            }
        }
    }
}

impl RenderSurface for SoftwareSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; Self::byte_len(width, height)];
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Creates [`SoftwareSurface`]s. Has no shader-capable context.
#[derive(Debug, Clone, Default)]
pub struct SoftwareGraphics {
    max_dimension: Option<u32>,
}

impl SoftwareGraphics {
    /// A provider without size limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider refusing surfaces wider or taller than `max_dimension`.
    pub fn with_max_dimension(max_dimension: u32) -> Self {
        Self {
            max_dimension: Some(max_dimension),
        }
    }
}

impl GraphicsProvider for SoftwareGraphics {
    fn create_surface(&self, width: u32, height: u32) -> Option<Box<dyn RenderSurface>> {
        if let Some(max) = self.max_dimension {
            if width > max || height > max {
                log::warn!("Software graphics: refusing {width}x{height} surface (max {max})");
                return None;
            }
        }
        Some(Box::new(SoftwareSurface::new(width, height)))
    }
}
