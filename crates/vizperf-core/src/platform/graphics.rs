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

//! Graphics surface contracts.
//!
//! A [`GraphicsProvider`] creates the 2D surfaces that back render layers and,
//! optionally, a shader-capable context used for point-based rendering of
//! large scenes.

use std::fmt::{self, Debug};

/// A drawable 2D surface owned by a render layer.
pub trait RenderSurface: Send + Debug {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
    /// Resizes the surface, discarding its contents.
    fn resize(&mut self, width: u32, height: u32);
    /// Clears the whole surface.
    fn clear(&mut self);
    /// Sets the compositing opacity in `[0, 1]`.
    fn set_opacity(&mut self, opacity: f32);
    /// Allows downcasting to the concrete surface type.
    fn as_any(&self) -> &dyn std::any::Any;
    /// Allows mutable downcasting to the concrete surface type.
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// The programmable pipeline stage a shader belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Per-vertex stage.
    Vertex,
    /// Per-fragment stage.
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Identifies a compiled shader inside a [`GlContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Identifies a linked program inside a [`GlContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// A shader-capable rendering context.
pub trait GlContext: Send + Debug {
    /// Compiles a shader, returning the compiler log on failure.
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderHandle, String>;
    /// Links a vertex/fragment pair, returning the linker log on failure.
    fn link_program(
        &mut self,
        vertex: ShaderHandle,
        fragment: ShaderHandle,
    ) -> Result<ProgramHandle, String>;
    /// Releases a compiled shader. A linked program keeps working after its
    /// shaders are deleted.
    fn delete_shader(&mut self, shader: ShaderHandle);
    /// Releases a linked program.
    fn delete_program(&mut self, program: ProgramHandle);
}

/// Factory for graphics resources.
pub trait GraphicsProvider: Send + Sync + Debug {
    /// Creates a 2D surface, or `None` if surfaces are unavailable.
    fn create_surface(&self, width: u32, height: u32) -> Option<Box<dyn RenderSurface>>;

    /// Creates a shader-capable context, or `None` if unsupported.
    fn create_gl_context(&self, width: u32, height: u32) -> Option<Box<dyn GlContext>> {
        let _ = (width, height);
        None
    }
}
