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

//! GPU point rendering support.
//!
//! Large scenes can be drawn as antialiased point sprites. This module only
//! decides whether to use the GPU path and prepares the program; the draw
//! calls belong to the host renderer.

use crate::config::RenderStrategy;
use crate::error::{OptimizerError, Result};
use vizperf_core::platform::{GlContext, GraphicsProvider, ProgramHandle, ShaderStage};

/// Vertex stage of the point-sprite program.
///
/// Attributes: `a_position`, `a_size`, `a_color`. Uniforms: `u_resolution`,
/// `u_translation`, `u_scale`.
pub const POINT_SPRITE_VERT: &str = include_str!("shaders/point_sprite.vert");

/// Fragment stage of the point-sprite program. Draws round, edge-smoothed points.
pub const POINT_SPRITE_FRAG: &str = include_str!("shaders/point_sprite.frag");

/// Whether the GPU path should be used for a scene of `node_count` nodes.
pub fn should_use_webgl(strategy: RenderStrategy, node_count: usize, threshold: usize) -> bool {
    match strategy {
        RenderStrategy::WebGl => true,
        RenderStrategy::Hybrid => node_count >= threshold,
        RenderStrategy::Canvas2d | RenderStrategy::Svg => false,
    }
}

/// A shader-capable context with the point-sprite program linked.
#[derive(Debug)]
pub struct WebGlResources {
    context: Box<dyn GlContext>,
    program: ProgramHandle,
}

impl WebGlResources {
    /// Creates a context and compiles and links the point-sprite program.
    ///
    /// Compiled shaders are released once linking has been attempted, and on
    /// every failure path.
    pub fn init(
        graphics: Option<&dyn GraphicsProvider>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let mut context = graphics
            .and_then(|g| g.create_gl_context(width, height))
            .ok_or(OptimizerError::WebGlUnavailable)?;

        let vertex = context
            .compile_shader(ShaderStage::Vertex, POINT_SPRITE_VERT)
            .map_err(|log| OptimizerError::ShaderCompilation {
                stage: ShaderStage::Vertex,
                log,
            })?;
        let fragment = match context.compile_shader(ShaderStage::Fragment, POINT_SPRITE_FRAG) {
            Ok(fragment) => fragment,
            Err(log) => {
                context.delete_shader(vertex);
                return Err(OptimizerError::ShaderCompilation {
                    stage: ShaderStage::Fragment,
                    log,
                });
            }
        };
        let linked = context.link_program(vertex, fragment);
        context.delete_shader(vertex);
        context.delete_shader(fragment);
        let program = linked.map_err(OptimizerError::ProgramLink)?;

        log::info!("Optimizer: WebGL point-sprite program ready ({width}x{height})");
        Ok(Self { context, program })
    }

    /// The linked program.
    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    /// The context, for issuing draw calls.
    pub fn context_mut(&mut self) -> &mut dyn GlContext {
        self.context.as_mut()
    }

    /// Deletes the program.
    pub fn release(mut self) {
        self.context.delete_program(self.program);
    }
}
