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

//! Errors raised by the render optimizer.

use thiserror::Error;
use vizperf_core::platform::ShaderStage;

/// An error from a technique that needs graphics resources.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptimizerError {
    /// A layer surface was required by configuration but the platform could not provide one.
    #[error("no drawing surface available for layer '{layer}'")]
    SurfaceUnavailable {
        /// Id of the layer being created.
        layer: String,
    },

    /// Layer creation was requested while layering is turned off.
    #[error("layering is disabled; layer '{layer}' was not created")]
    LayeringDisabled {
        /// Id of the requested layer.
        layer: String,
    },

    /// The platform cannot create a shader-capable context.
    #[error("WebGL is not available on this platform")]
    WebGlUnavailable,

    /// A shader failed to compile.
    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompilation {
        /// The failing stage.
        stage: ShaderStage,
        /// The compiler log.
        log: String,
    },

    /// The shader program failed to link.
    #[error("failed to link shader program: {0}")]
    ProgramLink(String),
}

/// A specialized `Result` type for optimizer operations.
pub type Result<T> = std::result::Result<T, OptimizerError>;
