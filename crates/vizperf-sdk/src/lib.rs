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

//! The public-facing SDK of the VizPerf rendering-performance engine.
//!
//! [`VizPerf`] owns the four components (profiler, optimizer, adaptive
//! quality controller and dashboard) and drives them from a single `tick`.
//! Hosts that only need one component can depend on its crate directly.

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod monitor;

pub use config::EngineConfig;
pub use engine::{RenderPass, TickOutcome, VizPerf};
pub use monitor::{
    DashboardInputs, DisplayMode, KeyChord, MonitorAction, MonitorConfig, OverlayPosition,
    PerformanceMonitor,
};

/// Re-exports the types most hosts need.
pub mod prelude {
    pub use crate::{EngineConfig, KeyChord, RenderPass, VizPerf};
    pub use vizperf_control::{AdaptiveQuality, QualityChange, QualityConfig};
    pub use vizperf_core::control::{QualityLevel, QualityPreset};
    pub use vizperf_core::graph::{NodeStyle, VisualEdge, VisualNode};
    pub use vizperf_core::math::{Aabb, DirtyRect, Vec2, Vec3};
    pub use vizperf_core::platform::Platform;
    pub use vizperf_lanes::{OptimizerConfig, RenderBatch, RenderOptimizer, RenderStrategy};
    pub use vizperf_telemetry::{Profiler, ProfilerConfig};
}
