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

//! # VizPerf Telemetry
//!
//! Continuous, low-overhead measurement of the rendering loop.
//!
//! The [`Profiler`] tracks frame timing, frame rate, heap usage and scene
//! size, raises threshold-based warnings and turns its bounded sample history
//! into a [`PerformanceReport`](vizperf_core::telemetry::PerformanceReport).

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod frame_loop;
pub mod history;
pub mod profiler;
pub mod report;
pub mod utils;

pub use config::{PerformanceThresholds, ProfilerConfig};
pub use error::{ProfilerError, Result};
pub use frame_loop::FrameLoop;
pub use history::BoundedHistory;
pub use profiler::Profiler;
pub use utils::timer::ScopedFrameTimer;
