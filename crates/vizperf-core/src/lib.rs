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

//! # VizPerf Core
//!
//! Foundational crate containing the data model, telemetry value types,
//! quality presets and the platform capability contracts shared by every
//! other crate of the rendering-performance engine.
//!
//! This crate defines the abstract "what": `vizperf-telemetry`,
//! `vizperf-lanes` and `vizperf-control` build the engine components on top
//! of it, and `vizperf-infra` provides concrete platform implementations.

#![warn(missing_docs)]

pub mod control;
pub mod error;
pub mod graph;
pub mod math;
pub mod platform;
pub mod telemetry;
pub mod utils;

pub use error::{CoreError, CoreResult};
pub use utils::timer::{IntervalTimer, Stopwatch};
