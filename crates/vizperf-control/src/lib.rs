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

//! # VizPerf Control
//!
//! The adaptive quality controller: a discrete state machine over
//! `low < medium < high < ultra` driven by sustained frame-rate history.
//!
//! Transitions are a pure function of the current level, a direction and
//! the configured band ([`QualityLevel::step`](vizperf_core::control::QualityLevel::step)).
//! The timer-driven loop in [`AdaptiveQuality`] only decides *when* to ask.

#![warn(missing_docs)]

pub mod analysis;
pub mod config;
pub mod device;
pub mod error;
pub mod events;
pub mod metrics;
pub mod progressive;
pub mod quality;
pub mod throttle;

pub use analysis::{Assessment, Decision, HoldReason, QualityHeuristics};
pub use config::QualityConfig;
pub use error::{QualityError, Result};
pub use events::{ChangeReason, QualityChange};
pub use metrics::RingBuffer;
pub use progressive::{ProgressiveRenderer, RenderTask};
pub use quality::{AdaptiveQuality, RecommendedLimits};
