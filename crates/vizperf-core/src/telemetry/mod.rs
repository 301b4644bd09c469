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

//! Provides the data structures shared by every consumer of performance telemetry.
//!
//! The profiler in `vizperf-telemetry` produces these values; the adaptive
//! quality controller and the dashboard only ever read them.

pub mod report;
pub mod sample;
pub mod source;
pub mod warning;

pub use self::report::{PerformanceReport, ReportSummary};
pub use self::sample::PerformanceSample;
pub use self::source::{FixedFrameMetrics, FrameMetricsSource};
pub use self::warning::{PerformanceWarning, Severity};
