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

//! # VizPerf Infra
//!
//! Concrete implementations of the platform contracts declared in
//! `vizperf_core::platform`.
//!
//! - [`SystemClock`]: monotonic wall-clock time.
//! - [`QueuedFrameScheduler`]: frame callbacks run when the host pumps a refresh.
//! - [`SoftwareGraphics`]: in-memory RGBA surfaces.
//! - [`SysinfoMemoryMonitor`] and [`SysinfoDeviceProfile`]: process and device
//!   figures from the `sysinfo` crate.

#![warn(missing_docs)]

pub mod platform;
pub mod telemetry;

pub use platform::clock::SystemClock;
pub use platform::frames::QueuedFrameScheduler;
pub use platform::graphics::{SoftwareGraphics, SoftwareSurface};
pub use platform::sysinfo_impl::SysinfoDeviceProfile;
pub use platform::{native_platform, NativePlatform};
pub use telemetry::memory_monitor::SysinfoMemoryMonitor;
