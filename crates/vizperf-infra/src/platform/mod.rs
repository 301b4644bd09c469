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

//! Platform providers and the native platform bundle.

pub mod clock;
pub mod frames;
pub mod graphics;
pub mod sysinfo_impl;

use crate::telemetry::memory_monitor::SysinfoMemoryMonitor;
use std::sync::Arc;
use vizperf_core::platform::Platform;

/// The native platform together with the frame scheduler the host must pump.
#[derive(Debug, Clone)]
pub struct NativePlatform {
    /// Capabilities to hand to the engine.
    pub platform: Platform,
    /// Call [`QueuedFrameScheduler::pump`](frames::QueuedFrameScheduler::pump)
    /// once per display refresh.
    pub frames: Arc<frames::QueuedFrameScheduler>,
}

/// Builds a platform with every native capability: system clock, pumped
/// frame scheduler, software surfaces, process memory monitor and device profile.
pub fn native_platform() -> NativePlatform {
    let frames = Arc::new(frames::QueuedFrameScheduler::new());
    let platform = Platform::with_clock(Arc::new(clock::SystemClock::new()))
        .frames(frames.clone())
        .graphics(Arc::new(graphics::SoftwareGraphics::new()))
        .memory(Arc::new(SysinfoMemoryMonitor::new()))
        .device(Arc::new(sysinfo_impl::SysinfoDeviceProfile::detect()));
    log::info!("Native platform initialised");
    NativePlatform { platform, frames }
}
