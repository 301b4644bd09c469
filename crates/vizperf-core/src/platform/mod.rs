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

//! Provides abstractions over the host platform's capabilities.
//!
//! The engine never sniffs its environment. Every platform dependency (clock,
//! frame-synchronised callbacks, graphics surfaces, heap queries and device
//! characteristics) is injected through a [`Platform`] bundle. Everything but
//! the clock is optional: a missing capability degrades to a no-op, zero or
//! `false`, so sampling, culling and batching keep working headless.

pub mod clock;
pub mod device;
pub mod frame;
pub mod graphics;
pub mod memory;

pub use clock::{Clock, ManualClock};
pub use device::{DeviceProfile, StaticDeviceProfile};
pub use frame::{FrameCallback, FrameHandle, FrameScheduler};
pub use graphics::{
    GlContext, GraphicsProvider, ProgramHandle, RenderSurface, ShaderHandle, ShaderStage,
};
pub use memory::MemoryMonitor;

use std::sync::Arc;

/// The set of capabilities available to the engine.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Time source. Always present.
    pub clock: Arc<dyn Clock>,
    /// Frame-synchronised callback primitive, if the host has one.
    pub frames: Option<Arc<dyn FrameScheduler>>,
    /// Graphics surface factory, if the host can draw.
    pub graphics: Option<Arc<dyn GraphicsProvider>>,
    /// Heap usage query, if supported.
    pub memory: Option<Arc<dyn MemoryMonitor>>,
    /// Device characteristics, if known.
    pub device: Option<Arc<dyn DeviceProfile>>,
}

impl Platform {
    /// A platform with only a clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            frames: None,
            graphics: None,
            memory: None,
            device: None,
        }
    }

    /// A headless platform driven by a fresh [`ManualClock`].
    pub fn headless() -> Self {
        Self::with_clock(Arc::new(ManualClock::new()))
    }

    /// Adds a frame scheduler.
    pub fn frames(mut self, frames: Arc<dyn FrameScheduler>) -> Self {
        self.frames = Some(frames);
        self
    }

    /// Adds a graphics provider.
    pub fn graphics(mut self, graphics: Arc<dyn GraphicsProvider>) -> Self {
        self.graphics = Some(graphics);
        self
    }

    /// Adds a memory monitor.
    pub fn memory(mut self, memory: Arc<dyn MemoryMonitor>) -> Self {
        self.memory = Some(memory);
        self
    }

    /// Adds a device profile.
    pub fn device(mut self, device: Arc<dyn DeviceProfile>) -> Self {
        self.device = Some(device);
        self
    }

    /// Current clock time in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::headless()
    }
}
