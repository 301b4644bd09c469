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

//! sysinfo-based implementation of the DeviceProfile trait.

use sysinfo::System;
use vizperf_core::platform::DeviceProfile;

/// Device characteristics read from the host system.
///
/// CPU and memory figures come from `sysinfo`. GPU capabilities and pixel
/// density are not observable from here and default to "no GPU, ratio 1";
/// hosts that know better set them with the builder methods.
#[derive(Debug, Clone, PartialEq)]
pub struct SysinfoDeviceProfile {
    logical_cores: usize,
    heap_limit_mb: Option<f64>,
    webgl: bool,
    webgl2: bool,
    pixel_ratio: f64,
}

impl SysinfoDeviceProfile {
    /// Reads core count and total memory from the system.
    pub fn detect() -> Self {
        let mut system = System::new();
        system.refresh_cpu_all();
        system.refresh_memory();
        let total = system.total_memory();
        let profile = Self {
            logical_cores: system.cpus().len().max(1),
            heap_limit_mb: (total > 0).then(|| total as f64 / (1024.0 * 1024.0)),
            webgl: false,
            webgl2: false,
            pixel_ratio: 1.0,
        };
        log::debug!(
            "Device profile: {} logical cores, {:?} MB memory",
            profile.logical_cores,
            profile.heap_limit_mb.map(|mb| mb.round())
        );
        profile
    }

    /// Declares the GPU capabilities of the host.
    pub fn with_gpu(mut self, webgl: bool, webgl2: bool) -> Self {
        self.webgl = webgl || webgl2;
        self.webgl2 = webgl2;
        self
    }

    /// Declares the display pixel density.
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio.max(0.0);
        self
    }
}

impl Default for SysinfoDeviceProfile {
    fn default() -> Self {
        Self::detect()
    }
}

impl DeviceProfile for SysinfoDeviceProfile {
    fn supports_webgl(&self) -> bool {
        self.webgl
    }

    fn supports_webgl2(&self) -> bool {
        self.webgl2
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn logical_cores(&self) -> usize {
        self.logical_cores
    }

    fn heap_limit_mb(&self) -> Option<f64> {
        self.heap_limit_mb
    }
}
