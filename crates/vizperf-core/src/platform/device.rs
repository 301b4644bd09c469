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

//! Device characteristics used for quality heuristics.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Describes the rendering capabilities of the host device.
pub trait DeviceProfile: Send + Sync + Debug {
    /// Whether a shader-capable 3D context can be created.
    fn supports_webgl(&self) -> bool;
    /// Whether the second-generation 3D context is available.
    fn supports_webgl2(&self) -> bool;
    /// Physical pixels per logical pixel.
    fn pixel_ratio(&self) -> f64;
    /// Number of logical CPU cores.
    fn logical_cores(&self) -> usize;
    /// Heap ceiling in megabytes, if known.
    fn heap_limit_mb(&self) -> Option<f64>;
}

/// A device profile with fixed, caller-supplied values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticDeviceProfile {
    /// See [`DeviceProfile::supports_webgl`].
    pub webgl: bool,
    /// See [`DeviceProfile::supports_webgl2`].
    pub webgl2: bool,
    /// See [`DeviceProfile::pixel_ratio`].
    pub pixel_ratio: f64,
    /// See [`DeviceProfile::logical_cores`].
    pub logical_cores: usize,
    /// See [`DeviceProfile::heap_limit_mb`].
    pub heap_limit_mb: Option<f64>,
}

impl Default for StaticDeviceProfile {
    fn default() -> Self {
        Self {
            webgl: false,
            webgl2: false,
            pixel_ratio: 1.0,
            logical_cores: 1,
            heap_limit_mb: None,
        }
    }
}

impl DeviceProfile for StaticDeviceProfile {
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
