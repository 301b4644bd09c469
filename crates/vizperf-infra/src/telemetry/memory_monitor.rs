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

//! Process memory monitor.

use std::sync::Mutex;
use sysinfo::{Pid, ProcessesToUpdate, System};
use vizperf_core::platform::MemoryMonitor;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Reports the resident memory of the current process as heap usage.
#[derive(Debug)]
pub struct SysinfoMemoryMonitor {
    pid: Option<Pid>,
    system: Mutex<System>,
    total_mb: Option<f64>,
}

impl SysinfoMemoryMonitor {
    /// Creates a monitor for the current process.
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                log::warn!("Memory monitor: current process id unavailable: {e}");
                None
            }
        };
        let mut system = System::new();
        system.refresh_memory();
        let total = system.total_memory();
        Self {
            pid,
            system: Mutex::new(system),
            total_mb: (total > 0).then(|| total as f64 / BYTES_PER_MB),
        }
    }
}

impl Default for SysinfoMemoryMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryMonitor for SysinfoMemoryMonitor {
    fn used_heap_mb(&self) -> Option<f64> {
        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        system
            .process(pid)
            .map(|process| process.memory() as f64 / BYTES_PER_MB)
    }

    fn heap_limit_mb(&self) -> Option<f64> {
        self.total_mb
    }
}
