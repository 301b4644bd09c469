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

//! Heap usage queries.

use std::fmt::Debug;

/// Reports the process heap usage.
pub trait MemoryMonitor: Send + Sync + Debug {
    /// Heap currently in use, in megabytes, or `None` if it cannot be measured.
    fn used_heap_mb(&self) -> Option<f64>;

    /// Heap ceiling in megabytes, if known.
    fn heap_limit_mb(&self) -> Option<f64> {
        None
    }
}
