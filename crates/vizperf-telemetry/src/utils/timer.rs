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

//! RAII frame bracketing. (RAII = Resource Acquisition Is Initialization)

use crate::profiler::Profiler;
use std::ops::{Deref, DerefMut};

/// Brackets one render: marks the frame start on creation and the frame end
/// when dropped.
///
/// The measurement is recorded even on early returns. The guard derefs to the
/// profiler so counts and metrics can be updated while the frame is open.
pub struct ScopedFrameTimer<'a> {
    profiler: &'a mut Profiler,
}

impl<'a> ScopedFrameTimer<'a> {
    /// Marks the start of a frame on `profiler`.
    pub fn new(profiler: &'a mut Profiler) -> Self {
        profiler.mark_frame_start();
        Self { profiler }
    }
}

impl Deref for ScopedFrameTimer<'_> {
    type Target = Profiler;

    fn deref(&self) -> &Profiler {
        self.profiler
    }
}

impl DerefMut for ScopedFrameTimer<'_> {
    fn deref_mut(&mut self) -> &mut Profiler {
        self.profiler
    }
}

impl Drop for ScopedFrameTimer<'_> {
    fn drop(&mut self) {
        self.profiler.mark_frame_end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProfilerConfig;
    use std::sync::Arc;
    use vizperf_core::platform::{ManualClock, Platform};

    #[test]
    fn test_scoped_timer_records_frame_on_drop() {
        let clock = ManualClock::new();
        let mut profiler = Profiler::new(
            ProfilerConfig::default(),
            Platform::with_clock(Arc::new(clock.clone())),
        );
        profiler.start();
        {
            let mut frame = ScopedFrameTimer::new(&mut profiler);
            frame.update_counts(12, 4);
            clock.advance(8.0);
        }
        assert_eq!(profiler.last_frame_time(), 8.0);
        assert_eq!(profiler.counts(), (12, 4));
    }
}
