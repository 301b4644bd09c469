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

//! Timing helpers: a wall-clock stopwatch and a tick-polled periodic timer.

use std::time::{Duration, Instant};

/// Measures wall-clock time elapsed since its creation.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start_time: Instant,
}

impl Stopwatch {
    /// Creates a stopwatch started now.
    #[inline]
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Elapsed time since the stopwatch was started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Elapsed time in fractional milliseconds.
    #[inline]
    pub fn elapsed_ms_f64(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Fires at a fixed period when polled with the current time.
///
/// The timer never fires more than once per poll. If the host stalls for
/// several periods, the next deadline is re-anchored on the poll time instead
/// of replaying every missed period.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTimer {
    period_ms: f64,
    next_due_ms: Option<f64>,
}

impl IntervalTimer {
    /// Creates a stopped timer with the given period in milliseconds.
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms: period_ms.max(0.0),
            next_due_ms: None,
        }
    }

    /// Starts (or restarts) the timer so that it first fires one period after `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        self.next_due_ms = Some(now_ms + self.period_ms);
    }

    /// Stops the timer. Polling a stopped timer never fires.
    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    /// Whether the timer is running.
    pub fn is_active(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Returns `true` if the deadline has passed, and schedules the next one.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let Some(due) = self.next_due_ms else {
            return false;
        };
        if now_ms < due {
            return false;
        }
        let next = due + self.period_ms;
        self.next_due_ms = Some(if next <= now_ms {
            now_ms + self.period_ms
        } else {
            next
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_is_monotonic() {
        let watch = Stopwatch::new();
        let first = watch.elapsed_ms_f64();
        assert!(first >= 0.0);
        assert!(watch.elapsed_ms_f64() >= first);
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = IntervalTimer::new(100.0);
        assert!(!timer.is_active());
        assert!(!timer.poll(1_000.0));
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut timer = IntervalTimer::new(100.0);
        timer.start(0.0);
        assert!(!timer.poll(50.0));
        assert!(timer.poll(100.0));
        assert!(!timer.poll(150.0));
        assert!(timer.poll(205.0));
    }

    #[test]
    fn test_stall_does_not_cause_burst() {
        let mut timer = IntervalTimer::new(100.0);
        timer.start(0.0);
        assert!(timer.poll(1_000.0));
        assert!(!timer.poll(1_050.0));
        assert!(timer.poll(1_100.0));
    }

    #[test]
    fn test_stop_cancels() {
        let mut timer = IntervalTimer::new(10.0);
        timer.start(0.0);
        timer.stop();
        assert!(!timer.poll(100.0));
    }
}
