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

//! Evaluation heuristics for the quality controller.
//!
//! [`QualityHeuristics`] turns a rolling fps window into a [`Decision`].
//! It is pure: applying the decision (and respecting the quality band) is
//! the controller's job.

use crate::config::QualityConfig;
use crate::metrics::RingBuffer;
use vizperf_core::control::Direction;

/// Fps spread (standard deviation) above which the window is reported as unstable.
const FPS_STDDEV_UNSTABLE: f64 = 10.0;

/// Why an evaluation produced no transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldReason {
    /// The rolling window is not full yet.
    ColdStart,
    /// The average lies inside the dead band.
    WithinTolerance,
    /// The average is out of band but the matching auto-adjust flag is off.
    AutoAdjustDisabled,
}

/// The outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Request a single-step transition.
    Step(Direction),
    /// Keep the current level.
    Hold(HoldReason),
}

/// What the heuristics saw and decided.
#[derive(Debug, Clone)]
pub struct Assessment {
    /// Window average, or 0 during cold start.
    pub average_fps: f64,
    /// The decision.
    pub decision: Decision,
    /// Human-readable observations for logging.
    pub alerts: Vec<String>,
}

/// Maps a rolling fps window to a transition decision.
pub struct QualityHeuristics;

impl QualityHeuristics {
    /// Assesses the window against the configured target and dead band.
    ///
    /// Nothing is decided until the window is full. At most one step is
    /// requested regardless of how far the average is from the target.
    pub fn assess(window: &RingBuffer, config: &QualityConfig) -> Assessment {
        let mut alerts = Vec::new();

        if !window.is_full() {
            return Assessment {
                average_fps: 0.0,
                decision: Decision::Hold(HoldReason::ColdStart),
                alerts,
            };
        }

        let average = window.average();
        let lower = config.target_fps - config.fps_tolerance;
        let upper = config.target_fps + config.fps_tolerance;

        let stddev = window.variance().sqrt();
        if stddev > FPS_STDDEV_UNSTABLE {
            alerts.push(format!(
                "Unstable frame rate: {:.1} fps spread over {} readings",
                stddev,
                window.count()
            ));
        }

        let decision = if average < lower {
            alerts.push(format!("Average {:.1} fps below {:.1}", average, lower));
            if config.auto_downgrade {
                Decision::Step(Direction::Down)
            } else {
                Decision::Hold(HoldReason::AutoAdjustDisabled)
            }
        } else if average > upper {
            if config.auto_upgrade {
                Decision::Step(Direction::Up)
            } else {
                Decision::Hold(HoldReason::AutoAdjustDisabled)
            }
        } else {
            Decision::Hold(HoldReason::WithinTolerance)
        };

        Assessment {
            average_fps: average,
            decision,
            alerts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_of(values: &[f64]) -> RingBuffer {
        let mut w = RingBuffer::new(values.len());
        for v in values {
            w.push(*v);
        }
        w
    }

    #[test]
    fn test_cold_start_holds() {
        let mut w = RingBuffer::new(5);
        w.push(10.0);
        let a = QualityHeuristics::assess(&w, &QualityConfig::default());
        assert_eq!(a.decision, Decision::Hold(HoldReason::ColdStart));
    }

    #[test]
    fn test_low_average_steps_down() {
        let w = window_of(&[30.0; 5]);
        let a = QualityHeuristics::assess(&w, &QualityConfig::default());
        assert_eq!(a.decision, Decision::Step(Direction::Down));
        assert_eq!(a.average_fps, 30.0);
    }

    #[test]
    fn test_high_average_steps_up() {
        let w = window_of(&[70.0; 5]);
        let a = QualityHeuristics::assess(&w, &QualityConfig::default());
        assert_eq!(a.decision, Decision::Step(Direction::Up));
    }

    #[test]
    fn test_dead_band_is_inclusive() {
        let config = QualityConfig::default();
        let lower = QualityHeuristics::assess(&window_of(&[55.0; 5]), &config);
        let upper = QualityHeuristics::assess(&window_of(&[65.0; 5]), &config);
        assert_eq!(lower.decision, Decision::Hold(HoldReason::WithinTolerance));
        assert_eq!(upper.decision, Decision::Hold(HoldReason::WithinTolerance));
    }

    #[test]
    fn test_disabled_auto_adjust_holds() {
        let config = QualityConfig {
            auto_downgrade: false,
            ..Default::default()
        };
        let a = QualityHeuristics::assess(&window_of(&[10.0; 5]), &config);
        assert_eq!(a.decision, Decision::Hold(HoldReason::AutoAdjustDisabled));
    }

    #[test]
    fn test_unstable_window_raises_alert() {
        let a = QualityHeuristics::assess(
            &window_of(&[20.0, 80.0, 20.0, 80.0]),
            &QualityConfig::default(),
        );
        assert!(a.alerts.iter().any(|m| m.contains("Unstable")));
    }
}
