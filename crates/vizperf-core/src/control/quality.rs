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

//! Quality tiers, level-of-detail settings and the preset table.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The four discrete fidelity tiers, ordered from cheapest to richest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    /// Minimum fidelity.
    Low,
    /// Reduced fidelity.
    Medium,
    /// Full fidelity without the most expensive effects.
    #[default]
    High,
    /// Every effect enabled.
    Ultra,
}

/// Direction of a single-step quality transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards `Ultra`.
    Up,
    /// Towards `Low`.
    Down,
}

impl QualityLevel {
    /// All tiers in ascending order.
    pub const ALL: [QualityLevel; 4] = [
        QualityLevel::Low,
        QualityLevel::Medium,
        QualityLevel::High,
        QualityLevel::Ultra,
    ];

    /// Position of the tier in [`QualityLevel::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            QualityLevel::Low => "low",
            QualityLevel::Medium => "medium",
            QualityLevel::High => "high",
            QualityLevel::Ultra => "ultra",
        }
    }

    /// Computes a one-step transition clamped to the `[min, max]` band.
    ///
    /// Returns `None` when the step would leave the band or run past either
    /// end of the tier list. A band given in reverse order is normalised.
    pub fn step(self, direction: Direction, min: QualityLevel, max: QualityLevel) -> Option<Self> {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let next = match direction {
            Direction::Up => Self::ALL.get(self.index() + 1).copied()?,
            Direction::Down => Self::ALL.get(self.index().checked_sub(1)?).copied()?,
        };
        (lo..=hi).contains(&next).then_some(next)
    }

    /// Clamps the level into the `[min, max]` band.
    pub fn clamp_to(self, min: QualityLevel, max: QualityLevel) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.max(lo).min(hi)
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(QualityLevel::Low),
            "medium" => Ok(QualityLevel::Medium),
            "high" => Ok(QualityLevel::High),
            "ultra" => Ok(QualityLevel::Ultra),
            _ => Err(CoreError::UnknownQualityLevel(s.to_string())),
        }
    }
}

/// Level-of-detail parameters derived from the active quality preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LodSettings {
    /// Nodes farther than this distance are simplified away.
    pub node_simplification_distance: f32,
    /// Edges farther than this distance are simplified away.
    pub edge_simplification_distance: f32,
    /// Labels farther than this distance are hidden.
    pub label_visibility_distance: f32,
    /// Animation fidelity factor in `[0, 1]`.
    pub animation_quality: f32,
    /// Texture resolution factor in `[0, 1]`.
    pub texture_scale: f32,
    /// Whether antialiasing is enabled.
    pub antialiasing: bool,
    /// Whether shadows are drawn.
    pub shadows: bool,
    /// Whether particle effects are drawn.
    pub particles: bool,
}

impl LodSettings {
    /// Returns a copy with the unit-interval factors clamped into `[0, 1]`.
    pub fn clamped(mut self) -> Self {
        self.animation_quality = self.animation_quality.clamp(0.0, 1.0);
        self.texture_scale = self.texture_scale.clamp(0.0, 1.0);
        self
    }
}

/// A named quality tier: LOD bundle plus its performance budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityPreset {
    /// The tier this preset describes.
    pub level: QualityLevel,
    /// Level-of-detail parameters.
    pub lod: LodSettings,
    /// Recommended upper bound on rendered nodes.
    pub max_nodes: usize,
    /// Recommended upper bound on rendered edges.
    pub max_edges: usize,
    /// Frame rate this tier is expected to sustain.
    pub target_fps: f64,
}

impl QualityPreset {
    /// The built-in preset for a tier.
    pub fn builtin(level: QualityLevel) -> Self {
        let (lod, max_nodes, max_edges, target_fps) = match level {
            QualityLevel::Low => (
                LodSettings {
                    node_simplification_distance: 500.0,
                    edge_simplification_distance: 300.0,
                    label_visibility_distance: 200.0,
                    animation_quality: 0.25,
                    texture_scale: 0.5,
                    antialiasing: false,
                    shadows: false,
                    particles: false,
                },
                1_000,
                2_000,
                30.0,
            ),
            QualityLevel::Medium => (
                LodSettings {
                    node_simplification_distance: 1_000.0,
                    edge_simplification_distance: 700.0,
                    label_visibility_distance: 400.0,
                    animation_quality: 0.5,
                    texture_scale: 0.75,
                    antialiasing: true,
                    shadows: false,
                    particles: false,
                },
                5_000,
                10_000,
                45.0,
            ),
            QualityLevel::High => (
                LodSettings {
                    node_simplification_distance: 2_000.0,
                    edge_simplification_distance: 1_500.0,
                    label_visibility_distance: 800.0,
                    animation_quality: 0.75,
                    texture_scale: 1.0,
                    antialiasing: true,
                    shadows: true,
                    particles: false,
                },
                10_000,
                20_000,
                60.0,
            ),
            QualityLevel::Ultra => (
                LodSettings {
                    node_simplification_distance: 5_000.0,
                    edge_simplification_distance: 4_000.0,
                    label_visibility_distance: 2_000.0,
                    animation_quality: 1.0,
                    texture_scale: 1.0,
                    antialiasing: true,
                    shadows: true,
                    particles: true,
                },
                50_000,
                100_000,
                60.0,
            ),
        };
        Self {
            level,
            lod,
            max_nodes,
            max_edges,
            target_fps,
        }
    }
}

/// Lookup table of registered presets, keyed by tier.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PresetTable {
    presets: BTreeMap<QualityLevel, QualityPreset>,
}

impl PresetTable {
    /// A table holding the four built-in presets.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for level in QualityLevel::ALL {
            table.register(QualityPreset::builtin(level));
        }
        table
    }

    /// A table with no presets registered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registers a preset under its level, replacing any previous one.
    ///
    /// Returns the preset that was replaced, if any.
    pub fn register(&mut self, preset: QualityPreset) -> Option<QualityPreset> {
        let preset = QualityPreset {
            lod: preset.lod.clamped(),
            ..preset
        };
        self.presets.insert(preset.level, preset)
    }

    /// Looks up the preset for a tier.
    pub fn get(&self, level: QualityLevel) -> Option<&QualityPreset> {
        self.presets.get(&level)
    }

    /// Returns `true` if a preset is registered for the tier.
    pub fn contains(&self, level: QualityLevel) -> bool {
        self.presets.contains_key(&level)
    }

    /// Registered tiers in ascending order.
    pub fn levels(&self) -> impl Iterator<Item = QualityLevel> + '_ {
        self.presets.keys().copied()
    }

    /// Number of registered presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Returns `true` if no preset is registered.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(QualityLevel::Low < QualityLevel::Medium);
        assert!(QualityLevel::Medium < QualityLevel::High);
        assert!(QualityLevel::High < QualityLevel::Ultra);
    }

    #[test]
    fn test_step_respects_band() {
        use QualityLevel::*;
        assert_eq!(High.step(Direction::Down, Low, Ultra), Some(Medium));
        assert_eq!(High.step(Direction::Up, Low, Ultra), Some(Ultra));
        assert_eq!(Low.step(Direction::Down, Low, Ultra), None);
        assert_eq!(Ultra.step(Direction::Up, Low, Ultra), None);
        assert_eq!(Medium.step(Direction::Down, Medium, High), None);
        assert_eq!(High.step(Direction::Up, Medium, High), None);
        // Reverse band is normalised.
        assert_eq!(Medium.step(Direction::Up, High, Low), Some(High));
    }

    #[test]
    fn test_clamp_to_band() {
        use QualityLevel::*;
        assert_eq!(Ultra.clamp_to(Low, High), High);
        assert_eq!(Low.clamp_to(Medium, Ultra), Medium);
        assert_eq!(Medium.clamp_to(Low, Ultra), Medium);
    }

    #[test]
    fn test_parse_level_names() {
        assert_eq!("ULTRA".parse::<QualityLevel>(), Ok(QualityLevel::Ultra));
        assert_eq!(" low ".parse::<QualityLevel>(), Ok(QualityLevel::Low));
        assert_eq!(
            "extreme".parse::<QualityLevel>(),
            Err(CoreError::UnknownQualityLevel("extreme".into()))
        );
    }

    #[test]
    fn test_builtin_presets_are_monotonic() {
        let table = PresetTable::builtin();
        assert_eq!(table.len(), 4);
        let presets: Vec<_> = QualityLevel::ALL
            .iter()
            .map(|l| *table.get(*l).unwrap())
            .collect();
        for pair in presets.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            assert!(lo.max_nodes < hi.max_nodes);
            assert!(lo.max_edges < hi.max_edges);
            assert!(lo.lod.node_simplification_distance < hi.lod.node_simplification_distance);
            assert!(lo.lod.label_visibility_distance < hi.lod.label_visibility_distance);
            assert!(lo.lod.animation_quality <= hi.lod.animation_quality);
            assert!(lo.lod.texture_scale <= hi.lod.texture_scale);
        }
    }

    #[test]
    fn test_register_replaces_and_clamps() {
        let mut table = PresetTable::builtin();
        let mut custom = QualityPreset::builtin(QualityLevel::Low);
        custom.max_nodes = 42;
        custom.lod.texture_scale = 3.0;
        let previous = table.register(custom);
        assert_eq!(previous.map(|p| p.max_nodes), Some(1_000));
        let stored = table.get(QualityLevel::Low).unwrap();
        assert_eq!(stored.max_nodes, 42);
        assert_eq!(stored.lod.texture_scale, 1.0);
    }
}
