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

//! Provides geometric primitive shapes for spatial calculations.
//!
//! This module contains the structures used for viewport culling, batch
//! bounds and dirty-region tracking.

use super::Vec2;
use serde::{Deserialize, Serialize};

/// Represents an Axis-Aligned Bounding Box (AABB) on the canvas plane.
///
/// An AABB is defined by its minimum and maximum corner points. It is used as
/// the viewport for culling passes and as the bounds of render batches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// The corner of the box with the smallest coordinates on both axes.
    pub min: Vec2,
    /// The corner of the box with the largest coordinates on both axes.
    pub max: Vec2,
}

impl Aabb {
    /// An invalid `Aabb`: `min` is positive infinity and `max` negative infinity.
    ///
    /// This is useful as a neutral starting point for merging operations. Merging any
    /// valid `Aabb` with `INVALID` will result in that valid `Aabb`.
    pub const INVALID: Self = Self {
        min: Vec2::new(f32::INFINITY, f32::INFINITY),
        max: Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
    };

    /// Creates a new `Aabb` from two corner points.
    ///
    /// The corners may be passed in any order; `min` always receives the
    /// component-wise minimum.
    #[inline]
    pub fn from_min_max(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a new `Aabb` from a center point and its half-extents.
    ///
    /// The provided `half_extents` will be made non-negative.
    #[inline]
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        let half = Vec2::new(half_extents.x.abs(), half_extents.y.abs());
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Width of the box.
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the box.
    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Checks if this `Aabb` intersects with another `Aabb`.
    ///
    /// Boxes that only touch at the boundary are considered to be intersecting.
    #[inline]
    pub fn intersects_aabb(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Creates a new `Aabb` that encompasses both this `Aabb` and another one.
    #[inline]
    pub fn merge(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns this box grown by `padding` on every side.
    ///
    /// A negative padding shrinks the box; the result may become invalid.
    #[inline]
    pub fn expanded(&self, padding: f32) -> Self {
        let pad = Vec2::splat(padding);
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::INVALID
    }
}

/// A canvas region flagged as needing a redraw, in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DirtyRect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl DirtyRect {
    /// Creates a new rectangle.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns `true` if the two rectangles overlap or share an edge.
    #[inline]
    pub fn overlaps(&self, other: &DirtyRect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// Smallest rectangle containing both rectangles.
    pub fn union(&self, other: &DirtyRect) -> DirtyRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        DirtyRect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Returns this rectangle grown by `padding` on every side.
    pub fn padded(&self, padding: f32) -> DirtyRect {
        DirtyRect::new(
            self.x - padding,
            self.y - padding,
            self.width + padding * 2.0,
            self.height + padding * 2.0,
        )
    }
}

impl From<Aabb> for DirtyRect {
    fn from(aabb: Aabb) -> Self {
        DirtyRect::new(aabb.min.x, aabb.min.y, aabb.width(), aabb.height())
    }
}

impl From<DirtyRect> for Aabb {
    fn from(rect: DirtyRect) -> Self {
        Aabb::from_min_max(
            Vec2::new(rect.x, rect.y),
            Vec2::new(rect.right(), rect.bottom()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_aabb_from_min_max_orders_corners() {
        let aabb = Aabb::from_min_max(Vec2::new(10.0, -5.0), Vec2::new(-2.0, 8.0));
        assert_eq!(aabb.min, Vec2::new(-2.0, -5.0));
        assert_eq!(aabb.max, Vec2::new(10.0, 8.0));
        assert_relative_eq!(aabb.width(), 12.0);
        assert_relative_eq!(aabb.height(), 13.0);
    }

    #[test]
    fn test_aabb_intersection_includes_touching() {
        let a = Aabb::from_min_max(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let touching = Aabb::from_min_max(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        let apart = Aabb::from_min_max(Vec2::new(10.5, 0.0), Vec2::new(20.0, 10.0));
        assert!(a.intersects_aabb(&touching));
        assert!(!a.intersects_aabb(&apart));
    }

    #[test]
    fn test_aabb_expanded_and_merge() {
        let a = Aabb::from_min_max(Vec2::ZERO, Vec2::new(300.0, 300.0));
        let padded = a.expanded(100.0);
        assert_eq!(padded.min, Vec2::new(-100.0, -100.0));
        assert_eq!(padded.max, Vec2::new(400.0, 400.0));

        assert_eq!(Aabb::INVALID.merge(&a), a);
    }

    #[test]
    fn test_dirty_rect_overlap_and_union() {
        let a = DirtyRect::new(0.0, 0.0, 10.0, 10.0);
        let b = DirtyRect::new(5.0, 5.0, 10.0, 10.0);
        let c = DirtyRect::new(50.0, 50.0, 5.0, 5.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert_eq!(a.union(&b), DirtyRect::new(0.0, 0.0, 15.0, 15.0));
    }

    #[test]
    fn test_dirty_rect_padding_and_conversion() {
        let r = DirtyRect::new(10.0, 20.0, 4.0, 6.0).padded(2.0);
        assert_eq!(r, DirtyRect::new(8.0, 18.0, 8.0, 10.0));
        let aabb: Aabb = r.into();
        assert_eq!(DirtyRect::from(aabb), r);
    }
}
