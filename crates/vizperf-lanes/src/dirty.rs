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

//! Dirty-rectangle accumulation.

use vizperf_core::math::DirtyRect;

/// Accumulates invalidated canvas regions, merging any that overlap.
///
/// After every insertion no two retained rectangles overlap (touching
/// counts as overlapping). Regions are consumed once by [`take`](Self::take).
#[derive(Debug, Clone, Default)]
pub struct DirtyRegionTracker {
    regions: Vec<DirtyRect>,
}

impl DirtyRegionTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rectangle and merges until no overlapping pair remains.
    pub fn mark(&mut self, rect: DirtyRect) {
        self.regions.push(rect);
        loop {
            let mut merged_any = false;
            let mut i = 0;
            while i < self.regions.len() {
                let mut j = i + 1;
                while j < self.regions.len() {
                    if self.regions[i].overlaps(&self.regions[j]) {
                        let other = self.regions.swap_remove(j);
                        self.regions[i] = self.regions[i].union(&other);
                        merged_any = true;
                    } else {
                        j += 1;
                    }
                }
                i += 1;
            }
            if !merged_any {
                break;
            }
        }
    }

    /// Number of pending regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Returns the pending regions and clears the tracker.
    pub fn take(&mut self) -> Vec<DirtyRect> {
        std::mem::take(&mut self.regions)
    }

    /// Drops the pending regions.
    pub fn clear(&mut self) {
        self.regions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects_merge_into_union() {
        let mut tracker = DirtyRegionTracker::new();
        tracker.mark(DirtyRect::new(0.0, 0.0, 10.0, 10.0));
        tracker.mark(DirtyRect::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(tracker.take(), vec![DirtyRect::new(0.0, 0.0, 15.0, 15.0)]);
    }

    #[test]
    fn test_disjoint_rects_stay_separate() {
        let mut tracker = DirtyRegionTracker::new();
        tracker.mark(DirtyRect::new(0.0, 0.0, 10.0, 10.0));
        tracker.mark(DirtyRect::new(50.0, 50.0, 10.0, 10.0));
        assert_eq!(tracker.take().len(), 2);
    }

    #[test]
    fn test_take_consumes_regions() {
        let mut tracker = DirtyRegionTracker::new();
        tracker.mark(DirtyRect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(tracker.take().len(), 1);
        assert!(tracker.take().is_empty());
    }

    #[test]
    fn test_bridging_rect_merges_transitively() {
        let mut tracker = DirtyRegionTracker::new();
        tracker.mark(DirtyRect::new(0.0, 0.0, 10.0, 10.0));
        tracker.mark(DirtyRect::new(30.0, 0.0, 10.0, 10.0));
        assert_eq!(tracker.len(), 2);
        // Overlaps both existing rectangles.
        tracker.mark(DirtyRect::new(8.0, 2.0, 25.0, 4.0));
        assert_eq!(tracker.take(), vec![DirtyRect::new(0.0, 0.0, 40.0, 10.0)]);
    }

    #[test]
    fn test_growing_union_absorbs_previously_disjoint_rect() {
        let mut tracker = DirtyRegionTracker::new();
        tracker.mark(DirtyRect::new(0.0, 0.0, 10.0, 10.0));
        tracker.mark(DirtyRect::new(20.0, 20.0, 5.0, 5.0));
        // Merging with the first rect makes it reach the second one.
        tracker.mark(DirtyRect::new(5.0, 5.0, 16.0, 16.0));
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.take(), vec![DirtyRect::new(0.0, 0.0, 25.0, 25.0)]);
    }
}
