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

//! Unicode bar graphs.

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Renders the last `width` finite values as a row of block characters,
/// scaled between their minimum and maximum.
///
/// A flat series renders at mid height. An empty series renders as an empty string.
pub fn sparkline<'a>(values: impl IntoIterator<Item = &'a f64>, width: usize) -> String {
    let values: Vec<f64> = values.into_iter().copied().filter(|v| v.is_finite()).collect();
    let tail = &values[values.len().saturating_sub(width)..];
    if tail.is_empty() {
        return String::new();
    }
    let min = tail.iter().copied().fold(f64::MAX, f64::min);
    let max = tail.iter().copied().fold(f64::MIN, f64::max);
    let range = max - min;
    let top = (BARS.len() - 1) as f64;

    tail.iter()
        .map(|v| {
            let level = if range > f64::EPSILON {
                ((v - min) / range * top).round() as usize
            } else {
                BARS.len() / 2
            };
            BARS[level.min(BARS.len() - 1)]
        })
        .collect()
}
