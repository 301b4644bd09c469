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

//! Randomised checks of the culling and batching invariants.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vizperf_core::graph::{VisualEdge, VisualNode};
use vizperf_core::math::{Aabb, Vec2, Vec3};
use vizperf_core::platform::Platform;
use vizperf_lanes::{index_nodes, OptimizerConfig, RenderOptimizer};

fn random_scene(
    rng: &mut StdRng,
    nodes: usize,
    edges: usize,
) -> (Vec<VisualNode>, Vec<VisualEdge>) {
    let nodes: Vec<VisualNode> = (0..nodes)
        .map(|i| {
            let node = VisualNode::new(
                format!("n{i}"),
                (),
                Vec3::new(
                    rng.gen_range(-500.0..1500.0),
                    rng.gen_range(-500.0..1500.0),
                    0.0,
                ),
            );
            if rng.gen_bool(0.5) {
                node.with_size(rng.gen_range(1.0..40.0))
            } else {
                node
            }
        })
        .collect();
    let count = nodes.len();
    let edges = (0..edges)
        .map(|i| {
            // Roughly one edge in ten points at a node that does not exist.
            let target = rng.gen_range(0..count + count / 10);
            VisualEdge::new(
                format!("e{i}"),
                format!("n{}", rng.gen_range(0..count)),
                format!("n{target}"),
            )
        })
        .collect();
    (nodes, edges)
}

fn random_viewport(rng: &mut StdRng) -> (Vec2, Vec2) {
    let min = Vec2::new(rng.gen_range(-200.0..500.0), rng.gen_range(-200.0..500.0));
    (min, Vec2::new(min.x + 300.0, min.y + 200.0))
}

/// Closed-interval overlap of `[lo, hi]` with `[vmin - pad, vmax + pad]`.
fn overlaps(lo: f32, hi: f32, vmin: f32, vmax: f32, pad: f32) -> bool {
    lo <= vmax + pad && hi >= vmin - pad
}

#[test]
fn test_node_kept_iff_padded_bounds_intersect() {
    let mut rng = StdRng::seed_from_u64(7);
    let config = OptimizerConfig::default();
    let pad = config.viewport_padding;
    let default_size = config.default_node_size;
    let mut optimizer = RenderOptimizer::new(config, Platform::headless());

    for _ in 0..20 {
        let (nodes, _) = random_scene(&mut rng, 500, 0);
        let (vmin, vmax) = random_viewport(&mut rng);
        let viewport = Aabb::from_min_max(vmin, vmax);

        let kept: Vec<&str> = optimizer
            .cull_nodes(&nodes, &viewport)
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        let expected: Vec<&str> = nodes
            .iter()
            .filter(|n| {
                let half = n.size().unwrap_or(default_size) / 2.0;
                let (x, y) = (n.position.x, n.position.y);
                overlaps(x - half, x + half, vmin.x, vmax.x, pad)
                    && overlaps(y - half, y + half, vmin.y, vmax.y, pad)
            })
            .map(|n| n.id.as_str())
            .collect();
        assert!(!expected.is_empty());
        assert_eq!(kept, expected);
        assert_eq!(optimizer.get_stats().culled_nodes, nodes.len() - kept.len());
    }
}

#[test]
fn test_edge_kept_iff_resolved_span_intersects() {
    let mut rng = StdRng::seed_from_u64(11);
    let config = OptimizerConfig::default();
    let pad = config.viewport_padding;
    let mut optimizer = RenderOptimizer::new(config, Platform::headless());

    for _ in 0..10 {
        let (nodes, edges) = random_scene(&mut rng, 300, 600);
        let index = index_nodes(&nodes);
        let (vmin, vmax) = random_viewport(&mut rng);
        let viewport = Aabb::from_min_max(vmin, vmax);

        let kept: Vec<&str> = optimizer
            .cull_edges(&edges, &index, &viewport)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        let position = |id: &str| nodes.iter().find(|n| n.id == id).map(|n| n.position);
        let expected: Vec<&str> = edges
            .iter()
            .filter(|e| match (position(&e.source), position(&e.target)) {
                (Some(s), Some(t)) => {
                    overlaps(s.x.min(t.x), s.x.max(t.x), vmin.x, vmax.x, pad)
                        && overlaps(s.y.min(t.y), s.y.max(t.y), vmin.y, vmax.y, pad)
                }
                _ => false,
            })
            .map(|e| e.id.as_str())
            .collect();
        assert!(!expected.is_empty());
        assert_eq!(kept, expected);
        assert_eq!(optimizer.get_stats().culled_edges, edges.len() - kept.len());
    }
}

#[test]
fn test_batches_are_complete_and_sized() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..10 {
        let count = rng.gen_range(0..1200);
        let batch_size = rng.gen_range(1..150);
        let mut optimizer = RenderOptimizer::new(
            OptimizerConfig {
                max_batch_size: batch_size,
                ..Default::default()
            },
            Platform::headless(),
        );
        let (nodes, edges) = random_scene(&mut rng, count.max(1), count);
        let batches = optimizer.create_batches(&nodes, &edges);

        assert_eq!(batches.iter().map(|b| b.len()).sum::<usize>(), nodes.len());
        assert_eq!(batches.len(), nodes.len().div_ceil(batch_size));
        assert!(batches.iter().all(|b| b.len() <= batch_size));
        for batch in &batches {
            for edge in &batch.edges {
                assert!(batch
                    .nodes
                    .iter()
                    .any(|n| n.id == edge.source || n.id == edge.target));
            }
        }
    }
}
