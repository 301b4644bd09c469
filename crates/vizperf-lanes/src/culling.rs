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

//! Viewport culling.
//!
//! A node survives when its bounding box (position +/- half its size)
//! intersects the viewport grown by the configured padding. The padding
//! keeps elements alive slightly past the visible edge to avoid pop-in.

use ahash::AHashMap;
use vizperf_core::graph::{VisualEdge, VisualNode};
use vizperf_core::math::Aabb;

/// Node lookup by id, as used to resolve edge endpoints.
pub type NodeIndex<'a, T> = AHashMap<&'a str, &'a VisualNode<T>>;

/// Builds the id lookup for a node set. Later duplicates win.
pub fn index_nodes<T>(nodes: &[VisualNode<T>]) -> NodeIndex<'_, T> {
    let mut index = AHashMap::with_capacity(nodes.len());
    for node in nodes {
        index.insert(node.id.as_str(), node);
    }
    index
}

/// Whether a node intersects the already padded viewport.
#[inline]
pub fn node_visible<T>(node: &VisualNode<T>, padded_viewport: &Aabb, default_size: f32) -> bool {
    node.bounds(default_size).intersects_aabb(padded_viewport)
}

/// The box spanned by an edge's endpoint positions.
#[inline]
pub fn edge_bounds<T>(source: &VisualNode<T>, target: &VisualNode<T>) -> Aabb {
    Aabb::from_min_max(source.position.xy(), target.position.xy())
}

/// Keeps the nodes visible in `viewport` grown by `padding`, in input order.
pub fn cull_nodes<'a, T>(
    nodes: &'a [VisualNode<T>],
    viewport: &Aabb,
    padding: f32,
    default_size: f32,
) -> Vec<&'a VisualNode<T>> {
    let padded = viewport.expanded(padding);
    nodes
        .iter()
        .filter(|node| node_visible(node, &padded, default_size))
        .collect()
}

/// Keeps the edges whose endpoints both resolve and whose span intersects
/// the padded viewport, in input order.
///
/// Edges with an unresolved endpoint are always dropped.
pub fn cull_edges<'a, T>(
    edges: &'a [VisualEdge],
    index: &NodeIndex<'_, T>,
    viewport: &Aabb,
    padding: f32,
) -> Vec<&'a VisualEdge> {
    let padded = viewport.expanded(padding);
    edges
        .iter()
        .filter(|edge| {
            match (index.get(edge.source.as_str()), index.get(edge.target.as_str())) {
                (Some(source), Some(target)) => {
                    edge_bounds(source, target).intersects_aabb(&padded)
                }
                _ => false,
            }
        })
        .collect()
}

/// Keeps the edges whose endpoints both resolve, without any viewport test.
pub fn resolvable_edges<'a, T>(
    edges: &'a [VisualEdge],
    index: &NodeIndex<'_, T>,
) -> Vec<&'a VisualEdge> {
    edges
        .iter()
        .filter(|edge| {
            index.contains_key(edge.source.as_str()) && index.contains_key(edge.target.as_str())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vizperf_core::math::{Vec2, Vec3};

    fn node(id: &str, x: f32, y: f32) -> VisualNode {
        VisualNode::new(id, (), Vec3::new(x, y, 0.0))
    }

    fn viewport() -> Aabb {
        Aabb::from_min_max(Vec2::new(0.0, 0.0), Vec2::new(300.0, 300.0))
    }

    #[test]
    fn test_node_just_outside_viewport_survives_padding() {
        let nodes = vec![node("a", 305.0, 100.0).with_size(20.0)];
        let culled = cull_nodes(&nodes, &viewport(), 100.0, 10.0);
        assert_eq!(culled.len(), 1);
    }

    #[test]
    fn test_padding_boundary_is_inclusive() {
        // With the default size, the left edge of "in" sits exactly on the
        // padded viewport edge at x = 400.
        let nodes = vec![node("in", 405.0, 150.0), node("out", 405.1, 150.0)];
        let culled = cull_nodes(&nodes, &viewport(), 100.0, 10.0);
        let ids: Vec<&str> = culled.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["in"]);
    }

    #[test]
    fn test_cull_preserves_input_order() {
        let nodes = vec![
            node("c", 10.0, 10.0),
            node("far", 5000.0, 5000.0),
            node("a", 20.0, 20.0),
            node("b", 30.0, 30.0),
        ];
        let culled = cull_nodes(&nodes, &viewport(), 0.0, 10.0);
        let ids: Vec<&str> = culled.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_edges_with_missing_endpoint_are_dropped() {
        let nodes = vec![node("a", 10.0, 10.0), node("b", 20.0, 20.0)];
        let index = index_nodes(&nodes);
        let edges = vec![
            VisualEdge::new("ab", "a", "b"),
            VisualEdge::new("ax", "a", "missing"),
        ];
        let culled = cull_edges(&edges, &index, &viewport(), 100.0);
        assert_eq!(culled.len(), 1);
        assert_eq!(culled[0].id, "ab");
        assert_eq!(resolvable_edges(&edges, &index).len(), 1);
    }

    #[test]
    fn test_edge_crossing_viewport_is_kept() {
        let nodes = vec![node("l", -1000.0, 150.0), node("r", 1000.0, 150.0)];
        let index = index_nodes(&nodes);
        let edges = vec![VisualEdge::new("lr", "l", "r")];
        assert_eq!(cull_edges(&edges, &index, &viewport(), 0.0).len(), 1);
        assert!(cull_nodes(&nodes, &viewport(), 0.0, 10.0).is_empty());
    }

    #[test]
    fn test_edge_outside_viewport_is_culled() {
        let nodes = vec![node("a", 2000.0, 2000.0), node("b", 2100.0, 2100.0)];
        let index = index_nodes(&nodes);
        let edges = vec![VisualEdge::new("ab", "a", "b")];
        assert!(cull_edges(&edges, &index, &viewport(), 100.0).is_empty());
    }
}
