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

//! Render batching.
//!
//! Nodes are split into fixed-size chunks in input order. Each batch also
//! carries every edge with at least one endpoint among its nodes, so an edge
//! whose endpoints fall in two batches is carried by both.

use ahash::AHashMap;
use vizperf_core::graph::{VisualEdge, VisualNode};
use vizperf_core::math::Aabb;

/// A bounded-cost unit of rendering work.
#[derive(Debug, Clone)]
pub struct RenderBatch<'a, T = ()> {
    /// Position of the batch in the output, starting at zero.
    pub index: usize,
    /// Nodes of the batch, in input order.
    pub nodes: Vec<&'a VisualNode<T>>,
    /// Edges touching at least one node of the batch, in input order.
    pub edges: Vec<&'a VisualEdge>,
    /// Union of the node bounding boxes. Invalid for an empty batch.
    pub bounds: Aabb,
}

impl<T> RenderBatch<'_, T> {
    /// Number of nodes in the batch.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the batch has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Splits `nodes` into batches of at most `max_batch_size` nodes.
///
/// Produces `ceil(nodes / max_batch_size)` batches, or none for an empty
/// node set. A `max_batch_size` of zero is treated as one.
pub fn create_batches<'a, T>(
    nodes: impl IntoIterator<Item = &'a VisualNode<T>>,
    edges: impl IntoIterator<Item = &'a VisualEdge>,
    max_batch_size: usize,
    default_size: f32,
) -> Vec<RenderBatch<'a, T>>
where
    T: 'a,
{
    let max_batch_size = max_batch_size.max(1);
    let mut batches: Vec<RenderBatch<'a, T>> = Vec::new();
    let mut owner: AHashMap<&'a str, usize> = AHashMap::new();

    for node in nodes {
        let needs_new = batches
            .last()
            .map_or(true, |batch| batch.nodes.len() >= max_batch_size);
        if needs_new {
            batches.push(RenderBatch {
                index: batches.len(),
                nodes: Vec::with_capacity(max_batch_size),
                edges: Vec::new(),
                bounds: Aabb::INVALID,
            });
        }
        let index = batches.len() - 1;
        let batch = &mut batches[index];
        batch.bounds = batch.bounds.merge(&node.bounds(default_size));
        batch.nodes.push(node);
        owner.insert(node.id.as_str(), index);
    }

    for edge in edges {
        let source = owner.get(edge.source.as_str()).copied();
        let target = owner.get(edge.target.as_str()).copied();
        if let Some(index) = source {
            batches[index].edges.push(edge);
        }
        if let Some(index) = target {
            if source != Some(index) {
                batches[index].edges.push(edge);
            }
        }
    }

    batches
}

/// Puts every node and every edge with a known endpoint into a single batch.
pub fn single_batch<'a, T>(
    nodes: impl IntoIterator<Item = &'a VisualNode<T>>,
    edges: impl IntoIterator<Item = &'a VisualEdge>,
    default_size: f32,
) -> RenderBatch<'a, T>
where
    T: 'a,
{
    let nodes: Vec<&'a VisualNode<T>> = nodes.into_iter().collect();
    let known: ahash::AHashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let edges = edges
        .into_iter()
        .filter(|e| known.contains(e.source.as_str()) || known.contains(e.target.as_str()))
        .collect();
    let bounds = nodes
        .iter()
        .fold(Aabb::INVALID, |acc, n| acc.merge(&n.bounds(default_size)));
    RenderBatch {
        index: 0,
        nodes,
        edges,
        bounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vizperf_core::math::{Vec2, Vec3};

    fn nodes(count: usize) -> Vec<VisualNode> {
        (0..count)
            .map(|i| VisualNode::new(format!("n{i}"), (), Vec3::new(i as f32 * 10.0, 0.0, 0.0)))
            .collect()
    }

    #[test]
    fn test_batch_count_and_completeness() {
        let nodes = nodes(250);
        let batches = create_batches(&nodes, &[], 100, 10.0);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches.iter().map(|b| b.len()).sum::<usize>(), 250);
        assert_eq!(batches[2].len(), 50);
        assert_eq!(batches[1].index, 1);
    }

    #[test]
    fn test_order_is_stable() {
        let nodes = nodes(5);
        let batches = create_batches(&nodes, &[], 2, 10.0);
        let ids: Vec<&str> = batches
            .iter()
            .flat_map(|b| b.nodes.iter().map(|n| n.id.as_str()))
            .collect();
        assert_eq!(ids, vec!["n0", "n1", "n2", "n3", "n4"]);
    }

    #[test]
    fn test_split_edge_appears_in_both_batches() {
        let nodes = nodes(4);
        let edges = vec![
            VisualEdge::new("inner", "n0", "n1"),
            VisualEdge::new("split", "n1", "n2"),
            VisualEdge::new("dangling", "n3", "ghost"),
            VisualEdge::new("orphan", "ghost", "phantom"),
        ];
        let batches = create_batches(&nodes, &edges, 2, 10.0);
        let ids = |b: &RenderBatch<'_>| b.edges.iter().map(|e| e.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&batches[0]), vec!["inner", "split"]);
        assert_eq!(ids(&batches[1]), vec!["split", "dangling"]);
    }

    #[test]
    fn test_self_loop_is_not_duplicated() {
        let nodes = nodes(1);
        let edges = vec![VisualEdge::new("loop", "n0", "n0")];
        let batches = create_batches(&nodes, &edges, 10, 10.0);
        assert_eq!(batches[0].edges.len(), 1);
    }

    #[test]
    fn test_bounds_are_union_of_node_bounds() {
        let nodes = nodes(3);
        let batches = create_batches(&nodes, &[], 10, 10.0);
        let expected = Aabb::from_min_max(Vec2::new(-5.0, -5.0), Vec2::new(25.0, 5.0));
        assert_eq!(batches[0].bounds, expected);
    }

    #[test]
    fn test_empty_input_has_no_batches() {
        let nodes: Vec<VisualNode> = Vec::new();
        assert!(create_batches(&nodes, &[], 100, 10.0).is_empty());
    }

    #[test]
    fn test_single_batch_contains_everything() {
        let nodes = nodes(3);
        let edges = vec![VisualEdge::new("e", "n0", "n2")];
        let batch = single_batch(&nodes, &edges, 10.0);
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.edges.len(), 1);
    }
}
