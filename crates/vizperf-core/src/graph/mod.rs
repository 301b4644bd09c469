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

//! The visual scene model handed to the engine by a visualization renderer.
//!
//! Nodes and edges are owned by the caller. The engine only reads their
//! positions and sizes to make culling and batching decisions; it never
//! mutates node identity.

use crate::math::{Aabb, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Optional styling attached to a node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    /// Diameter of the node in canvas units, used for bounding-box math.
    pub size: Option<f32>,
    /// Fill color, in whatever notation the renderer understands.
    pub color: Option<String>,
    /// Optional text label.
    pub label: Option<String>,
}

/// A renderable node of a graph, tree or animation frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualNode<T = ()> {
    /// Unique identifier, referenced by edges.
    pub id: String,
    /// Arbitrary caller payload.
    pub data: T,
    /// Position in scene space.
    pub position: Vec3,
    /// Optional styling.
    #[serde(default)]
    pub style: Option<NodeStyle>,
}

impl<T> VisualNode<T> {
    /// Creates a node without style information.
    pub fn new(id: impl Into<String>, data: T, position: Vec3) -> Self {
        Self {
            id: id.into(),
            data,
            position,
            style: None,
        }
    }

    /// Sets the node size, creating the style if needed.
    pub fn with_size(mut self, size: f32) -> Self {
        self.style.get_or_insert_with(NodeStyle::default).size = Some(size);
        self
    }

    /// The node's declared size, if any.
    pub fn size(&self) -> Option<f32> {
        self.style.as_ref().and_then(|s| s.size)
    }

    /// Canvas-plane bounding box: position +/- half the size.
    ///
    /// `default_size` applies when the node has no style size.
    pub fn bounds(&self, default_size: f32) -> Aabb {
        let half = self.size().unwrap_or(default_size) * 0.5;
        Aabb::from_center_half_extents(self.position.xy(), Vec2::splat(half))
    }
}

/// A connection between two nodes, referenced by id.
///
/// An edge is only renderable when both endpoints exist in the node set
/// supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualEdge {
    /// Unique identifier.
    pub id: String,
    /// Id of the source node.
    pub source: String,
    /// Id of the target node.
    pub target: String,
}

impl VisualEdge {
    /// Creates a new edge.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}
