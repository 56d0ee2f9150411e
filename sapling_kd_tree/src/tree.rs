// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree store: built arrays, configuration, and read accessors.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::builder;
use crate::node::Node;
use crate::types::{Aabb, Triangle};

/// Build-time parameters. All fields have defaults.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// SAH cost of one traversal step (`Kt`).
    pub cost_traversal: f32,
    /// SAH cost of one ray/triangle test (`Ki`).
    pub cost_intersection: f32,
    /// Maximum node depth, counting the root as 1; `0` means unlimited.
    pub max_depth: i32,
    /// A node holding at most this many triangles becomes a leaf.
    pub min_triangles: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cost_traversal: 1.0,
            cost_intersection: 80.0,
            max_depth: 0,
            min_triangles: 1,
        }
    }
}

/// A static k-d tree over an external triangle array.
///
/// The tree stores nodes in pre-order (the left child of node `i` is
/// `i + 1`), a parallel array of node bounds, and a flat pool of triangle
/// indices that leaves draw contiguous ranges from. Triangles themselves
/// are borrowed at build and query time and never owned; nodes refer to
/// them by index only.
pub struct KdTree {
    nodes: Vec<Node>,
    aabbs: Vec<Aabb>,
    indices: Vec<u32>,
    cfg: Config,
}

impl Default for KdTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KdTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leaves = self.nodes.iter().filter(|n| n.is_leaf()).count();
        f.debug_struct("KdTree")
            .field("nodes", &self.nodes.len())
            .field("leaves", &leaves)
            .field("indices", &self.indices.len())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl KdTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            aabbs: Vec::new(),
            indices: Vec::new(),
            cfg: Config::default(),
        }
    }

    /// Build the tree over `triangles`, replacing any previous contents.
    ///
    /// Nodes reference triangles by their index in the slice, so queries
    /// must be handed the same slice later. An empty slice produces an
    /// empty tree. Vertex coordinates must be finite.
    pub fn build(&mut self, triangles: &[Triangle], cfg: Config) {
        let out = builder::build(triangles, cfg);
        self.nodes = out.nodes;
        self.aabbs = out.aabbs;
        self.indices = out.indices;
        self.cfg = cfg;
    }

    /// Nodes in pre-order; node 0 is the root.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// World-space bounds of each node, parallel to [`nodes`](Self::nodes).
    pub fn aabbs(&self) -> &[Aabb] {
        &self.aabbs
    }

    /// The index pool leaves draw their ranges from. A triangle straddling
    /// split planes appears once per leaf that references it, so the pool
    /// can be longer than the triangle array.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The configuration of the last build.
    pub fn config(&self) -> Config {
        self.cfg
    }

    /// Whether the tree holds no nodes.
    pub fn empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Longest root-to-leaf path in edges; `-1` for an empty tree.
    pub fn height(&self) -> i32 {
        if self.empty() { -1 } else { self.height_of(0) }
    }

    /// Height of the subtree rooted at `node_index`.
    ///
    /// Panics when `node_index` is out of range.
    pub fn height_of(&self, node_index: usize) -> i32 {
        let node = self.nodes[node_index];
        if node.is_leaf() {
            0
        } else {
            let left = self.height_of(node_index + 1);
            let right = self.height_of(node.right_child() as usize);
            1 + left.max(right)
        }
    }

    /// All triangle indices reachable from `node_index`, sorted and
    /// de-duplicated. Debugging helper.
    ///
    /// Panics when `node_index` is out of range.
    pub fn get_triangles(&self, node_index: usize) -> Vec<u32> {
        let mut out = Vec::new();
        let mut stack = vec![node_index];
        while let Some(i) = stack.pop() {
            let node = self.nodes[i];
            if node.is_leaf() {
                let start = node.primitive_start() as usize;
                let end = start + node.primitive_count() as usize;
                out.extend_from_slice(&self.indices[start..end]);
            } else {
                stack.push(node.right_child() as usize);
                stack.push(i + 1);
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }
}
