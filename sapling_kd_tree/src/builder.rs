// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SAH build recursion.
//!
//! Nodes are emitted in pre-order: a node's left subtree follows it
//! immediately, so only the right child index is stored, backpatched once
//! the left subtree is complete. Split planes are chosen with the
//! surface-area heuristic over the triangle extents inside the node box;
//! triangles straddling the chosen plane are handed to both children.

use alloc::vec::Vec;

use crate::node::Node;
use crate::tree::Config;
use crate::types::{Aabb, Triangle};

pub(crate) struct BuildOutput {
    pub(crate) nodes: Vec<Node>,
    pub(crate) aabbs: Vec<Aabb>,
    pub(crate) indices: Vec<u32>,
}

pub(crate) fn build(triangles: &[Triangle], cfg: Config) -> BuildOutput {
    let mut builder = Builder {
        cfg,
        tri_aabbs: triangles.iter().map(Triangle::aabb).collect(),
        nodes: Vec::new(),
        aabbs: Vec::new(),
        indices: Vec::new(),
    };
    if !triangles.is_empty() {
        let bounds = Aabb::from_triangles(triangles);
        let set: Vec<u32> = (0..triangles.len() as u32).collect();
        builder.subdivide(bounds, set, 1);
    }
    BuildOutput {
        nodes: builder.nodes,
        aabbs: builder.aabbs,
        indices: builder.indices,
    }
}

struct Candidate {
    axis: usize,
    position: f32,
    cost: f32,
}

struct Builder {
    cfg: Config,
    tri_aabbs: Vec<Aabb>,
    nodes: Vec<Node>,
    aabbs: Vec<Aabb>,
    indices: Vec<u32>,
}

impl Builder {
    /// Emit the subtree for `set` within `bounds`. The root call has depth 1.
    fn subdivide(&mut self, bounds: Aabb, set: Vec<u32>, depth: i32) {
        let index = self.nodes.len();
        self.nodes.push(Node::leaf(0, 0));
        self.aabbs.push(bounds);

        let at_depth_limit = self.cfg.max_depth > 0 && depth >= self.cfg.max_depth;
        if set.len() as i32 <= self.cfg.min_triangles || at_depth_limit {
            self.make_leaf(index, set);
            return;
        }
        let Some((axis, position)) = self.choose_split(&bounds, &set) else {
            self.make_leaf(index, set);
            return;
        };

        let mut left = Vec::new();
        let mut right = Vec::new();
        for &tri in &set {
            let extent = &self.tri_aabbs[tri as usize];
            let in_left = extent.min[axis] < position;
            let in_right = extent.max[axis] > position;
            if in_left {
                left.push(tri);
            }
            if in_right {
                right.push(tri);
            }
            if !in_left && !in_right {
                // Extent collapsed onto the plane; keep it on the left so it
                // is not lost.
                left.push(tri);
            }
        }
        // A side holding nothing, or everything, cannot make progress.
        if left.is_empty()
            || right.is_empty()
            || left.len() == set.len()
            || right.len() == set.len()
        {
            self.make_leaf(index, set);
            return;
        }
        drop(set);

        self.subdivide(bounds.clipped_left(axis, position), left, depth + 1);
        let right_child = self.nodes.len() as u32;
        self.nodes[index] = Node::internal(axis, position, right_child);
        self.subdivide(bounds.clipped_right(axis, position), right, depth + 1);
    }

    /// Pick the cheapest split plane, or `None` when a leaf is cheaper.
    ///
    /// Candidates are the triangle extents strictly inside the box on each
    /// axis. Partition sizes come from binary searches over the sorted
    /// extent arrays: `|L|` counts extents beginning before the plane,
    /// `|R|` counts extents ending past it, so a straddler lands in both.
    fn choose_split(&self, bounds: &Aabb, set: &[u32]) -> Option<(usize, f32)> {
        let parent_area = bounds.surface_area();
        if parent_area <= 0.0 {
            return None;
        }
        let leaf_cost = self.cfg.cost_intersection * set.len() as f32;

        let mut best: Option<Candidate> = None;
        let mut mins: Vec<f32> = Vec::with_capacity(set.len());
        let mut maxs: Vec<f32> = Vec::with_capacity(set.len());
        let mut positions: Vec<f32> = Vec::with_capacity(set.len() * 2);
        for axis in 0..3 {
            mins.clear();
            maxs.clear();
            for &tri in set {
                let extent = &self.tri_aabbs[tri as usize];
                mins.push(extent.min[axis]);
                maxs.push(extent.max[axis]);
            }
            mins.sort_unstable_by(f32::total_cmp);
            maxs.sort_unstable_by(f32::total_cmp);

            positions.clear();
            positions.extend(
                mins.iter()
                    .chain(maxs.iter())
                    .copied()
                    .filter(|&p| p > bounds.min[axis] && p < bounds.max[axis]),
            );
            positions.sort_unstable_by(f32::total_cmp);
            positions.dedup();

            for &position in &positions {
                let left = mins.partition_point(|&m| m < position);
                let right = maxs.len() - maxs.partition_point(|&m| m <= position);
                let left_area = bounds.clipped_left(axis, position).surface_area();
                let right_area = bounds.clipped_right(axis, position).surface_area();
                let cost = self.cfg.cost_traversal
                    + self.cfg.cost_intersection
                        * (left_area * left as f32 + right_area * right as f32)
                        / parent_area;
                // Axes and positions are visited in ascending order, so the
                // strict comparison keeps the lowest axis and position of any
                // tie. Non-finite costs never win.
                if cost.is_finite() && best.as_ref().is_none_or(|b| cost < b.cost) {
                    best = Some(Candidate {
                        axis,
                        position,
                        cost,
                    });
                }
            }
        }
        let best = best?;
        if best.cost >= leaf_cost {
            return None;
        }
        Some((best.axis, best.position))
    }

    /// Turn `index` into a leaf owning `set` (sorted, duplicate-free).
    fn make_leaf(&mut self, index: usize, mut set: Vec<u32>) {
        set.sort_unstable();
        set.dedup();
        let start = self.indices.len() as u32;
        let count = set.len() as u32;
        self.indices.extend_from_slice(&set);
        self.nodes[index] = Node::leaf(start, count);
    }
}
