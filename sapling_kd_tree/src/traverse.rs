// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Front-to-back closest-hit traversal.

use alloc::vec::Vec;

use crate::stats::DebugStats;
use crate::tree::KdTree;
use crate::types::{Intersection, Ray, Triangle};

impl KdTree {
    /// Closest hit of `ray` against the indexed triangles, or a miss with
    /// `t < 0`.
    ///
    /// `triangles` must be the same slice the tree was built from; leaf
    /// ranges index into it. When `stats` is provided it records the visited
    /// nodes, the tested triangles, and the test counters for this query.
    ///
    /// The traversal runs an explicit stack of `(node, t_near, t_far)`
    /// entries rather than recursing, descending into the child the ray
    /// enters first. A subtree is skipped when a hit at least as close as
    /// its entry point is already known; a hit in the near child that is not
    /// past the split plane therefore prunes the far child.
    pub fn get_closest(
        &self,
        triangles: &[Triangle],
        ray: Ray,
        mut stats: Option<&mut DebugStats>,
    ) -> Intersection {
        let mut best = Intersection::MISS;
        if self.empty() {
            return best;
        }

        if let Some(s) = stats.as_deref_mut() {
            s.ray_aabb_tests += 1;
        }
        let Some((t_near, t_far)) = ray.clip_aabb(&self.aabbs()[0]) else {
            return best;
        };
        let inv_dir = ray.recip_direction();

        let mut stack: Vec<(u32, f32, f32)> = Vec::new();
        stack.push((0, t_near.max(0.0), t_far));
        while let Some((index, t_near, t_far)) = stack.pop() {
            if best.is_hit() && best.t <= t_near {
                continue; // a hit at least this close is already known
            }
            if let Some(s) = stats.as_deref_mut() {
                s.traversed_nodes.push(index);
            }
            let node = self.nodes()[index as usize];

            if node.is_leaf() {
                let start = node.primitive_start() as usize;
                let end = start + node.primitive_count() as usize;
                for &tri_index in &self.indices()[start..end] {
                    if let Some(s) = stats.as_deref_mut() {
                        s.tested_triangles.push(tri_index);
                        s.ray_triangle_tests += 1;
                    }
                    let t = ray.intersect_triangle(&triangles[tri_index as usize]);
                    if t >= 0.0 && (!best.is_hit() || t < best.t) {
                        best = Intersection {
                            triangle_index: tri_index,
                            t,
                        };
                    }
                }
                continue;
            }

            let axis = node.axis();
            let split = node.split();
            let left = index + 1;
            let right = node.right_child();
            // The near child is the side holding the origin; exactly on the
            // plane the direction sign decides.
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];
            let (near, far) = if origin < split || (origin == split && direction < 0.0) {
                (left, right)
            } else {
                (right, left)
            };

            if direction == 0.0 {
                // Parallel to the plane: the ray never leaves the near side.
                stack.push((near, t_near, t_far));
                continue;
            }
            let t_split = (split - origin) * inv_dir[axis];
            if t_split > t_far || t_split < 0.0 {
                // The plane is beyond the window or behind the origin.
                stack.push((near, t_near, t_far));
            } else if t_split < t_near {
                stack.push((far, t_near, t_far));
            } else {
                // Both sides; the near child is pushed last so it pops first.
                stack.push((far, t_split, t_far));
                stack.push((near, t_near, t_split));
            }
        }
        best
    }
}
