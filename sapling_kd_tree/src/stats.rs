// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-query debug statistics.

use alloc::vec::Vec;

/// Caller-owned record of the work one query performed.
///
/// A process-wide counter singleton would make concurrent queries racy, so
/// the counters live here and every query gets its own instance.
#[derive(Clone, Debug, Default)]
pub struct DebugStats {
    /// Node indices in visitation order (parents before their children).
    pub traversed_nodes: Vec<u32>,
    /// Triangle indices tested, in leaf-encounter order, misses included.
    pub tested_triangles: Vec<u32>,
    /// Number of ray/AABB clips performed.
    pub ray_aabb_tests: usize,
    /// Number of ray/triangle tests performed.
    pub ray_triangle_tests: usize,
}

impl DebugStats {
    /// Clear all lists and counters for reuse.
    pub fn reset(&mut self) {
        self.traversed_nodes.clear();
        self.tested_triangles.clear();
        self.ray_aabb_tests = 0;
        self.ray_triangle_tests = 0;
    }
}
