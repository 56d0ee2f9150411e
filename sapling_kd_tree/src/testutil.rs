// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the crate's tests.

use alloc::vec::Vec;
use glam::vec3;

use crate::types::{Intersection, Ray, Triangle};

/// Deterministic xorshift generator.
pub(crate) struct Rng(u64);

impl Rng {
    pub(crate) fn new(seed: u64) -> Self {
        Self(seed | 1)
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    pub(crate) fn next_f32(&mut self) -> f32 {
        let v = self.next_u64() >> 40;
        (v as f32) / ((1u64 << 24) as f32)
    }

    pub(crate) fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }
}

/// A bumpy height-field soup over an `n x n` grid of quads in the xz plane.
/// Heights lie in `[0, 1]`.
pub(crate) fn terrain(n: usize, seed: u64) -> Vec<Triangle> {
    let mut rng = Rng::new(seed);
    let mut heights = Vec::with_capacity((n + 1) * (n + 1));
    for _ in 0..(n + 1) * (n + 1) {
        heights.push(rng.range(0.0, 1.0));
    }
    let h = |i: usize, j: usize| heights[i * (n + 1) + j];
    let mut out = Vec::with_capacity(n * n * 2);
    for i in 0..n {
        for j in 0..n {
            let p00 = vec3(i as f32, h(i, j), j as f32);
            let p10 = vec3(i as f32 + 1.0, h(i + 1, j), j as f32);
            let p01 = vec3(i as f32, h(i, j + 1), j as f32 + 1.0);
            let p11 = vec3(i as f32 + 1.0, h(i + 1, j + 1), j as f32 + 1.0);
            out.push(Triangle::new(p00, p10, p11));
            out.push(Triangle::new(p00, p11, p01));
        }
    }
    out
}

/// A strip of `n` triangles along x in the xy plane.
pub(crate) fn ribbon(n: usize) -> Vec<Triangle> {
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let x = i as f32;
        out.push(Triangle::new(
            vec3(x, 0.0, 0.0),
            vec3(x + 1.0, 0.0, 0.0),
            vec3(x + 0.5, 1.0, 0.0),
        ));
    }
    out
}

/// Closest hit by testing every triangle.
pub(crate) fn brute_force_closest(triangles: &[Triangle], ray: Ray) -> Intersection {
    let mut best = Intersection::MISS;
    for (i, tri) in triangles.iter().enumerate() {
        let t = ray.intersect_triangle(tri);
        if t >= 0.0 && (!best.is_hit() || t < best.t) {
            best = Intersection {
                triangle_index: i as u32,
                t,
            };
        }
    }
    best
}

/// A ray aimed from above a [`terrain`] mesh toward a point inside it.
pub(crate) fn ray_onto_terrain(n: usize, rng: &mut Rng) -> Ray {
    let side = n as f32;
    let target = vec3(rng.range(0.5, side - 0.5), 0.5, rng.range(0.5, side - 0.5));
    let origin = vec3(rng.range(0.0, side), side + 5.0, rng.range(0.0, side));
    Ray::new(origin, target - origin)
}
