// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::vec3;
use sapling_kd_tree::{Config, Intersection, KdTree, Ray, Triangle};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed | 1)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f32(&mut self) -> f32 {
        let v = self.next_u64() >> 40;
        (v as f32) / ((1u64 << 24) as f32)
    }
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }
}

/// Height-field soup over an `n x n` grid of quads.
fn gen_terrain(n: usize, seed: u64) -> Vec<Triangle> {
    let mut rng = Rng::new(seed);
    let heights: Vec<f32> = (0..(n + 1) * (n + 1)).map(|_| rng.range(0.0, 1.0)).collect();
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

fn gen_rays(n: usize, count: usize, seed: u64) -> Vec<Ray> {
    let mut rng = Rng::new(seed);
    let side = n as f32;
    (0..count)
        .map(|_| {
            let target = vec3(rng.range(0.5, side - 0.5), 0.5, rng.range(0.5, side - 0.5));
            let origin = vec3(rng.range(0.0, side), side + 5.0, rng.range(0.0, side));
            Ray::new(origin, target - origin)
        })
        .collect()
}

fn brute_force(triangles: &[Triangle], ray: Ray) -> Intersection {
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

fn bench_closest_hit(c: &mut Criterion) {
    let n = 32;
    let triangles = gen_terrain(n, 0xC0FFEE);
    let rays = gen_rays(n, 256, 0xBEEF);

    let mut group = c.benchmark_group("closest_hit");
    group.throughput(Throughput::Elements(rays.len() as u64));

    group.bench_function("brute_force", |b| {
        b.iter(|| {
            for &ray in &rays {
                black_box(brute_force(&triangles, ray));
            }
        });
    });

    for max_depth in [4, 8, 0] {
        let mut tree = KdTree::new();
        tree.build(
            &triangles,
            Config {
                max_depth,
                ..Config::default()
            },
        );
        let name = match max_depth {
            0 => "kd_unlimited".to_string(),
            d => format!("kd_depth_{d}"),
        };
        group.bench_function(name, |b| {
            b.iter(|| {
                for &ray in &rays {
                    black_box(tree.get_closest(&triangles, ray, None));
                }
            });
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for n in [8, 16, 32] {
        let triangles = gen_terrain(n, 7);
        group.throughput(Throughput::Elements(triangles.len() as u64));
        group.bench_function(format!("terrain_{}x{n}", n), |b| {
            b.iter_batched(
                KdTree::new,
                |mut tree| {
                    tree.build(&triangles, Config::default());
                    tree
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_closest_hit, bench_build);
criterion_main!(benches);
