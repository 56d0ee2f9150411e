// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build a tree and compare a few ray queries against brute force.
//!
//! Run:
//! - `cargo run -p sapling_examples --example build_and_raycast`
//! - `cargo run -p sapling_examples --example build_and_raycast -- model.cs350_binary`
//!
//! Without an argument a procedural triangle strip is used; with one, the
//! mesh is loaded from the given CS350 binary file.

use glam::vec3;
use sapling_kd_tree::{Config, DebugStats, Intersection, KdTree, Ray, Triangle};
use sapling_mesh::MeshData;

fn strip(n: usize) -> Vec<Triangle> {
    (0..n)
        .map(|i| {
            let x = i as f32;
            Triangle::new(
                vec3(x, 0.0, 0.0),
                vec3(x + 1.0, 0.0, 0.0),
                vec3(x + 0.5, 1.0, 0.0),
            )
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

fn main() {
    let (triangles, center) = match std::env::args().nth(1) {
        Some(path) => {
            let mesh = MeshData::load(&path).expect("failed to load mesh");
            let center = mesh.centroid();
            println!(
                "loaded {path}: {} triangles, bounds {:?}..{:?}",
                mesh.triangles().len(),
                mesh.bounds_min,
                mesh.bounds_max
            );
            (mesh.triangles(), center)
        }
        None => {
            let triangles = strip(64);
            let center = vec3(32.0, 0.5, 0.0);
            (triangles, center)
        }
    };

    let mut tree = KdTree::new();
    tree.build(&triangles, Config::default());
    println!("built: {tree:?}");

    // Aim rays at the model from a handful of directions.
    let offsets = [
        vec3(0.3, 0.7, 9.0),
        vec3(-4.0, 2.0, 7.0),
        vec3(6.0, -1.0, 8.0),
        vec3(0.0, 8.0, 2.0),
    ];
    for offset in offsets {
        let origin = center + offset;
        let ray = Ray::new(origin, center - origin);

        let mut stats = DebugStats::default();
        let hit = tree.get_closest(&triangles, ray, Some(&mut stats));
        let reference = brute_force(&triangles, ray);
        assert!(
            (hit.t - reference.t).abs() < 1e-3,
            "tree and brute force disagree"
        );

        if hit.is_hit() {
            println!(
                "hit triangle {} at t={:.4} ({} of {} triangles tested, {} nodes visited)",
                hit.triangle_index,
                hit.t,
                stats.tested_triangles.len(),
                triangles.len(),
                stats.traversed_nodes.len(),
            );
        } else {
            println!(
                "miss ({} of {} triangles tested)",
                stats.tested_triangles.len(),
                triangles.len(),
            );
        }
    }
}
