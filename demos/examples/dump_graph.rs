// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Print a small tree as a Graphviz digraph.
//!
//! Run:
//! - `cargo run -p sapling_examples --example dump_graph | dot -Tsvg > tree.svg`

use glam::vec3;
use sapling_kd_tree::{Config, KdTree, Triangle};

fn main() {
    // A 4x4 patch of quads in the xz plane.
    let mut triangles = Vec::new();
    for i in 0..4 {
        for j in 0..4 {
            let (x, z) = (i as f32, j as f32);
            let y = ((i * 4 + j) % 3) as f32 * 0.25;
            triangles.push(Triangle::new(
                vec3(x, y, z),
                vec3(x + 1.0, y, z),
                vec3(x + 1.0, y, z + 1.0),
            ));
            triangles.push(Triangle::new(
                vec3(x, y, z),
                vec3(x + 1.0, y, z + 1.0),
                vec3(x, y, z + 1.0),
            ));
        }
    }

    let mut tree = KdTree::new();
    tree.build(&triangles, Config::default());

    let mut graph = String::new();
    tree.dump_graph(&mut graph).expect("formatting failed");
    println!("{graph}");
}
