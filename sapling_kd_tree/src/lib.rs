// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sapling KD Tree: a static k-d tree over triangle soups.
//!
//! The tree is built once over an external triangle array with the
//! surface-area heuristic (SAH) and then answers closest-hit ray queries
//! while testing as few triangles as possible.
//!
//! - Build with [`KdTree::build`] over a borrowed `&[Triangle]`; the tree
//!   stores triangle indices, never the triangles themselves.
//! - Query with [`KdTree::get_closest`], optionally collecting per-query
//!   [`DebugStats`] (visited nodes, tested triangles, test counters).
//! - Inspect with [`KdTree::dump`], [`KdTree::dump_graph`], and the
//!   read-only accessors.
//!
//! Triangles straddling a split plane are referenced by both children, so
//! the index pool can be longer than the input array. Nodes are packed into
//! two 32-bit words and laid out in pre-order with an implicit left child.
//!
//! # Example
//!
//! ```rust
//! use glam::Vec3;
//! use sapling_kd_tree::{Config, DebugStats, KdTree, Ray, Triangle};
//!
//! let triangles = vec![
//!     Triangle::new(
//!         Vec3::new(0.0, 0.0, 0.0),
//!         Vec3::new(1.0, 0.0, 0.0),
//!         Vec3::new(0.5, 1.0, 0.0),
//!     ),
//!     Triangle::new(
//!         Vec3::new(10.0, 0.0, 0.0),
//!         Vec3::new(11.0, 0.0, 0.0),
//!         Vec3::new(10.5, 1.0, 0.0),
//!     ),
//! ];
//! let mut tree = KdTree::new();
//! tree.build(&triangles, Config::default());
//!
//! let ray = Ray::new(Vec3::new(0.5, 0.5, 1.0), Vec3::new(0.0, 0.0, -1.0));
//! let mut stats = DebugStats::default();
//! let hit = tree.get_closest(&triangles, ray, Some(&mut stats));
//! assert_eq!(hit.triangle_index, 0);
//! assert!((hit.t - 1.0).abs() < 1e-5);
//! // The second triangle's leaf was never opened.
//! assert_eq!(stats.tested_triangles, vec![0]);
//! ```
//!
//! # Semantics
//!
//! Queries are pure reads: concurrent queries against one tree are safe, and
//! all statistics are per-query. Build and query never fail for ordinary
//! inputs; the only observable miss state is `t < 0`. Vertex coordinates
//! are assumed finite (no NaNs).

#![no_std]

extern crate alloc;

mod builder;
mod dump;
pub mod node;
pub mod stats;
#[cfg(test)]
mod testutil;
mod traverse;
pub mod tree;
pub mod types;

pub use node::Node;
pub use stats::DebugStats;
pub use tree::{Config, KdTree};
pub use types::{Aabb, Intersection, Ray, Side, Triangle, classify_point_aabb};
