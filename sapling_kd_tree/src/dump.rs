// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain-text and Graphviz introspection writers.

use core::fmt::{self, Write};

use crate::tree::KdTree;

fn axis_name(axis: usize) -> char {
    (b'x' + axis as u8) as char
}

impl KdTree {
    /// Write an indented listing of every node.
    ///
    /// Internal nodes print their split plane, leaves their index range.
    pub fn dump<W: Write>(&self, out: &mut W) -> fmt::Result {
        if self.empty() {
            return Ok(());
        }
        self.dump_node(out, 0, 0)
    }

    fn dump_node<W: Write>(&self, out: &mut W, index: usize, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            out.write_str("  ")?;
        }
        let node = self.nodes()[index];
        if node.is_leaf() {
            writeln!(
                out,
                "Node {index} [leaf, {}:{}]",
                node.primitive_start(),
                node.primitive_start() + node.primitive_count()
            )
        } else {
            writeln!(
                out,
                "Node {index} [internal, split {}={}]",
                axis_name(node.axis()),
                node.split()
            )?;
            self.dump_node(out, index + 1, depth + 1)?;
            self.dump_node(out, node.right_child() as usize, depth + 1)
        }
    }

    /// Write the tree as a Graphviz digraph for offline inspection.
    pub fn dump_graph<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "digraph kdtree {{")?;
        writeln!(
            out,
            "\tnode[shape=none, style=\"rounded,filled\", fontcolor=\"#101010\"]"
        )?;
        if !self.empty() {
            self.dump_graph_node(out, 0, 0)?;
        }
        write!(out, "}}")
    }

    fn dump_graph_node<W: Write>(&self, out: &mut W, index: usize, parent: usize) -> fmt::Result {
        let node = self.nodes()[index];
        if node.is_leaf() {
            writeln!(
                out,
                "\tNODE{index}[label=\"{} triangles\"];",
                node.primitive_count()
            )?;
        } else {
            writeln!(
                out,
                "\tNODE{index}[label=\"split {} at {}\\n{} subtriangles\"];",
                axis_name(node.axis()),
                node.split(),
                self.subtree_primitive_count(index)
            )?;
        }
        if index != 0 {
            writeln!(out, "\tNODE{parent} -> NODE{index};")?;
        }
        if node.is_internal() {
            self.dump_graph_node(out, index + 1, index)?;
            self.dump_graph_node(out, node.right_child() as usize, index)?;
        }
        Ok(())
    }

    /// Sum of leaf range lengths below `index`; duplicated straddlers count
    /// once per leaf.
    fn subtree_primitive_count(&self, index: usize) -> u32 {
        let node = self.nodes()[index];
        if node.is_leaf() {
            node.primitive_count()
        } else {
            self.subtree_primitive_count(index + 1)
                + self.subtree_primitive_count(node.right_child() as usize)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::ribbon;
    use crate::tree::{Config, KdTree};
    use alloc::string::String;

    #[test]
    fn dump_lists_every_node() {
        let tris = ribbon(4);
        let mut tree = KdTree::new();
        tree.build(&tris, Config::default());
        let mut text = String::new();
        tree.dump(&mut text).unwrap();
        assert_eq!(text.lines().count(), tree.nodes().len());
        assert!(text.contains("internal"));
        assert!(text.contains("leaf"));
    }

    #[test]
    fn dump_graph_has_an_edge_per_child() {
        let tris = ribbon(4);
        let mut tree = KdTree::new();
        tree.build(&tris, Config::default());
        let mut text = String::new();
        tree.dump_graph(&mut text).unwrap();
        assert!(text.starts_with("digraph kdtree {"));
        assert!(text.ends_with('}'));
        let edges = text.matches(" -> ").count();
        assert_eq!(edges, tree.nodes().len() - 1);
        assert!(text.contains("NODE0"));
    }

    #[test]
    fn empty_tree_dumps_nothing() {
        let tree = KdTree::new();
        let mut text = String::new();
        tree.dump(&mut text).unwrap();
        assert!(text.is_empty());
        tree.dump_graph(&mut text).unwrap();
        assert!(!text.contains("NODE"));
    }
}
