//! Graphviz ("dot" language) export of a whole tree.
//!
//! Write-only debug tooling: the emitted digraph shows, for every node, its
//! arena index, parent, depth, aggregated volume, box corners, and the
//! element indices it holds. Nothing reads it back.

use std::fmt::{self, Write as _};
use std::fs::File;
use std::io::{self, Write as _};
use std::path::Path;

use crate::{ElementIndex, Float};

use super::{Octree, ROOT};

/// Render a list of element indices as a blue HTML table fragment,
/// `columns` indices per line.
fn element_table(elements: &[ElementIndex], columns: usize) -> String {
    let mut out = String::new();
    for chunk in elements.chunks(columns) {
        let line = chunk
            .iter()
            .map(|eid| format!("<FONT COLOR=\"BLUE\">{eid}</FONT>"))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&line);
        out.push_str("<BR/>");
    }
    out
}

impl<Real: Float> Octree<'_, Real> {
    /// Render the whole tree as a Graphviz digraph.
    pub fn dot_string(&self) -> String {
        let mut nodes = Vec::with_capacity(self.n_nodes());
        let mut edges = Vec::with_capacity(self.n_nodes());

        let mut stack = vec![ROOT];
        while let Some(index) = stack.pop() {
            let node = &self.nodes()[index as usize];

            let mut label = String::new();
            let _ = write!(
                label,
                "    {index} [label=<<FONT COLOR=\"RED\">{index}</FONT> ({parent}) {{{depth}}}",
                parent = node.parent().map_or(-1, |p| p as i64),
                depth = node.depth(),
            );
            let _ = write!(label, "<BR/>volume: {}", node.volume());
            let r_min = node.r_min();
            let r_max = node.r_max();
            let _ = write!(label, "<BR/>min:{}, {}, {}", r_min.x, r_min.y, r_min.z);
            let _ = write!(label, "<BR/>max:{}, {}, {}", r_max.x, r_max.y, r_max.z);
            let _ = write!(label, "<BR/>{}>]", element_table(node.elements(), 5));
            nodes.push(label);

            if let Some(parent) = node.parent() {
                edges.push(format!("    {parent} -> {index}"));
            }

            if let Some(children) = node.children() {
                for &child in children {
                    stack.push(child);
                }
            }
        }

        let mut out = String::new();
        out.push_str("digraph G{\n");
        out.push_str("    graph [splines=ortho, rankdir=LR, nodesep=0.5, overlap=false];\n");
        out.push_str("    node [shape=box];\n");
        for node in &nodes {
            out.push_str(node);
            out.push('\n');
        }
        for edge in &edges {
            out.push_str(edge);
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }

    /// Write the Graphviz rendering of the tree to a file.
    ///
    /// # Errors
    ///
    /// * Any I/O error from creating or writing the file.
    pub fn write_dot<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.dot_string().as_bytes())
    }
}

impl<Real: Float> fmt::Display for Octree<'_, Real> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dot_string())
    }
}
