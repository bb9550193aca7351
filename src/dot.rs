//! DOT format output for schema graphs.

use std::fmt::Write;

use crate::config::RenderConfig;
use crate::graph::SchemaGraph;

/// Escape special characters for quoted DOT strings.
pub fn escape(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// A DOT graph builder for constructing valid DOT output.
pub struct DotBuilder {
    output: String,
}

impl DotBuilder {
    /// Create a new DOT digraph with the given name.
    pub fn new(name: &str) -> Self {
        let mut output = String::with_capacity(1024);
        let _ = writeln!(output, "digraph \"{}\" {{", escape(name));
        Self { output }
    }

    /// Add a node with attributes.
    pub fn node(&mut self, id: &str, attrs: &[(&str, &str)]) -> &mut Self {
        let _ = write!(self.output, "  \"{}\"", escape(id));
        self.attrs(attrs);
        self
    }

    /// Add an edge with attributes.
    pub fn edge(&mut self, from: &str, to: &str, attrs: &[(&str, &str)]) -> &mut Self {
        let _ = write!(self.output, "  \"{}\" -> \"{}\"", escape(from), escape(to));
        self.attrs(attrs);
        self
    }

    fn attrs(&mut self, attrs: &[(&str, &str)]) {
        if !attrs.is_empty() {
            self.output.push_str(" [");
            for (i, (key, value)) in attrs.iter().enumerate() {
                if i > 0 {
                    self.output.push_str(", ");
                }
                let _ = write!(self.output, "{}=\"{}\"", key, escape(value));
            }
            self.output.push(']');
        }
        self.output.push_str(";\n");
    }

    /// Close the graph and return the DOT text.
    pub fn finish(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }
}

/// Render a schema graph as DOT text.
pub fn to_dot(graph: &SchemaGraph, style: &RenderConfig) -> String {
    let mut builder = DotBuilder::new(graph.category().file_stem());

    for node in graph.nodes() {
        builder.node(node, &[("shape", style.node_shape.as_str())]);
    }
    for (from, to) in graph.edges() {
        builder.edge(from, to, &[("arrowhead", style.arrowhead.as_str())]);
    }

    builder.finish()
}
