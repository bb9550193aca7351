//! Graph extraction from an element tree
//!
//! Walks the tree depth-first carrying the name of the nearest named
//! ancestor. Every named element becomes the active parent for its subtree;
//! only names with an `import`/`export` prefix become graph nodes, and an
//! edge is added only when the active parent is a node of the same graph.

use crate::documents::Element;
use crate::graph::{Category, SchemaGraphs};
use tracing::{debug, span, trace, Level};

/// Converts element trees into import/export graphs
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaGraphExtractor;

impl SchemaGraphExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract both graphs from the tree rooted at `root`
    pub fn extract(&self, root: &Element) -> SchemaGraphs {
        let extract_span = span!(Level::DEBUG, "extract", root = %root.tag);
        let _enter = extract_span.enter();

        let mut graphs = SchemaGraphs::new();
        let mut stack: Vec<(&Element, Option<&str>)> = vec![(root, None)];
        let mut visited = 0usize;

        while let Some((elem, parent_name)) = stack.pop() {
            visited += 1;
            let node_name = elem.name();

            if let Some(name) = node_name {
                match Category::classify(name) {
                    Some(category) => {
                        let graph = graphs.get_mut(category);
                        graph.add_node(name);
                        if let Some(parent) = parent_name {
                            if graph.add_edge(parent, name) {
                                trace!(%category, parent, name, "added edge");
                            }
                        }
                        trace!(%category, name, "added node");
                    }
                    None => trace!(name, "name matches no category"),
                }
            }

            let active_parent = node_name.or(parent_name);
            for child in &elem.children {
                stack.push((child, active_parent));
            }
        }

        debug!(
            elements = visited,
            import_nodes = graphs.import.node_count(),
            import_edges = graphs.import.edge_count(),
            export_nodes = graphs.export.node_count(),
            export_edges = graphs.export.edge_count(),
            "extraction complete"
        );

        graphs
    }
}

/// Extract both graphs from the tree rooted at `root`
pub fn extract(root: &Element) -> SchemaGraphs {
    SchemaGraphExtractor::new().extract(root)
}
