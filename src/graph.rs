//! Directed graphs of named schema elements
//!
//! Elements are partitioned into two graphs by the prefix of their `name`
//! attribute. Each graph is a set of node names plus a set of directed
//! `(parent, child)` edges between nodes of that same graph.

use indexmap::{Equivalent, IndexSet};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Graph category, selected by name prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Names starting with `import`
    Import,
    /// Names starting with `export`
    Export,
}

impl Category {
    /// All categories, in tab order
    pub const ALL: [Category; 2] = [Category::Import, Category::Export];

    /// Classify an element name. The match is a literal, case-sensitive prefix.
    pub fn classify(name: &str) -> Option<Category> {
        Self::ALL
            .into_iter()
            .find(|category| name.starts_with(category.prefix()))
    }

    /// Name prefix selecting this category
    pub fn prefix(self) -> &'static str {
        match self {
            Category::Import => "import",
            Category::Export => "export",
        }
    }

    /// Human-readable label ("Import", "Export")
    pub fn label(self) -> &'static str {
        match self {
            Category::Import => "Import",
            Category::Export => "Export",
        }
    }

    /// File stem used for this category's rendered image
    pub fn file_stem(self) -> &'static str {
        match self {
            Category::Import => "import_xsd_graph",
            Category::Export => "export_xsd_graph",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "import" => Ok(Category::Import),
            "export" => Ok(Category::Export),
            _ => Err(format!("Unknown category: {}. Use: import, export", s)),
        }
    }
}

/// Borrowed edge lookup key; hashes like the stored `(String, String)`
#[derive(Hash)]
struct EdgeKey<'a>(&'a str, &'a str);

impl Equivalent<(String, String)> for EdgeKey<'_> {
    fn equivalent(&self, key: &(String, String)) -> bool {
        self.0 == key.0 && self.1 == key.1
    }
}

/// A directed graph of element names
///
/// Insertion is idempotent and equality ignores insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaGraph {
    category: Category,
    nodes: IndexSet<String>,
    edges: IndexSet<(String, String)>,
}

impl SchemaGraph {
    /// Create an empty graph
    pub fn new(category: Category) -> Self {
        Self {
            category,
            nodes: IndexSet::new(),
            edges: IndexSet::new(),
        }
    }

    /// The category this graph collects
    pub fn category(&self) -> Category {
        self.category
    }

    /// Add a node. Returns `true` if it was not already present.
    pub fn add_node(&mut self, name: &str) -> bool {
        if self.nodes.contains(name) {
            return false;
        }
        self.nodes.insert(name.to_string())
    }

    /// Add an edge between two existing nodes.
    ///
    /// Returns `true` if the edge was inserted; `false` if it was already
    /// present or either endpoint is not a node of this graph.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        if !self.contains_node(from) || !self.contains_node(to) {
            return false;
        }
        self.edges.insert((from.to_string(), to.to_string()))
    }

    /// Check whether a node exists
    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes.contains(name)
    }

    /// Check whether an edge exists
    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.edges.contains(&EdgeKey(from, to))
    }

    /// Iterate over node names in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Iterate over edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().map(|(f, t)| (f.as_str(), t.as_str()))
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// JSON representation with sorted nodes and edges
    pub fn to_json(&self) -> Value {
        let mut nodes: Vec<&str> = self.nodes().collect();
        nodes.sort_unstable();
        let mut edges: Vec<(&str, &str)> = self.edges().collect();
        edges.sort_unstable();

        json!({
            "category": self.category.prefix(),
            "nodes": nodes,
            "edges": edges
                .iter()
                .map(|(from, to)| json!({ "from": from, "to": to }))
                .collect::<Vec<_>>(),
        })
    }
}

/// The pair of graphs produced by one extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaGraphs {
    /// Graph of `import*` elements
    pub import: SchemaGraph,
    /// Graph of `export*` elements
    pub export: SchemaGraph,
}

impl SchemaGraphs {
    /// Create an empty pair
    pub fn new() -> Self {
        Self {
            import: SchemaGraph::new(Category::Import),
            export: SchemaGraph::new(Category::Export),
        }
    }

    /// Graph for a category
    pub fn get(&self, category: Category) -> &SchemaGraph {
        match category {
            Category::Import => &self.import,
            Category::Export => &self.export,
        }
    }

    /// Mutable graph for a category
    pub fn get_mut(&mut self, category: Category) -> &mut SchemaGraph {
        match category {
            Category::Import => &mut self.import,
            Category::Export => &mut self.export,
        }
    }

    /// Iterate over both graphs in tab order
    pub fn iter(&self) -> impl Iterator<Item = &SchemaGraph> {
        [&self.import, &self.export].into_iter()
    }

    /// True when both graphs are empty
    pub fn is_empty(&self) -> bool {
        self.iter().all(SchemaGraph::is_empty)
    }

    /// JSON representation of both graphs
    pub fn to_json(&self) -> Value {
        json!({
            "import": self.import.to_json(),
            "export": self.export.to_json(),
        })
    }
}

impl Default for SchemaGraphs {
    fn default() -> Self {
        Self::new()
    }
}
