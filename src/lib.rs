//! # xsdgraph
//!
//! Extracts the named elements of an XML Schema (XSD) file into two directed
//! graphs, partitioned by name prefix, and renders each graph with Graphviz.
//!
//! ## Graph extraction
//!
//! - An element is *named* when it has a non-empty `name` attribute.
//! - Names starting with `import` go to the import graph, names starting with
//!   `export` go to the export graph, all other names go nowhere.
//! - Every named element is the *active parent* of its subtree; unnamed
//!   elements pass their inherited parent through unchanged.
//! - A categorised element gets an edge from its active parent when that
//!   parent is a node of the same graph.
//!
//! ## Example
//!
//! ```rust
//! use xsdgraph::documents::Document;
//! use xsdgraph::extract::extract;
//!
//! let doc = Document::from_string(
//!     r#"<schema><element name="importUser"><element name="importAddress"/></element></schema>"#,
//! )?;
//! let graphs = extract(doc.root());
//!
//! assert!(graphs.import.contains_edge("importUser", "importAddress"));
//! assert!(graphs.export.is_empty());
//! # Ok::<(), xsdgraph::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;
pub mod config;
pub mod logging;

// Input
pub mod loaders;
pub mod documents;

// Graphs
pub mod graph;
pub mod extract;

// Output
pub mod dot;
pub mod render;
pub mod session;

// Re-exports for convenience
pub use error::{Error, Result};
pub use extract::SchemaGraphExtractor;
pub use graph::{Category, SchemaGraph, SchemaGraphs};
pub use session::Session;

/// Version of the xsdgraph library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
