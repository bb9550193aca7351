//! Rendering schema graphs to images
//!
//! Layout is delegated to an external Graphviz program. The graph is
//! written to the program's stdin as DOT text and the image is written
//! straight to the output path, replacing any previous file.

use crate::config::RenderConfig;
use crate::dot::to_dot;
use crate::error::{Error, Result};
use crate::graph::SchemaGraph;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Turns a graph into an image file
pub trait Renderer {
    /// Render `graph` to `output`, overwriting it
    fn render(&self, graph: &SchemaGraph, output: &Path) -> Result<()>;

    /// File extension of the images this renderer produces
    fn extension(&self) -> &str;
}

/// Renderer that shells out to a Graphviz layout program
#[derive(Debug, Clone, Default)]
pub struct GraphvizRenderer {
    config: RenderConfig,
}

impl GraphvizRenderer {
    /// Create a renderer with the given settings
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// The renderer's settings
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

impl Renderer for GraphvizRenderer {
    fn render(&self, graph: &SchemaGraph, output: &Path) -> Result<()> {
        let dot = to_dot(graph, &self.config);
        let engine = &self.config.engine;

        debug!(
            engine = %engine,
            format = %self.config.format,
            output = %output.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "invoking layout engine"
        );

        let mut child = Command::new(engine)
            .arg(format!("-T{}", self.config.format))
            .arg("-o")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::Render(format!(
                    "layout engine '{}' not found; is Graphviz installed?",
                    engine
                )),
                _ => Error::Render(format!("failed to start layout engine '{}': {}", engine, e)),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(dot.as_bytes()) {
                Ok(()) => {}
                // Engine quit before reading all input; its exit status says why
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!(engine = %engine, "layout engine closed its input early");
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(Error::Render(format!(
                        "failed to write to layout engine '{}': {}",
                        engine, e
                    )));
                }
            }
        }

        let result = child.wait_with_output()?;
        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::Render(format!(
                "layout engine '{}' failed ({}): {}",
                engine,
                result.status,
                stderr.trim()
            )));
        }

        info!(category = %graph.category(), output = %output.display(), "rendered graph");
        Ok(())
    }

    fn extension(&self) -> &str {
        &self.config.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Category;

    #[test]
    fn test_missing_engine() {
        let renderer = GraphvizRenderer::new(RenderConfig {
            engine: "xsdgraph-no-such-layout-engine".to_string(),
            ..RenderConfig::default()
        });
        let dir = tempfile::tempdir().unwrap();
        let graph = SchemaGraph::new(Category::Import);

        let err = renderer
            .render(&graph, &dir.path().join("out.png"))
            .unwrap_err();
        match err {
            Error::Render(msg) => assert!(msg.contains("not found")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extension_follows_format() {
        let renderer = GraphvizRenderer::new(RenderConfig {
            format: "svg".to_string(),
            ..RenderConfig::default()
        });
        assert_eq!(renderer.extension(), "svg");
        assert_eq!(GraphvizRenderer::default().extension(), "png");
    }
}
