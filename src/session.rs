//! Open-schema sessions
//!
//! A [`Session`] owns everything an open action needs: the loader, the
//! renderer and the output directory. Each successful open replaces the
//! current [`OpenedSchema`]; a failed open returns the error and leaves the
//! previous one in place.

use crate::config::AppConfig;
use crate::documents::Document;
use crate::error::{Error, Result};
use crate::extract::SchemaGraphExtractor;
use crate::graph::{Category, SchemaGraphs};
use crate::loaders::Loader;
use crate::render::{GraphvizRenderer, Renderer};
use std::path::{Path, PathBuf};
use tracing::{info, span, Level};

/// An image produced for one graph category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    /// Category the image shows
    pub category: Category,
    /// Path of the image file
    pub path: PathBuf,
}

impl RenderedImage {
    /// Tab label for the image ("Import", "Export")
    pub fn label(&self) -> &'static str {
        self.category.label()
    }
}

/// Result of a successful open action
#[derive(Debug, Clone)]
pub struct OpenedSchema {
    /// Where the schema came from
    pub source: String,
    /// Number of elements in the parsed document
    pub element_count: usize,
    /// Number of elements carrying a name
    pub named_count: usize,
    /// Extracted graphs
    pub graphs: SchemaGraphs,
    /// Rendered images, one per category in tab order
    pub images: Vec<RenderedImage>,
}

/// Session state for a sequence of open actions
#[derive(Debug)]
pub struct Session<R: Renderer> {
    loader: Loader,
    renderer: R,
    extractor: SchemaGraphExtractor,
    output_dir: PathBuf,
    current: Option<OpenedSchema>,
}

impl Session<GraphvizRenderer> {
    /// Create a Graphviz-backed session from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let output_dir = match &config.render.output_dir {
            Some(dir) => dir.clone(),
            None => default_output_dir()?,
        };
        Ok(Session::new(
            Loader::new().with_limits(config.limits.clone()),
            GraphvizRenderer::new(config.render.clone()),
            output_dir,
        ))
    }
}

impl<R: Renderer> Session<R> {
    /// Create a session
    pub fn new(loader: Loader, renderer: R, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            loader,
            renderer,
            extractor: SchemaGraphExtractor::new(),
            output_dir: output_dir.into(),
            current: None,
        }
    }

    /// Directory receiving rendered images
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Image path for a category
    pub fn image_path(&self, category: Category) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", category.file_stem(), self.renderer.extension()))
    }

    /// Open a schema file: load, parse, extract and render
    pub fn open(&mut self, path: &Path) -> Result<&OpenedSchema> {
        let open_span = span!(Level::INFO, "open", path = %path.display());
        let _enter = open_span.enter();

        let document = self.loader.load_document(path)?;
        self.finish_open(path.display().to_string(), document)
    }

    /// Open a schema held in memory; `source` names it in errors
    pub fn open_source(&mut self, source: &str, xml: &str) -> Result<&OpenedSchema> {
        let open_span = span!(Level::INFO, "open", source);
        let _enter = open_span.enter();

        let document = self.loader.parse_document(source, xml.as_bytes())?;
        self.finish_open(source.to_string(), document)
    }

    fn finish_open(&mut self, source: String, document: Document) -> Result<&OpenedSchema> {
        let root = document.root();
        let element_count = root.descendants().count();
        let named_count = root.descendants().filter(|e| e.name().is_some()).count();
        let graphs = self.extractor.extract(root);

        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            Error::Resource(format!(
                "Failed to create output directory '{}': {}",
                self.output_dir.display(),
                e
            ))
        })?;

        // Both images are staged next to their final paths; the live files
        // are only replaced once every category has rendered.
        let mut staged = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let staging = tempfile::Builder::new()
                .prefix(&format!(".{}-", category.file_stem()))
                .suffix(&format!(".{}", self.renderer.extension()))
                .tempfile_in(&self.output_dir)?;
            self.renderer.render(graphs.get(category), staging.path())?;
            staged.push((category, staging));
        }

        let mut images = Vec::with_capacity(staged.len());
        for (category, staging) in staged {
            let path = self.image_path(category);
            staging.persist(&path).map_err(|e| e.error)?;
            images.push(RenderedImage { category, path });
        }

        info!(
            source = %source,
            import_nodes = graphs.import.node_count(),
            export_nodes = graphs.export.node_count(),
            "schema opened"
        );

        Ok(self.current.insert(OpenedSchema {
            source,
            element_count,
            named_count,
            graphs,
            images,
        }))
    }

    /// The most recently opened schema
    pub fn current(&self) -> Option<&OpenedSchema> {
        self.current.as_ref()
    }

    /// Graphs of the most recently opened schema
    pub fn graphs(&self) -> Option<&SchemaGraphs> {
        self.current.as_ref().map(|opened| &opened.graphs)
    }

    /// Images of the most recently opened schema
    pub fn images(&self) -> &[RenderedImage] {
        self.current
            .as_ref()
            .map(|opened| opened.images.as_slice())
            .unwrap_or(&[])
    }

    /// Forget the current schema
    pub fn close(&mut self) -> Option<OpenedSchema> {
        self.current.take()
    }
}

/// Directory containing the running executable
pub fn default_output_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        Error::Other(format!(
            "executable '{}' has no parent directory",
            exe.display()
        ))
    })
}
