//! Resource loading utilities
//!
//! This module handles loading of schema files from disk.

use crate::documents::Document;
use crate::error::{Error, Result};
use crate::limits::Limits;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Resource loader for schema files
#[derive(Debug, Clone, Default)]
pub struct Loader {
    /// Resource limits
    limits: Limits,
}

impl Loader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// The limits applied by this loader
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Load a file as bytes
    pub fn load(&self, path: &Path) -> Result<Vec<u8>> {
        let content = fs::read(path).map_err(|e| {
            Error::Resource(format!("Failed to read file '{}': {}", path.display(), e))
        })?;

        self.limits.check_xml_size(content.len())?;

        debug!(path = %path.display(), bytes = content.len(), "loaded schema file");
        Ok(content)
    }

    /// Load and parse a file into a document
    pub fn load_document(&self, path: &Path) -> Result<Document> {
        let content = self.load(path)?;
        self.parse_document(&path.display().to_string(), &content)
    }

    /// Parse in-memory content, attributing parse errors to `source_name`
    pub fn parse_document(&self, source_name: &str, content: &[u8]) -> Result<Document> {
        Document::parse_with_limits(content, &self.limits).map_err(|e| match e {
            Error::Parse(parse) => Error::Parse(parse.in_source(source_name)),
            other => other,
        })
    }
}
