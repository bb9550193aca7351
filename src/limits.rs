//! Limits for schema loading and parsing
//!
//! Bounds the size and shape of documents accepted by the loader and the
//! parser so that a hostile or accidental input cannot exhaust memory.

use crate::error::{Error, Result};
use serde::Deserialize;

/// Resource limits applied while loading and parsing a schema
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum element nesting depth
    pub max_xml_depth: usize,

    /// Maximum XML file size in bytes
    pub max_xml_size: usize,

    /// Maximum number of attributes per element
    pub max_attributes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_xml_depth: 1000,
            max_xml_size: 100 * 1024 * 1024, // 100 MB
            max_attributes: 1000,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_xml_depth: 100,
            max_xml_size: 10 * 1024 * 1024, // 10 MB
            max_attributes: 100,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_xml_depth: 10000,
            max_xml_size: 1024 * 1024 * 1024, // 1 GB
            max_attributes: 10000,
        }
    }

    /// Check element nesting depth
    pub fn check_xml_depth(&self, depth: usize) -> Result<()> {
        within("element nesting depth", depth, self.max_xml_depth)
    }

    /// Check document size in bytes
    pub fn check_xml_size(&self, size: usize) -> Result<()> {
        within("document size in bytes", size, self.max_xml_size)
    }

    /// Check attribute count of a single element
    pub fn check_attributes(&self, count: usize) -> Result<()> {
        within("attributes on one element", count, self.max_attributes)
    }
}

fn within(what: &str, value: usize, max: usize) -> Result<()> {
    if value <= max {
        return Ok(());
    }
    Err(Error::LimitExceeded(format!("{what}: {value} is over the limit of {max}")))
}
