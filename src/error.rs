//! Error types for xsdgraph
//!
//! This module defines all error types used throughout the library.

use std::fmt;
use thiserror::Error;

/// Result type alias using xsdgraph Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xsdgraph operations
#[derive(Error, Debug)]
pub enum Error {
    /// XML parsing error
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Resource loading error
    #[error("resource error: {0}")]
    Resource(String),

    /// Graph rendering error (layout engine missing or failing)
    #[error("render error: {0}")]
    Render(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// XML parsing error
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Location in the parsed source, e.g. `schema.xsd:12:5`
    pub location: Option<String>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the location from a byte offset into `source`
    pub fn at_offset(self, source: &[u8], offset: usize) -> Self {
        let (line, column) = line_column(source, offset);
        self.with_location(format!("{}:{}", line, column))
    }

    /// Prefix the location with the name of the source it came from
    pub fn in_source(mut self, name: &str) -> Self {
        self.location = Some(match self.location.take() {
            Some(loc) => format!("{}:{}", name, loc),
            None => name.to_string(),
        });
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref loc) = self.location {
            write!(f, " (at {})", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// 1-based line and column of a byte offset
fn line_column(source: &[u8], offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let column = match before.iter().rposition(|&b| b == b'\n') {
        Some(nl) => offset - nl,
        None => offset + 1,
    };
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("unexpected end of input").with_location("schema.xsd:42:10");

        let msg = format!("{}", err);
        assert!(msg.contains("unexpected end of input"));
        assert!(msg.contains("schema.xsd:42:10"));
    }

    #[test]
    fn test_location_from_offset() {
        let source = b"<a>\n  <b>\n</a>";
        let err = ParseError::new("bad").at_offset(source, 6);
        assert_eq!(err.location.as_deref(), Some("2:3"));

        let err = ParseError::new("bad").at_offset(source, 0);
        assert_eq!(err.location.as_deref(), Some("1:1"));
    }

    #[test]
    fn test_in_source_prefixes_location() {
        let err = ParseError::new("bad").with_location("3:7").in_source("orders.xsd");
        assert_eq!(err.location.as_deref(), Some("orders.xsd:3:7"));

        let err = ParseError::new("bad").in_source("orders.xsd");
        assert_eq!(err.location.as_deref(), Some("orders.xsd"));
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = ParseError::new("test").into();
        assert!(matches!(err, Error::Parse(_)));

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
