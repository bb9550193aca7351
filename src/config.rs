//! Application configuration
//!
//! Settings are read from an optional TOML file. Every key is optional and
//! falls back to the built-in defaults. A relative `output_dir` is resolved
//! against the directory holding the file.
//!
//! ```toml
//! [render]
//! engine = "dot"
//! format = "png"
//! node_shape = "ellipse"
//! arrowhead = "vee"
//! output_dir = "out"
//!
//! [limits]
//! max_xml_depth = 1000
//! ```

use crate::error::{Error, Result};
use crate::limits::Limits;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Rendering section
    #[serde(default)]
    pub render: RenderConfig,

    /// Parser limits section
    #[serde(default)]
    pub limits: Limits,

    #[serde(skip)]
    config_file_path: Option<PathBuf>,
}

/// How graphs are handed to the layout engine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Graphviz layout program
    pub engine: String,
    /// Output format passed as `-T<format>`; also the image file extension
    pub format: String,
    /// Node shape attribute
    pub node_shape: String,
    /// Edge arrowhead attribute
    pub arrowhead: String,
    /// Directory receiving rendered images; defaults to the executable's directory.
    /// A relative path in a configuration file is taken relative to that file.
    pub output_dir: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            engine: "dot".to_string(),
            format: "png".to_string(),
            node_shape: "ellipse".to_string(),
            arrowhead: "vee".to_string(),
            output_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::Config(format!(
                "configuration file '{}' not found",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        if let (Some(dir), Some(base)) = (config.render.output_dir.as_mut(), path.parent()) {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        config.config_file_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Builder: replace the rendering section
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    /// Builder: replace the limits section
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Path of the file this configuration was loaded from
    pub fn config_file_path(&self) -> Option<&Path> {
        self.config_file_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.render, RenderConfig::default());
        assert_eq!(config.render.engine, "dot");
        assert_eq!(config.render.format, "png");
        assert_eq!(config.limits, Limits::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml(
            r#"
[render]
format = "svg"
output_dir = "out"

[limits]
max_xml_depth = 50
"#,
        )
        .unwrap();

        assert_eq!(config.render.format, "svg");
        assert_eq!(config.render.engine, "dot");
        assert_eq!(config.render.output_dir, Some(PathBuf::from("out")));
        assert_eq!(config.limits.max_xml_depth, 50);
        assert_eq!(config.limits.max_attributes, Limits::default().max_attributes);
    }

    #[test]
    fn test_invalid_toml() {
        let result = AppConfig::from_toml("[render\nengine = ");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nengine = \"neato\"").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.render.engine, "neato");
        assert_eq!(config.config_file_path(), Some(file.path()));
    }

    #[test]
    fn test_relative_output_dir_follows_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xsdgraph.toml");
        fs::write(&path, "[render]\noutput_dir = \"out\"\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.render.output_dir, Some(dir.path().join("out")));

        let absolute = dir.path().join("elsewhere");
        fs::write(
            &path,
            format!("[render]\noutput_dir = {:?}\n", absolute.display().to_string()),
        )
        .unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.render.output_dir, Some(absolute));
    }

    #[test]
    fn test_missing_file() {
        let result = AppConfig::load("/nonexistent/xsdgraph.toml");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
