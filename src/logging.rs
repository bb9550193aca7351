//! Logging setup
//!
//! The library emits `tracing` events; binaries call [`init_logging`] to
//! install a subscriber. Output goes to stderr so that stdout stays usable
//! for DOT and JSON output.
//!
//! Level resolution order: the `level` argument, `XSDGRAPH_LOG_LEVEL`,
//! `RUST_LOG`, then `warn`. Directives use the `EnvFilter` syntax, e.g.
//! `RUST_LOG="warn,xsdgraph::extract=trace"`.
//!
//! Format resolution order: the `format` argument, `XSDGRAPH_LOG_FORMAT`,
//! then `compact`.

use crate::error::{Error, Result};
use std::str::FromStr;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Environment variable overriding the log level
pub const LEVEL_ENV: &str = "XSDGRAPH_LOG_LEVEL";

/// Environment variable overriding the log format
pub const FORMAT_ENV: &str = "XSDGRAPH_LOG_FORMAT";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line format
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Initialize the global tracing subscriber
///
/// Fails on an unknown format, an invalid filter directive, or when a
/// subscriber is already installed.
pub fn init_logging(level: Option<&str>, format: Option<&str>) -> Result<()> {
    let log_level = level
        .map(|s| s.to_string())
        .or_else(|| std::env::var(LEVEL_ENV).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "warn".to_string());

    let log_format = format
        .map(|s| s.to_string())
        .or_else(|| std::env::var(FORMAT_ENV).ok())
        .unwrap_or_else(|| "compact".to_string());

    let filter = EnvFilter::try_new(&log_level)
        .map_err(|e| Error::Config(format!("Invalid log level '{}': {}", log_level, e)))?;
    let format = LogFormat::from_str(&log_format).map_err(Error::Config)?;

    let registry = Registry::default().with(filter);
    let installed = match format {
        LogFormat::Compact => registry
            .with(
                fmt::Layer::default()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_level(true)
                    .with_span_events(FmtSpan::NONE)
                    .compact(),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::Layer::default()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::ACTIVE)
                    .pretty(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::Layer::default()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::ACTIVE)
                    .json(),
            )
            .try_init(),
    };

    installed.map_err(|e| Error::Other(format!("Failed to initialize logging: {}", e)))
}
