//! Logging configuration and subscriber setup
//!
//! Every user-facing notice is a `tracing` event. Informational output goes
//! to stdout next to the forwarded ffmpeg progress, warnings and errors go to
//! stderr.

use std::io::IsTerminal;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use crate::error::{VidCompressError, VidCompressResult};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human-readable format
    Pretty,
    /// Single-line text format
    #[default]
    Compact,
    /// JSON format for structured logging
    Json,
}

/// Logging configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `vidcompress=debug`
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Use colored output
    pub colored: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            colored: std::io::stdout().is_terminal() && std::io::stderr().is_terminal(),
        }
    }
}

impl LoggingConfig {
    /// Build the filter; an explicit `RUST_LOG` wins over the configured level
    pub fn env_filter(&self) -> VidCompressResult<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level).map_err(|e| {
            VidCompressError::Logging(format!("Invalid log level '{}': {}", self.level, e))
        })
    }
}

/// Install the global subscriber
pub fn init_logging(config: &LoggingConfig) -> VidCompressResult<()> {
    let filter = config.env_filter()?;
    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .with_ansi(config.colored);

    let installed = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| VidCompressError::Logging(e.to_string()))
}
