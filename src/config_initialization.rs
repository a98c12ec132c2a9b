//! Configuration initialization and hierarchy management
//!
//! Precedence: CLI > Env > File > Defaults. Clap already folds the
//! `VIDCOMPRESS_*` variables into the parsed arguments, so only the file and
//! the built-in defaults are layered here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::adapters::toml_config::{FileConfig, TomlConfigAdapter};
use crate::cli::Cli;
use crate::domain::model::TargetSpec;
use crate::error::VidCompressResult;
use crate::utils::logging::LoggingConfig;

pub const FFMPEG: &str = "ffmpeg";
pub const FFPROBE: &str = "ffprobe";

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub root: PathBuf,
    pub target: TargetSpec,
    pub keep_original: bool,
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    pub logging: LoggingConfig,
    pub operation_timeout: Option<Duration>,
}

/// Build the run configuration from the parsed CLI and the config file
pub fn initialize_configuration_hierarchy(cli: &Cli) -> VidCompressResult<AppConfig> {
    let file = TomlConfigAdapter::load_or_default(cli.config.as_deref())?;
    Ok(merge(cli, file))
}

/// Layer CLI values over file values over defaults
pub fn merge(cli: &Cli, file: FileConfig) -> AppConfig {
    let defaults = LoggingConfig::default();
    let logging = LoggingConfig {
        level: cli
            .log_level
            .clone()
            .or(file.log_level)
            .unwrap_or(defaults.level),
        format: cli.log_format.or(file.log_format).unwrap_or(defaults.format),
        colored: defaults.colored,
    };

    let ffmpeg = cli.ffmpeg.clone().or(file.ffmpeg_path);
    let ffprobe = cli.ffprobe.clone().or(file.ffprobe_path);

    AppConfig {
        root: cli.folder.clone(),
        target: TargetSpec::new(cli.video_codec.into(), cli.container.into()),
        keep_original: cli.keep_original,
        ffmpeg: resolve_tool(ffmpeg.as_deref(), FFMPEG),
        ffprobe: resolve_tool(ffprobe.as_deref(), FFPROBE),
        logging,
        operation_timeout: cli
            .timeout
            .or(file.operation_timeout_secs)
            .map(Duration::from_secs),
    }
}

/// Configured path if it exists, else `name` looked up on PATH, else the bare
/// name so the spawn error surfaces per file
pub fn resolve_tool(configured: Option<&Path>, name: &str) -> PathBuf {
    if let Some(path) = configured {
        if path.is_file() {
            return path.to_path_buf();
        }
        debug!(
            "Configured {} not found at {}, falling back to PATH",
            name,
            path.display()
        );
    }

    which::which(name).unwrap_or_else(|_| PathBuf::from(name))
}

/// Warn about tools that cannot be started. Not fatal: every file will then
/// report its own probe or operation failure.
pub fn warn_missing_tools(config: &AppConfig) {
    for tool in [&config.ffprobe, &config.ffmpeg] {
        let found = if tool.components().count() > 1 {
            tool.is_file()
        } else {
            which::which(tool).is_ok()
        };
        if !found {
            warn!("{} not found; files will fail to process", tool.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Container, VideoCodec};
    use crate::utils::logging::LogFormat;
    use clap::Parser;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_wins_over_file() {
        let cli = parse(&[
            "vidcompress",
            "media",
            "--log-level",
            "debug",
            "--timeout",
            "30",
            "--video-codec",
            "vp9",
        ]);
        let file = FileConfig {
            log_level: Some("warn".to_string()),
            log_format: Some(LogFormat::Json),
            operation_timeout_secs: Some(600),
            ..FileConfig::default()
        };

        let config = merge(&cli, file);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.operation_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.target, TargetSpec::new(VideoCodec::Vp9, Container::Mp4));
        assert_eq!(config.root, PathBuf::from("media"));
    }

    #[test]
    fn test_defaults_without_file() {
        let config = merge(&parse(&["vidcompress", "media"]), FileConfig::default());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.operation_timeout, None);
        assert_eq!(config.target, TargetSpec::default());
        assert!(!config.keep_original);
    }

    #[test]
    fn test_resolve_tool_prefers_existing_configured_path() {
        let dir = TempDir::new().unwrap();
        let tool = dir.path().join("my-ffmpeg");
        std::fs::write(&tool, b"").unwrap();

        assert_eq!(resolve_tool(Some(&tool), FFMPEG), tool);
    }

    #[test]
    fn test_resolve_tool_falls_back_to_name() {
        let resolved = resolve_tool(
            Some(Path::new("/nonexistent/vidcompress-tool")),
            "vidcompress-no-such-tool",
        );
        assert_eq!(resolved, PathBuf::from("vidcompress-no-such-tool"));
    }
}
