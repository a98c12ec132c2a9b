// TOML config adapter - Configuration file loading

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{VidCompressError, VidCompressResult};
use crate::utils::logging::LogFormat;

/// Settings accepted in the `[vidcompress]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub ffmpeg_path: Option<PathBuf>,
    pub ffprobe_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub operation_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    vidcompress: FileConfig,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// File picked up from the working directory when no path is given
    pub const DEFAULT_FILE: &'static str = "vidcompress.toml";

    /// Parse a configuration document
    pub fn parse(content: &str, origin: &Path) -> VidCompressResult<FileConfig> {
        let document: ConfigDocument =
            toml::from_str(content).map_err(|e| VidCompressError::Config {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;

        if document.vidcompress.operation_timeout_secs == Some(0) {
            return Err(VidCompressError::Config {
                path: origin.to_path_buf(),
                message: "operation_timeout_secs must be greater than zero".to_string(),
            });
        }

        Ok(document.vidcompress)
    }

    /// Load a configuration file that must exist
    pub fn load(path: &Path) -> VidCompressResult<FileConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| VidCompressError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!("Loaded configuration from {}", path.display());
        Self::parse(&content, path)
    }

    /// Load the explicitly named file, else the default file if present,
    /// else built-in defaults
    pub fn load_or_default(explicit: Option<&Path>) -> VidCompressResult<FileConfig> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(Self::DEFAULT_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(FileConfig::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_table() {
        let config = TomlConfigAdapter::parse(
            r#"
            [vidcompress]
            ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
            ffprobe_path = "/opt/ffmpeg/bin/ffprobe"
            log_level = "debug"
            log_format = "json"
            operation_timeout_secs = 3600
            "#,
            Path::new("vidcompress.toml"),
        )
        .unwrap();

        assert_eq!(
            config.ffmpeg_path,
            Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg"))
        );
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.log_format, Some(LogFormat::Json));
        assert_eq!(config.operation_timeout_secs, Some(3600));
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = TomlConfigAdapter::parse("", Path::new("x.toml")).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = TomlConfigAdapter::parse(
            "[vidcompress]\ncrf = 18\n",
            Path::new("x.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, VidCompressError::Config { .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(TomlConfigAdapter::parse(
            "[vidcompress]\noperation_timeout_secs = 0\n",
            Path::new("x.toml"),
        )
        .is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(TomlConfigAdapter::load_or_default(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[vidcompress]\nlog_level = \"warn\"\n").unwrap();

        let config = TomlConfigAdapter::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("warn"));
    }
}
