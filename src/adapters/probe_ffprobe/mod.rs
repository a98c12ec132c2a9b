//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe` with JSON output and maps the format and stream sections
//! onto the domain `MediaProbe`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    format: Option<FfprobeFormat>,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    #[serde(default)]
    format_name: String,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    #[serde(default)]
    codec_type: String,
    codec_name: Option<String>,
    channels: Option<u32>,
}

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    binary: PathBuf,
}

impl FfprobeAdapter {
    /// Create new FFprobe adapter using the given executable
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe(&self, path: &Path) -> Result<MediaProbe, DomainError> {
        debug!("Probing {} with {}", path.display(), self.binary.display());

        let output = Command::new(&self.binary)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .stdin(std::process::Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DomainError::probe(
                        path,
                        format!("tool not found: {}", self.binary.display()),
                    )
                } else {
                    DomainError::probe(path, e.to_string())
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::probe(
                path,
                format!("ffprobe exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        let json = String::from_utf8(output.stdout)
            .map_err(|e| DomainError::probe(path, format!("invalid UTF-8 output: {}", e)))?;

        parse_ffprobe_json(&json).map_err(|message| DomainError::probe(path, message))
    }
}

/// Parse ffprobe's `-show_format -show_streams` JSON document
pub fn parse_ffprobe_json(json: &str) -> Result<MediaProbe, String> {
    let output: FfprobeOutput =
        serde_json::from_str(json).map_err(|e| format!("malformed ffprobe output: {}", e))?;

    let format = output
        .format
        .ok_or_else(|| "ffprobe output has no format section".to_string())?;

    let duration = format
        .duration
        .as_deref()
        .and_then(|d| d.trim().parse::<f64>().ok())
        .unwrap_or(0.0);

    let streams = output
        .streams
        .into_iter()
        .map(|s| Stream {
            kind: StreamKind::from_codec_type(&s.codec_type),
            codec_name: s.codec_name.unwrap_or_default(),
            channels: s.channels.unwrap_or(0),
        })
        .collect();

    Ok(MediaProbe {
        format_name: format.format_name,
        duration,
        streams,
    })
}
