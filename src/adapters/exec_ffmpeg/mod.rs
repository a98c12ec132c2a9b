//! FFmpeg execution adapter
//!
//! Runs ffmpeg for transcodes and remuxes, forwarding its output to stdout
//! line by line while the process runs, and detects hardware encoders from
//! `ffmpeg -encoders`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

pub mod progress;

use progress::ProgressTracker;

/// FFmpeg-based execution adapter
pub struct FfmpegAdapter {
    binary: PathBuf,
    timeout: Option<Duration>,
}

impl FfmpegAdapter {
    /// Create new FFmpeg adapter using the given executable
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            timeout: None,
        }
    }

    /// Kill operations that run longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn tool_name(&self) -> String {
        self.binary
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ffmpeg".to_string())
    }

    /// Spawn ffmpeg, forward its output and wait for it to exit
    async fn run(
        &self,
        args: Vec<OsString>,
        input: &Path,
        duration: Option<f64>,
    ) -> Result<OperationStatus, DomainError> {
        debug!("Running {} {:?}", self.binary.display(), args);

        let mut child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DomainError::ToolNotFound(self.binary.display().to_string())
                } else {
                    DomainError::fs("spawn", &self.binary, e)
                }
            })?;

        let (stdout, stderr) = match (child.stdout.take(), child.stderr.take()) {
            (Some(stdout), Some(stderr)) => (stdout, stderr),
            _ => {
                return Err(DomainError::BadArgs(
                    "ffmpeg output pipes were not captured".to_string(),
                ))
            }
        };

        let finished = async {
            forward_output(stdout, stderr, duration).await;
            child.wait().await
        };

        let waited = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, finished).await.ok(),
            None => Some(finished.await),
        };

        match waited {
            Some(status) => status
                .map(OperationStatus::from)
                .map_err(|e| DomainError::fs("wait", input, e)),
            None => {
                let seconds = self.timeout.map(|t| t.as_secs()).unwrap_or_default();
                warn!(
                    "{} exceeded {}s on {}, killing it",
                    self.tool_name(),
                    seconds,
                    input.display()
                );
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill {}: {}", self.tool_name(), e);
                }
                Err(DomainError::OperationTimedOut {
                    tool: self.tool_name(),
                    path: input.to_path_buf(),
                    seconds,
                })
            }
        }
    }
}

/// Arguments shared by every invocation: quiet banner, no stdin, overwrite,
/// machine-readable progress on stdout
fn base_args(input: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-y", "-i"]
        .iter()
        .map(OsString::from)
        .collect();
    args.push(input.as_os_str().to_os_string());
    args
}

fn finish_args(mut args: Vec<OsString>, output: &Path) -> Vec<OsString> {
    args.extend(["-nostats", "-progress", "pipe:1"].iter().map(OsString::from));
    args.push(output.as_os_str().to_os_string());
    args
}

/// Arguments for a transcode to `encoder` with stereo AAC audio
pub fn encode_args(input: &Path, output: &Path, encoder: &VideoEncoder) -> Vec<OsString> {
    let channels = TARGET_AUDIO_CHANNELS.to_string();
    let mut args = base_args(input);
    args.extend(
        [
            "-c:v",
            encoder.name,
            "-c:a",
            TARGET_AUDIO_CODEC,
            "-ac",
            channels.as_str(),
        ]
        .iter()
        .map(OsString::from),
    );
    finish_args(args, output)
}

/// Arguments for a stream copy of every track
pub fn remux_args(input: &Path, output: &Path) -> Vec<OsString> {
    let mut args = base_args(input);
    args.extend(["-map", "0", "-c", "copy"].iter().map(OsString::from));
    finish_args(args, output)
}

/// Drain both pipes concurrently so ffmpeg never blocks on a full pipe.
///
/// Log lines are forwarded verbatim, progress blocks as one condensed line.
async fn forward_output<O, E>(stdout: O, stderr: E, duration: Option<f64>)
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let mut progress_lines = BufReader::new(stdout).split(b'\n');
    let mut log_lines = BufReader::new(stderr).split(b'\n');
    let mut tracker = ProgressTracker::new(duration);
    let mut sink = tokio::io::stdout();

    let mut progress_open = true;
    let mut log_open = true;

    while progress_open || log_open {
        let line = tokio::select! {
            segment = progress_lines.next_segment(), if progress_open => match segment {
                Ok(Some(bytes)) => tracker.push(&String::from_utf8_lossy(&bytes)),
                _ => {
                    progress_open = false;
                    None
                }
            },
            segment = log_lines.next_segment(), if log_open => match segment {
                Ok(Some(bytes)) => Some(String::from_utf8_lossy(&bytes).trim_end().to_string()),
                _ => {
                    log_open = false;
                    None
                }
            },
        };

        if let Some(line) = line {
            let written = async {
                sink.write_all(line.as_bytes()).await?;
                sink.write_all(b"\n").await?;
                sink.flush().await
            };
            if let Err(e) = written.await {
                debug!("Failed to forward ffmpeg output: {}", e);
            }
        }
    }
}

/// Whether `-encoders` output lists `encoder` by name
pub fn encoder_listed(listing: &str, encoder: &str) -> bool {
    listing
        .lines()
        .any(|line| line.split_whitespace().nth(1) == Some(encoder))
}

#[async_trait]
impl ExecutePort for FfmpegAdapter {
    async fn encode(
        &self,
        input: &Path,
        output: &Path,
        encoder: &VideoEncoder,
        duration: Option<f64>,
    ) -> Result<OperationStatus, DomainError> {
        self.run(encode_args(input, output, encoder), input, duration)
            .await
    }

    async fn remux(
        &self,
        input: &Path,
        output: &Path,
        duration: Option<f64>,
    ) -> Result<OperationStatus, DomainError> {
        self.run(remux_args(input, output), input, duration).await
    }
}

#[async_trait]
impl HardwarePort for FfmpegAdapter {
    async fn supports_hardware(&self, codec: VideoCodec) -> bool {
        let Some(encoder) = codec.hardware_encoder() else {
            return false;
        };

        let output = Command::new(&self.binary)
            .args(["-hide_banner", "-encoders"])
            .stdin(Stdio::null())
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                encoder_listed(&String::from_utf8_lossy(&output.stdout), encoder)
            }
            Ok(output) => {
                debug!("ffmpeg -encoders exited with {}", output.status);
                false
            }
            Err(e) => {
                debug!("Could not list ffmpeg encoders: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_encode_args() {
        let encoder = VideoCodec::H265.select_encoder(false);
        let args = encode_args(Path::new("in.mkv"), Path::new("in.temp.mp4"), &encoder);

        assert_eq!(
            strings(&args),
            vec![
                "-hide_banner", "-nostdin", "-y", "-i", "in.mkv", "-c:v", "libx265", "-c:a",
                "aac", "-ac", "2", "-nostats", "-progress", "pipe:1", "in.temp.mp4",
            ]
        );
    }

    #[test]
    fn test_remux_args_copy_all_tracks() {
        let args = strings(&remux_args(Path::new("a.mkv"), Path::new("a.temp.mp4")));

        assert!(args.windows(2).any(|w| w == ["-map", "0"]));
        assert!(args.windows(2).any(|w| w == ["-c", "copy"]));
        assert!(!args.iter().any(|a| a == "-c:v"));
        assert_eq!(args.last().map(String::as_str), Some("a.temp.mp4"));
    }

    #[test]
    fn test_encoder_listed() {
        let listing = "Encoders:\n V..... = Video\n ------\n V....D libx265              libx265 H.265 / HEVC (codec hevc)\n V....D hevc_videotoolbox    VideoToolbox H.265 Encoder (codec hevc)\n";

        assert!(encoder_listed(listing, "hevc_videotoolbox"));
        assert!(encoder_listed(listing, "libx265"));
        assert!(!encoder_listed(listing, "h264_videotoolbox"));
        // Mentioned in a description only
        assert!(!encoder_listed(" V....D foo   uses hevc_videotoolbox\n", "hevc_videotoolbox"));
    }

    #[tokio::test]
    async fn test_forward_output_drains_both_pipes() {
        let stdout: &[u8] = b"frame=1\nout_time_us=1000000\nprogress=end\n";
        let stderr: &[u8] = b"Input #0, matroska,webm\n\xff invalid utf8 line\nOutput #0, mp4\n";

        // Completes only if both readers hit EOF
        forward_output(stdout, stderr, Some(2.0)).await;
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let adapter = FfmpegAdapter::new("/nonexistent/bin/ffmpeg-12345");
        let encoder = VideoCodec::H264.select_encoder(false);

        let err = adapter
            .encode(Path::new("a.mp4"), Path::new("a.temp.mp4"), &encoder, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ToolNotFound(_)));

        assert!(!adapter.supports_hardware(VideoCodec::H265).await);
    }

    #[tokio::test]
    async fn test_vp9_never_hardware() {
        let adapter = FfmpegAdapter::new("/nonexistent/bin/ffmpeg-12345");
        assert!(!adapter.supports_hardware(VideoCodec::Vp9).await);
    }
}
