// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Audio codec every normalized file must carry
pub const TARGET_AUDIO_CODEC: &str = "aac";

/// Audio channel count every normalized file must carry
pub const TARGET_AUDIO_CHANNELS: u32 = 2;

/// Suffix inserted between the stem and the extension of a temp artifact
pub const TEMP_SUFFIX: &str = "temp";

/// Stream type as reported by the prober
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
    Other,
}

impl StreamKind {
    /// Map a prober `codec_type` string
    pub fn from_codec_type(codec_type: &str) -> Self {
        match codec_type {
            "video" => StreamKind::Video,
            "audio" => StreamKind::Audio,
            _ => StreamKind::Other,
        }
    }
}

/// A single elementary stream inside a media file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    pub kind: StreamKind,
    pub codec_name: String,
    /// Channel count, 0 when not reported (always 0 for non-audio streams)
    #[serde(default)]
    pub channels: u32,
}

impl Stream {
    pub fn video(codec_name: impl Into<String>) -> Self {
        Self {
            kind: StreamKind::Video,
            codec_name: codec_name.into(),
            channels: 0,
        }
    }

    pub fn audio(codec_name: impl Into<String>, channels: u32) -> Self {
        Self {
            kind: StreamKind::Audio,
            codec_name: codec_name.into(),
            channels,
        }
    }
}

/// Probed media metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaProbe {
    /// Container format name, possibly a comma-delimited alias list
    pub format_name: String,
    /// Duration in seconds (0.0 when unknown)
    #[serde(default)]
    pub duration: f64,
    /// Streams in file order
    pub streams: Vec<Stream>,
}

impl MediaProbe {
    pub fn new(format_name: impl Into<String>, duration: f64, streams: Vec<Stream>) -> Self {
        Self {
            format_name: format_name.into(),
            duration,
            streams,
        }
    }

    /// First video stream, if any
    pub fn primary_video_stream(&self) -> Option<&Stream> {
        self.streams.iter().find(|s| s.kind == StreamKind::Video)
    }

    /// First audio stream, if any
    pub fn primary_audio_stream(&self) -> Option<&Stream> {
        self.streams.iter().find(|s| s.kind == StreamKind::Audio)
    }

    /// Individual aliases of the container format name
    pub fn format_aliases(&self) -> impl Iterator<Item = &str> {
        self.format_name.split(',').map(str::trim)
    }

    /// Duration if the prober reported a usable one
    pub fn known_duration(&self) -> Option<f64> {
        (self.duration.is_finite() && self.duration > 0.0).then_some(self.duration)
    }
}

/// Target video codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoCodec {
    H264,
    H265,
    Vp9,
}

impl VideoCodec {
    pub const ALL: [VideoCodec; 3] = [VideoCodec::H264, VideoCodec::H265, VideoCodec::Vp9];

    /// Codec name the prober reports for streams of this codec
    pub fn decoded_name(&self) -> &'static str {
        match self {
            VideoCodec::H264 => "h264",
            VideoCodec::H265 => "hevc",
            VideoCodec::Vp9 => "vp9",
        }
    }

    /// Software encoder, always available in a full ffmpeg build
    pub fn software_encoder(&self) -> &'static str {
        match self {
            VideoCodec::H264 => "libx264",
            VideoCodec::H265 => "libx265",
            VideoCodec::Vp9 => "libvpx-vp9",
        }
    }

    /// Hardware-accelerated encoder, if one exists for this codec
    pub fn hardware_encoder(&self) -> Option<&'static str> {
        match self {
            VideoCodec::H264 => Some("h264_videotoolbox"),
            VideoCodec::H265 => Some("hevc_videotoolbox"),
            VideoCodec::Vp9 => None,
        }
    }

    /// Pick the encoder to use given hardware availability
    pub fn select_encoder(&self, hardware_available: bool) -> VideoEncoder {
        match self.hardware_encoder() {
            Some(name) if hardware_available => VideoEncoder {
                name,
                hardware: true,
            },
            _ => VideoEncoder {
                name: self.software_encoder(),
                hardware: false,
            },
        }
    }

    /// Name used on the command line
    pub fn label(&self) -> &'static str {
        match self {
            VideoCodec::H264 => "h.264",
            VideoCodec::H265 => "h.265",
            VideoCodec::Vp9 => "vp9",
        }
    }
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Target container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Container {
    Mp4,
    Mkv,
}

impl Container {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Container::Mp4 => "mp4",
            Container::Mkv => "mkv",
        }
    }

    /// Alias list the prober reports as the format name for this container
    pub fn format_alias(&self) -> &'static str {
        match self {
            Container::Mp4 => "mov,mp4,m4a,3gp,3g2,mj2",
            Container::Mkv => "matroska,webm",
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// What every file should end up as. Audio policy is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    pub video_codec: VideoCodec,
    pub container: Container,
}

impl TargetSpec {
    pub fn new(video_codec: VideoCodec, container: Container) -> Self {
        Self {
            video_codec,
            container,
        }
    }

    pub fn audio_codec(&self) -> &'static str {
        TARGET_AUDIO_CODEC
    }

    pub fn audio_channels(&self) -> u32 {
        TARGET_AUDIO_CHANNELS
    }
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self::new(VideoCodec::H265, Container::Mp4)
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} with {} {}ch audio",
            self.video_codec,
            self.container,
            TARGET_AUDIO_CODEC,
            TARGET_AUDIO_CHANNELS
        )
    }
}

/// Classification outcome for a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Already conforms
    Skip,
    /// Codecs conform, only the container differs
    Remux,
    /// Video or audio needs re-encoding
    Transcode,
}

impl Decision {
    /// Action to execute, `None` for Skip
    pub fn action(&self) -> Option<Action> {
        match self {
            Decision::Skip => None,
            Decision::Remux => Some(Action::Remuxed),
            Decision::Transcode => Some(Action::ReEncoded),
        }
    }
}

/// Executed operation, named the way it appears in output file names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReEncoded,
    Remuxed,
}

impl Action {
    /// Suffix label used for keep-original output names
    pub fn label(&self) -> &'static str {
        match self {
            Action::ReEncoded => "re-encoded",
            Action::Remuxed => "remuxed",
        }
    }

    /// Progressive verb for "in progress" notices
    pub fn verb(&self) -> &'static str {
        match self {
            Action::ReEncoded => "Re-encoding",
            Action::Remuxed => "Remuxing",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Chosen video encoder for a transcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoEncoder {
    pub name: &'static str,
    pub hardware: bool,
}

/// Paths involved in promoting one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    pub input: PathBuf,
    /// `{stem}.temp.{container}` next to the input
    pub temp: PathBuf,
    /// `{stem}_{action}.{container}` when keeping the original, else `{stem}.{container}`
    pub final_path: PathBuf,
    pub action: Action,
    pub keep_original: bool,
}

impl TransitionPlan {
    /// Build the plan for `input`
    pub fn new(
        input: &Path,
        container: Container,
        action: Action,
        keep_original: bool,
    ) -> Result<Self, DomainError> {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                DomainError::BadArgs(format!("Invalid input file path: {}", input.display()))
            })?;
        let dir = input.parent().unwrap_or_else(|| Path::new(""));
        let ext = container.extension();

        let temp = dir.join(format!("{}.{}.{}", stem, TEMP_SUFFIX, ext));
        let final_path = if keep_original {
            dir.join(format!("{}_{}.{}", stem, action.label(), ext))
        } else {
            dir.join(format!("{}.{}", stem, ext))
        };

        Ok(Self {
            input: input.to_path_buf(),
            temp,
            final_path,
            action,
            keep_original,
        })
    }

    /// Whether the original must be deleted before the temp file is promoted
    pub fn replaces_original(&self) -> bool {
        !self.keep_original && self.input != self.final_path
    }
}

/// Exit status of an external operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationStatus {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl OperationStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for OperationStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Terminal state of one file in a run
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// Promoted after a successful operation
    Promoted { action: Action, destination: PathBuf },
    /// Already conforming
    Skipped,
    /// No video stream, not a processing candidate
    NotApplicable,
    /// Metadata could not be read
    ProbeFailed,
    /// Operation or promotion failed; original left in its pre-attempt state
    Failed(DomainError),
}

/// Per-run tally of file outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub transcoded: usize,
    pub remuxed: usize,
    pub skipped: usize,
    pub not_applicable: usize,
    pub probe_failed: usize,
    pub failed: usize,
}

impl RunReport {
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Promoted {
                action: Action::ReEncoded,
                ..
            } => self.transcoded += 1,
            FileOutcome::Promoted {
                action: Action::Remuxed,
                ..
            } => self.remuxed += 1,
            FileOutcome::Skipped => self.skipped += 1,
            FileOutcome::NotApplicable => self.not_applicable += 1,
            FileOutcome::ProbeFailed => self.probe_failed += 1,
            FileOutcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.transcoded
            + self.remuxed
            + self.skipped
            + self.not_applicable
            + self.probe_failed
            + self.failed
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files: {} re-encoded, {} remuxed, {} already correct, {} without video, {} unreadable, {} failed",
            self.total(),
            self.transcoded,
            self.remuxed,
            self.skipped,
            self.not_applicable,
            self.probe_failed,
            self.failed
        )
    }
}

#[cfg(test)]
mod tests;
