//! CLI module for VidCompress
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::Parser;

use crate::utils::logging::LogFormat;

pub mod args;
pub mod commands;

pub use args::{ContainerArg, VideoCodecArg};

/// VidCompress batch video normalizer
///
/// Walks a folder tree and brings every video file to the target video codec
/// and container with stereo AAC audio. Conforming files are skipped, files
/// that only need a new container are remuxed, everything else is re-encoded.
#[derive(Parser, Debug)]
#[command(name = "vidcompress")]
#[command(about = "Normalize a folder of videos to one codec and container")]
#[command(version)]
pub struct Cli {
    /// Folder to scan recursively (a single video file is also accepted)
    pub folder: PathBuf,

    /// Keep the original next to a `{name}_re-encoded` / `{name}_remuxed` output
    #[arg(long)]
    pub keep_original: bool,

    /// Target video codec
    #[arg(long, value_enum, default_value_t = VideoCodecArg::H265)]
    pub video_codec: VideoCodecArg,

    /// Target container
    #[arg(long, value_enum, default_value_t = ContainerArg::Mp4)]
    pub container: ContainerArg,

    /// Configuration file (default: ./vidcompress.toml when present)
    #[arg(long, env = "VIDCOMPRESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// ffmpeg executable
    #[arg(long, env = "VIDCOMPRESS_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// ffprobe executable
    #[arg(long, env = "VIDCOMPRESS_FFPROBE")]
    pub ffprobe: Option<PathBuf>,

    /// Logging level or filter directive
    #[arg(long, env = "VIDCOMPRESS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Kill an encode or remux that runs longer than this many seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}
