//! VidCompress batch video normalizer
//!
//! Brings every video under a folder to one video codec and container with
//! stereo AAC audio, remuxing when only the container differs and re-encoding
//! otherwise.
//!
//! # Usage
//!
//! ```bash
//! vidcompress ~/Movies
//! vidcompress ~/Movies --video-codec h.264 --container mkv --keep-original
//! ```

use anyhow::Result;
use clap::Parser;

use vidcompress::cli::{commands, Cli};

/// Main entry point for the VidCompress CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::run(cli).await
}
