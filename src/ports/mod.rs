// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe a media file. Missing tool, non-zero exit and malformed output
    /// all collapse to `DomainError::ProbeFailed`.
    async fn probe(&self, path: &Path) -> Result<MediaProbe, DomainError>;
}

/// Port for running the external media toolchain
///
/// Implementations forward the tool's progress output as it is produced and
/// report the exit status once the process finishes.
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Re-encode video with `encoder` and audio to stereo AAC, writing `output`
    async fn encode(
        &self,
        input: &Path,
        output: &Path,
        encoder: &VideoEncoder,
        duration: Option<f64>,
    ) -> Result<OperationStatus, DomainError>;

    /// Stream-copy every track of `input` into `output`
    async fn remux(
        &self,
        input: &Path,
        output: &Path,
        duration: Option<f64>,
    ) -> Result<OperationStatus, DomainError>;
}

/// Port for hardware encoder detection
#[async_trait]
pub trait HardwarePort: Send + Sync {
    /// Whether a hardware-accelerated encoder is usable for `codec`
    async fn supports_hardware(&self, codec: VideoCodec) -> bool;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if a file exists
    async fn exists(&self, path: &Path) -> bool;

    /// Delete a file
    async fn remove_file(&self, path: &Path) -> Result<(), DomainError>;

    /// Create directory (including parent directories)
    async fn create_dir_all(&self, path: &Path) -> Result<(), DomainError>;

    /// Move a file, replacing the destination
    async fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError>;
}
