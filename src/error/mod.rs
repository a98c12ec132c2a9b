//! Error handling module for VidCompress
//!
//! These are the whole-run errors. Anything scoped to a single file is a
//! `DomainError` and never aborts a scan.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for VidCompress operations
#[derive(Error, Debug)]
pub enum VidCompressError {
    /// Scan root not found
    #[error("No such file or directory: {}", path.display())]
    PathNotFound { path: PathBuf },

    /// Configuration file missing or invalid
    #[error("Invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Logging could not be set up
    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    /// Unexpected domain failure outside the per-file loop
    #[error(transparent)]
    Domain(DomainError),
}

impl From<DomainError> for VidCompressError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::PathNotFound(path) => VidCompressError::PathNotFound { path },
            other => VidCompressError::Domain(other),
        }
    }
}

/// Result type alias for VidCompress operations
pub type VidCompressResult<T> = std::result::Result<T, VidCompressError>;
