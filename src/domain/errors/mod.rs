// Domain errors - Error types for the domain layer

use std::path::PathBuf;

use thiserror::Error;

/// Domain-specific error types
///
/// Every variant except `PathNotFound` is scoped to a single file: the
/// transition manager logs it and moves on to the next candidate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Scan root does not exist
    #[error("No such file or directory: {}", .0.display())]
    PathNotFound(PathBuf),

    /// Media metadata could not be obtained
    #[error("failed to probe {}: {message}", path.display())]
    ProbeFailed { path: PathBuf, message: String },

    /// Probe succeeded but the file carries no video stream
    #[error("no video stream found")]
    NoVideoStream,

    /// External tool exited unsuccessfully
    #[error("{tool} exited with {} while processing {}", describe_code(*code), path.display())]
    OperationFailed {
        tool: String,
        path: PathBuf,
        code: Option<i32>,
    },

    /// External tool ran past the configured timeout and was killed
    #[error("{tool} timed out after {seconds}s while processing {}", path.display())]
    OperationTimedOut {
        tool: String,
        path: PathBuf,
        seconds: u64,
    },

    /// External tool binary could not be started
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// File system operation failed
    #[error("{operation} failed for {}: {message}", path.display())]
    FsFail {
        operation: &'static str,
        path: PathBuf,
        message: String,
    },

    /// Output name is already taken by another file
    #[error("{} already exists, refusing to replace it with the output of {}", destination.display(), input.display())]
    DestinationExists {
        input: PathBuf,
        destination: PathBuf,
    },

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl DomainError {
    /// Create a file system failure from an I/O error
    pub fn fs(operation: &'static str, path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::FsFail {
            operation,
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Create a probe failure
    pub fn probe(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ProbeFailed {
            path: path.into(),
            message: message.into(),
        }
    }
}
