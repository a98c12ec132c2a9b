//! VidCompress Library
//!
//! Batch normalization of video files to a target codec and container. The
//! decision logic lives in [`domain`]; external tools sit behind the traits in
//! [`ports`] and are implemented in [`adapters`].

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{NormalizeInteractor, NormalizeRequest};
pub use domain::errors::DomainError;
pub use domain::model::{
    Container, Decision, FileOutcome, MediaProbe, RunReport, Stream, TargetSpec, VideoCodec,
};
pub use domain::rules::FormatClassifier;
pub use error::{VidCompressError, VidCompressResult};
