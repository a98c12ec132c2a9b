//! Command implementations

use anyhow::Result;
use tracing::{debug, info};

use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::app::normalize_interactor::NormalizeRequest;
use crate::cli::Cli;
use crate::config_initialization::{initialize_configuration_hierarchy, warn_missing_tools};
use crate::error::VidCompressError;
use crate::utils::logging::init_logging;

/// Execute a normalization run
///
/// Only configuration problems and a missing root are returned as errors;
/// per-file failures are logged and counted in the summary.
pub async fn run(cli: Cli) -> Result<()> {
    let config = initialize_configuration_hierarchy(&cli)?;
    init_logging(&config.logging)?;

    debug!("Resolved configuration: {:?}", config);
    debug!(
        "Using ffmpeg at {}, ffprobe at {}",
        config.ffmpeg.display(),
        config.ffprobe.display()
    );
    warn_missing_tools(&config);

    let container = DefaultAppContainer::new(&config);
    let request = NormalizeRequest::new(config.root.clone(), config.target, config.keep_original);

    let report = container
        .normalize_interactor()
        .execute(&request)
        .await
        .map_err(VidCompressError::from)?;

    info!("Done: {}", report);
    Ok(())
}
