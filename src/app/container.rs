use std::sync::Arc;

use crate::adapters::{FfmpegAdapter, FfprobeAdapter, LocalFsAdapter};
use crate::app::normalize_interactor::NormalizeInteractor;
use crate::config_initialization::AppConfig;
use crate::ports::{ExecutePort, FsPort, HardwarePort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn normalize_interactor(&self) -> Arc<NormalizeInteractor>;
}

pub struct DefaultAppContainer {
    normalize_interactor: Arc<NormalizeInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: &AppConfig) -> Self {
        let probe_port = Arc::new(FfprobeAdapter::new(config.ffprobe.clone()));
        let ffmpeg = Arc::new(
            FfmpegAdapter::new(config.ffmpeg.clone()).with_timeout(config.operation_timeout),
        );
        let fs_port = Arc::new(LocalFsAdapter::new());

        let normalize_interactor = Arc::new(NormalizeInteractor::new(
            probe_port as Arc<dyn ProbePort>,
            Arc::clone(&ffmpeg) as Arc<dyn ExecutePort>,
            ffmpeg as Arc<dyn HardwarePort>,
            fs_port as Arc<dyn FsPort>,
        ));

        Self {
            normalize_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn normalize_interactor(&self) -> Arc<NormalizeInteractor> {
        Arc::clone(&self.normalize_interactor)
    }
}
