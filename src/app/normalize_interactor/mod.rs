// Normalize interactor - Orchestrates the batch normalization use case

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;
use crate::utils::path::{Discovery, PathUtils};

/// Tool name reported in operation failures
const OPERATION_TOOL: &str = "ffmpeg";

/// Request for one normalization run
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeRequest {
    pub root: PathBuf,
    pub target: TargetSpec,
    pub keep_original: bool,
}

impl NormalizeRequest {
    pub fn new(root: impl Into<PathBuf>, target: TargetSpec, keep_original: bool) -> Self {
        Self {
            root: root.into(),
            target,
            keep_original,
        }
    }
}

/// Interactor for the normalization use case
///
/// Each discovered file goes through probe, classification and, when work is
/// needed, an operation into a temp file that is then promoted to its final
/// name. A file that fails at any step is left as it was before the attempt
/// and the scan moves on.
pub struct NormalizeInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    hardware_port: Arc<dyn HardwarePort>,
    fs_port: Arc<dyn FsPort>,
}

impl NormalizeInteractor {
    /// Create new normalize interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        hardware_port: Arc<dyn HardwarePort>,
        fs_port: Arc<dyn FsPort>,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            hardware_port,
            fs_port,
        }
    }

    /// Process every candidate below the request root
    pub async fn execute(&self, request: &NormalizeRequest) -> Result<RunReport, DomainError> {
        if !self.fs_port.exists(&request.root).await {
            return Err(DomainError::PathNotFound(request.root.clone()));
        }

        let discovery = self.discover(&request.root);
        info!(
            "Found {} video files under {}, target {}",
            discovery.candidates.len(),
            request.root.display(),
            request.target
        );
        if discovery.temp_artifacts > 0 {
            info!(
                "Ignoring {} *.{}.* files left by interrupted runs",
                discovery.temp_artifacts, TEMP_SUFFIX
            );
        }

        let mut report = RunReport::default();
        for path in &discovery.candidates {
            let outcome = self.process_file(path, request).await;
            debug!("{} -> {:?}", path.display(), outcome);
            report.record(&outcome);
        }

        Ok(report)
    }

    /// Candidate files, collected before any of them is touched
    pub fn discover(&self, root: &Path) -> Discovery {
        PathUtils::discover(root)
    }

    /// Run one file through the transition state machine
    pub async fn process_file(&self, path: &Path, request: &NormalizeRequest) -> FileOutcome {
        let probe = match self.probe_port.probe(path).await {
            Ok(probe) => probe,
            Err(e) => {
                debug!("{}", e);
                error!("Failed to get media info for {}. Skipping.", path.display());
                return FileOutcome::ProbeFailed;
            }
        };

        let decision = match FormatClassifier::classify(&probe, &request.target) {
            Ok(decision) => decision,
            Err(DomainError::NoVideoStream) => {
                info!("Skipping {} (no video stream found)", path.display());
                return FileOutcome::NotApplicable;
            }
            Err(e) => {
                error!("Cannot classify {}: {}", path.display(), e);
                return FileOutcome::Failed(e);
            }
        };

        let Some(action) = decision.action() else {
            info!("Skipping {} (already in the correct format)", path.display());
            return FileOutcome::Skipped;
        };

        let plan = match TransitionPlan::new(
            path,
            request.target.container,
            action,
            request.keep_original,
        ) {
            Ok(plan) => plan,
            Err(e) => {
                error!("Failed to {} {}: {}", action_infinitive(action), path.display(), e);
                return FileOutcome::Failed(e);
            }
        };

        if let Err(e) = self.clear_leftover(&plan.temp).await {
            error!(
                "Cannot remove leftover temp file {}: {}. Skipping.",
                plan.temp.display(),
                e
            );
            return FileOutcome::Failed(e);
        }

        if let Err(e) = self.ensure_destination_free(&plan).await {
            error!("Failed to {} {}: {}", action_infinitive(action), path.display(), e);
            return FileOutcome::Failed(e);
        }

        info!(
            "{} {} to {}...",
            action.verb(),
            path.display(),
            plan.temp.display()
        );

        if let Err(e) = self.run_operation(&plan, &probe, request.target.video_codec).await {
            error!("Failed to {} {}: {}", action_infinitive(action), path.display(), e);
            self.discard(&plan.temp).await;
            return FileOutcome::Failed(e);
        }

        match self.promote(&plan).await {
            Ok(()) => {
                info!(
                    "Successfully {} {} to {}",
                    action,
                    path.display(),
                    plan.final_path.display()
                );
                FileOutcome::Promoted {
                    action,
                    destination: plan.final_path,
                }
            }
            Err(e) => {
                error!("Failed to {} {}: {}", action_infinitive(action), path.display(), e);
                FileOutcome::Failed(e)
            }
        }
    }

    /// Remove a temp file left behind by an earlier interrupted run
    async fn clear_leftover(&self, temp: &Path) -> Result<(), DomainError> {
        if self.fs_port.exists(temp).await {
            warn!("Removing leftover temp file {}", temp.display());
            self.fs_port.remove_file(temp).await?;
        }
        Ok(())
    }

    /// A final path other than the input must not belong to another file
    async fn ensure_destination_free(&self, plan: &TransitionPlan) -> Result<(), DomainError> {
        if plan.final_path != plan.input && self.fs_port.exists(&plan.final_path).await {
            return Err(DomainError::DestinationExists {
                input: plan.input.clone(),
                destination: plan.final_path.clone(),
            });
        }
        Ok(())
    }

    /// Encode or remux into the plan's temp path
    async fn run_operation(
        &self,
        plan: &TransitionPlan,
        probe: &MediaProbe,
        codec: VideoCodec,
    ) -> Result<(), DomainError> {
        let duration = probe.known_duration();

        let status = match plan.action {
            Action::ReEncoded => {
                let hardware = self.hardware_port.supports_hardware(codec).await;
                let encoder = codec.select_encoder(hardware);
                if encoder.hardware {
                    info!("Using hardware encoder {}", encoder.name);
                } else {
                    info!("Using software encoder {}", encoder.name);
                }
                self.execute_port
                    .encode(&plan.input, &plan.temp, &encoder, duration)
                    .await?
            }
            Action::Remuxed => {
                self.execute_port
                    .remux(&plan.input, &plan.temp, duration)
                    .await?
            }
        };

        if status.success() {
            Ok(())
        } else {
            Err(DomainError::OperationFailed {
                tool: OPERATION_TOOL.to_string(),
                path: plan.input.clone(),
                code: status.code,
            })
        }
    }

    /// Move the temp file to its final name, deleting the original first when
    /// it is being replaced by a file with a different name
    async fn promote(&self, plan: &TransitionPlan) -> Result<(), DomainError> {
        if let Some(dir) = plan.final_path.parent() {
            if let Err(e) = self.fs_port.create_dir_all(dir).await {
                self.discard(&plan.temp).await;
                return Err(e);
            }
        }

        if let Err(e) = self.ensure_destination_free(plan).await {
            self.discard(&plan.temp).await;
            return Err(e);
        }

        let original_removed = plan.replaces_original();
        if original_removed {
            if let Err(e) = self.fs_port.remove_file(&plan.input).await {
                warn!(
                    "Leaving {} in place for the next run",
                    plan.temp.display()
                );
                return Err(e);
            }
        }

        if let Err(e) = self.fs_port.move_file(&plan.temp, &plan.final_path).await {
            if original_removed {
                error!(
                    "{} was removed; its converted copy remains at {}",
                    plan.input.display(),
                    plan.temp.display()
                );
            } else {
                self.discard(&plan.temp).await;
            }
            return Err(e);
        }

        Ok(())
    }

    /// Best-effort removal: logs a failure, never propagates it
    async fn discard(&self, temp: &Path) {
        if !self.fs_port.exists(temp).await {
            return;
        }
        if let Err(e) = self.fs_port.remove_file(temp).await {
            warn!("Could not remove temp file {}: {}", temp.display(), e);
        }
    }
}

fn action_infinitive(action: Action) -> &'static str {
    match action {
        Action::ReEncoded => "re-encode",
        Action::Remuxed => "remux",
    }
}
