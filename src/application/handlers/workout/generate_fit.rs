//! GenerateFitHandler - Command handler turning a workout request into a FIT file.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::domain::workout::{StepInput, Workout, WorkoutError};
use crate::ports::{EncodeError, FitArtifact, WorkoutEncoder};

/// Command to generate a FIT workout file.
#[derive(Debug, Clone)]
pub struct GenerateFitCommand {
    pub routine_name: String,
    pub steps: Vec<StepInput>,
}

impl GenerateFitCommand {
    pub fn new(routine_name: impl Into<String>, steps: Vec<StepInput>) -> Self {
        Self {
            routine_name: routine_name.into(),
            steps,
        }
    }
}

/// Failure of a generate request.
///
/// `InvalidRequest` is the caller's fault and never reaches the encoder.
/// `EncodingUnavailable` covers every encoder-side failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateFitError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("FIT encoding unavailable: {0}")]
    EncodingUnavailable(String),
}

impl GenerateFitError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        GenerateFitError::InvalidRequest(reason.into())
    }

    pub fn encoding_unavailable(reason: impl Into<String>) -> Self {
        GenerateFitError::EncodingUnavailable(reason.into())
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, GenerateFitError::InvalidRequest(_))
    }
}

impl From<WorkoutError> for GenerateFitError {
    fn from(err: WorkoutError) -> Self {
        GenerateFitError::InvalidRequest(err.to_string())
    }
}

impl From<EncodeError> for GenerateFitError {
    fn from(err: EncodeError) -> Self {
        GenerateFitError::EncodingUnavailable(err.to_string())
    }
}

/// Handler for FIT generation.
pub struct GenerateFitHandler {
    encoder: Arc<dyn WorkoutEncoder>,
}

impl GenerateFitHandler {
    pub fn new(encoder: Arc<dyn WorkoutEncoder>) -> Self {
        Self { encoder }
    }

    pub async fn handle(&self, cmd: GenerateFitCommand) -> Result<FitArtifact, GenerateFitError> {
        // 1. Validate into a domain workout
        let workout = Workout::new(cmd.routine_name, cmd.steps)?;

        // 2. Encode
        let started = Instant::now();
        let artifact = self.encoder.encode(&workout).await.map_err(|err| {
            tracing::error!(
                encoder = self.encoder.name(),
                workout = %workout.name(),
                error = %err,
                "FIT encoding failed"
            );
            GenerateFitError::from(err)
        })?;

        // 3. Never hand out an empty file
        if artifact.is_empty() {
            tracing::error!(
                encoder = self.encoder.name(),
                workout = %workout.name(),
                "Encoder returned an empty FIT file"
            );
            return Err(GenerateFitError::encoding_unavailable(
                "encoder produced an empty file",
            ));
        }

        tracing::info!(
            encoder = self.encoder.name(),
            workout = %workout.name(),
            steps = workout.step_count(),
            total_secs = workout.total_duration_secs(),
            bytes = artifact.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Generated FIT workout"
        );

        Ok(artifact)
    }
}
