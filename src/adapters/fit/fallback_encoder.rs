//! Fallback encoder - Wrapper that degrades to a secondary encoder.
//!
//! When the primary encoder fails for any reason (missing runtime, crash,
//! timeout), the fallback encoder is used instead. In production the primary
//! is the external SDK and the fallback is the native minimal-file writer.
//!
//! # Example
//!
//! ```ignore
//! let encoder = FallbackEncoder::new(
//!     ExternalSdkEncoder::new("java"),
//!     NativeFitEncoder::new(Sport::Running),
//! );
//! ```

use async_trait::async_trait;

use crate::domain::workout::Workout;
use crate::ports::{EncodeError, FitArtifact, WorkoutEncoder};

/// Encoder wrapper with a single, immediate fallback. No retries.
pub struct FallbackEncoder<P: WorkoutEncoder, F: WorkoutEncoder> {
    primary: P,
    fallback: F,
    name: String,
}

impl<P: WorkoutEncoder, F: WorkoutEncoder> FallbackEncoder<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        let name = format!("{}+{}", primary.name(), fallback.name());
        Self {
            primary,
            fallback,
            name,
        }
    }
}

#[async_trait]
impl<P: WorkoutEncoder + 'static, F: WorkoutEncoder + 'static> WorkoutEncoder
    for FallbackEncoder<P, F>
{
    async fn encode(&self, workout: &Workout) -> Result<FitArtifact, EncodeError> {
        match self.primary.encode(workout).await {
            Ok(artifact) if !artifact.is_empty() => Ok(artifact),
            Ok(_) => {
                tracing::warn!(
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    "Primary encoder returned an empty file, using fallback"
                );
                self.fallback.encode(workout).await
            }
            Err(err) => {
                tracing::warn!(
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %err,
                    "Primary encoder failed, using fallback"
                );
                self.fallback.encode(workout).await
            }
        }
    }

    /// Available when either encoder is.
    async fn is_available(&self) -> bool {
        self.primary.is_available().await || self.fallback.is_available().await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
