//! Workout Encoder Port - FIT encoding interface.
//!
//! This port defines the contract for turning a validated [`Workout`] into a
//! FIT file. The application layer depends on this trait, while adapters
//! (the native writer, the external SDK bridge) provide the implementation.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::workout::{Workout, WorkoutName};

/// Port for encoding workouts as FIT files.
///
/// # Contract
///
/// Implementations must:
/// - Return a non-empty artifact on success
/// - Never modify the workout
/// - Report failures as [`EncodeError`] rather than producing a partial file
///
/// # Usage
///
/// ```rust,ignore
/// let encoder: &dyn WorkoutEncoder = get_encoder();
/// let artifact = encoder.encode(&workout).await?;
/// ```
#[async_trait]
pub trait WorkoutEncoder: Send + Sync {
    /// Encode the workout as a FIT workout file.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` if the encoder cannot run or produces no output.
    async fn encode(&self, workout: &Workout) -> Result<FitArtifact, EncodeError>;

    /// Check if the encoder can currently produce files.
    ///
    /// Used by the health check; must not fail.
    async fn is_available(&self) -> bool;

    /// Short identifier used in logs and the health report.
    fn name(&self) -> &str;
}

/// A produced FIT file with download metadata.
///
/// The content is passed through to the client unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitArtifact {
    /// Raw FIT bytes.
    pub content: Vec<u8>,
    /// Suggested filename for download.
    pub filename: String,
    /// ASCII-only filename for clients that ignore `filename*`.
    pub ascii_filename: String,
}

impl FitArtifact {
    /// File extension of FIT files.
    pub const EXTENSION: &'static str = "fit";

    /// MIME content type for FIT downloads.
    pub const CONTENT_TYPE: &'static str = "application/octet-stream";

    /// Creates an artifact named after the workout.
    pub fn new(content: Vec<u8>, name: &WorkoutName) -> Self {
        Self {
            content,
            filename: format!("{}.{}", name.file_stem(), Self::EXTENSION),
            ascii_filename: format!("{}.{}", name.ascii_file_stem(), Self::EXTENSION),
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// `Content-Disposition` value suggesting the download filename.
    ///
    /// Carries both the plain ASCII `filename` and, when they differ, the
    /// RFC 5987 `filename*` form.
    pub fn content_disposition(&self) -> String {
        if self.filename == self.ascii_filename {
            format!("attachment; filename=\"{}\"", self.ascii_filename)
        } else {
            format!(
                "attachment; filename=\"{}\"; filename*=UTF-8''{}",
                self.ascii_filename,
                urlencoding::encode(&self.filename)
            )
        }
    }
}

/// Errors that can occur while encoding a workout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The encoder's runtime or dependency is missing.
    #[error("Encoder unavailable: {0}")]
    Unavailable(String),

    /// The encoder ran but did not produce a usable file.
    #[error("Encoding failed: {0}")]
    Failed(String),

    /// The encoder did not finish in time.
    #[error("Encoding timed out after {0} seconds")]
    Timeout(u64),

    /// I/O error while exchanging data with the encoder.
    #[error("I/O error during encoding: {0}")]
    Io(String),
}

impl EncodeError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }

    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io(reason.into())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: &str) -> WorkoutName {
        WorkoutName::new(raw).unwrap()
    }

    // ───────────────────────────────────────────────────────────────
    // FitArtifact tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn artifact_filename_uses_workout_name() {
        let artifact = FitArtifact::new(vec![1, 2, 3], &name("Mi Rutina"));
        assert_eq!(artifact.filename, "Mi Rutina.fit");
        assert_eq!(artifact.len(), 3);
        assert!(!artifact.is_empty());
    }

    #[test]
    fn content_disposition_for_ascii_name() {
        let artifact = FitArtifact::new(vec![1], &name("Mi Rutina"));
        assert_eq!(
            artifact.content_disposition(),
            "attachment; filename=\"Mi Rutina.fit\""
        );
    }

    #[test]
    fn content_disposition_for_non_ascii_name() {
        let artifact = FitArtifact::new(vec![1], &name("Año"));
        assert_eq!(
            artifact.content_disposition(),
            "attachment; filename=\"A_o.fit\"; filename*=UTF-8''A%C3%B1o.fit"
        );
    }

    // ───────────────────────────────────────────────────────────────
    // EncodeError tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn encode_error_displays_messages() {
        let err = EncodeError::unavailable("java not found");
        assert!(err.to_string().contains("java not found"));

        let err = EncodeError::Timeout(30);
        assert_eq!(err.to_string(), "Encoding timed out after 30 seconds");
    }

    // ───────────────────────────────────────────────────────────────
    // Trait object safety test
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn workout_encoder_is_object_safe() {
        fn check<T: WorkoutEncoder + ?Sized>() {}
        check::<dyn WorkoutEncoder>();
    }
}
