//! Mock workout encoder for testing.
//!
//! Provides a configurable implementation of the WorkoutEncoder port so
//! handlers and routes can be exercised without a real encoder.
//!
//! # Features
//!
//! - Fixed output bytes
//! - Error injection (unavailable, failed, empty output, panic)
//! - Simulated latency for timeout testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let encoder = MockWorkoutEncoder::new().with_output(vec![0x0E, 0x20]);
//! let artifact = encoder.encode(&workout).await?;
//! assert_eq!(encoder.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::domain::workout::Workout;
use crate::ports::{EncodeError, FitArtifact, WorkoutEncoder};

/// What the mock does when asked to encode.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return these bytes.
    Output(Vec<u8>),
    /// Return this error.
    Error(EncodeError),
    /// Return an artifact with no content (a misbehaving encoder).
    Empty,
    /// Panic inside `encode`.
    Panic,
}

/// Mock encoder for testing.
#[derive(Debug, Clone)]
pub struct MockWorkoutEncoder {
    behavior: MockBehavior,
    available: bool,
    delay: Duration,
    /// Names of the workouts passed to `encode`, in call order.
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockWorkoutEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWorkoutEncoder {
    /// Creates a mock that returns a short fixed payload.
    pub fn new() -> Self {
        Self {
            behavior: MockBehavior::Output(b"MOCKFIT".to_vec()),
            available: true,
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_output(mut self, bytes: Vec<u8>) -> Self {
        self.behavior = MockBehavior::Output(bytes);
        self
    }

    pub fn with_error(mut self, error: EncodeError) -> Self {
        self.behavior = MockBehavior::Error(error);
        self
    }

    pub fn with_behavior(mut self, behavior: MockBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Fails every call with [`EncodeError::Unavailable`] and reports the
    /// encoder as unavailable.
    pub fn unavailable(self, reason: &str) -> Self {
        let mut mock = self.with_error(EncodeError::unavailable(reason));
        mock.available = false;
        mock
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl WorkoutEncoder for MockWorkoutEncoder {
    async fn encode(&self, workout: &Workout) -> Result<FitArtifact, EncodeError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(workout.name().as_str().to_string());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.behavior {
            MockBehavior::Output(bytes) => Ok(FitArtifact::new(bytes.clone(), workout.name())),
            MockBehavior::Error(err) => Err(err.clone()),
            MockBehavior::Empty => Ok(FitArtifact::new(Vec::new(), workout.name())),
            MockBehavior::Panic => panic!("mock encoder panicked"),
        }
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workout::StepInput;

    fn workout() -> Workout {
        Workout::new("Test", vec![StepInput::new("Pasada", 60)]).unwrap()
    }

    #[tokio::test]
    async fn records_calls() {
        let encoder = MockWorkoutEncoder::new();
        encoder.encode(&workout()).await.unwrap();
        encoder.encode(&workout()).await.unwrap();

        assert_eq!(encoder.call_count(), 2);
        assert_eq!(encoder.calls(), vec!["Test", "Test"]);
    }

    #[tokio::test]
    async fn clones_share_call_history() {
        let encoder = MockWorkoutEncoder::new();
        let clone = encoder.clone();
        clone.encode(&workout()).await.unwrap();

        assert_eq!(encoder.call_count(), 1);
    }

    #[tokio::test]
    async fn unavailable_mock_fails_and_reports_unavailable() {
        let encoder = MockWorkoutEncoder::new().unavailable("no runtime");

        assert!(!encoder.is_available().await);
        assert_eq!(
            encoder.encode(&workout()).await.unwrap_err(),
            EncodeError::unavailable("no runtime")
        );
    }
}
