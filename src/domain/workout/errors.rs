//! Error types for workout validation.

use thiserror::Error;

/// Errors produced while resolving a step duration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("duration must be a positive number of seconds, got {0}")]
    NotPositive(i64),

    #[error("duration exceeds the maximum of {max} seconds")]
    TooLong { max: u32 },

    #[error("unrecognized duration format '{0}'")]
    Unparseable(String),
}

/// Errors that occur while building a [`Workout`](super::Workout).
///
/// Step numbers in messages are 1-based so they line up with what the
/// client sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkoutError {
    #[error("routine_name cannot be empty")]
    EmptyName,

    #[error("steps cannot be empty")]
    NoSteps,

    #[error("too many steps: {actual} (maximum {max})")]
    TooManySteps { actual: usize, max: usize },

    #[error("step {step}: type cannot be empty")]
    EmptyStepType { step: usize },

    #[error("step {step}: {source}")]
    InvalidDuration {
        step: usize,
        #[source]
        source: DurationError,
    },
}

impl WorkoutError {
    /// Wraps a duration error with the (0-based) index of the offending step.
    pub fn invalid_duration(index: usize, source: DurationError) -> Self {
        WorkoutError::InvalidDuration {
            step: index + 1,
            source,
        }
    }

    /// Creates an empty step type error for the (0-based) step index.
    pub fn empty_step_type(index: usize) -> Self {
        WorkoutError::EmptyStepType { step: index + 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_duration_reports_one_based_step() {
        let err = WorkoutError::invalid_duration(0, DurationError::NotPositive(-5));
        assert_eq!(
            err.to_string(),
            "step 1: duration must be a positive number of seconds, got -5"
        );
    }

    #[test]
    fn empty_step_type_reports_one_based_step() {
        let err = WorkoutError::empty_step_type(2);
        assert_eq!(err.to_string(), "step 3: type cannot be empty");
    }

    #[test]
    fn too_many_steps_displays_limits() {
        let err = WorkoutError::TooManySteps {
            actual: 5000,
            max: 4096,
        };
        assert_eq!(err.to_string(), "too many steps: 5000 (maximum 4096)");
    }
}
