//! Workout aggregate.

use serde::Serialize;

use super::{StepInput, WorkoutError, WorkoutName, WorkoutStep};

/// A validated, structured workout ready to be encoded.
///
/// # Invariants
///
/// - the name is non-blank
/// - there is at least one step and at most [`Workout::MAX_STEPS`]
/// - every step has a non-blank type and a positive duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workout {
    name: WorkoutName,
    steps: Vec<WorkoutStep>,
}

impl Workout {
    /// FIT message indexes use the low 12 bits.
    pub const MAX_STEPS: usize = 4096;

    /// Validates raw input into a workout.
    ///
    /// Validation stops at the first error.
    pub fn new(name: impl Into<String>, steps: Vec<StepInput>) -> Result<Self, WorkoutError> {
        let name = WorkoutName::new(name)?;

        if steps.is_empty() {
            return Err(WorkoutError::NoSteps);
        }
        if steps.len() > Self::MAX_STEPS {
            return Err(WorkoutError::TooManySteps {
                actual: steps.len(),
                max: Self::MAX_STEPS,
            });
        }

        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(i, input)| WorkoutStep::new(i as u16, input))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { name, steps })
    }

    pub fn name(&self) -> &WorkoutName {
        &self.name
    }

    pub fn steps(&self) -> &[WorkoutStep] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Sum of all step durations, in seconds.
    pub fn total_duration_secs(&self) -> u64 {
        self.steps
            .iter()
            .map(|s| u64::from(s.duration().as_secs()))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workout::{DurationError, Intensity};

    fn sample_steps() -> Vec<StepInput> {
        vec![StepInput::new("EEC", 300), StepInput::new("Pasada", 120)]
    }

    #[test]
    fn builds_valid_workout() {
        let workout = Workout::new("Mi Rutina", sample_steps()).unwrap();

        assert_eq!(workout.name().as_str(), "Mi Rutina");
        assert_eq!(workout.step_count(), 2);
        assert_eq!(workout.total_duration_secs(), 420);
        assert_eq!(workout.steps()[0].intensity(), Intensity::Warmup);
        assert_eq!(workout.steps()[1].index(), 1);
    }

    #[test]
    fn rejects_empty_steps() {
        assert_eq!(Workout::new("Mi Rutina", vec![]), Err(WorkoutError::NoSteps));
    }

    #[test]
    fn rejects_blank_name_before_steps() {
        assert_eq!(Workout::new("", vec![]), Err(WorkoutError::EmptyName));
    }

    #[test]
    fn rejects_non_positive_duration() {
        let steps = vec![StepInput::new("EEC", 300), StepInput::new("Pausa", -10)];
        assert_eq!(
            Workout::new("Mi Rutina", steps),
            Err(WorkoutError::InvalidDuration {
                step: 2,
                source: DurationError::NotPositive(-10),
            })
        );
    }

    #[test]
    fn rejects_too_many_steps() {
        let steps = vec![StepInput::new("Pasada", 60); Workout::MAX_STEPS + 1];
        assert!(matches!(
            Workout::new("Largo", steps),
            Err(WorkoutError::TooManySteps { .. })
        ));
    }

    #[test]
    fn accepts_textual_durations() {
        let steps = vec![StepInput::new("EEC", "10min"), StepInput::new("Pasada", "3:30")];
        let workout = Workout::new("Mixta", steps).unwrap();
        assert_eq!(workout.total_duration_secs(), 810);
    }
}
