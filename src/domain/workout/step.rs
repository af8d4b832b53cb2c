//! Workout steps and their classification.

use serde::Serialize;
use std::fmt;

use super::{DurationInput, StepDuration, WorkoutError};

/// FIT intensity class of a workout step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Intensity {
    Active = 0,
    Rest = 1,
    Warmup = 2,
    Cooldown = 3,
}

impl Intensity {
    /// Returns the FIT `intensity` enum value.
    pub fn fit_code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intensity::Active => "active",
            Intensity::Rest => "rest",
            Intensity::Warmup => "warmup",
            Intensity::Cooldown => "cooldown",
        };
        write!(f, "{}", s)
    }
}

/// Type tag of a step, as sent by the client.
///
/// The vocabulary is open. Known tags map to a specific [`Intensity`];
/// anything else is treated as active work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StepType(String);

impl StepType {
    /// Creates a step type, returning `None` for blank tags.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classifies the tag.
    pub fn intensity(&self) -> Intensity {
        match self.0.to_lowercase().as_str() {
            // "entrada en calor"
            "eec" | "warmup" | "warm-up" | "warm up" => Intensity::Warmup,
            // "vuelta a la calma"
            "vac" | "cooldown" | "cool-down" | "cool down" => Intensity::Cooldown,
            "pausa" | "rest" | "recovery" | "descanso" => Intensity::Rest,
            _ => Intensity::Active,
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unvalidated step, as handed over by the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInput {
    pub step_type: String,
    pub duration: DurationInput,
    pub name: Option<String>,
}

impl StepInput {
    pub fn new(step_type: impl Into<String>, duration: impl Into<DurationInput>) -> Self {
        Self {
            step_type: step_type.into(),
            duration: duration.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A validated workout step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutStep {
    index: u16,
    name: String,
    step_type: StepType,
    duration: StepDuration,
    intensity: Intensity,
}

impl WorkoutStep {
    /// Validates a step at the given 0-based position.
    pub(super) fn new(index: u16, input: StepInput) -> Result<Self, WorkoutError> {
        let position = usize::from(index);
        let step_type = StepType::parse(&input.step_type)
            .ok_or_else(|| WorkoutError::empty_step_type(position))?;
        let duration = input
            .duration
            .resolve()
            .map_err(|e| WorkoutError::invalid_duration(position, e))?;

        let name = input
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("{} {}", step_type, position + 1));

        Ok(Self {
            index,
            name,
            intensity: step_type.intensity(),
            step_type,
            duration,
        })
    }

    /// 0-based position of the step within its workout.
    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn step_type(&self) -> &StepType {
        &self.step_type
    }

    pub fn duration(&self) -> StepDuration {
        self.duration
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }
}
