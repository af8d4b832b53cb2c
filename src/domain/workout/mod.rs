//! Workout module - The structured routine that gets encoded as a FIT file.
//!
//! A [`Workout`] is built per request from raw [`StepInput`]s, validated,
//! handed to an encoder and dropped. Nothing here is persisted.

mod aggregate;
mod duration;
mod errors;
mod name;
mod sport;
mod step;

pub use aggregate::Workout;
pub use duration::{DurationInput, StepDuration};
pub use errors::{DurationError, WorkoutError};
pub use name::WorkoutName;
pub use sport::Sport;
pub use step::{Intensity, StepInput, StepType, WorkoutStep};
