//! Workout command and query handlers.

mod generate_fit;
mod health_check;

pub use generate_fit::{GenerateFitCommand, GenerateFitError, GenerateFitHandler};
pub use health_check::{HealthCheckHandler, HealthReport};
