//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod workout;

pub use workout::{
    GenerateFitCommand, GenerateFitError, GenerateFitHandler, HealthCheckHandler, HealthReport,
};
