//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates with the
//! encoder port. It holds no state between requests.

pub mod handlers;

pub use handlers::{
    GenerateFitCommand, GenerateFitError, GenerateFitHandler, HealthCheckHandler, HealthReport,
};
