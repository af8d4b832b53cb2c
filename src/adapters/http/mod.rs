//! HTTP adapters - REST API implementations.
//!
//! The workout module exposes the endpoints; `router` wraps them in the
//! service-wide middleware stack.

pub mod middleware;
pub mod router;
pub mod workout;

// Re-export key types for convenience
pub use router::build_router;
pub use workout::{workout_router, WorkoutApiError, WorkoutAppState};
