//! HTTP adapter for the workout module.
//!
//! # Endpoints
//!
//! - `GET /` - Health check
//! - `GET /test` - Diagnostics
//! - `POST /generate-fit` - Generate a FIT workout file

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::{WorkoutApiError, WorkoutAppState};
pub use routes::workout_router;
