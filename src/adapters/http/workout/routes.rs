//! Route configuration for workout endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{diagnostics, generate_fit, health_check, WorkoutAppState};

/// Creates the workout router with all endpoints.
///
/// Routes:
/// - `GET /` - Health check
/// - `GET /test` - Diagnostics
/// - `POST /generate-fit` - Generate a FIT workout file
pub fn workout_router() -> Router<WorkoutAppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/test", get(diagnostics))
        .route("/generate-fit", post(generate_fit))
}
