//! Adapters - Implementations of ports and inbound interfaces.
//!
//! - `fit` - FIT encoder implementations of the `WorkoutEncoder` port
//! - `http` - axum HTTP API

pub mod fit;
pub mod http;
