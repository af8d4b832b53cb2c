//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Encoding Ports
//!
//! - `WorkoutEncoder` - Turns a validated workout into a FIT file

mod workout_encoder;

pub use workout_encoder::{EncodeError, FitArtifact, WorkoutEncoder};
