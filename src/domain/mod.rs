//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `workout` - Workout routine value objects and validation

pub mod workout;
