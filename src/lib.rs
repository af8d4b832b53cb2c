//! FIT Workout Service
//!
//! HTTP service that turns a structured workout description (a routine name
//! and an ordered list of timed steps) into a Garmin FIT workout file.
//!
//! The crate follows a ports and adapters layout:
//!
//! - `domain` - workout value objects and validation
//! - `ports` - the `WorkoutEncoder` interface
//! - `application` - request handlers
//! - `adapters` - FIT encoders and the axum HTTP API
//! - `config` / `telemetry` - environment configuration and logging

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
