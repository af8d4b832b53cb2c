//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `cors` - CORS policy built from server configuration
//! - `panic` - Converts handler panics into JSON 500 responses
//! - `request_span` - Per-request tracing span carrying the request id

pub mod cors;
pub mod panic;
pub mod request_span;

pub use cors::cors_layer;
pub use panic::panic_response;
pub use request_span::make_request_span;
