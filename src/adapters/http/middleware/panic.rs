//! Panic recovery.
//!
//! Used with `tower_http::catch_panic::CatchPanicLayer::custom` so a panic
//! inside a handler or encoder becomes a generic 500 instead of a dropped
//! connection.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::adapters::http::workout::dto::ErrorResponse;

/// Maps a caught panic payload to a JSON 500 response.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = %detail, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal("Internal server error")),
    )
        .into_response()
}
