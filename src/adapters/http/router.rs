//! Application router with the full middleware stack.

use std::time::Duration;

use axum::Router;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::middleware::{cors_layer, make_request_span, panic_response};
use super::workout::{workout_router, WorkoutAppState};
use crate::config::ServerConfig;

/// Builds the service router.
///
/// Layer order, outermost first:
/// 1. `SetRequestIdLayer` assigns `x-request-id` (or keeps the client's)
/// 2. `TraceLayer` opens a span carrying the request id
/// 3. `PropagateRequestIdLayer` copies the id onto the response
/// 4. CORS
/// 5. `CatchPanicLayer` turns panics into JSON 500s
/// 6. `TimeoutLayer` answers 408 after `request_timeout_secs`
/// 7. `GlobalConcurrencyLimitLayer` caps in-flight requests service-wide
pub fn build_router(state: WorkoutAppState, config: &ServerConfig) -> Router {
    workout_router()
        .with_state(state)
        .layer(GlobalConcurrencyLimitLayer::new(config.max_concurrent_requests))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer(config))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
