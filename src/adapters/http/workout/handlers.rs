//! HTTP handlers for workout endpoints.
//!
//! These handlers connect Axum routes to the application layer handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::{GenerateFitError, GenerateFitHandler, HealthCheckHandler};
use crate::ports::{FitArtifact, WorkoutEncoder};

use super::dto::{DiagnosticsResponse, ErrorResponse, GenerateFitRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct WorkoutAppState {
    pub encoder: Arc<dyn WorkoutEncoder>,
    /// Include encoder failure details in error bodies.
    pub verbose_errors: bool,
    /// Encoder readiness as of the last check, served by `GET /`.
    pub encoder_available: bool,
}

impl WorkoutAppState {
    pub fn new(encoder: Arc<dyn WorkoutEncoder>) -> Self {
        Self {
            encoder,
            verbose_errors: false,
            encoder_available: true,
        }
    }

    /// Builds the state after checking the encoder once.
    pub async fn checked(encoder: Arc<dyn WorkoutEncoder>) -> Self {
        let encoder_available = encoder.is_available().await;
        Self::new(encoder).with_encoder_available(encoder_available)
    }

    pub fn with_encoder_available(mut self, encoder_available: bool) -> Self {
        self.encoder_available = encoder_available;
        self
    }

    pub fn with_verbose_errors(mut self, verbose_errors: bool) -> Self {
        self.verbose_errors = verbose_errors;
        self
    }

    pub fn generate_fit_handler(&self) -> GenerateFitHandler {
        GenerateFitHandler::new(self.encoder.clone())
    }

    pub fn health_check_handler(&self) -> HealthCheckHandler {
        HealthCheckHandler::new(self.encoder.name(), self.encoder_available)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET / - Health check
pub async fn health_check(State(state): State<WorkoutAppState>) -> impl IntoResponse {
    let report = state.health_check_handler().handle();
    Json(report)
}

/// GET /test - Diagnostics
pub async fn diagnostics() -> impl IntoResponse {
    Json(DiagnosticsResponse::current())
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /generate-fit - Generate a FIT workout file
pub async fn generate_fit(
    State(state): State<WorkoutAppState>,
    payload: Result<Json<GenerateFitRequest>, JsonRejection>,
) -> Result<Response, WorkoutApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected generate-fit body");
        WorkoutApiError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    })?;

    let cmd = request.into_command().map_err(WorkoutApiError::BadRequest)?;

    let artifact = state
        .generate_fit_handler()
        .handle(cmd)
        .await
        .map_err(|err| WorkoutApiError::from_generate(err, state.verbose_errors))?;

    fit_download(artifact)
}

/// Builds the binary download response.
fn fit_download(artifact: FitArtifact) -> Result<Response, WorkoutApiError> {
    let disposition = HeaderValue::from_str(&artifact.content_disposition()).map_err(|e| {
        WorkoutApiError::Internal(format!("Invalid Content-Disposition header: {}", e))
    })?;

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(FitArtifact::CONTENT_TYPE),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.content,
    )
        .into_response())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum WorkoutApiError {
    BadRequest(String),
    /// Encoder failure; `detail` is only exposed when verbose errors are on.
    EncodingUnavailable { detail: Option<String> },
    Internal(String),
}

impl WorkoutApiError {
    pub fn from_generate(err: GenerateFitError, verbose: bool) -> Self {
        match err {
            GenerateFitError::InvalidRequest(msg) => WorkoutApiError::BadRequest(msg),
            GenerateFitError::EncodingUnavailable(msg) => WorkoutApiError::EncodingUnavailable {
                detail: verbose.then_some(msg),
            },
        }
    }
}

impl From<GenerateFitError> for WorkoutApiError {
    fn from(err: GenerateFitError) -> Self {
        WorkoutApiError::from_generate(err, false)
    }
}

impl IntoResponse for WorkoutApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            WorkoutApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            WorkoutApiError::EncodingUnavailable { detail } => {
                let error = ErrorResponse::encoding_unavailable(
                    "FIT file could not be generated, try again later",
                );
                let error = match detail {
                    Some(reason) => error.with_details(serde_json::json!({ "reason": reason })),
                    None => error,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, error)
            }
            WorkoutApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error while serving workout request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal("Internal server error"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}
