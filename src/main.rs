//! FIT workout service entry point.

use anyhow::Context;
use tokio::net::TcpListener;

use fit_workout_service::adapters::fit::encoder_from_config;
use fit_workout_service::adapters::http::{build_router, WorkoutAppState};
use fit_workout_service::config::AppConfig;
use fit_workout_service::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    telemetry::init(&config.server).context("failed to initialize tracing")?;

    let encoder = encoder_from_config(&config.encoder);

    // Checked once here; `GET /` reports this result.
    let state = WorkoutAppState::checked(encoder.clone())
        .await
        .with_verbose_errors(config.features.verbose_errors);
    if !state.encoder_available {
        tracing::warn!(
            encoder = encoder.name(),
            "FIT encoder is not available at startup"
        );
    }
    let app = build_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        %addr,
        encoder = encoder.name(),
        environment = ?config.server.environment,
        max_concurrent_requests = config.server.max_concurrent_requests,
        request_timeout_secs = config.server.request_timeout_secs,
        "FIT workout service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("FIT workout service stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
