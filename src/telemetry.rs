//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over `server.log_level`. Production emits
//! one JSON object per event; other environments use the human-readable
//! formatter.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::ServerConfig;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    pub fn for_server(config: &ServerConfig) -> Self {
        if config.is_production() {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Builds the filter from `RUST_LOG`, falling back to the configured level.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init(config: &ServerConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let fmt_layer = match LogFormat::for_server(config) {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter(&config.log_level))
        .with(fmt_layer)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    #[test]
    fn production_logs_json() {
        let config = ServerConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert_eq!(LogFormat::for_server(&config), LogFormat::Json);
    }

    #[test]
    fn development_logs_pretty() {
        assert_eq!(
            LogFormat::for_server(&ServerConfig::default()),
            LogFormat::Pretty
        );
    }
}
