//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FIT_SERVICE` prefix and nested values use double underscores as separators.
//! The bare `PORT` variable, set by most hosting platforms, overrides
//! `server.port`.
//!
//! # Example
//!
//! ```no_run
//! use fit_workout_service::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod encoder;
mod error;
mod features;
mod server;

pub use encoder::{EncoderBackend, EncoderConfig};
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Environment variable prefix for all settings.
const ENV_PREFIX: &str = "FIT_SERVICE";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Every section has defaults, so an empty environment is a valid setup.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, limits)
    #[serde(default)]
    pub server: ServerConfig,

    /// FIT encoder selection
    #[serde(default)]
    pub encoder: EncoderConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FIT_SERVICE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Applies the `PORT` override
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FIT_SERVICE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FIT_SERVICE__ENCODER__SDK_ARGS=-jar,encoder.jar` -> `encoder.sdk_args = ["-jar", "encoder.jar"]`
    /// - `PORT=5000` -> `server.port = 5000`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("encoder.sdk_args")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.encoder.validate()?;

        // The SDK must time out before the request does.
        if self.encoder.backend == EncoderBackend::Sdk
            && self.encoder.sdk_timeout_secs >= self.server.request_timeout_secs
        {
            return Err(ValidationError::SdkTimeoutExceedsRequestTimeout {
                sdk_secs: self.encoder.sdk_timeout_secs,
                request_secs: self.server.request_timeout_secs,
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workout::Sport;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 8] = [
        "PORT",
        "FIT_SERVICE__SERVER__PORT",
        "FIT_SERVICE__SERVER__ENVIRONMENT",
        "FIT_SERVICE__SERVER__MAX_CONCURRENT_REQUESTS",
        "FIT_SERVICE__ENCODER__BACKEND",
        "FIT_SERVICE__ENCODER__SDK_ARGS",
        "FIT_SERVICE__ENCODER__SPORT",
        "FIT_SERVICE__FEATURES__VERBOSE_ERRORS",
    ];

    /// Helper to clear environment variables before and after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.encoder.backend, EncoderBackend::Native);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_nested_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("FIT_SERVICE__SERVER__PORT", "9090");
        env::set_var("FIT_SERVICE__SERVER__ENVIRONMENT", "production");
        env::set_var("FIT_SERVICE__SERVER__MAX_CONCURRENT_REQUESTS", "4");
        env::set_var("FIT_SERVICE__ENCODER__BACKEND", "sdk");
        env::set_var("FIT_SERVICE__ENCODER__SPORT", "cycling");
        env::set_var("FIT_SERVICE__FEATURES__VERBOSE_ERRORS", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 9090);
        assert!(config.is_production());
        assert_eq!(config.server.max_concurrent_requests, 4);
        assert_eq!(config.encoder.backend, EncoderBackend::Sdk);
        assert_eq!(config.encoder.sport, Sport::Cycling);
        assert!(config.features.verbose_errors);
    }

    #[test]
    fn test_port_variable_overrides_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("FIT_SERVICE__SERVER__PORT", "9090");
        env::set_var("PORT", "5000");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().server.port, 5000);
    }

    #[test]
    fn test_sdk_args_are_split_on_commas() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("FIT_SERVICE__ENCODER__SDK_ARGS", "-jar,encoder.jar");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().encoder.sdk_args, vec!["-jar", "encoder.jar"]);
    }

    #[test]
    fn test_invalid_port_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PORT", "not-a-port");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_sdk_timeout_must_be_shorter_than_request_timeout() {
        let mut config = AppConfig::default();
        config.encoder.backend = EncoderBackend::Sdk;
        config.encoder.sdk_timeout_secs = 300;
        config.server.request_timeout_secs = 30;

        assert_eq!(
            config.validate(),
            Err(ValidationError::SdkTimeoutExceedsRequestTimeout {
                sdk_secs: 300,
                request_secs: 30,
            })
        );

        config.encoder.sdk_timeout_secs = 30;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_timeouts_leave_room_for_fallback() {
        let mut config = AppConfig::default();
        config.encoder.backend = EncoderBackend::Sdk;

        assert_eq!(config.encoder.sdk_timeout_secs, 60);
        assert_eq!(config.server.request_timeout_secs, 120);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_native_backend_ignores_sdk_timeout_ordering() {
        let mut config = AppConfig::default();
        config.encoder.sdk_timeout_secs = 300;
        config.server.request_timeout_secs = 30;

        assert!(config.validate().is_ok());
    }
}
