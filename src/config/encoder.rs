//! Encoder configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::workout::Sport;

/// Which encoder serves requests.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EncoderBackend {
    /// Built-in minimal file writer
    #[default]
    Native,
    /// External vendor SDK process. Needs a program that follows the
    /// contract in `adapters::fit::ExternalSdkEncoder`.
    Sdk,
}

/// FIT encoder configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EncoderConfig {
    /// Primary encoder
    #[serde(default)]
    pub backend: EncoderBackend,

    /// Executable of the SDK runtime
    #[serde(default = "default_sdk_command")]
    pub sdk_command: String,

    /// Arguments passed before the output path (comma-separated in env)
    #[serde(default = "default_sdk_args")]
    pub sdk_args: Vec<String>,

    /// Timeout for one SDK run in seconds
    #[serde(default = "default_sdk_timeout")]
    pub sdk_timeout_secs: u64,

    /// Fall back to the native encoder when the SDK fails
    #[serde(default = "default_fallback_enabled")]
    pub fallback_enabled: bool,

    /// Sport written into generated workouts
    #[serde(default)]
    pub sport: Sport,
}

impl EncoderConfig {
    /// Validate encoder configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == EncoderBackend::Sdk && self.sdk_command.trim().is_empty() {
            return Err(ValidationError::MissingRequired("encoder.sdk_command"));
        }
        if self.sdk_timeout_secs == 0 || self.sdk_timeout_secs > 300 {
            return Err(ValidationError::InvalidSdkTimeout);
        }
        Ok(())
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            backend: EncoderBackend::default(),
            sdk_command: default_sdk_command(),
            sdk_args: default_sdk_args(),
            sdk_timeout_secs: default_sdk_timeout(),
            fallback_enabled: default_fallback_enabled(),
            sport: Sport::default(),
        }
    }
}

fn default_sdk_command() -> String {
    "java".to_string()
}

fn default_sdk_args() -> Vec<String> {
    vec![
        "-cp".to_string(),
        "fit-sdk/java/fit.jar:fit-sdk/java".to_string(),
        "WorkoutEncoder".to_string(),
    ]
}

fn default_sdk_timeout() -> u64 {
    60
}

fn default_fallback_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_config_defaults() {
        let config = EncoderConfig::default();
        assert_eq!(config.backend, EncoderBackend::Native);
        assert_eq!(config.sdk_command, "java");
        assert_eq!(config.sdk_timeout_secs, 60);
        assert!(config.fallback_enabled);
        assert_eq!(config.sport, Sport::Running);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_sdk_backend() {
        let json = r#"{"backend": "sdk", "sport": "cycling", "fallback_enabled": false}"#;
        let config: EncoderConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.backend, EncoderBackend::Sdk);
        assert_eq!(config.sport, Sport::Cycling);
        assert!(!config.fallback_enabled);
    }

    #[test]
    fn test_sdk_backend_requires_command() {
        let config = EncoderConfig {
            backend: EncoderBackend::Sdk,
            sdk_command: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("encoder.sdk_command"))
        );
    }

    #[test]
    fn test_native_backend_ignores_sdk_command() {
        let config = EncoderConfig {
            backend: EncoderBackend::Native,
            sdk_command: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sdk_timeout_bounds() {
        let config = EncoderConfig {
            sdk_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSdkTimeout));
    }
}
