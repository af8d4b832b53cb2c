//! Encoder selection from configuration.

use std::sync::Arc;

use super::{ExternalSdkEncoder, FallbackEncoder, NativeFitEncoder};
use crate::config::{EncoderBackend, EncoderConfig};
use crate::ports::WorkoutEncoder;

/// Builds the encoder described by `config`.
///
/// | backend | fallback_enabled | result |
/// |---------|------------------|--------|
/// | native  | any              | `native` |
/// | sdk     | false            | `sdk` |
/// | sdk     | true             | `sdk+native` |
pub fn encoder_from_config(config: &EncoderConfig) -> Arc<dyn WorkoutEncoder> {
    let native = NativeFitEncoder::new(config.sport);

    match config.backend {
        EncoderBackend::Native => Arc::new(native),
        EncoderBackend::Sdk => {
            let sdk = ExternalSdkEncoder::new(config.sdk_command.clone())
                .with_args(config.sdk_args.clone())
                .with_timeout(config.sdk_timeout_secs)
                .with_sport(config.sport);

            if config.fallback_enabled {
                Arc::new(FallbackEncoder::new(sdk, native))
            } else {
                Arc::new(sdk)
            }
        }
    }
}
