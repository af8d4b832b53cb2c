//! FIT encoder adapters.
//!
//! Implementations of the WorkoutEncoder port.
//!
//! ## Available Adapters
//!
//! - `NativeFitEncoder` - Pure Rust minimal workout file writer
//! - `ExternalSdkEncoder` - Bridge to a vendor SDK running out of process
//! - `FallbackEncoder` - Wrapper that degrades to a secondary encoder
//! - `MockWorkoutEncoder` - Configurable mock for testing

pub mod crc;
mod factory;
mod fallback_encoder;
mod mock_encoder;
mod native_encoder;
mod sdk_encoder;
pub mod writer;

pub use factory::encoder_from_config;
pub use fallback_encoder::FallbackEncoder;
pub use mock_encoder::{MockBehavior, MockWorkoutEncoder};
pub use native_encoder::NativeFitEncoder;
pub use sdk_encoder::ExternalSdkEncoder;
