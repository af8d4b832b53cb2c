//! Native FIT workout encoder.
//!
//! Writes a minimal workout file without any external runtime:
//! `file_id`, one `workout` message and one `workout_step` per step.
//! This is also the fallback used when the vendor SDK is unavailable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::writer::{BaseType, FieldDef, FitWriter, FIT_EPOCH_OFFSET};
use crate::domain::workout::{Sport, Workout};
use crate::ports::{EncodeError, FitArtifact, WorkoutEncoder};

// Global message numbers.
const MESG_FILE_ID: u16 = 0;
const MESG_WORKOUT: u16 = 26;
const MESG_WORKOUT_STEP: u16 = 27;

// Local message types.
const LOCAL_FILE_ID: u8 = 0;
const LOCAL_WORKOUT: u8 = 1;
const LOCAL_WORKOUT_STEP: u8 = 2;

const FILE_TYPE_WORKOUT: u8 = 5;
const MANUFACTURER_DEVELOPMENT: u16 = 255;
const DURATION_TYPE_TIME: u8 = 0;
const TARGET_TYPE_OPEN: u8 = 2;

/// Size of the fixed-width name fields.
const NAME_FIELD_SIZE: u8 = 16;

const FILE_ID_FIELDS: [FieldDef; 5] = [
    FieldDef::new(0, 1, BaseType::Enum),    // type
    FieldDef::new(1, 2, BaseType::Uint16),  // manufacturer
    FieldDef::new(2, 2, BaseType::Uint16),  // product
    FieldDef::new(3, 4, BaseType::Uint32z), // serial_number
    FieldDef::new(4, 4, BaseType::Uint32),  // time_created
];

const WORKOUT_FIELDS: [FieldDef; 3] = [
    FieldDef::new(4, 1, BaseType::Enum),                 // sport
    FieldDef::new(6, 2, BaseType::Uint16),               // num_valid_steps
    FieldDef::new(8, NAME_FIELD_SIZE, BaseType::String), // wkt_name
];

const WORKOUT_STEP_FIELDS: [FieldDef; 7] = [
    FieldDef::new(254, 2, BaseType::Uint16),             // message_index
    FieldDef::new(0, NAME_FIELD_SIZE, BaseType::String), // wkt_step_name
    FieldDef::new(1, 1, BaseType::Enum),                 // duration_type
    FieldDef::new(2, 4, BaseType::Uint32),               // duration_value
    FieldDef::new(3, 1, BaseType::Enum),                 // target_type
    FieldDef::new(4, 4, BaseType::Uint32),               // target_value
    FieldDef::new(7, 1, BaseType::Enum),                 // intensity
];

/// Pure Rust FIT workout encoder.
///
/// # Example
///
/// ```rust,ignore
/// let encoder = NativeFitEncoder::new(Sport::Running);
/// let artifact = encoder.encode(&workout).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct NativeFitEncoder {
    sport: Sport,
    /// Fixed serial number; a random one is drawn per file when unset.
    serial_number: Option<u32>,
    /// Fixed creation time; "now" when unset.
    time_created: Option<DateTime<Utc>>,
}

impl NativeFitEncoder {
    pub fn new(sport: Sport) -> Self {
        Self {
            sport,
            ..Default::default()
        }
    }

    /// Pins the serial number (for reproducible output).
    pub fn with_serial_number(mut self, serial_number: u32) -> Self {
        self.serial_number = Some(serial_number);
        self
    }

    /// Pins the creation timestamp (for reproducible output).
    pub fn with_time_created(mut self, time_created: DateTime<Utc>) -> Self {
        self.time_created = Some(time_created);
        self
    }

    pub fn sport(&self) -> Sport {
        self.sport
    }

    /// Encodes synchronously; the work is pure CPU and small.
    pub fn encode_bytes(&self, workout: &Workout) -> Vec<u8> {
        let mut writer = FitWriter::new();

        writer.define(LOCAL_FILE_ID, MESG_FILE_ID, &FILE_ID_FIELDS);
        writer.begin_data(LOCAL_FILE_ID);
        writer.put_u8(FILE_TYPE_WORKOUT);
        writer.put_u16(MANUFACTURER_DEVELOPMENT);
        writer.put_u16(0);
        writer.put_u32(self.serial_number());
        writer.put_u32(self.fit_timestamp());

        writer.define(LOCAL_WORKOUT, MESG_WORKOUT, &WORKOUT_FIELDS);
        writer.begin_data(LOCAL_WORKOUT);
        writer.put_u8(self.sport.fit_code());
        writer.put_u16(workout.step_count() as u16);
        writer.put_string(workout.name().as_str(), NAME_FIELD_SIZE);

        writer.define(LOCAL_WORKOUT_STEP, MESG_WORKOUT_STEP, &WORKOUT_STEP_FIELDS);
        for step in workout.steps() {
            writer.begin_data(LOCAL_WORKOUT_STEP);
            writer.put_u16(step.index());
            writer.put_string(step.name(), NAME_FIELD_SIZE);
            writer.put_u8(DURATION_TYPE_TIME);
            writer.put_u32(step.duration().as_millis());
            writer.put_u8(TARGET_TYPE_OPEN);
            writer.put_u32(0);
            writer.put_u8(step.intensity().fit_code());
        }

        writer.finish()
    }

    fn serial_number(&self) -> u32 {
        self.serial_number.unwrap_or_else(|| {
            // uint32z: zero is the invalid value.
            (uuid::Uuid::new_v4().as_u128() as u32).max(1)
        })
    }

    fn fit_timestamp(&self) -> u32 {
        let unix = self.time_created.unwrap_or_else(Utc::now).timestamp();
        (unix - FIT_EPOCH_OFFSET).clamp(0, i64::from(u32::MAX)) as u32
    }
}

#[async_trait]
impl WorkoutEncoder for NativeFitEncoder {
    async fn encode(&self, workout: &Workout) -> Result<FitArtifact, EncodeError> {
        let content = self.encode_bytes(workout);
        tracing::debug!(
            workout = %workout.name(),
            steps = workout.step_count(),
            bytes = content.len(),
            "Encoded FIT workout natively"
        );
        Ok(FitArtifact::new(content, workout.name()))
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "native"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fit::crc::fit_crc;
    use crate::domain::workout::StepInput;
    use chrono::TimeZone;

    fn workout() -> Workout {
        Workout::new(
            "Mi Rutina",
            vec![StepInput::new("EEC", 300), StepInput::new("Pasada", 120)],
        )
        .unwrap()
    }

    fn pinned_encoder() -> NativeFitEncoder {
        NativeFitEncoder::new(Sport::Running)
            .with_serial_number(0x1234_5678)
            .with_time_created(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    // file_id: 21 + 14, workout: 15 + 20, step definition: 27, step data: 30 each
    fn expected_data_size(steps: usize) -> usize {
        35 + 35 + 27 + 30 * steps
    }

    #[test]
    fn output_sizes_match_layout() {
        let bytes = pinned_encoder().encode_bytes(&workout());

        assert_eq!(bytes.len(), 14 + expected_data_size(2) + 2);
        let data_size = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        assert_eq!(data_size as usize, expected_data_size(2));
    }

    #[test]
    fn output_has_valid_crc() {
        let bytes = pinned_encoder().encode_bytes(&workout());
        assert_eq!(fit_crc(&bytes), 0);
    }

    #[test]
    fn file_id_declares_workout_file() {
        let bytes = pinned_encoder().encode_bytes(&workout());
        // header (14) + file_id definition (21) + data record header (1)
        let data = &bytes[14 + 21 + 1..];
        assert_eq!(data[0], FILE_TYPE_WORKOUT);
        assert_eq!(u16::from_le_bytes([data[1], data[2]]), MANUFACTURER_DEVELOPMENT);
        assert_eq!(
            u32::from_le_bytes([data[5], data[6], data[7], data[8]]),
            0x1234_5678
        );
        let expected_ts = (Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().timestamp()
            - FIT_EPOCH_OFFSET) as u32;
        assert_eq!(
            u32::from_le_bytes([data[9], data[10], data[11], data[12]]),
            expected_ts
        );
    }

    #[test]
    fn pinned_encoder_is_deterministic() {
        let encoder = pinned_encoder();
        assert_eq!(encoder.encode_bytes(&workout()), encoder.encode_bytes(&workout()));
    }

    #[test]
    fn random_serial_is_never_zero() {
        let encoder = NativeFitEncoder::new(Sport::Running);
        for _ in 0..32 {
            assert_ne!(encoder.serial_number(), 0);
        }
    }

    #[tokio::test]
    async fn encode_returns_named_artifact() {
        let artifact = pinned_encoder().encode(&workout()).await.unwrap();
        assert_eq!(artifact.filename, "Mi Rutina.fit");
        assert!(!artifact.is_empty());
    }

    #[tokio::test]
    async fn native_encoder_is_always_available() {
        assert!(NativeFitEncoder::default().is_available().await);
    }
}
