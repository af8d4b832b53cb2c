//! Low-level FIT file writer.
//!
//! Emits little-endian definition and data records and wraps them with the
//! 14-byte file header and the trailing CRC. Knows nothing about workouts.

use super::crc::fit_crc;

/// Header length written by this writer.
pub const HEADER_SIZE: u8 = 14;

/// FIT protocol version 2.0.
pub const PROTOCOL_VERSION: u8 = 0x20;

/// FIT profile version 21.71.
pub const PROFILE_VERSION: u16 = 2171;

/// Seconds between the Unix epoch and the FIT epoch (1989-12-31T00:00:00Z).
pub const FIT_EPOCH_OFFSET: i64 = 631_065_600;

/// FIT base types used by the workout messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BaseType {
    Enum = 0x00,
    String = 0x07,
    Uint16 = 0x84,
    Uint32 = 0x86,
    Uint32z = 0x8C,
}

/// One field of a definition message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub number: u8,
    pub size: u8,
    pub base_type: BaseType,
}

impl FieldDef {
    pub const fn new(number: u8, size: u8, base_type: BaseType) -> Self {
        Self {
            number,
            size,
            base_type,
        }
    }
}

/// Accumulates records and produces a complete FIT file.
#[derive(Debug, Default)]
pub struct FitWriter {
    records: Vec<u8>,
}

impl FitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a definition message binding `local` to the global message
    /// number with the given field layout.
    pub fn define(&mut self, local: u8, global: u16, fields: &[FieldDef]) {
        self.records.push(0x40 | (local & 0x0F));
        self.records.push(0); // reserved
        self.records.push(0); // little endian
        self.records.extend_from_slice(&global.to_le_bytes());
        self.records.push(fields.len() as u8);
        for field in fields {
            self.records
                .extend_from_slice(&[field.number, field.size, field.base_type as u8]);
        }
    }

    /// Starts a data message for a previously defined local type.
    pub fn begin_data(&mut self, local: u8) {
        self.records.push(local & 0x0F);
    }

    pub fn put_u8(&mut self, value: u8) {
        self.records.push(value);
    }

    pub fn put_u16(&mut self, value: u16) {
        self.records.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_u32(&mut self, value: u32) {
        self.records.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a null-terminated string into a fixed-size field.
    ///
    /// The value is cut on a UTF-8 character boundary so at least one
    /// terminating null always fits.
    pub fn put_string(&mut self, value: &str, size: u8) {
        let encoded = truncate_utf8(value, usize::from(size).saturating_sub(1));
        self.records.extend_from_slice(encoded.as_bytes());
        self.records
            .resize(self.records.len() + usize::from(size) - encoded.len(), 0);
    }

    /// Size of the record section written so far.
    pub fn data_size(&self) -> usize {
        self.records.len()
    }

    /// Wraps the records with header and CRC.
    pub fn finish(self) -> Vec<u8> {
        let mut file = Vec::with_capacity(usize::from(HEADER_SIZE) + self.records.len() + 2);

        file.push(HEADER_SIZE);
        file.push(PROTOCOL_VERSION);
        file.extend_from_slice(&PROFILE_VERSION.to_le_bytes());
        file.extend_from_slice(&(self.records.len() as u32).to_le_bytes());
        file.extend_from_slice(b".FIT");
        let header_crc = fit_crc(&file);
        file.extend_from_slice(&header_crc.to_le_bytes());

        file.extend_from_slice(&self.records);
        let file_crc = fit_crc(&file);
        file.extend_from_slice(&file_crc.to_le_bytes());
        file
    }
}

/// Longest prefix of `value` that fits in `max_bytes` without splitting a
/// character.
pub fn truncate_utf8(value: &str, max_bytes: usize) -> &str {
    if value.len() <= max_bytes {
        return value;
    }
    let mut end = max_bytes;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}
