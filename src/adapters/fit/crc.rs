//! FIT CRC-16.
//!
//! Nibble-table variant of CRC-16 (reflected polynomial `0xA001`, initial
//! value 0). Used for both the header CRC and the trailing file CRC.

const CRC_TABLE: [u16; 16] = [
    0x0000, 0xCC01, 0xD801, 0x1400, 0xF001, 0x3C00, 0x2800, 0xE401, 0xA001, 0x6C00, 0x7800,
    0xB401, 0x5000, 0x9C01, 0x8801, 0x4400,
];

/// Folds one byte into a running CRC.
pub fn update(crc: u16, byte: u8) -> u16 {
    let tmp = CRC_TABLE[(crc & 0xF) as usize];
    let crc = (crc >> 4) & 0x0FFF;
    let crc = crc ^ tmp ^ CRC_TABLE[(byte & 0xF) as usize];

    let tmp = CRC_TABLE[(crc & 0xF) as usize];
    let crc = (crc >> 4) & 0x0FFF;
    crc ^ tmp ^ CRC_TABLE[((byte >> 4) & 0xF) as usize]
}

/// Computes the CRC of a whole buffer.
pub fn fit_crc(data: &[u8]) -> u16 {
    data.iter().fold(0, |crc, byte| update(crc, *byte))
}
