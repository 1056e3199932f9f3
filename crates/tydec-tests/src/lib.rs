//! Shared fixtures for the integration tests and benches.
//!
//! The fixtures describe a small sensor log record, laid out big-endian
//! except where noted:
//!
//! ```text
//! ┌────────┬────────────┬──────────────────────────────────────────┐
//! │ Offset │ Field      │ Encoding                                 │
//! ├────────┼────────────┼──────────────────────────────────────────┤
//! │ 0x00   │ magic      │ 4 bytes "TYDC"                           │
//! │ 0x04   │ version    │ u16                                      │
//! │ 0x06   │ flags      │ 1 byte, MSB-first bitmask                │
//! │ 0x07   │ created    │ u32 Unix seconds                         │
//! │ 0x0B   │ count      │ u8                                       │
//! │ 0x0C   │ readings   │ count x f32                              │
//! │ ...    │ name       │ NUL-terminated                           │
//! │ ...    │ label      │ 8 bytes, NUL padded                      │
//! │ ...    │ delta      │ i16, always little-endian                │
//! └────────┴────────────┴──────────────────────────────────────────┘
//! ```

/// 2021-01-01T00:00:00Z
pub const SAMPLE_CREATED: u32 = 1_609_459_200;

pub const SAMPLE_READINGS: [f32; 3] = [1.5, -0.25, 20.0];

/// Build the sample record.
#[must_use]
pub fn sample_record() -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"TYDC");
    buf.extend_from_slice(&2_u16.to_be_bytes());
    buf.push(0b1010_0001);
    buf.extend_from_slice(&SAMPLE_CREATED.to_be_bytes());
    buf.push(u8::try_from(SAMPLE_READINGS.len()).unwrap_or(u8::MAX));
    for reading in SAMPLE_READINGS {
        buf.extend_from_slice(&reading.to_be_bytes());
    }
    buf.extend_from_slice(b"gauge-7\0");
    buf.extend_from_slice(b"west\0\0\0\0");
    buf.extend_from_slice(&(-300_i16).to_le_bytes());
    buf
}

/// `n` little-endian `u32` values counting up from zero.
#[must_use]
pub fn counting_u32(n: u32) -> Vec<u8> {
    (0..n).flat_map(u32::to_le_bytes).collect()
}
