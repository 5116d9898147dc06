//! Bounded CRC-32.
//!
//! Reflected CRC-32 (IEEE 802.3): polynomial `0xEDB88320`, initial value and
//! final XOR `0xFFFFFFFF`. Computed bitwise with no lookup table so the cost
//! per byte is fixed.

use ringtool_types::MAX_CRC_LEN;

/// Initial CRC register value.
pub const CRC_INIT: u32 = 0xFFFF_FFFF;

/// Reflected CRC-32 polynomial.
pub const CRC_POLY: u32 = 0xEDB8_8320;

/// Incremental CRC-32 hasher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc32 {
    state: u32,
}

impl Crc32 {
    /// Start a new computation.
    pub const fn new() -> Self {
        Self { state: CRC_INIT }
    }

    /// Feed bytes into the register.
    pub fn update(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u32::from(byte);
            for _ in 0..8 {
                self.state = if self.state & 1 != 0 {
                    (self.state >> 1) ^ CRC_POLY
                } else {
                    self.state >> 1
                };
            }
        }
    }

    /// Apply the final XOR and return the checksum.
    pub fn finalize(self) -> u32 {
        self.state ^ 0xFFFF_FFFF
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the CRC-32 of at most [`MAX_CRC_LEN`] bytes.
///
/// `length` is clamped to both the slice length and [`MAX_CRC_LEN`]. Missing
/// data or a zero length yields [`CRC_INIT`] unchanged, with no final XOR.
pub fn compute_crc(data: Option<&[u8]>, length: usize) -> u32 {
    let Some(data) = data else {
        return CRC_INIT;
    };
    if length == 0 {
        return CRC_INIT;
    }

    let len = length.min(MAX_CRC_LEN).min(data.len());
    let mut crc = Crc32::new();
    crc.update(&data[..len]);
    crc.finalize()
}
