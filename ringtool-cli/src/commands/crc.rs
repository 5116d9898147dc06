//! Compute the CRC-32 of command-line input.

use anyhow::{Context, Result};
use ringtool_core::compute_crc;

/// Decode the input and compute its checksum.
///
/// `length` defaults to the full input; the computation itself caps it at
/// 256 bytes.
pub fn checksum(input: &str, is_hex: bool, length: Option<usize>) -> Result<u32> {
    let bytes = if is_hex {
        hex::decode(input.trim()).context("Invalid hex input")?
    } else {
        input.as_bytes().to_vec()
    };
    let length = length.unwrap_or(bytes.len());
    Ok(compute_crc(Some(&bytes), length))
}

/// Run the crc command.
pub fn run(input: &str, is_hex: bool, length: Option<usize>) -> Result<()> {
    let crc = checksum(input, is_hex, length)?;
    println!("{:#010X}", crc);
    Ok(())
}
