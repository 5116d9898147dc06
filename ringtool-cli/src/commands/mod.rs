//! CLI command implementations.

pub mod crc;
pub mod run;
pub mod status;
