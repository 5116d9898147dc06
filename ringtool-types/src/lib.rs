//! # ringtool-types
//!
//! Shared types for the ringtool byte buffer.
//!
//! This crate provides the foundational types used across all ringtool crates:
//! - [`Mode`] - Operating mode (Idle, Run, Diag)
//! - [`StatusFlags`], [`PackedStatus`] - Sticky status register and its packed form
//! - [`PushError`], [`PopError`], [`ModeError`], [`SelfTestError`] - Per-operation
//!   failures, mapped onto numeric codes by [`ReturnCode`]

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod mode;
mod status;

pub use error::{code_of, ModeError, PopError, PushError, ReturnCode, SelfTestError};
pub use mode::{Mode, ParseModeError};
pub use status::{PackedStatus, StatusFlags};

/// Number of byte slots in the ring buffer.
pub const BUFFER_SIZE: usize = 64;

/// Maximum number of bytes a single CRC computation will consume.
pub const MAX_CRC_LEN: usize = 256;
