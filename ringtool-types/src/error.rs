//! Error types for ringtool operations.
//!
//! Each guarded operation has its own error enum. The numeric codes are part
//! of the external interface, so every enum maps onto its table through
//! [`ReturnCode`]; success is always code 0.

use thiserror::Error;

use crate::BUFFER_SIZE;

/// Numeric return code of a failed operation.
pub trait ReturnCode {
    /// The non-zero code reported for this failure.
    fn code(&self) -> u8;
}

/// Collapse an operation result onto its numeric return code.
pub fn code_of<T, E: ReturnCode>(result: &Result<T, E>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(e) => e.code(),
    }
}

/// Errors from `set_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModeError {
    /// Module not initialized.
    #[error("mode change rejected: not initialized")]
    NotInitialized,

    /// Requested mode is not Idle, Run or Diag.
    #[error("invalid mode: {0}")]
    InvalidMode(u32),
}

impl ReturnCode for ModeError {
    fn code(&self) -> u8 {
        match self {
            ModeError::NotInitialized => 1,
            ModeError::InvalidMode(_) => 2,
        }
    }
}

/// Errors from `push`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PushError {
    /// Buffer already holds its full capacity.
    #[error("buffer full (capacity: {})", BUFFER_SIZE)]
    Full,

    /// Module not initialized.
    #[error("push rejected: not initialized")]
    NotInitialized,
}

impl ReturnCode for PushError {
    fn code(&self) -> u8 {
        match self {
            PushError::Full => 1,
            PushError::NotInitialized => 2,
        }
    }
}

/// Errors from `pop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PopError {
    /// Buffer holds no bytes.
    #[error("buffer empty")]
    Empty,

    /// Module not initialized.
    #[error("pop rejected: not initialized")]
    NotInitialized,

    /// No output target was supplied.
    #[error("pop rejected: no output target")]
    NullOutput,
}

impl ReturnCode for PopError {
    fn code(&self) -> u8 {
        match self {
            PopError::Empty => 1,
            PopError::NotInitialized => 2,
            PopError::NullOutput => 3,
        }
    }
}

/// Failures reported by the self-test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelfTestError {
    /// Fill level exceeds capacity.
    #[error("invariant violated: count {count} exceeds capacity {}", BUFFER_SIZE)]
    InvariantViolation {
        /// Observed fill level.
        count: usize,
    },

    /// Buffer checksum is larger than any valid content can produce.
    #[error("checksum anomaly: sum {sum}")]
    Anomaly {
        /// Observed byte sum.
        sum: u32,
    },
}

impl ReturnCode for SelfTestError {
    fn code(&self) -> u8 {
        match self {
            SelfTestError::InvariantViolation { .. } => 1,
            SelfTestError::Anomaly { .. } => 2,
        }
    }
}
