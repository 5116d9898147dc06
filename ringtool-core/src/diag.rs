//! Diagnostics: packed status, self-test and state snapshots.

use ringtool_types::{Mode, PackedStatus, SelfTestError, StatusFlags, BUFFER_SIZE};
use serde::{Deserialize, Serialize};

use crate::Tool;

/// Upper bound on the byte sum of a valid buffer.
const MAX_BYTE_SUM: u32 = 255 * BUFFER_SIZE as u32;

/// Copy of everything the tool exposes for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSnapshot {
    /// Raw slot contents, free slots included.
    pub buffer: Vec<u8>,
    /// Next write index.
    pub head: usize,
    /// Next read index.
    pub tail: usize,
    /// Number of stored bytes.
    pub count: usize,
    /// Operating mode.
    pub mode: Mode,
    /// Status register.
    pub flags: StatusFlags,
    /// Process tick counter.
    pub cycle: u32,
    /// The word `get_status` would return.
    pub packed: PackedStatus,
}

impl Tool {
    /// Packed status word: bits [31:16] count, bits [1:0] mode, flags elsewhere.
    pub fn get_status(&self) -> PackedStatus {
        PackedStatus::pack(self.flags, self.mode, self.ring.count)
    }

    /// Check the ring invariants and the buffer checksum.
    ///
    /// A count beyond capacity sets `err`. A byte sum above `255 * N` sets
    /// `anomaly`; a passing check clears it.
    pub fn run_self_test(&mut self) -> Result<(), SelfTestError> {
        let count = self.ring.count;
        if count > BUFFER_SIZE {
            self.flags.err = true;
            tracing::error!("Self-test: count {} exceeds capacity {}", count, BUFFER_SIZE);
            return Err(SelfTestError::InvariantViolation { count });
        }

        let sum = self.ring.byte_sum();
        if sum > MAX_BYTE_SUM {
            self.flags.anomaly = true;
            tracing::error!("Self-test: checksum anomaly (sum: {})", sum);
            return Err(SelfTestError::Anomaly { sum });
        }

        self.flags.anomaly = false;
        tracing::debug!("Self-test passed (sum: {})", sum);
        Ok(())
    }

    /// Capture the current state.
    pub fn snapshot(&self) -> ToolSnapshot {
        ToolSnapshot {
            buffer: self.ring.as_bytes().to_vec(),
            head: self.ring.head(),
            tail: self.ring.tail(),
            count: self.ring.len(),
            mode: self.mode,
            flags: self.flags,
            cycle: self.cycle,
            packed: self.get_status(),
        }
    }
}
