//! Status register and the packed status word.
//!
//! Register bit layout:
//! - bit 0: init
//! - bit 1: err
//! - bit 2: overflow
//! - bit 3: anomaly (self-test checksum out of range)
//!
//! The packed word exposed by `get_status` starts from the register bits,
//! then overwrites bits [1:0] with the mode and bits [31:16] with the fill
//! level. The init and err bits are therefore not visible in the packed form.

use serde::{Deserialize, Serialize};

use crate::Mode;

/// Sticky condition flags describing module health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusFlags {
    /// Module has been initialized.
    pub init: bool,
    /// Last guarded call was rejected.
    pub err: bool,
    /// A push was attempted on a full buffer.
    pub overflow: bool,
    /// Self-test saw an out-of-range checksum.
    pub anomaly: bool,
}

impl StatusFlags {
    /// Bit for [`StatusFlags::init`].
    pub const INIT: u32 = 1 << 0;
    /// Bit for [`StatusFlags::err`].
    pub const ERR: u32 = 1 << 1;
    /// Bit for [`StatusFlags::overflow`].
    pub const OVERFLOW: u32 = 1 << 2;
    /// Bit for [`StatusFlags::anomaly`].
    pub const ANOMALY: u32 = 1 << 3;

    /// Flags right after initialization: only `init` set.
    pub fn initialized() -> Self {
        Self {
            init: true,
            ..Self::default()
        }
    }

    /// Serialize to the register bit layout.
    pub fn to_bits(self) -> u32 {
        let mut bits = 0;
        if self.init {
            bits |= Self::INIT;
        }
        if self.err {
            bits |= Self::ERR;
        }
        if self.overflow {
            bits |= Self::OVERFLOW;
        }
        if self.anomaly {
            bits |= Self::ANOMALY;
        }
        bits
    }

    /// Deserialize from the register bit layout. Unknown bits are ignored.
    pub fn from_bits(bits: u32) -> Self {
        Self {
            init: bits & Self::INIT != 0,
            err: bits & Self::ERR != 0,
            overflow: bits & Self::OVERFLOW != 0,
            anomaly: bits & Self::ANOMALY != 0,
        }
    }
}

/// Packed status word: bits [31:16] fill level, bits [1:0] mode, the rest raw flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedStatus(u32);

impl PackedStatus {
    const MODE_MASK: u32 = 0x3;
    const COUNT_SHIFT: u32 = 16;

    /// Build the packed word. Later fields overwrite earlier ones.
    pub fn pack(flags: StatusFlags, mode: Mode, count: usize) -> Self {
        let mut word = flags.to_bits();
        word = (word & !Self::MODE_MASK) | (mode.as_u32() & Self::MODE_MASK);
        word = (word & 0x0000_FFFF) | (((count as u32) & 0xFFFF) << Self::COUNT_SHIFT);
        Self(word)
    }

    /// Wrap a raw packed word.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw packed word.
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Fill level field.
    pub fn count(self) -> u16 {
        (self.0 >> Self::COUNT_SHIFT) as u16
    }

    /// Mode field, `None` for the unused encoding 3.
    pub fn mode(self) -> Option<Mode> {
        Mode::try_from(self.0 & Self::MODE_MASK).ok()
    }

    /// Overflow flag as carried in the packed word.
    pub fn overflow(self) -> bool {
        self.0 & StatusFlags::OVERFLOW != 0
    }

    /// Anomaly flag as carried in the packed word.
    pub fn anomaly(self) -> bool {
        self.0 & StatusFlags::ANOMALY != 0
    }
}

impl From<PackedStatus> for u32 {
    fn from(status: PackedStatus) -> Self {
        status.0
    }
}
