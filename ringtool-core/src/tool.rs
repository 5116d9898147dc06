//! The tool state machine for ringtool.
//!
//! [`Tool`] owns the ring, the operating mode, the status register and the
//! cycle counter. Every operation takes `&mut self` and runs to completion;
//! there is no shared or global state, so a caller that needs one tool per
//! process simply constructs one.
//!
//! Guarded operations (`push`, `pop`, `set_mode`) require `init()` first and
//! set the sticky `err` flag when rejected. Failures are reported as typed
//! errors; [`ringtool_types::code_of`] collapses them onto the numeric
//! return codes of the external interface.

use ringtool_types::{Mode, ModeError, PopError, PushError, StatusFlags, BUFFER_SIZE};

use crate::buffer::RingBuffer;

/// Fixed-capacity byte buffer with lifecycle, mode and status bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    pub(crate) ring: RingBuffer,
    pub(crate) mode: Mode,
    pub(crate) flags: StatusFlags,
    /// Advanced once per `process()` call; survives `init()`/`deinit()`.
    pub(crate) cycle: u32,
}

impl Tool {
    /// Create a tool in the uninitialized state.
    ///
    /// All guarded operations are rejected until [`Tool::init`] is called.
    pub const fn new() -> Self {
        Self {
            ring: RingBuffer::new(),
            mode: Mode::Idle,
            flags: StatusFlags {
                init: false,
                err: false,
                overflow: false,
                anomaly: false,
            },
            cycle: 0,
        }
    }

    /// Reset the ring, enter Idle and set the init flag.
    ///
    /// Every other status flag is cleared.
    pub fn init(&mut self) {
        self.ring.clear();
        self.mode = Mode::Idle;
        self.flags = StatusFlags::initialized();
        tracing::info!("Tool initialized (capacity: {})", BUFFER_SIZE);
    }

    /// Return to the at-rest state: Idle, no flags, empty zeroed ring.
    ///
    /// Safe to call from any state, any number of times.
    pub fn deinit(&mut self) {
        self.mode = Mode::Idle;
        self.flags = StatusFlags::default();
        self.ring.clear();
        tracing::info!("Tool deinitialized");
    }

    /// Switch operating mode.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), ModeError> {
        self.set_mode_raw(mode.as_u32())
    }

    /// Switch operating mode from its raw encoding.
    ///
    /// The init check precedes range validation. On success the `err` flag
    /// is cleared; no other flag is touched.
    pub fn set_mode_raw(&mut self, raw: u32) -> Result<(), ModeError> {
        if !self.flags.init {
            self.flags.err = true;
            tracing::warn!("Mode change to {} rejected: not initialized", raw);
            return Err(ModeError::NotInitialized);
        }

        let mode = match Mode::try_from(raw) {
            Ok(mode) => mode,
            Err(raw) => {
                self.flags.err = true;
                tracing::warn!("Invalid mode requested: {}", raw);
                return Err(ModeError::InvalidMode(raw));
            }
        };

        tracing::debug!("Mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.flags.err = false;
        Ok(())
    }

    /// Append a byte.
    ///
    /// A rejected push on a full ring sets `overflow`; an accepted push
    /// clears it. The `err` flag is only ever set here, never cleared.
    pub fn push(&mut self, value: u8) -> Result<(), PushError> {
        if !self.flags.init {
            self.flags.err = true;
            tracing::warn!("Push rejected: not initialized");
            return Err(PushError::NotInitialized);
        }

        match self.ring.push(value) {
            Ok(()) => {
                self.flags.overflow = false;
                tracing::trace!("Pushed {:#04x} (count: {})", value, self.ring.len());
                Ok(())
            }
            Err(e) => {
                self.flags.overflow = true;
                tracing::debug!("Push of {:#04x} rejected: {}", value, e);
                Err(e)
            }
        }
    }

    /// Remove and return the oldest byte.
    ///
    /// An empty ring is reported only through [`PopError::Empty`]; no status
    /// flag changes.
    pub fn pop(&mut self) -> Result<u8, PopError> {
        if !self.flags.init {
            self.flags.err = true;
            tracing::warn!("Pop rejected: not initialized");
            return Err(PopError::NotInitialized);
        }

        match self.ring.pop() {
            Some(value) => {
                tracing::trace!("Popped {:#04x} (count: {})", value, self.ring.len());
                Ok(value)
            }
            None => {
                tracing::debug!("Pop on empty buffer");
                Err(PopError::Empty)
            }
        }
    }

    /// Pop into a caller-supplied slot.
    ///
    /// `None` models a missing output target: it sets `err` and returns
    /// [`PopError::NullOutput`] before any other check. For every other
    /// failure the slot is written with 0.
    pub fn pop_into(&mut self, out: Option<&mut u8>) -> Result<(), PopError> {
        let Some(out) = out else {
            self.flags.err = true;
            tracing::warn!("Pop rejected: no output target");
            return Err(PopError::NullOutput);
        };

        match self.pop() {
            Ok(value) => {
                *out = value;
                Ok(())
            }
            Err(e) => {
                *out = 0;
                Err(e)
            }
        }
    }

    /// Empty the ring and clear `err` and `overflow`.
    ///
    /// `init` and `anomaly` are preserved. Works in any state.
    pub fn clear(&mut self) {
        self.ring.clear();
        self.flags.err = false;
        self.flags.overflow = false;
        tracing::debug!("Buffer cleared");
    }

    /// Advance one scheduling tick.
    ///
    /// The cycle counter is incremented first, whatever the mode. Then exactly
    /// [`BUFFER_SIZE`] iterations run; in Run mode with a non-empty ring each
    /// one pops the oldest byte, XORs it with the low byte of the counter and
    /// pushes it back. Otherwise the iteration does nothing, so the loop
    /// length never depends on mode or occupancy.
    pub fn process(&mut self) {
        self.cycle = self.cycle.wrapping_add(1);
        let key = (self.cycle & 0xFF) as u8;

        for _ in 0..BUFFER_SIZE {
            if self.mode == Mode::Run && !self.ring.is_empty() {
                if let Ok(value) = self.pop() {
                    // The pop just freed a slot.
                    let pushed = self.push(value ^ key);
                    debug_assert!(pushed.is_ok());
                }
            }
        }

        tracing::trace!(
            "Tick {} (mode: {}, count: {})",
            self.cycle,
            self.mode,
            self.ring.len()
        );
    }

    /// Current operating mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current status register.
    pub fn flags(&self) -> StatusFlags {
        self.flags
    }

    /// Check if `init()` has been called since the last `deinit()`.
    pub fn is_initialized(&self) -> bool {
        self.flags.init
    }

    /// Number of process ticks seen so far (wrapping).
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// The underlying ring, read-only.
    pub fn ring(&self) -> &RingBuffer {
        &self.ring
    }

    /// Number of bytes stored.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Check if no bytes are stored.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Check if the ring is at capacity.
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Fixed capacity.
    pub const fn capacity(&self) -> usize {
        BUFFER_SIZE
    }
}

impl Default for Tool {
    fn default() -> Self {
        Self::new()
    }
}
