//! # ringtool-core
//!
//! Pure logic for ringtool (no I/O, instant tests).
//!
//! This crate implements a 64-byte ring buffer with lifecycle control, a
//! validated operating mode, a sticky status register, a periodic processing
//! step and a bounded CRC-32.
//!
//! ## Design Philosophy
//!
//! Every operation is synchronous and runs in bounded time:
//! - No allocation after construction (snapshots aside)
//! - Fixed iteration counts, independent of mode and occupancy
//! - One owned [`Tool`] per caller instead of process-wide state
//!
//! ```
//! use ringtool_core::{compute_crc, Tool};
//! use ringtool_types::Mode;
//!
//! let mut tool = Tool::new();
//! tool.init();
//! tool.set_mode(Mode::Run).unwrap();
//! tool.push(0x42).unwrap();
//! tool.process();
//!
//! assert_eq!(tool.get_status().count(), 1);
//! assert_eq!(compute_crc(Some(b"123456789"), 9), 0xCBF4_3926);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod crc;
pub mod diag;
mod props;
pub mod tool;

pub use buffer::RingBuffer;
pub use crc::{compute_crc, Crc32, CRC_INIT, CRC_POLY};
pub use diag::ToolSnapshot;
pub use tool::Tool;
