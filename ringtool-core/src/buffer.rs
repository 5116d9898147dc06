//! Fixed-capacity byte ring for ringtool.
//!
//! This module provides the storage engine behind [`crate::Tool`]:
//! - FIFO ordering through wrapping head/tail indices
//! - A hard capacity of [`BUFFER_SIZE`] bytes, never reallocated
//! - Zeroing of every slot as soon as it is consumed
//!
//! The ring knows nothing about lifecycle or status flags. The tool layers
//! its init checks and flag bookkeeping on top of these primitives.

use ringtool_types::{PushError, BUFFER_SIZE};
use zeroize::Zeroize;

/// Byte ring with head/tail/count bookkeeping.
///
/// Bytes flow through the ring in this order:
/// 1. `push()` - store at `head`, advance `head`
/// 2. `pop()` - read at `tail`, zero the slot, advance `tail`
///
/// `count == (head - tail) mod BUFFER_SIZE` holds after every operation,
/// with `count == BUFFER_SIZE` standing in for the full ring where the
/// indices coincide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingBuffer {
    pub(crate) data: [u8; BUFFER_SIZE],
    pub(crate) head: usize,
    pub(crate) tail: usize,
    pub(crate) count: usize,
}

impl RingBuffer {
    /// Create an empty, zeroed ring.
    pub const fn new() -> Self {
        Self {
            data: [0; BUFFER_SIZE],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Store a byte at the head.
    ///
    /// Returns [`PushError::Full`] without touching the ring if it already
    /// holds [`BUFFER_SIZE`] bytes.
    pub fn push(&mut self, value: u8) -> Result<(), PushError> {
        if self.is_full() {
            return Err(PushError::Full);
        }
        self.data[self.head] = value;
        self.head = (self.head + 1) % BUFFER_SIZE;
        self.count += 1;
        Ok(())
    }

    /// Remove and return the oldest byte, zeroing its slot.
    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let value = self.data[self.tail];
        self.data[self.tail].zeroize();
        self.tail = (self.tail + 1) % BUFFER_SIZE;
        self.count -= 1;
        Some(value)
    }

    /// Reset indices and zero every slot.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
        self.data.zeroize();
    }

    /// Number of bytes currently stored.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if the ring holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check if the ring is at capacity.
    pub fn is_full(&self) -> bool {
        self.count >= BUFFER_SIZE
    }

    /// Fixed capacity of the ring.
    pub const fn capacity(&self) -> usize {
        BUFFER_SIZE
    }

    /// Next write index.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Next read index.
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Raw slot contents, including zeroed free slots.
    pub fn as_bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.data
    }

    /// Stored bytes in FIFO order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.count).map(move |i| self.data[(self.tail + i) % BUFFER_SIZE])
    }

    /// Wrapping sum of every slot, used by the self-test.
    pub(crate) fn byte_sum(&self) -> u32 {
        self.data.iter().map(|&b| u32::from(b)).sum()
    }
}

impl Default for RingBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> RingBuffer {
        let mut ring = RingBuffer::new();
        for i in 0..n {
            ring.push(i as u8).unwrap();
        }
        ring
    }

    #[test]
    fn ring_pops_in_fifo_order() {
        let mut ring = RingBuffer::new();
        ring.push(1).unwrap();
        ring.push(2).unwrap();
        ring.push(3).unwrap();

        assert_eq!(ring.pop(), Some(1));
        assert_eq!(ring.pop(), Some(2));
        assert_eq!(ring.pop(), Some(3));
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn ring_respects_capacity() {
        let mut ring = filled(BUFFER_SIZE);
        let before = ring.clone();

        assert_eq!(ring.push(0xAA), Err(PushError::Full));
        assert_eq!(ring, before);
        assert!(ring.is_full());
    }

    #[test]
    fn pop_zeroes_consumed_slot() {
        let mut ring = RingBuffer::new();
        ring.push(0x5A).unwrap();

        assert_eq!(ring.pop(), Some(0x5A));
        assert_eq!(ring.as_bytes()[0], 0);
    }

    #[test]
    fn pop_on_empty_leaves_ring_untouched() {
        let mut ring = RingBuffer::new();
        assert_eq!(ring.pop(), None);
        assert_eq!(ring, RingBuffer::new());
    }

    #[test]
    fn indices_wrap_around() {
        let mut ring = filled(BUFFER_SIZE);
        for _ in 0..10 {
            ring.pop().unwrap();
        }
        for i in 0..10 {
            ring.push(100 + i).unwrap();
        }

        assert_eq!(ring.head(), 10);
        assert_eq!(ring.tail(), 10);
        assert!(ring.is_full());
        assert_eq!(ring.iter().next(), Some(10));
        assert_eq!(ring.iter().last(), Some(109));
    }

    #[test]
    fn count_matches_index_distance() {
        let mut ring = RingBuffer::new();
        for step in 0..200usize {
            if step % 3 == 2 {
                ring.pop();
            } else {
                let _ = ring.push(step as u8);
            }
            let distance = (ring.head() + BUFFER_SIZE - ring.tail()) % BUFFER_SIZE;
            if ring.is_full() {
                assert_eq!(distance, 0);
            } else {
                assert_eq!(ring.len(), distance);
            }
        }
    }

    #[test]
    fn clear_resets_everything() {
        let mut ring = filled(17);
        ring.pop();

        ring.clear();

        assert_eq!(ring, RingBuffer::new());
        assert!(ring.is_empty());
    }

    #[test]
    fn byte_sum_adds_every_slot() {
        let ring = filled(4);
        assert_eq!(ring.byte_sum(), 1 + 2 + 3);
    }
}
