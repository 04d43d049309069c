//! Growable byte accumulator for staging protocol responses.
//!
//! Directory listings and retrieved file content arrive from the transport
//! in arbitrarily sized pieces; a [`Buffer`] collects them into one owned,
//! contiguous region before the operation dispatcher consumes the result.
//! Growth is amortized: capacity is rounded up to a fixed quantum so a long
//! run of small appends triggers O(1) reallocations per byte.

use std::collections::TryReserveError;

use thiserror::Error;

/// Capacity alignment quantum. Requested capacity is rounded up with
/// `(n + 63) & !31`, so every growth adds at least one full quantum of slack.
const GROWTH_QUANTUM: usize = 32;

/// Errors raised while growing a [`Buffer`].
///
/// An allocation failure is fatal to the operation that was staging data:
/// the buffer contents are no longer trustworthy and the caller must abort
/// that operation rather than retry the append.
#[derive(Error, Debug)]
pub enum BufferError {
    /// The backing allocation could not be grown.
    #[error("memory allocation failed while growing response buffer: {0}")]
    AllocationFailed(#[from] TryReserveError),

    /// The requested length overflows the address space.
    #[error("response buffer length overflow")]
    LengthOverflow,
}

/// An owned, append-only byte store with a consumption cursor.
///
/// The cursor ([`Buffer::consume`]) supports a sliding-window read pattern:
/// a producer appends at the back while a consumer advances over the front.
/// Consumption never reclaims memory; [`Buffer::clear`] releases everything
/// at once.
#[derive(Debug, Default)]
pub struct Buffer {
    data: Vec<u8>,
    consumed: usize,
}

impl Buffer {
    /// Creates an empty buffer. Does not allocate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `bytes` after the current content, growing the backing
    /// storage if needed.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailed`] when the backing storage
    /// cannot be grown. The already-accumulated bytes are untouched, but the
    /// staged operation must be abandoned: a partially assembled response is
    /// not usable downstream.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        let required = self
            .data
            .len()
            .checked_add(bytes.len())
            .ok_or(BufferError::LengthOverflow)?;

        if required > self.data.capacity() {
            // Round up to the quantum; always leaves at least one quantum
            // of slack beyond the immediate requirement.
            let target = required
                .checked_add(GROWTH_QUANTUM * 2 - 1)
                .ok_or(BufferError::LengthOverflow)?
                & !(GROWTH_QUANTUM - 1);
            self.data.try_reserve_exact(target - self.data.len())?;
        }

        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Appends a single NUL sentinel so consumers that expect a bounded
    /// string can treat the content as one.
    ///
    /// A missing terminator would surface far from here as silent
    /// truncation or an overrun in a downstream parser, so an allocation
    /// failure at this point aborts the process instead of returning.
    pub fn terminate(&mut self) {
        if let Err(err) = self.append(&[0]) {
            tracing::error!(error = %err, "failed to NUL-terminate response buffer");
            std::process::abort();
        }
    }

    /// Releases the backing storage and resets to the freshly-created state.
    pub fn clear(&mut self) {
        self.data = Vec::new();
        self.consumed = 0;
    }

    /// Advances the consumption cursor by up to `n` bytes.
    ///
    /// The cursor saturates at the logical length. Consumed bytes remain
    /// allocated; there is no compaction.
    pub fn consume(&mut self, n: usize) {
        self.consumed = self.consumed.saturating_add(n).min(self.data.len());
    }

    /// The not-yet-consumed tail of the content.
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.consumed..]
    }

    /// The full accumulated content, including any consumed prefix.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Logical length: total bytes appended since creation or [`clear`].
    ///
    /// [`clear`]: Buffer::clear
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when no bytes have been appended.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Currently allocated capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Bytes already consumed off the front.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_buffer_is_empty_and_unallocated() {
        let buf = Buffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.remaining(), b"");
    }

    #[test]
    fn append_accumulates_in_order() {
        let mut buf = Buffer::new();
        buf.append(b"LIST").unwrap();
        buf.append(b" -a").unwrap();
        assert_eq!(buf.as_slice(), b"LIST -a");
        assert_eq!(buf.len(), 7);
    }

    #[test]
    fn terminate_appends_single_nul() {
        let mut buf = Buffer::new();
        buf.append(b"abc").unwrap();
        buf.terminate();
        assert_eq!(buf.as_slice(), b"abc\0");
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn clear_matches_fresh_buffer() {
        let mut buf = Buffer::new();
        buf.append(&[0xFFu8; 1000]).unwrap();
        buf.consume(100);
        buf.clear();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.consumed(), 0);

        buf.append(b"again").unwrap();
        assert_eq!(buf.as_slice(), b"again");
    }

    #[test]
    fn consume_advances_and_saturates() {
        let mut buf = Buffer::new();
        buf.append(b"0123456789").unwrap();
        buf.consume(4);
        assert_eq!(buf.remaining(), b"456789");
        assert_eq!(buf.consumed(), 4);
        // Over-consumption pins the cursor at the logical length.
        buf.consume(usize::MAX);
        assert_eq!(buf.remaining(), b"");
        assert_eq!(buf.consumed(), 10);
        // The full content is still addressable behind the cursor.
        assert_eq!(buf.as_slice(), b"0123456789");
    }

    #[test]
    fn consumed_prefix_survives_further_appends() {
        let mut buf = Buffer::new();
        buf.append(b"head").unwrap();
        buf.consume(4);
        buf.append(b"tail").unwrap();
        assert_eq!(buf.remaining(), b"tail");
        assert_eq!(buf.len(), 8);
    }

    proptest! {
        #[test]
        fn split_appends_match_single_append(
            chunks in proptest::collection::vec(
                proptest::collection::vec(any::<u8>(), 0..64),
                0..16,
            )
        ) {
            let mut split = Buffer::new();
            for chunk in &chunks {
                split.append(chunk).unwrap();
            }

            let whole: Vec<u8> = chunks.concat();
            let mut single = Buffer::new();
            single.append(&whole).unwrap();

            prop_assert_eq!(split.as_slice(), single.as_slice());
            prop_assert_eq!(split.len(), whole.len());
        }

        #[test]
        fn capacity_never_below_length(
            chunks in proptest::collection::vec(
                proptest::collection::vec(any::<u8>(), 0..64),
                1..16,
            )
        ) {
            let mut buf = Buffer::new();
            for chunk in &chunks {
                buf.append(chunk).unwrap();
                prop_assert!(buf.capacity() >= buf.len());
            }
        }
    }
}
