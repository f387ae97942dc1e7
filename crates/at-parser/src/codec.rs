//! Fixed-capacity line buffer for the incoming byte stream.
//!
//! Incoming bytes accumulate here until a complete logical line is found.
//! A logical line ends with a carriage return followed later by a line
//! feed; the two need not be adjacent. When the buffer is full and no
//! terminator has appeared, a bounded number of bytes is dropped from the
//! front so that an endless unterminated line cannot wedge the parser.

use bytes::{Buf, BytesMut};
use log::trace;

/// A bounded accumulation buffer that yields complete logical lines.
///
/// The capacity is a hard bound on occupancy: [`LineBuffer::fill`] accepts
/// only as many bytes as fit, and the caller is expected to invoke
/// [`LineBuffer::relieve_overflow`] when nothing fits at all.
#[derive(Debug)]
pub struct LineBuffer {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
    /// Maximum number of bytes the buffer may hold.
    capacity: usize,
}

impl LineBuffer {
    /// Create a line buffer bounded to `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        LineBuffer {
            buffer: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    /// The configured capacity bound.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of bytes currently buffered.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Free space remaining before the capacity bound.
    pub fn free_space(&self) -> usize {
        self.capacity - self.buffer.len()
    }

    /// Copy as much of `data` into the buffer as fits.
    ///
    /// Returns the number of bytes accepted, which is zero when the buffer
    /// is already full.
    pub fn fill(&mut self, data: &[u8]) -> usize {
        let take = self.free_space().min(data.len());
        self.buffer.extend_from_slice(&data[..take]);
        take
    }

    /// Drop up to `len` bytes from the front, clamped to current occupancy.
    pub fn drop_front(&mut self, len: usize) {
        let len = len.min(self.buffer.len());
        self.buffer.advance(len);
    }

    /// Apply the overflow policy: the buffer is full with no terminator in
    /// sight, so drop a small fixed number of bytes from the front to make
    /// room. The drop size is one-tenth of capacity, clamped to 1..=5, so a
    /// line that never fits is abandoned piecemeal instead of deadlocking
    /// the stream.
    pub fn relieve_overflow(&mut self) {
        let drop = (self.capacity / 10).clamp(1, 5);
        trace!("line buffer full, dropping {} byte(s) from the front", drop);
        self.drop_front(drop);
    }

    /// Extract the next complete logical line, if any.
    ///
    /// Scans for a carriage return, then for a line feed after it. Returns
    /// the line content without the terminator and consumes everything
    /// through the line feed, or `None` if no complete line is buffered.
    pub fn take_line(&mut self) -> Option<BytesMut> {
        let cr = self.buffer.iter().position(|&b| b == b'\r')?;
        let lf = self.buffer[cr + 1..].iter().position(|&b| b == b'\n')?;
        let mut line = self.buffer.split_to(cr + 1 + lf + 1);
        line.truncate(cr);
        Some(line)
    }

    /// Discard all buffered bytes.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
