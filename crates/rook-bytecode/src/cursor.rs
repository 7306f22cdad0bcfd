//! Bounds-checked sequential reader over an immutable byte buffer.
//!
//! All multi-byte reads are little-endian. A read that would pass the end of
//! the buffer fails with [`LoadError::TruncatedInput`] and leaves the cursor
//! position unchanged.

use crate::error::LoadError;

/// Saved cursor position for backtracking (e.g. speculative version probing).
#[derive(Clone, Copy, Debug)]
pub struct Mark(usize);

/// Sequential reader over a borrowed byte buffer.
///
/// State is a single offset, so a cursor is cheap to snapshot with
/// [`mark`](Cursor::mark) and restore with [`reset`](Cursor::reset).
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos == self.buf.len()
    }

    /// Snapshot the current position.
    pub fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    /// Restore a previously saved position.
    pub fn reset(&mut self, mark: Mark) {
        debug_assert!(mark.0 <= self.buf.len());
        self.pos = mark.0;
    }

    /// Consume `n` bytes, returning them as a slice of the backing buffer.
    fn take(&mut self, n: usize) -> Result<&'a [u8], LoadError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(LoadError::TruncatedInput {
                offset: self.pos,
                wanted: n,
                remaining,
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Advance past `n` bytes without interpreting them.
    pub fn skip(&mut self, n: usize) -> Result<(), LoadError> {
        self.take(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8, LoadError> {
        let b = self.take(1)?;
        Ok(b[0])
    }

    /// Read a one-byte variant tag.
    pub fn read_tag(&mut self) -> Result<u8, LoadError> {
        self.read_u8()
    }

    pub fn read_u16(&mut self) -> Result<u16, LoadError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, LoadError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64, LoadError> {
        let b = self.take(8)?;
        Ok(u64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    /// Read a u32 length followed by that many raw bytes.
    pub fn read_length_prefixed_bytes(&mut self) -> Result<&'a [u8], LoadError> {
        let len = self.read_u32()? as usize;
        self.take(len)
    }

    /// Read a u32 length followed by that many bytes of UTF-8.
    pub fn read_length_prefixed_str(&mut self) -> Result<&'a str, LoadError> {
        let len = self.read_u32()? as usize;
        let offset = self.pos;
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes).map_err(|_| LoadError::InvalidUtf8 { offset })
    }
}
