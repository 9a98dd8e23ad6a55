//! Sequential reader over a level buffer
//!
//! The editor writes every multi-byte integer big-endian. [`ByteCursor`]
//! converts on the way in and never reads past the end of the buffer: every
//! read is bounds-checked before the position moves, so a failed read leaves
//! the cursor where it was.

use crate::error::DecodeError;
use bytes::Buf;

/// Result of a single cursor read
pub type ReadResult<T> = std::result::Result<T, DecodeError>;

/// Read position over an immutable byte buffer
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the current offset and the end
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail unless at least `needed` bytes remain
    pub fn ensure(&self, needed: usize) -> ReadResult<()> {
        self.window(self.pos, needed).map(|_| ())
    }

    /// Checked slice of `needed` bytes starting at `offset`
    fn window(&self, offset: usize, needed: usize) -> ReadResult<&'a [u8]> {
        let out_of_bounds = DecodeError::OutOfBounds {
            offset,
            needed,
            available: self.data.len(),
        };
        let end = offset.checked_add(needed).ok_or_else(|| out_of_bounds.clone())?;
        self.data.get(offset..end).ok_or(out_of_bounds)
    }

    /// Read one byte
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let value = self.u8_at(self.pos)?;
        self.pos += 1;
        Ok(value)
    }

    /// Read one byte as a bool (any non-zero byte is true)
    pub fn read_bool(&mut self) -> ReadResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a big-endian 16-bit integer
    pub fn read_i16(&mut self) -> ReadResult<i16> {
        let value = self.i16_at(self.pos)?;
        self.pos += 2;
        Ok(value)
    }

    /// Read a big-endian 32-bit integer
    pub fn read_i32(&mut self) -> ReadResult<i32> {
        let value = self.i32_at(self.pos)?;
        self.pos += 4;
        Ok(value)
    }

    /// Read length-prefixed text, advancing by `2 + length`
    pub fn read_text(&mut self) -> ReadResult<String> {
        let (text, consumed) = self.text_at(self.pos)?;
        self.pos += consumed;
        Ok(text)
    }

    /// Byte at `offset` without moving the cursor
    pub fn u8_at(&self, offset: usize) -> ReadResult<u8> {
        let mut chunk = self.window(offset, 1)?;
        Ok(chunk.get_u8())
    }

    /// Big-endian 16-bit integer at `offset` without moving the cursor
    pub fn i16_at(&self, offset: usize) -> ReadResult<i16> {
        let mut chunk = self.window(offset, 2)?;
        Ok(chunk.get_i16())
    }

    /// Big-endian 32-bit integer at `offset` without moving the cursor
    pub fn i32_at(&self, offset: usize) -> ReadResult<i32> {
        let mut chunk = self.window(offset, 4)?;
        Ok(chunk.get_i32())
    }

    /// Length-prefixed text at `offset`, returning the text and the bytes it spans
    ///
    /// The prefix counts bytes, not characters, and is read unsigned. The
    /// body is Java's modified UTF-8 (as written by `DataOutputStream`).
    /// Bodies that are not valid modified UTF-8 are read leniently, so text
    /// alone never fails a read; only the bounds can.
    pub fn text_at(&self, offset: usize) -> ReadResult<(String, usize)> {
        let mut prefix = self.window(offset, 2)?;
        let len = prefix.get_u16() as usize;
        let body_offset = offset + 2;
        let body = self.window(body_offset, len)?;
        Ok((decode_text(body, body_offset), 2 + len))
    }
}

fn decode_text(body: &[u8], offset: usize) -> String {
    match cesu8::from_java_cesu8(body) {
        Ok(text) => text.into_owned(),
        Err(_) => {
            tracing::warn!("Text at offset {} is not valid UTF-8, replacing bad bytes", offset);
            String::from_utf8_lossy(body).into_owned()
        }
    }
}
