//! Append-only writer producing level bytes
//!
//! Mirrors [`crate::cursor::ByteCursor`]: integers go out big-endian, single
//! bytes and bools unchanged, text as a 16-bit byte length then Java
//! modified UTF-8 bytes.

use bytes::{BufMut, Bytes, BytesMut};

/// Longest text payload the 16-bit prefix can describe
pub const MAX_TEXT_BYTES: usize = u16::MAX as usize;

/// Bytes `value` occupies on the wire, excluding the length prefix
pub fn text_wire_len(value: &str) -> usize {
    cesu8::to_java_cesu8(value).len()
}

/// Sequential writer over a growable buffer
#[derive(Debug, Default)]
pub struct ByteSink {
    buf: BytesMut,
}

impl ByteSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn put_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    #[inline]
    pub fn put_bool(&mut self, value: bool) {
        self.buf.put_u8(value as u8);
    }

    #[inline]
    pub fn put_i16(&mut self, value: i16) {
        self.buf.put_i16(value);
    }

    #[inline]
    pub fn put_i32(&mut self, value: i32) {
        self.buf.put_i32(value);
    }

    /// Write length-prefixed text in Java's modified UTF-8
    ///
    /// Text encoding to more than [`MAX_TEXT_BYTES`] is cut at the last
    /// character that fits. [`crate::LevelCodec::try_encode`] refuses such
    /// text before it gets here.
    pub fn put_text(&mut self, value: &str) {
        let encoded = cesu8::to_java_cesu8(value);
        let mut end = encoded.len();
        if end > MAX_TEXT_BYTES {
            end = MAX_TEXT_BYTES;
            while encoded[end] & 0xC0 == 0x80 {
                end -= 1;
            }
            // Keep surrogate pairs together
            if encoded[end] == 0xED && encoded[end + 1] & 0xF0 == 0xB0 {
                end -= 3;
            }
            tracing::warn!(
                "Text of {} bytes truncated to {} bytes on write",
                encoded.len(),
                end
            );
        }
        self.buf.put_u16(end as u16);
        self.buf.put_slice(&encoded[..end]);
    }

    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::ByteCursor;

    #[test]
    fn test_put_i32_is_big_endian() {
        let mut sink = ByteSink::new();
        sink.put_i32(0x0102_0304);
        assert_eq!(sink.as_slice(), &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_put_i16_and_bool() {
        let mut sink = ByteSink::new();
        sink.put_i16(-2);
        sink.put_bool(true);
        sink.put_bool(false);
        assert_eq!(sink.as_slice(), &[0xFF, 0xFE, 0x01, 0x00]);
    }

    #[test]
    fn test_put_text_layout() {
        let mut sink = ByteSink::new();
        sink.put_text("bg/sky.png");
        let bytes = sink.into_vec();
        assert_eq!(&bytes[..2], &[0x00, 10]);
        assert_eq!(&bytes[2..], b"bg/sky.png");
    }

    #[test]
    fn test_cursor_reads_what_sink_writes() {
        let mut sink = ByteSink::with_capacity(16);
        sink.put_i32(i32::MIN);
        sink.put_text("ünïcode");
        sink.put_u8(9);

        let bytes = sink.freeze();
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.read_i32().unwrap(), i32::MIN);
        assert_eq!(cursor.read_text().unwrap(), "ünïcode");
        assert_eq!(cursor.read_u8().unwrap(), 9);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_oversized_text_is_cut_on_char_boundary() {
        // 'é' is two bytes, so MAX_TEXT_BYTES (odd) lands mid-character
        let text = "é".repeat(MAX_TEXT_BYTES / 2 + 1);
        let mut sink = ByteSink::new();
        sink.put_text(&text);

        let bytes = sink.into_vec();
        let declared = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
        assert_eq!(declared, MAX_TEXT_BYTES - 1);
        assert_eq!(bytes.len(), 2 + declared);
        assert!(std::str::from_utf8(&bytes[2..]).is_ok());
    }

    #[test]
    fn test_put_text_writes_surrogate_pairs() {
        let mut sink = ByteSink::new();
        sink.put_text("a\u{1F600}");
        assert_eq!(
            sink.as_slice(),
            &[0x00, 0x07, 0x61, 0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80]
        );
        assert_eq!(text_wire_len("a\u{1F600}"), 7);
    }

    #[test]
    fn test_oversized_text_keeps_surrogate_pairs_whole() {
        // Six ASCII bytes put a low surrogate at the cut point
        let text = format!("aaaaaa{}", "\u{1F600}".repeat(10_922));
        let mut sink = ByteSink::new();
        sink.put_text(&text);

        let bytes = sink.freeze();
        let mut cursor = ByteCursor::new(&bytes);
        let expected = format!("aaaaaa{}", "\u{1F600}".repeat(10_921));
        assert_eq!(cursor.read_text().unwrap(), expected);
        assert_eq!(bytes.len(), 2 + 6 + 6 * 10_921);
    }
}
