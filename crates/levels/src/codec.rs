//! Level binary codec
//!
//! # File Format
//! ```text
//! i32   format version
//! u8    custom graphics enabled
//! i16   block count        { u8 type; i32 x; i32 y } * count
//! i32   end wall x
//! i32   background count   { i32 x; u8 has_texture; (u16 len; java utf8) | i32 color } * count
//! i32   gravity count      { i32 x } * count
//! i32   blocks-fall count  { i32 start_x; i32 end_x } * count
//! i32   blocks-rise count  { i32 start_x; i32 end_x } * count
//! ```
//! All integers are big-endian. There is no magic or checksum; counts are the
//! only structure, so every section is size-checked before it is read.

use crate::cursor::{ByteCursor, ReadResult};
use crate::document::LevelDocument;
use crate::error::{DecodeError, LevelError};
use crate::records::{
    BackgroundChange, BlockObject, BlocksFall, BlocksRise, GravityChange, Record,
};
use crate::sink::{text_wire_len, ByteSink, MAX_TEXT_BYTES};
use crate::Result;
use bytes::Bytes;
use tig_core::RecordKind;

/// Format version + graphics flag + block count
const HEADER_SIZE: usize = 4 + 1 + 2;

/// End wall position + background count
const END_POS_SIZE: usize = 4 + 4;

/// Any i32 section count
const COUNT_SIZE: usize = 4;

/// Level encoder/decoder
pub struct LevelCodec;

impl LevelCodec {
    /// Decode a level buffer
    ///
    /// Never fails: an empty buffer gives a blank level, and a malformed one
    /// gives a level with `loaded_successfully() == false` holding whatever
    /// sections were read before the problem. The reason is kept in
    /// [`LevelDocument::load_error`].
    pub fn decode(data: &[u8]) -> LevelDocument {
        let mut level = LevelDocument::new();

        if data.is_empty() {
            tracing::debug!("Empty level buffer, using blank level");
            return level;
        }

        let mut cursor = ByteCursor::new(data);
        match Self::decode_into(&mut level, &mut cursor) {
            Ok(()) => {
                if !cursor.is_exhausted() {
                    tracing::debug!(
                        "Ignoring {} trailing bytes after blocks-rise section",
                        cursor.remaining()
                    );
                }
                tracing::debug!(
                    "Decoded level v{}: {} blocks, {} backgrounds, {} gravity, {} falls, {} rises",
                    level.format_version(),
                    level.block_count(),
                    level.background_count(),
                    level.gravity_count(),
                    level.fall_count(),
                    level.rise_count()
                );
            }
            Err(err) => {
                tracing::warn!("Level decode aborted at offset {}: {}", cursor.position(), err);
                level.mark_failed(err);
            }
        }

        level
    }

    /// Decode a level buffer, returning the abort reason instead of a
    /// partial level
    pub fn try_decode(data: &[u8]) -> Result<LevelDocument> {
        let level = Self::decode(data);
        match level.load_error() {
            Some(err) => Err(err.clone().into()),
            None => Ok(level),
        }
    }

    fn decode_into(level: &mut LevelDocument, cursor: &mut ByteCursor<'_>) -> ReadResult<()> {
        Self::require(cursor, "header", HEADER_SIZE as u64)?;
        level.set_format_version(cursor.read_i32()?);
        if cursor.read_bool()? {
            level.enable_custom_graphics();
        }

        let block_count = cursor.read_i16()?;
        let count = Self::check_count::<BlockObject>(cursor, block_count as i32)?;
        for _ in 0..count {
            level.add_block(BlockObject::decode(cursor)?);
        }

        Self::require(cursor, "end position", END_POS_SIZE as u64)?;
        level.set_end_pos(cursor.read_i32()?);

        let count = Self::read_count::<BackgroundChange>(cursor)?;
        for _ in 0..count {
            // Texture paths are registered by add_background
            level.add_background(BackgroundChange::decode(cursor)?);
        }

        Self::require(cursor, "gravity count", COUNT_SIZE as u64)?;
        let count = Self::read_count::<GravityChange>(cursor)?;
        for _ in 0..count {
            level.add_gravity(GravityChange::decode(cursor)?);
        }

        Self::require(cursor, "blocks-fall count", COUNT_SIZE as u64)?;
        let count = Self::read_count::<BlocksFall>(cursor)?;
        for _ in 0..count {
            level.add_fall(BlocksFall::decode(cursor)?);
        }

        Self::require(cursor, "blocks-rise count", COUNT_SIZE as u64)?;
        let count = Self::read_count::<BlocksRise>(cursor)?;
        for _ in 0..count {
            level.add_rise(BlocksRise::decode(cursor)?);
        }

        Ok(())
    }

    /// Fail with `Truncated` unless `needed` bytes remain
    fn require(cursor: &ByteCursor<'_>, section: &'static str, needed: u64) -> ReadResult<()> {
        let remaining = cursor.remaining();
        if (remaining as u64) < needed {
            return Err(DecodeError::Truncated {
                section,
                needed,
                remaining,
            });
        }
        Ok(())
    }

    fn read_count<R: Record>(cursor: &mut ByteCursor<'_>) -> ReadResult<usize> {
        let count = cursor.read_i32()?;
        Self::check_count::<R>(cursor, count)
    }

    /// Reject negative counts and counts the remaining bytes cannot hold
    fn check_count<R: Record>(cursor: &ByteCursor<'_>, count: i32) -> ReadResult<usize> {
        let section = R::KIND.as_str();
        if count < 0 {
            return Err(DecodeError::NegativeCount { section, count });
        }
        Self::require(cursor, section, count as u64 * R::MIN_WIRE_SIZE as u64)?;
        tracing::debug!("Reading {} {} record(s)", count, section);
        Ok(count as usize)
    }

    /// Encode a level, refusing anything the format would have to cut
    ///
    /// Fails with [`LevelError::Oversized`] when a collection is larger than
    /// its count field or a texture path is longer than its length prefix.
    pub fn try_encode(level: &LevelDocument) -> Result<Bytes> {
        Self::check_fits(RecordKind::Block.as_str(), level.block_count(), i16::MAX as usize)?;
        for kind in &RecordKind::ALL[1..] {
            Self::check_fits(kind.as_str(), level.count(*kind), i32::MAX as usize)?;
        }
        for path in level.backgrounds().iter().filter_map(|b| b.texture_path()) {
            Self::check_fits("texture path", text_wire_len(path), MAX_TEXT_BYTES)?;
        }
        Ok(Self::encode(level))
    }

    fn check_fits(field: &'static str, len: usize, max: usize) -> Result<()> {
        if len > max {
            return Err(LevelError::Oversized { field, len, max });
        }
        Ok(())
    }

    /// Encode a level
    ///
    /// Always succeeds. A collection larger than its count field can express
    /// is cut to the representable prefix so that counts and records agree;
    /// use [`LevelCodec::try_encode`] to refuse instead.
    pub fn encode(level: &LevelDocument) -> Bytes {
        let blocks = Self::representable(level.blocks(), i16::MAX as usize);
        let backgrounds = Self::representable(level.backgrounds(), i32::MAX as usize);
        let gravity = Self::representable(level.gravity_changes(), i32::MAX as usize);
        let falls = Self::representable(level.blocks_falls(), i32::MAX as usize);
        let rises = Self::representable(level.blocks_rises(), i32::MAX as usize);

        let mut sink = ByteSink::with_capacity(
            HEADER_SIZE
                + END_POS_SIZE
                + 3 * COUNT_SIZE
                + blocks.len() * BlockObject::MIN_WIRE_SIZE
                + backgrounds.len() * 9
                + gravity.len() * GravityChange::MIN_WIRE_SIZE
                + (falls.len() + rises.len()) * BlocksFall::MIN_WIRE_SIZE,
        );

        sink.put_i32(level.format_version());
        sink.put_bool(level.custom_graphics_enabled());

        sink.put_i16(blocks.len() as i16);
        Self::encode_records(&mut sink, blocks);

        sink.put_i32(level.end_pos());

        sink.put_i32(backgrounds.len() as i32);
        Self::encode_records(&mut sink, backgrounds);

        sink.put_i32(gravity.len() as i32);
        Self::encode_records(&mut sink, gravity);

        sink.put_i32(falls.len() as i32);
        Self::encode_records(&mut sink, falls);

        sink.put_i32(rises.len() as i32);
        Self::encode_records(&mut sink, rises);

        sink.freeze()
    }

    fn representable<R: Record>(records: &[R], max: usize) -> &[R] {
        if records.len() > max {
            tracing::error!(
                "{} {} records exceed the format limit of {}; writing the first {}",
                records.len(),
                R::KIND,
                max,
                max
            );
            &records[..max]
        } else {
            records
        }
    }

    fn encode_records<R: Record>(sink: &mut ByteSink, records: &[R]) {
        for record in records {
            record.encode(sink);
        }
    }
}
