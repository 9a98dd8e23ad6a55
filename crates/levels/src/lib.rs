//! # TIG Levels
//!
//! Reads and writes level files produced by The Impossible Game's level
//! editor, and holds them in an editable document model.
//!
//! ## Features
//! - Big-endian binary codec with size checks before every section
//! - Partial-load reporting instead of hard failures on truncated files
//! - Ordered record collections with derived indices
//! - Block sorting and pit merging
//!
//! ## Level Format
//!
//! A level is a single `level.dat` file inside a level directory:
//! - **Header**: format version, custom graphics flag
//! - **Blocks**: platforms, spikes and pits
//! - **End wall** position
//! - **Background changes**: color ids or custom texture paths
//! - **Gravity changes**, **blocks-fall** and **blocks-rise** spans
//!
//! ```rust
//! use tig_levels::{BlockObject, LevelCodec, LevelDocument};
//!
//! let mut level = LevelDocument::new();
//! level.add_block(BlockObject::pit(0, 30));
//! level.add_block(BlockObject::pit(30, 60));
//! level.merge_adjacent_pits();
//!
//! let bytes = LevelCodec::encode(&level);
//! let decoded = LevelCodec::decode(&bytes);
//! assert!(decoded.loaded_successfully());
//! assert_eq!(decoded.block_count(), 1);
//! ```

pub mod error;
pub mod cursor;
pub mod sink;
pub mod records;
mod collection;
pub mod document;
pub mod codec;
pub mod store;
pub mod summary;

pub use error::{DecodeError, LevelError, Result};
pub use cursor::ByteCursor;
pub use sink::ByteSink;
pub use records::{
    BackgroundChange, BackgroundColor, BackgroundVariant, BlockObject, BlockType, BlocksFall,
    BlocksRise, GravityChange, Record,
};
pub use document::LevelDocument;
pub use codec::LevelCodec;
pub use store::{read_all_bytes, write_all_bytes, LevelStore};
pub use summary::LevelSummary;
pub use tig_core::RecordKind;
