//! Error types for the levels crate

use tig_core::TigError;

/// Structural problems found while decoding a level buffer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A read would run past the end of the buffer
    #[error("read of {needed} bytes at offset {offset} exceeds buffer of {available} bytes")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A section declares more bytes than the buffer has left
    #[error("truncated {section} section: needs {needed} bytes, {remaining} remaining")]
    Truncated {
        section: &'static str,
        needed: u64,
        remaining: usize,
    },

    /// A section count is negative
    #[error("negative {section} count: {count}")]
    NegativeCount { section: &'static str, count: i32 },
}

/// Level-specific error types
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// File I/O error
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),

    /// Malformed level data
    #[error("Invalid level data: {0}")]
    Decode(#[from] DecodeError),

    /// A field holds more than the file format can store
    #[error("{field} too large to save: {len} exceeds the limit of {max}")]
    Oversized {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

impl From<LevelError> for TigError {
    fn from(err: LevelError) -> Self {
        match err {
            LevelError::FileError(e) => TigError::Io(e),
            LevelError::Decode(e) => TigError::InvalidData(e.to_string()),
            e @ LevelError::Oversized { .. } => TigError::InvalidData(e.to_string()),
        }
    }
}

/// Result type for level operations
pub type Result<T> = std::result::Result<T, LevelError>;
