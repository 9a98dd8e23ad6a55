//! Core type definitions

use serde::{Deserialize, Serialize};

/// End wall position of a blank level, in raw units
pub const DEFAULT_END_POS: i32 = 3015;

/// File name the editor uses inside a level directory
pub const DEFAULT_LEVEL_FILE: &str = "level.dat";

/// The five record collections a level holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// Platforms, spikes and pits
    Block = 0,
    /// Background color/texture switches
    Background = 1,
    /// Gravity flips
    Gravity = 2,
    /// Falling-blocks effect spans
    BlocksFall = 3,
    /// Rising-blocks effect spans
    BlocksRise = 4,
}

impl RecordKind {
    /// All kinds, in file section order
    pub const ALL: [RecordKind; 5] = [
        Self::Block,
        Self::Background,
        Self::Gravity,
        Self::BlocksFall,
        Self::BlocksRise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Background => "background",
            Self::Gravity => "gravity",
            Self::BlocksFall => "blocks-fall",
            Self::BlocksRise => "blocks-rise",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_names() {
        assert_eq!(RecordKind::Block.to_string(), "block");
        assert_eq!(RecordKind::BlocksRise.as_str(), "blocks-rise");
    }
}
