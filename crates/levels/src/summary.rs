//! Human-readable level overview

use crate::document::LevelDocument;
use std::fmt;
use tig_core::RawPosition;

/// Snapshot of a level's headline numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSummary {
    pub format_version: i32,
    pub block_count: usize,
    pub first_block_x: Option<i32>,
    pub end_pos: i32,
    pub background_count: usize,
    pub custom_graphics_enabled: bool,
    pub custom_textures: Vec<String>,
    pub gravity_count: usize,
    pub rise_count: usize,
    pub fall_count: usize,
    pub loaded_successfully: bool,
}

impl LevelDocument {
    pub fn summary(&self) -> LevelSummary {
        LevelSummary {
            format_version: self.format_version(),
            block_count: self.block_count(),
            first_block_x: self.block_at(0).map(|block| block.x),
            end_pos: self.end_pos(),
            background_count: self.background_count(),
            custom_graphics_enabled: self.custom_graphics_enabled(),
            custom_textures: self.custom_textures().iter().cloned().collect(),
            gravity_count: self.gravity_count(),
            rise_count: self.rise_count(),
            fall_count: self.fall_count(),
            loaded_successfully: self.loaded_successfully(),
        }
    }
}

impl fmt::Display for LevelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "====== Level Summary ======")?;
        if !self.loaded_successfully {
            writeln!(f, "WARNING: the level was only partially loaded")?;
        }
        writeln!(f, "Format version: {}", self.format_version)?;
        writeln!(f, "Blocks: {}", self.block_count)?;
        if let Some(x) = self.first_block_x {
            writeln!(f, "First block at X: {} (cell {})", x, RawPosition::new(x).to_cells().0)?;
        }
        writeln!(
            f,
            "Level ends at X: {} (cell {})",
            self.end_pos,
            RawPosition::new(self.end_pos).to_cells().0
        )?;
        writeln!(f, "Background changes: {}", self.background_count)?;
        if self.custom_graphics_enabled {
            writeln!(f, "Custom graphics: enabled")?;
            if !self.custom_textures.is_empty() {
                writeln!(f, "Custom textures: {}", self.custom_textures.join(", "))?;
            }
        }
        writeln!(f, "Gravity changes: {}", self.gravity_count)?;
        writeln!(f, "Rising block triggers: {}", self.rise_count)?;
        write!(f, "Falling block triggers: {}", self.fall_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{BackgroundChange, BlockObject, BlocksRise};

    #[test]
    fn test_blank_summary() {
        let summary = LevelDocument::new().summary();
        assert_eq!(summary.first_block_x, None);
        assert_eq!(summary.end_pos, 3015);

        let text = summary.to_string();
        assert!(text.contains("Blocks: 0"));
        assert!(text.contains("Level ends at X: 3015 (cell 100)"));
        assert!(!text.contains("First block"));
        assert!(!text.contains("Custom graphics"));
        assert!(!text.contains("WARNING"));
    }

    #[test]
    fn test_summary_lists_textures() {
        let mut level = LevelDocument::new();
        level.add_block(BlockObject::platform(450, 0));
        level.add_background(BackgroundChange::custom_texture(0, "b.png"));
        level.add_background(BackgroundChange::custom_texture(30, "a.png"));
        level.add_rise(BlocksRise::new(0, 0));

        let summary = level.summary();
        assert_eq!(summary.first_block_x, Some(450));
        assert_eq!(summary.custom_textures, ["a.png", "b.png"]);

        let text = summary.to_string();
        assert!(text.contains("Custom textures: a.png, b.png"));
        assert!(text.contains("First block at X: 450 (cell 15)"));
        assert!(text.contains("Rising block triggers: 1"));
    }
}
