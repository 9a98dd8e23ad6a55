//! Level document
//!
//! The in-memory form of one level: header scalars plus five ordered record
//! collections. The document owns every record; indices are derived from
//! position and refreshed after every structural change.

use crate::collection::RecordList;
use crate::error::DecodeError;
use crate::records::{
    BackgroundChange, BlockObject, BlocksFall, BlocksRise, GravityChange, Record,
};
use serde::Serialize;
use std::collections::BTreeSet;
use tig_core::{RecordKind, DEFAULT_END_POS, RAW_UNITS_PER_CELL};

/// A single Impossible Game level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelDocument {
    format_version: i32,
    custom_graphics_enabled: bool,
    end_pos: i32,
    blocks: RecordList<BlockObject>,
    backgrounds: RecordList<BackgroundChange>,
    gravity_changes: RecordList<GravityChange>,
    blocks_falls: RecordList<BlocksFall>,
    blocks_rises: RecordList<BlocksRise>,
    custom_textures: BTreeSet<String>,
    loaded_successfully: bool,
    #[serde(skip)]
    load_error: Option<DecodeError>,
}

impl LevelDocument {
    /// Create a blank level (version 0, no custom graphics, end wall at 3015)
    pub fn new() -> Self {
        Self {
            format_version: 0,
            custom_graphics_enabled: false,
            end_pos: DEFAULT_END_POS,
            blocks: RecordList::new(),
            backgrounds: RecordList::new(),
            gravity_changes: RecordList::new(),
            blocks_falls: RecordList::new(),
            blocks_rises: RecordList::new(),
            custom_textures: BTreeSet::new(),
            loaded_successfully: true,
            load_error: None,
        }
    }

    // ---- header ----

    pub fn format_version(&self) -> i32 {
        self.format_version
    }

    pub fn set_format_version(&mut self, version: i32) {
        self.format_version = version;
    }

    pub fn custom_graphics_enabled(&self) -> bool {
        self.custom_graphics_enabled
    }

    /// Turn custom graphics on. There is no way back: the flag only ever
    /// goes from false to true.
    pub fn enable_custom_graphics(&mut self) {
        self.custom_graphics_enabled = true;
    }

    /// X position of the end wall
    pub fn end_pos(&self) -> i32 {
        self.end_pos
    }

    pub fn set_end_pos(&mut self, end_pos: i32) {
        self.end_pos = end_pos;
    }

    /// False when the last decode aborted; the collections are then partial
    pub fn loaded_successfully(&self) -> bool {
        self.loaded_successfully
    }

    /// Why the last decode aborted, if it did
    pub fn load_error(&self) -> Option<&DecodeError> {
        self.load_error.as_ref()
    }

    pub(crate) fn mark_failed(&mut self, error: DecodeError) {
        self.loaded_successfully = false;
        self.load_error = Some(error);
    }

    /// Distinct custom texture paths referenced by background changes
    pub fn custom_textures(&self) -> &BTreeSet<String> {
        &self.custom_textures
    }

    // ---- collections ----

    pub fn blocks(&self) -> &[BlockObject] {
        self.blocks.as_slice()
    }

    pub fn backgrounds(&self) -> &[BackgroundChange] {
        self.backgrounds.as_slice()
    }

    pub fn gravity_changes(&self) -> &[GravityChange] {
        self.gravity_changes.as_slice()
    }

    pub fn blocks_falls(&self) -> &[BlocksFall] {
        self.blocks_falls.as_slice()
    }

    pub fn blocks_rises(&self) -> &[BlocksRise] {
        self.blocks_rises.as_slice()
    }

    pub fn block_at(&self, index: usize) -> Option<&BlockObject> {
        self.blocks.get(index)
    }

    pub fn block_at_mut(&mut self, index: usize) -> Option<&mut BlockObject> {
        self.blocks.get_mut(index)
    }

    pub fn background_at(&self, index: usize) -> Option<&BackgroundChange> {
        self.backgrounds.get(index)
    }

    pub fn gravity_at(&self, index: usize) -> Option<&GravityChange> {
        self.gravity_changes.get(index)
    }

    pub fn gravity_at_mut(&mut self, index: usize) -> Option<&mut GravityChange> {
        self.gravity_changes.get_mut(index)
    }

    pub fn fall_at(&self, index: usize) -> Option<&BlocksFall> {
        self.blocks_falls.get(index)
    }

    pub fn fall_at_mut(&mut self, index: usize) -> Option<&mut BlocksFall> {
        self.blocks_falls.get_mut(index)
    }

    pub fn rise_at(&self, index: usize) -> Option<&BlocksRise> {
        self.blocks_rises.get(index)
    }

    pub fn rise_at_mut(&mut self, index: usize) -> Option<&mut BlocksRise> {
        self.blocks_rises.get_mut(index)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn background_count(&self) -> usize {
        self.backgrounds.len()
    }

    pub fn gravity_count(&self) -> usize {
        self.gravity_changes.len()
    }

    pub fn fall_count(&self) -> usize {
        self.blocks_falls.len()
    }

    pub fn rise_count(&self) -> usize {
        self.blocks_rises.len()
    }

    /// Number of records of `kind`
    pub fn count(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Block => self.block_count(),
            RecordKind::Background => self.background_count(),
            RecordKind::Gravity => self.gravity_count(),
            RecordKind::BlocksFall => self.fall_count(),
            RecordKind::BlocksRise => self.rise_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        RecordKind::ALL.iter().all(|&kind| self.count(kind) == 0)
    }

    // ---- mutation ----

    /// Append a block, returning its index
    pub fn add_block(&mut self, block: BlockObject) -> usize {
        self.blocks.push(block)
    }

    /// Append a background change, returning its index
    ///
    /// A custom texture also enables custom graphics and registers the path.
    pub fn add_background(&mut self, change: BackgroundChange) -> usize {
        if let Some(path) = change.texture_path() {
            self.register_texture(path);
        }
        self.backgrounds.push(change)
    }

    pub fn add_gravity(&mut self, change: GravityChange) -> usize {
        self.gravity_changes.push(change)
    }

    pub fn add_fall(&mut self, span: BlocksFall) -> usize {
        self.blocks_falls.push(span)
    }

    pub fn add_rise(&mut self, span: BlocksRise) -> usize {
        self.blocks_rises.push(span)
    }

    fn register_texture(&mut self, path: &str) {
        self.custom_graphics_enabled = true;
        self.custom_textures.insert(path.to_owned());
    }

    pub fn remove_block_at(&mut self, index: usize) -> Option<BlockObject> {
        self.blocks.remove_at(index)
    }

    pub fn remove_last_block(&mut self) -> Option<BlockObject> {
        self.blocks.pop()
    }

    /// Removing a texture change leaves the texture set and the graphics
    /// flag untouched
    pub fn remove_background_at(&mut self, index: usize) -> Option<BackgroundChange> {
        self.backgrounds.remove_at(index)
    }

    pub fn remove_last_background(&mut self) -> Option<BackgroundChange> {
        self.backgrounds.pop()
    }

    pub fn remove_gravity_at(&mut self, index: usize) -> Option<GravityChange> {
        self.gravity_changes.remove_at(index)
    }

    pub fn remove_last_gravity(&mut self) -> Option<GravityChange> {
        self.gravity_changes.pop()
    }

    pub fn remove_fall_at(&mut self, index: usize) -> Option<BlocksFall> {
        self.blocks_falls.remove_at(index)
    }

    pub fn remove_last_fall(&mut self) -> Option<BlocksFall> {
        self.blocks_falls.pop()
    }

    pub fn remove_rise_at(&mut self, index: usize) -> Option<BlocksRise> {
        self.blocks_rises.remove_at(index)
    }

    pub fn remove_last_rise(&mut self) -> Option<BlocksRise> {
        self.blocks_rises.pop()
    }

    /// Remove the record of `kind` at `index`; returns false (and does
    /// nothing) when the index is out of range
    pub fn remove_at(&mut self, kind: RecordKind, index: usize) -> bool {
        match kind {
            RecordKind::Block => self.remove_block_at(index).is_some(),
            RecordKind::Background => self.remove_background_at(index).is_some(),
            RecordKind::Gravity => self.remove_gravity_at(index).is_some(),
            RecordKind::BlocksFall => self.remove_fall_at(index).is_some(),
            RecordKind::BlocksRise => self.remove_rise_at(index).is_some(),
        }
    }

    /// Remove the last record of `kind`; returns false on an empty collection
    pub fn remove_last(&mut self, kind: RecordKind) -> bool {
        match kind {
            RecordKind::Block => self.remove_last_block().is_some(),
            RecordKind::Background => self.remove_last_background().is_some(),
            RecordKind::Gravity => self.remove_last_gravity().is_some(),
            RecordKind::BlocksFall => self.remove_last_fall().is_some(),
            RecordKind::BlocksRise => self.remove_last_rise().is_some(),
        }
    }

    // ---- housekeeping ----

    /// Stable sort of blocks by ascending X
    pub fn sort_blocks(&mut self) {
        self.blocks.sort_by_key(|block| block.x);
    }

    /// Coalesce touching or overlapping pits into single spans
    ///
    /// Sorts first, then sweeps left to right once. For each pit, later pits
    /// that start one cell after its end, or whose end lies past its start,
    /// are folded in: the first pit takes the matched pit's end and the
    /// matched record is removed. The scan is a single pass; it is not
    /// repeated until nothing changes. Returns the number of pits removed.
    pub fn merge_adjacent_pits(&mut self) -> usize {
        self.sort_blocks();

        let blocks = self.blocks.items_mut();
        let mut merged = 0;
        let mut i = 0;
        while i < blocks.len() {
            if blocks[i].is_pit() {
                tracing::debug!("Found pit at x={}", blocks[i].x);
                let mut j = i + 1;
                while j < blocks.len() {
                    let current = &blocks[i];
                    let next = &blocks[j];
                    let touches = current.y.checked_add(RAW_UNITS_PER_CELL) == Some(next.x);
                    if next.is_pit() && (touches || next.y > current.x) {
                        tracing::debug!(
                            "Merging pit at x={} into pit at x={}",
                            next.x,
                            current.x
                        );
                        blocks[i].y = blocks[j].y;
                        blocks.remove(j);
                        merged += 1;
                    } else {
                        j += 1;
                    }
                }
            }
            i += 1;
        }

        self.blocks.reindex_from(0);
        merged
    }

    /// Make sure every derived index matches its position
    pub fn indices_consistent(&self) -> bool {
        fn check<T: Record>(records: &[T]) -> bool {
            records.iter().enumerate().all(|(i, r)| r.index() == i)
        }
        check(self.blocks())
            && check(self.backgrounds())
            && check(self.gravity_changes())
            && check(self.blocks_falls())
            && check(self.blocks_rises())
    }
}

impl Default for LevelDocument {
    fn default() -> Self {
        Self::new()
    }
}
