//! Level record types and their wire codecs
//!
//! Each record kind knows how to read itself from a [`ByteCursor`] and write
//! itself to a [`ByteSink`]. Records also carry a derived `index`: their
//! position in the owning collection. The index is never persisted and can
//! only be assigned by the collection that owns the record.

use crate::cursor::{ByteCursor, ReadResult};
use crate::sink::ByteSink;
use serde::Serialize;
use tig_core::RecordKind;

/// Encode/decode contract shared by every record kind
pub trait Record: Sized {
    /// Collection this record belongs to
    const KIND: RecordKind;

    /// Smallest number of bytes one record occupies on the wire
    const MIN_WIRE_SIZE: usize;

    /// Read one record at the cursor
    fn decode(cursor: &mut ByteCursor<'_>) -> ReadResult<Self>;

    /// Append this record's fields to the sink
    fn encode(&self, sink: &mut ByteSink);

    /// Position of this record in its owning collection
    fn index(&self) -> usize;
}

/// Index assignment, reserved to the owning collection
pub(crate) trait Indexed {
    fn set_index(&mut self, index: usize);
}

/// Block object type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockType {
    Platform = 0,
    Spike = 1,
    Pit = 2,
}

impl BlockType {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Platform),
            1 => Some(Self::Spike),
            2 => Some(Self::Pit),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Platform => "Platform",
            Self::Spike => "Spike",
            Self::Pit => "Pit",
        }
    }
}

/// Built-in background colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BackgroundColor {
    Blue = 0,
    Yellow = 1,
    Green = 2,
    Violet = 3,
    Pink = 4,
    Black = 5,
}

impl BackgroundColor {
    /// Unknown ids are not an error, they just have no name
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(Self::Blue),
            1 => Some(Self::Yellow),
            2 => Some(Self::Green),
            3 => Some(Self::Violet),
            4 => Some(Self::Pink),
            5 => Some(Self::Black),
            _ => None,
        }
    }

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Violet => "violet",
            Self::Pink => "pink",
            Self::Black => "black",
        }
    }
}

/// A platform, spike or pit
///
/// For pits `y` is not a vertical coordinate: it holds the X position where
/// the pit span ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockObject {
    /// Raw type id (0 platform, 1 spike, 2 pit); unknown ids are kept as-is
    pub obj_type: u8,

    /// X position (raw units)
    pub x: i32,

    /// Y position, or end X for pits (raw units)
    pub y: i32,

    index: usize,
}

impl BlockObject {
    pub fn new(block_type: BlockType, x: i32, y: i32) -> Self {
        Self::from_raw(block_type.id(), x, y)
    }

    pub fn from_raw(obj_type: u8, x: i32, y: i32) -> Self {
        Self { obj_type, x, y, index: 0 }
    }

    pub fn platform(x: i32, y: i32) -> Self {
        Self::new(BlockType::Platform, x, y)
    }

    pub fn spike(x: i32, y: i32) -> Self {
        Self::new(BlockType::Spike, x, y)
    }

    /// A pit spanning `start_x..=end_x`
    pub fn pit(start_x: i32, end_x: i32) -> Self {
        Self::new(BlockType::Pit, start_x, end_x)
    }

    pub fn block_type(&self) -> Option<BlockType> {
        BlockType::from_id(self.obj_type)
    }

    pub fn is_pit(&self) -> bool {
        self.obj_type == BlockType::Pit.id()
    }
}

impl Record for BlockObject {
    const KIND: RecordKind = RecordKind::Block;
    const MIN_WIRE_SIZE: usize = 9;

    fn decode(cursor: &mut ByteCursor<'_>) -> ReadResult<Self> {
        let obj_type = cursor.read_u8()?;
        let x = cursor.read_i32()?;
        let y = cursor.read_i32()?;
        Ok(Self::from_raw(obj_type, x, y))
    }

    fn encode(&self, sink: &mut ByteSink) {
        sink.put_u8(self.obj_type);
        sink.put_i32(self.x);
        sink.put_i32(self.y);
    }

    fn index(&self) -> usize {
        self.index
    }
}

impl Indexed for BlockObject {
    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

/// What a background change switches to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundVariant {
    /// Built-in color id, stored as-is even when unrecognized
    Color(i32),
    /// Path of a custom texture image
    CustomTexture(String),
}

/// Switches the background color or texture when passed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackgroundChange {
    /// X position (raw units)
    pub x: i32,

    pub variant: BackgroundVariant,

    index: usize,
}

impl BackgroundChange {
    pub fn new(x: i32, variant: BackgroundVariant) -> Self {
        Self { x, variant, index: 0 }
    }

    pub fn color(x: i32, color_id: i32) -> Self {
        Self::new(x, BackgroundVariant::Color(color_id))
    }

    pub fn custom_texture(x: i32, path: impl Into<String>) -> Self {
        Self::new(x, BackgroundVariant::CustomTexture(path.into()))
    }

    pub fn color_id(&self) -> Option<i32> {
        match self.variant {
            BackgroundVariant::Color(id) => Some(id),
            BackgroundVariant::CustomTexture(_) => None,
        }
    }

    /// Named color, if this is a color change with a known id
    pub fn named_color(&self) -> Option<BackgroundColor> {
        self.color_id().and_then(BackgroundColor::from_id)
    }

    pub fn texture_path(&self) -> Option<&str> {
        match &self.variant {
            BackgroundVariant::CustomTexture(path) => Some(path),
            BackgroundVariant::Color(_) => None,
        }
    }

    pub fn has_custom_texture(&self) -> bool {
        self.texture_path().is_some()
    }
}

impl Record for BackgroundChange {
    const KIND: RecordKind = RecordKind::Background;
    // x + tag + color id; a texture is at least x + tag + empty text prefix
    const MIN_WIRE_SIZE: usize = 7;

    fn decode(cursor: &mut ByteCursor<'_>) -> ReadResult<Self> {
        let x = cursor.read_i32()?;
        let variant = if cursor.read_bool()? {
            BackgroundVariant::CustomTexture(cursor.read_text()?)
        } else {
            BackgroundVariant::Color(cursor.read_i32()?)
        };
        Ok(Self::new(x, variant))
    }

    fn encode(&self, sink: &mut ByteSink) {
        sink.put_i32(self.x);
        match &self.variant {
            BackgroundVariant::Color(id) => {
                sink.put_bool(false);
                sink.put_i32(*id);
            }
            BackgroundVariant::CustomTexture(path) => {
                sink.put_bool(true);
                sink.put_text(path);
            }
        }
    }

    fn index(&self) -> usize {
        self.index
    }
}

impl Indexed for BackgroundChange {
    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

/// Flips gravity when passed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GravityChange {
    /// X position (raw units)
    pub x: i32,

    index: usize,
}

impl GravityChange {
    pub fn new(x: i32) -> Self {
        Self { x, index: 0 }
    }
}

impl Record for GravityChange {
    const KIND: RecordKind = RecordKind::Gravity;
    const MIN_WIRE_SIZE: usize = 4;

    fn decode(cursor: &mut ByteCursor<'_>) -> ReadResult<Self> {
        Ok(Self::new(cursor.read_i32()?))
    }

    fn encode(&self, sink: &mut ByteSink) {
        sink.put_i32(self.x);
    }

    fn index(&self) -> usize {
        self.index
    }
}

impl Indexed for GravityChange {
    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

/// Span where blocks rise from the ground on the right side of the screen
///
/// `start_x == end_x` means the effect runs to the end of the level. The
/// span is stored unchanged; resolving it is up to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlocksRise {
    pub start_x: i32,
    pub end_x: i32,
    index: usize,
}

impl BlocksRise {
    pub fn new(start_x: i32, end_x: i32) -> Self {
        Self { start_x, end_x, index: 0 }
    }

    pub fn is_open_ended(&self) -> bool {
        self.start_x == self.end_x
    }
}

impl Record for BlocksRise {
    const KIND: RecordKind = RecordKind::BlocksRise;
    const MIN_WIRE_SIZE: usize = 8;

    fn decode(cursor: &mut ByteCursor<'_>) -> ReadResult<Self> {
        let start_x = cursor.read_i32()?;
        let end_x = cursor.read_i32()?;
        Ok(Self::new(start_x, end_x))
    }

    fn encode(&self, sink: &mut ByteSink) {
        sink.put_i32(self.start_x);
        sink.put_i32(self.end_x);
    }

    fn index(&self) -> usize {
        self.index
    }
}

impl Indexed for BlocksRise {
    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

/// Span where blocks fall to the ground on the left side of the screen
///
/// Same open-ended convention as [`BlocksRise`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlocksFall {
    pub start_x: i32,
    pub end_x: i32,
    index: usize,
}

impl BlocksFall {
    pub fn new(start_x: i32, end_x: i32) -> Self {
        Self { start_x, end_x, index: 0 }
    }

    pub fn is_open_ended(&self) -> bool {
        self.start_x == self.end_x
    }
}

impl Record for BlocksFall {
    const KIND: RecordKind = RecordKind::BlocksFall;
    const MIN_WIRE_SIZE: usize = 8;

    fn decode(cursor: &mut ByteCursor<'_>) -> ReadResult<Self> {
        let start_x = cursor.read_i32()?;
        let end_x = cursor.read_i32()?;
        Ok(Self::new(start_x, end_x))
    }

    fn encode(&self, sink: &mut ByteSink) {
        sink.put_i32(self.start_x);
        sink.put_i32(self.end_x);
    }

    fn index(&self) -> usize {
        self.index
    }
}

impl Indexed for BlocksFall {
    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}
