//! Block-level data types for IFO files

use std::fmt;

use glam::Mat4;

/// Number of blocks in the offset table written on save
pub const BLOCK_COUNT: usize = 13;

/// The thirteen block kinds of an IFO file
///
/// The discriminant is the tag stored in the offset table, and the
/// declaration order is the order blocks are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum BlockType {
    /// Map metadata and world transform
    MapInfo = 0,
    /// Static decoration models
    Decoration = 1,
    /// Non-player characters
    Npc = 2,
    /// Buildings and other constructions
    Construction = 3,
    /// Ambient sound emitters
    Sound = 4,
    /// Particle effects
    Effect = 5,
    /// Animated models
    Animation = 6,
    /// Legacy per-tile water grid
    WideWater = 7,
    /// Monster spawn points
    MonsterSpawn = 8,
    /// Water planes
    Water = 9,
    /// Warp gates
    WarpGate = 10,
    /// Collision volumes
    Collision = 11,
    /// Quest and script triggers
    EventTrigger = 12,
}

impl BlockType {
    /// Every block kind in save order
    pub const ALL: [Self; BLOCK_COUNT] = [
        Self::MapInfo,
        Self::Decoration,
        Self::Npc,
        Self::Construction,
        Self::Sound,
        Self::Effect,
        Self::Animation,
        Self::WideWater,
        Self::MonsterSpawn,
        Self::Water,
        Self::WarpGate,
        Self::Collision,
        Self::EventTrigger,
    ];

    /// The ten blocks made of scene objects, in save order
    pub const OBJECT_LISTS: [Self; 10] = [
        Self::Decoration,
        Self::Npc,
        Self::Construction,
        Self::Sound,
        Self::Effect,
        Self::Animation,
        Self::MonsterSpawn,
        Self::WarpGate,
        Self::Collision,
        Self::EventTrigger,
    ];

    /// Converts a stored tag, returning `None` for unknown values
    pub fn from_raw(value: i32) -> Option<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index))
            .copied()
    }

    /// The tag stored in the offset table
    pub fn raw(self) -> i32 {
        self as i32
    }

    /// Whether the block is a list of scene objects
    pub fn is_object_list(self) -> bool {
        !matches!(self, Self::MapInfo | Self::WideWater | Self::Water)
    }

    /// Human-readable block name
    pub fn name(self) -> &'static str {
        match self {
            Self::MapInfo => "MapInfo",
            Self::Decoration => "Decoration",
            Self::Npc => "Npc",
            Self::Construction => "Construction",
            Self::Sound => "Sound",
            Self::Effect => "Effect",
            Self::Animation => "Animation",
            Self::WideWater => "WideWater",
            Self::MonsterSpawn => "MonsterSpawn",
            Self::Water => "Water",
            Self::WarpGate => "WarpGate",
            Self::Collision => "Collision",
            Self::EventTrigger => "EventTrigger",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Object type field of a scene object
///
/// Values outside the known range are kept as [`ObjectType::Unknown`] so
/// they are written back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectType {
    /// No object type set
    #[default]
    Null,
    /// Morphing model
    Morph,
    /// Dropped item
    Item,
    /// Collision volume
    Collision,
    /// Ground model
    Ground,
    /// Building or other construction
    Construction,
    /// Non-player character
    Npc,
    /// Monster
    Monster,
    /// Player avatar
    Avatar,
    /// Player character
    User,
    /// Cart
    Cart,
    /// Castle gear
    CastleGear,
    /// Scripted event object
    EventObject,
    /// A value with no known meaning
    Unknown(i32),
}

impl ObjectType {
    /// Converts a stored value
    pub fn from_raw(value: i32) -> Self {
        match value {
            0 => Self::Null,
            1 => Self::Morph,
            2 => Self::Item,
            3 => Self::Collision,
            4 => Self::Ground,
            5 => Self::Construction,
            6 => Self::Npc,
            7 => Self::Monster,
            8 => Self::Avatar,
            9 => Self::User,
            10 => Self::Cart,
            11 => Self::CastleGear,
            12 => Self::EventObject,
            other => Self::Unknown(other),
        }
    }

    /// The stored value
    pub fn raw(self) -> i32 {
        match self {
            Self::Null => 0,
            Self::Morph => 1,
            Self::Item => 2,
            Self::Collision => 3,
            Self::Ground => 4,
            Self::Construction => 5,
            Self::Npc => 6,
            Self::Monster => 7,
            Self::Avatar => 8,
            Self::User => 9,
            Self::Cart => 10,
            Self::CastleGear => 11,
            Self::EventObject => 12,
            Self::Unknown(value) => value,
        }
    }
}

/// Locates a scene object inside its owning [`IfoFile`](crate::IfoFile)
///
/// Handles are plain indices. They stay valid until objects before them in
/// the same block are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectHandle {
    /// Block holding the object
    pub block: BlockType,
    /// Position within the block
    pub index: usize,
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.block, self.index)
    }
}

/// Map metadata block
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapInfo {
    /// Width in map cells
    pub width: i32,
    /// Height in map cells
    pub height: i32,
    /// Column of the block within the zone
    pub map_cell_x: i32,
    /// Row of the block within the zone
    pub map_cell_y: i32,
    /// World transform, stored M11 through M44
    pub world: Mat4,
    /// Display name of the map block
    pub map_name: String,
}

impl Default for MapInfo {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            map_cell_x: 0,
            map_cell_y: 0,
            world: Mat4::IDENTITY,
            map_name: String::new(),
        }
    }
}

/// One tile of the legacy water grid
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WideWaterCell {
    /// Non-zero when the tile has water
    pub used: u8,
    /// Water surface height
    pub height: f32,
    /// Water type field
    pub water_type: i32,
    /// Water index field
    pub water_index: i32,
    /// Trailing field with no known use
    pub reserved: i32,
}

/// Legacy water grid
///
/// No tool reads it, but it is always present and is written back as loaded.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WideWaterBlock {
    /// Tiles per row
    pub width: i32,
    /// Number of rows
    pub height: i32,
    /// Row-major cells, `width * height` of them
    pub cells: Vec<WideWaterCell>,
}

impl WideWaterBlock {
    /// Number of cells the dimensions call for, or `None` if they are negative
    pub fn expected_cells(&self) -> Option<usize> {
        let width = usize::try_from(self.width).ok()?;
        let height = usize::try_from(self.height).ok()?;
        width.checked_mul(height)
    }
}

/// An axis-aligned water plane in meters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaterPlane {
    /// Lower corner
    pub minimum: glam::Vec3,
    /// Upper corner
    pub maximum: glam::Vec3,
}

/// Water planes of a map block
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaterBlock {
    /// Leading float with no known use, kept for round-trips
    pub unused: f32,
    /// Planes in file order
    pub planes: Vec<WaterPlane>,
}

/// A monster kind spawned at a spawn point
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterEntry {
    /// Editor description
    pub description: String,
    /// Monster ID
    pub id: i32,
    /// Monsters of this kind spawned at once
    pub count: i32,
}

/// Spawn settings of a monster spawn point
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterSpawn {
    /// Spawn point name
    pub name: String,
    /// Monsters spawned on every cycle
    pub basic: Vec<MonsterEntry>,
    /// Monsters spawned once the tactic points are reached
    pub tactic: Vec<MonsterEntry>,
    /// Seconds between spawn cycles
    pub interval: i32,
    /// Most monsters alive at once
    pub limit: i32,
    /// Spawn radius
    pub range: i32,
    /// Points needed before the tactic monsters appear
    pub tactic_points: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_tags() {
        for (index, block) in BlockType::ALL.iter().enumerate() {
            assert_eq!(block.raw(), index as i32);
            assert_eq!(BlockType::from_raw(index as i32), Some(*block));
        }
        assert_eq!(BlockType::from_raw(13), None);
        assert_eq!(BlockType::from_raw(-1), None);
    }

    #[test]
    fn test_object_lists() {
        let lists: Vec<_> = BlockType::ALL
            .into_iter()
            .filter(|b| b.is_object_list())
            .collect();
        assert_eq!(lists, BlockType::OBJECT_LISTS);
    }

    #[test]
    fn test_object_type_values() {
        assert_eq!(ObjectType::from_raw(7), ObjectType::Monster);
        assert_eq!(ObjectType::EventObject.raw(), 12);
        assert_eq!(ObjectType::from_raw(99), ObjectType::Unknown(99));
        assert_eq!(ObjectType::Unknown(99).raw(), 99);
    }

    #[test]
    fn test_expected_cells() {
        let mut water = WideWaterBlock {
            width: 3,
            height: 2,
            cells: Vec::new(),
        };
        assert_eq!(water.expected_cells(), Some(6));
        water.width = -1;
        assert_eq!(water.expected_cells(), None);
    }
}
