//! Scene objects stored in the object list blocks

use glam::{IVec2, Quat, Vec3};

use crate::types::{BlockType, MonsterSpawn, ObjectType};

/// Fields shared by every scene object
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectHeader {
    /// Editor description
    pub description: String,
    /// Warp destination for warp gates
    pub warp_id: i16,
    /// Event the object triggers
    pub event_id: i16,
    /// Kind of object
    pub object_type: ObjectType,
    /// Index into the block's model or character table
    pub object_id: i32,
    /// Map cell the object was placed in
    pub map_position: IVec2,
    /// Orientation
    pub rotation: Quat,
    /// Position in meters
    pub position: Vec3,
    /// Scale per axis
    pub scale: Vec3,
}

impl Default for ObjectHeader {
    fn default() -> Self {
        Self {
            description: String::new(),
            warp_id: 0,
            event_id: 0,
            object_type: ObjectType::Null,
            object_id: 0,
            map_position: IVec2::ZERO,
            rotation: Quat::IDENTITY,
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Fields that follow the header, depending on the block
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectPayload {
    /// Decoration, construction, animation, warp gate and collision objects
    #[default]
    None,
    /// Non-player character settings
    Npc {
        /// AI pattern the character runs
        ai_pattern_index: i32,
        /// Character script path
        path: String,
    },
    /// Ambient sound emitter
    Sound {
        /// Sound file path
        path: String,
        /// Audible range
        range: i32,
        /// Delay between plays
        interval: i32,
    },
    /// Particle effect
    Effect {
        /// Effect file path
        path: String,
    },
    /// Monster spawn point settings
    MonsterSpawn(MonsterSpawn),
    /// Quest and script hooks
    EventTrigger {
        /// Quest trigger name
        qsd_trigger: String,
        /// Lua function name
        lua_trigger: String,
    },
}

impl ObjectPayload {
    /// An empty payload of the kind `block` stores
    pub fn default_for(block: BlockType) -> Self {
        match block {
            BlockType::Npc => Self::Npc {
                ai_pattern_index: 0,
                path: String::new(),
            },
            BlockType::Sound => Self::Sound {
                path: String::new(),
                range: 0,
                interval: 0,
            },
            BlockType::Effect => Self::Effect {
                path: String::new(),
            },
            BlockType::MonsterSpawn => Self::MonsterSpawn(MonsterSpawn::default()),
            BlockType::EventTrigger => Self::EventTrigger {
                qsd_trigger: String::new(),
                lua_trigger: String::new(),
            },
            _ => Self::None,
        }
    }

    /// Short name of the payload kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "empty",
            Self::Npc { .. } => "npc",
            Self::Sound { .. } => "sound",
            Self::Effect { .. } => "effect",
            Self::MonsterSpawn(_) => "monster spawn",
            Self::EventTrigger { .. } => "event trigger",
        }
    }

    /// Whether objects in `block` carry this kind of payload
    pub fn fits(&self, block: BlockType) -> bool {
        match block {
            BlockType::Decoration
            | BlockType::Construction
            | BlockType::Animation
            | BlockType::WarpGate
            | BlockType::Collision => matches!(self, Self::None),
            BlockType::Npc => matches!(self, Self::Npc { .. }),
            BlockType::Sound => matches!(self, Self::Sound { .. }),
            BlockType::Effect => matches!(self, Self::Effect { .. }),
            BlockType::MonsterSpawn => matches!(self, Self::MonsterSpawn(_)),
            BlockType::EventTrigger => matches!(self, Self::EventTrigger { .. }),
            BlockType::MapInfo | BlockType::WideWater | BlockType::Water => false,
        }
    }

    /// Every string stored in the payload
    pub fn strings(&self) -> Vec<&str> {
        match self {
            Self::None => Vec::new(),
            Self::Npc { path, .. } | Self::Effect { path } | Self::Sound { path, .. } => {
                vec![path.as_str()]
            }
            Self::MonsterSpawn(spawn) => {
                let mut strings = vec![spawn.name.as_str()];
                strings.extend(
                    spawn
                        .basic
                        .iter()
                        .chain(&spawn.tactic)
                        .map(|m| m.description.as_str()),
                );
                strings
            }
            Self::EventTrigger {
                qsd_trigger,
                lua_trigger,
            } => vec![qsd_trigger.as_str(), lua_trigger.as_str()],
        }
    }
}

/// An object placed in a map block
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneObject {
    /// Shared fields
    pub header: ObjectHeader,
    /// Block-specific fields
    pub payload: ObjectPayload,
}

impl SceneObject {
    /// Creates an object with a default header and an empty payload for `block`
    pub fn new(block: BlockType) -> Self {
        Self {
            header: ObjectHeader::default(),
            payload: ObjectPayload::default_for(block),
        }
    }

    /// Sets the object ID
    pub fn with_object_id(mut self, object_id: i32) -> Self {
        self.header.object_id = object_id;
        self
    }

    /// Sets the position in meters
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.header.position = position;
        self
    }

    /// Monster spawn settings, if this is a spawn point
    pub fn monster_spawn(&self) -> Option<&MonsterSpawn> {
        match &self.payload {
            ObjectPayload::MonsterSpawn(spawn) => Some(spawn),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_payloads_fit() {
        for block in BlockType::OBJECT_LISTS {
            let payload = ObjectPayload::default_for(block);
            assert!(payload.fits(block), "{} payload", block);
        }
        assert!(!ObjectPayload::None.fits(BlockType::Sound));
        assert!(!ObjectPayload::None.fits(BlockType::Water));
    }

    #[test]
    fn test_default_header() {
        let object = SceneObject::new(BlockType::Decoration).with_object_id(5);
        assert_eq!(object.header.object_id, 5);
        assert_eq!(object.header.rotation, Quat::IDENTITY);
        assert_eq!(object.header.scale, Vec3::ONE);
        assert_eq!(object.payload, ObjectPayload::None);
    }

    #[test]
    fn test_payload_strings() {
        let payload = ObjectPayload::EventTrigger {
            qsd_trigger: "q1".to_string(),
            lua_trigger: "l1".to_string(),
        };
        assert_eq!(payload.strings(), vec!["q1", "l1"]);
    }
}
