//! The in-memory scene of one map block

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{IfoError, Result};
use crate::object::SceneObject;
use crate::parser::IfoParser;
use crate::types::{BlockType, MapInfo, ObjectHandle, WaterBlock, WideWaterBlock};

/// A decoded IFO file
///
/// Object lists keep file order. Indices into them are what other map data
/// refers to, so objects should be appended rather than reordered.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IfoFile {
    /// Map metadata
    pub map_info: MapInfo,
    /// Decoration objects
    pub decorations: Vec<SceneObject>,
    /// NPC objects
    pub npcs: Vec<SceneObject>,
    /// Construction objects
    pub constructions: Vec<SceneObject>,
    /// Sound emitters
    pub sounds: Vec<SceneObject>,
    /// Effect objects
    pub effects: Vec<SceneObject>,
    /// Animated objects
    pub animations: Vec<SceneObject>,
    /// Legacy water grid
    pub wide_water: WideWaterBlock,
    /// Monster spawn points
    pub monster_spawns: Vec<SceneObject>,
    /// Water planes
    pub water: WaterBlock,
    /// Warp gates
    pub warp_gates: Vec<SceneObject>,
    /// Collision objects
    pub collisions: Vec<SceneObject>,
    /// Event triggers
    pub event_triggers: Vec<SceneObject>,
}

impl IfoFile {
    /// Creates a file with every block empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads an IFO file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        IfoParser::new().parse(&mut reader)
    }

    /// Writes the file to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        IfoParser::new().write(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Objects of an object list block; empty for the other blocks
    pub fn objects(&self, block: BlockType) -> &[SceneObject] {
        match block {
            BlockType::Decoration => &self.decorations,
            BlockType::Npc => &self.npcs,
            BlockType::Construction => &self.constructions,
            BlockType::Sound => &self.sounds,
            BlockType::Effect => &self.effects,
            BlockType::Animation => &self.animations,
            BlockType::MonsterSpawn => &self.monster_spawns,
            BlockType::WarpGate => &self.warp_gates,
            BlockType::Collision => &self.collisions,
            BlockType::EventTrigger => &self.event_triggers,
            BlockType::MapInfo | BlockType::WideWater | BlockType::Water => &[],
        }
    }

    /// Mutable object list of `block`, or `None` if it is not an object list
    pub fn objects_mut(&mut self, block: BlockType) -> Option<&mut Vec<SceneObject>> {
        match block {
            BlockType::Decoration => Some(&mut self.decorations),
            BlockType::Npc => Some(&mut self.npcs),
            BlockType::Construction => Some(&mut self.constructions),
            BlockType::Sound => Some(&mut self.sounds),
            BlockType::Effect => Some(&mut self.effects),
            BlockType::Animation => Some(&mut self.animations),
            BlockType::MonsterSpawn => Some(&mut self.monster_spawns),
            BlockType::WarpGate => Some(&mut self.warp_gates),
            BlockType::Collision => Some(&mut self.collisions),
            BlockType::EventTrigger => Some(&mut self.event_triggers),
            BlockType::MapInfo | BlockType::WideWater | BlockType::Water => None,
        }
    }

    /// Looks up an object by handle
    pub fn get(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects(handle.block).get(handle.index)
    }

    /// Looks up an object by handle for modification
    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut SceneObject> {
        self.objects_mut(handle.block)?.get_mut(handle.index)
    }

    /// Appends an object to a block and returns its handle
    ///
    /// Fails if `block` is not an object list or the payload belongs to a
    /// different block.
    pub fn push(&mut self, block: BlockType, object: SceneObject) -> Result<ObjectHandle> {
        let payload = &object.payload;
        let objects = self
            .objects_mut(block)
            .ok_or(IfoError::NotAnObjectList(block))?;
        if !payload.fits(block) {
            return Err(IfoError::PayloadMismatch {
                block,
                payload: payload.kind(),
            });
        }
        objects.push(object);
        Ok(ObjectHandle {
            block,
            index: objects.len() - 1,
        })
    }

    /// Handles of every object, block by block in save order
    pub fn handles(&self) -> impl Iterator<Item = ObjectHandle> + '_ {
        BlockType::OBJECT_LISTS.into_iter().flat_map(move |block| {
            (0..self.objects(block).len()).map(move |index| ObjectHandle { block, index })
        })
    }

    /// Total number of scene objects
    pub fn object_count(&self) -> usize {
        BlockType::OBJECT_LISTS
            .iter()
            .map(|&block| self.objects(block).len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectPayload;

    #[test]
    fn test_push_and_get() {
        let mut file = IfoFile::new();
        let first = file
            .push(BlockType::Sound, SceneObject::new(BlockType::Sound))
            .unwrap();
        let second = file
            .push(
                BlockType::Sound,
                SceneObject::new(BlockType::Sound).with_object_id(9),
            )
            .unwrap();

        assert_eq!(first.index, 0);
        assert_eq!(second.index, 1);
        assert_eq!(file.get(second).unwrap().header.object_id, 9);

        file.get_mut(first).unwrap().header.object_id = 4;
        assert_eq!(file.sounds[0].header.object_id, 4);
    }

    #[test]
    fn test_push_rejects_wrong_payload() {
        let mut file = IfoFile::new();
        let result = file.push(BlockType::Decoration, SceneObject::new(BlockType::Effect));
        assert!(matches!(
            result,
            Err(IfoError::PayloadMismatch {
                block: BlockType::Decoration,
                ..
            })
        ));

        let object = SceneObject {
            payload: ObjectPayload::None,
            ..SceneObject::default()
        };
        assert!(matches!(
            file.push(BlockType::Water, object),
            Err(IfoError::NotAnObjectList(BlockType::Water))
        ));
        assert_eq!(file.object_count(), 0);
    }

    #[test]
    fn test_handles_follow_save_order() {
        let mut file = IfoFile::new();
        file.push(BlockType::EventTrigger, SceneObject::new(BlockType::EventTrigger))
            .unwrap();
        file.push(BlockType::Decoration, SceneObject::new(BlockType::Decoration))
            .unwrap();
        file.push(BlockType::Decoration, SceneObject::new(BlockType::Decoration))
            .unwrap();

        let handles: Vec<_> = file.handles().collect();
        assert_eq!(
            handles,
            vec![
                ObjectHandle {
                    block: BlockType::Decoration,
                    index: 0
                },
                ObjectHandle {
                    block: BlockType::Decoration,
                    index: 1
                },
                ObjectHandle {
                    block: BlockType::EventTrigger,
                    index: 0
                },
            ]
        );
        assert!(
            file.get(ObjectHandle {
                block: BlockType::MapInfo,
                index: 0
            })
            .is_none()
        );
    }
}
