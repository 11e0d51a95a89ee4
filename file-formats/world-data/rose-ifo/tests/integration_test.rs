//! Integration tests for the IFO reader and writer

use std::io::Cursor;

use glam::{IVec2, Mat4, Quat, Vec3};
use pretty_assertions::assert_eq;
use rose_ifo::{
    BlockType, IfoFile, IfoParser, MapInfo, MonsterEntry, MonsterSpawn, ObjectPayload,
    ObjectType, SceneObject, WaterPlane, WideWaterCell, read_block_table,
};

fn write(file: &IfoFile) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    IfoParser::new().write(&mut cursor, file).unwrap();
    cursor.into_inner()
}

fn parse(bytes: &[u8]) -> IfoFile {
    IfoParser::new().parse(&mut Cursor::new(bytes)).unwrap()
}

fn i32_at(bytes: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

fn f32_at(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

fn block_offset(bytes: &[u8], block: BlockType) -> usize {
    i32_at(bytes, 4 + block.raw() as usize * 8 + 4) as usize
}

fn monster_spawn() -> SceneObject {
    let mut object = SceneObject::new(BlockType::MonsterSpawn);
    object.header.object_type = ObjectType::Monster;
    object.payload = ObjectPayload::MonsterSpawn(MonsterSpawn {
        name: "ghosts".to_string(),
        basic: vec![
            MonsterEntry {
                description: "a".to_string(),
                id: 301,
                count: 3,
            },
            MonsterEntry {
                description: "b".to_string(),
                id: 302,
                count: 1,
            },
        ],
        tactic: Vec::new(),
        interval: 60,
        limit: 10,
        range: 15,
        tactic_points: 100,
    });
    object
}

/// A file with every block populated
fn populated() -> IfoFile {
    let mut file = IfoFile::new();
    file.map_info = MapInfo {
        width: 16,
        height: 16,
        map_cell_x: 30,
        map_cell_y: 31,
        world: Mat4::from_translation(Vec3::new(5200.0, 5200.0, 0.0)),
        map_name: "Canyon City of Zant".to_string(),
    };

    let mut decoration = SceneObject::new(BlockType::Decoration)
        .with_object_id(5)
        .with_position(Vec3::new(100.0, 200.0, 3.0));
    decoration.header.description = "tree".to_string();
    decoration.header.map_position = IVec2::new(30, 31);
    decoration.header.rotation = Quat::from_xyzw(0.0, 0.0, 0.5, 0.5);
    decoration.header.scale = Vec3::new(1.0, 1.0, 2.0);
    file.decorations.push(decoration);

    let mut npc = SceneObject::new(BlockType::Npc).with_object_id(1001);
    npc.payload = ObjectPayload::Npc {
        ai_pattern_index: 7,
        path: "3DDATA/QUESTDATA/TUTORIAL.CON".to_string(),
    };
    file.npcs.push(npc);

    file.constructions
        .push(SceneObject::new(BlockType::Construction).with_object_id(2));

    let mut sound = SceneObject::new(BlockType::Sound);
    sound.payload = ObjectPayload::Sound {
        path: "SOUND/WIND.WAV".to_string(),
        range: 40,
        interval: 12,
    };
    file.sounds.push(sound);

    let mut effect = SceneObject::new(BlockType::Effect);
    effect.payload = ObjectPayload::Effect {
        path: "3DDATA/EFFECT/FIRE.EFT".to_string(),
    };
    file.effects.push(effect);

    file.animations
        .push(SceneObject::new(BlockType::Animation).with_object_id(3));

    file.wide_water.width = 2;
    file.wide_water.height = 1;
    file.wide_water.cells = vec![
        WideWaterCell {
            used: 1,
            height: 2.5,
            water_type: 1,
            water_index: 4,
            reserved: 0,
        },
        WideWaterCell::default(),
    ];

    file.monster_spawns.push(monster_spawn());

    file.water.unused = 1.0;
    file.water.planes.push(WaterPlane {
        minimum: Vec3::new(10.0, 20.0, 3.0),
        maximum: Vec3::new(12.0, 22.0, 5.0),
    });

    let mut warp = SceneObject::new(BlockType::WarpGate);
    warp.header.warp_id = 12;
    file.warp_gates.push(warp);

    file.collisions
        .push(SceneObject::new(BlockType::Collision).with_object_id(8));

    let mut trigger = SceneObject::new(BlockType::EventTrigger);
    trigger.header.event_id = 4;
    trigger.payload = ObjectPayload::EventTrigger {
        qsd_trigger: "Q0042".to_string(),
        lua_trigger: "OnEnter".to_string(),
    };
    file.event_triggers.push(trigger);

    file
}

#[test]
fn test_full_roundtrip() {
    let file = populated();
    let loaded = parse(&write(&file));
    assert_eq!(loaded, file);
    assert_eq!(loaded.object_count(), 10);
}

#[test]
fn test_decoration_position() {
    let mut file = IfoFile::new();
    file.decorations.push(
        SceneObject::new(BlockType::Decoration)
            .with_object_id(5)
            .with_position(Vec3::new(100.0, 200.0, 3.0)),
    );

    let loaded = parse(&write(&file));
    let decoration = &loaded.decorations[0];
    assert_eq!(decoration.header.object_id, 5);
    assert!(
        decoration
            .header
            .position
            .abs_diff_eq(Vec3::new(100.0, 200.0, 3.0), 1e-3)
    );
}

#[test]
fn test_offset_table_points_at_blocks() {
    let file = populated();
    let bytes = write(&file);

    assert_eq!(i32_at(&bytes, 0), 13);
    let table = read_block_table(&mut Cursor::new(&bytes)).unwrap();
    assert_eq!(table.len(), 13);
    for (index, entry) in table.iter().enumerate() {
        assert_eq!(entry.block_type, index as i32);
    }

    assert_eq!(i32_at(&bytes, block_offset(&bytes, BlockType::MapInfo)), 16);
    assert_eq!(i32_at(&bytes, block_offset(&bytes, BlockType::WideWater)), 2);
    assert_eq!(f32_at(&bytes, block_offset(&bytes, BlockType::Water)), 1.0);
    for block in BlockType::OBJECT_LISTS {
        assert_eq!(i32_at(&bytes, block_offset(&bytes, block)), 1, "{}", block);
    }
}

#[test]
fn test_offset_table_with_empty_blocks() {
    let mut file = IfoFile::new();
    file.map_info.width = 16;
    file.sounds.push(SceneObject::new(BlockType::Sound));
    let bytes = write(&file);

    assert_eq!(i32_at(&bytes, block_offset(&bytes, BlockType::MapInfo)), 16);
    for block in BlockType::OBJECT_LISTS {
        let expected = if block == BlockType::Sound { 1 } else { 0 };
        assert_eq!(i32_at(&bytes, block_offset(&bytes, block)), expected, "{}", block);
    }
    assert_eq!(i32_at(&bytes, block_offset(&bytes, BlockType::WideWater)), 0);
    assert_eq!(i32_at(&bytes, block_offset(&bytes, BlockType::Water) + 4), 0);
}

#[test]
fn test_monster_spawn_layout() {
    let mut file = IfoFile::new();
    file.monster_spawns.push(monster_spawn());
    let bytes = write(&file);

    // count, 61-byte header with an empty description, then "ghosts"
    let offset = block_offset(&bytes, BlockType::MonsterSpawn);
    assert_eq!(i32_at(&bytes, offset), 1);
    assert_eq!(bytes[offset + 65], 6);
    assert_eq!(&bytes[offset + 66..offset + 72], b"ghosts");
    assert_eq!(i32_at(&bytes, offset + 72), 2);
    assert_eq!(&bytes[offset + 76..offset + 78], b"\x01a");
    assert_eq!(i32_at(&bytes, offset + 78), 301);
    assert_eq!(&bytes[offset + 86..offset + 88], b"\x01b");
    assert_eq!(i32_at(&bytes, offset + 96), 0);
    assert_eq!(i32_at(&bytes, offset + 100), 60);
    assert_eq!(i32_at(&bytes, offset + 112), 100);
    assert_eq!(bytes.len(), offset + 116 + 20);

    let loaded = parse(&bytes);
    let spawn = loaded.monster_spawns[0].monster_spawn().unwrap();
    let ids: Vec<i32> = spawn.basic.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![301, 302]);
    assert!(spawn.tactic.is_empty());
}

#[test]
fn test_water_stored_x_z_y() {
    let mut file = IfoFile::new();
    file.water.planes.push(WaterPlane {
        minimum: Vec3::new(10.0, 20.0, 3.0),
        maximum: Vec3::new(12.0, 22.0, 5.0),
    });
    let bytes = write(&file);

    let offset = block_offset(&bytes, BlockType::Water) + 8;
    let stored: Vec<f32> = (0..6).map(|i| f32_at(&bytes, offset + i * 4)).collect();
    assert_eq!(
        stored,
        vec![-519_000.0, 300.0, -518_000.0, -518_800.0, 500.0, -517_800.0]
    );
}

#[test]
fn test_blocks_out_of_order() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&3i32.to_le_bytes());
    for (tag, offset) in [(9, 28), (0, 60), (42, 0)] {
        bytes.extend_from_slice(&i32::to_le_bytes(tag));
        bytes.extend_from_slice(&i32::to_le_bytes(offset));
    }

    // Water at 28
    for value in [1.5f32, 0.0, -519_000.0, 300.0, -518_000.0, -518_800.0, 500.0, -517_800.0] {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes[32..36].copy_from_slice(&1i32.to_le_bytes());

    // MapInfo at 60
    assert_eq!(bytes.len(), 60);
    for value in [16i32, 16, 30, 31] {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    for value in Mat4::IDENTITY.to_cols_array() {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes.extend_from_slice(b"\x03JPT");

    let file = parse(&bytes);
    assert_eq!(file.map_info.map_cell_y, 31);
    assert_eq!(file.map_info.map_name, "JPT");
    assert_eq!(file.water.unused, 1.5);
    assert_eq!(
        file.water.planes,
        vec![WaterPlane {
            minimum: Vec3::new(10.0, 20.0, 3.0),
            maximum: Vec3::new(12.0, 22.0, 5.0),
        }]
    );

    // Blocks missing from the table decode as empty
    assert_eq!(file.object_count(), 0);
    assert!(file.wide_water.cells.is_empty());
}

#[test]
fn test_repeated_list_block_appends() {
    let mut file = IfoFile::new();
    file.decorations
        .push(SceneObject::new(BlockType::Decoration).with_object_id(5));
    let mut bytes = write(&file);

    let offset = block_offset(&bytes, BlockType::Decoration) as i32;
    bytes[0..4].copy_from_slice(&2i32.to_le_bytes());
    for slot in 0..2 {
        let at = 4 + slot * 8;
        bytes[at..at + 4].copy_from_slice(&1i32.to_le_bytes());
        bytes[at + 4..at + 8].copy_from_slice(&offset.to_le_bytes());
    }

    let loaded = parse(&bytes);
    assert_eq!(loaded.decorations.len(), 2);
    assert_eq!(loaded.decorations[1].header.object_id, 5);
}

#[test]
fn test_truncated_file() {
    let mut bytes = write(&populated());
    bytes.truncate(bytes.len() - 3);

    assert!(matches!(
        IfoParser::new().parse(&mut Cursor::new(bytes)),
        Err(rose_ifo::IfoError::Data(rose_data::Error::StreamTruncated))
    ));
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("31_30.ifo");

    let file = populated();
    file.save(&path).unwrap();
    assert_eq!(IfoFile::load(&path).unwrap(), file);
}
