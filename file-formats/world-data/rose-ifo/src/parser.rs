//! Parser implementation for IFO files
//!
//! An IFO file starts with a block count and an offset table of
//! `(block type, offset)` pairs. Offsets are absolute, so blocks may appear
//! in any physical order. Files written here always hold all thirteen
//! blocks, laid out in [`BlockType::ALL`] order.

use std::io::{Read, Seek, SeekFrom, Write};

use log::{debug, trace, warn};
use rose_data::prelude::*;

use crate::error::{IfoError, Result};
use crate::file::IfoFile;
use crate::object::{ObjectHeader, ObjectPayload, SceneObject};
use crate::types::{
    BLOCK_COUNT, BlockType, MapInfo, MonsterEntry, MonsterSpawn, ObjectType, WaterBlock,
    WaterPlane, WideWaterBlock, WideWaterCell,
};

/// Size of the block count and offset table written on save
pub const HEADER_SIZE: usize = 4 + BLOCK_COUNT * 8;

/// One entry of the offset table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockEntry {
    /// Raw block tag
    pub block_type: i32,
    /// Absolute offset of the block data
    pub offset: i32,
}

impl BlockEntry {
    /// The block kind, or `None` for an unknown tag
    pub fn kind(&self) -> Option<BlockType> {
        BlockType::from_raw(self.block_type)
    }
}

/// Reads the block count and offset table from the start of an IFO file
pub fn read_block_table<R: Read>(reader: &mut R) -> Result<Vec<BlockEntry>> {
    let count = read_count(reader, "block")?;
    let mut entries = Vec::with_capacity(count.min(BLOCK_COUNT * 2));
    for _ in 0..count {
        let block_type = reader.read_i32_le()?;
        let offset = reader.read_i32_le()?;
        entries.push(BlockEntry { block_type, offset });
    }
    Ok(entries)
}

/// Parser for IFO scene files
///
/// # Examples
///
/// ```rust,no_run
/// use std::fs::File;
/// use std::io::BufReader;
/// use rose_ifo::IfoParser;
///
/// let mut reader = BufReader::new(File::open("30_30.ifo")?);
/// let ifo = IfoParser::new().parse(&mut reader)?;
/// println!("{} decorations", ifo.decorations.len());
/// # Ok::<(), rose_ifo::IfoError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IfoParser;

impl IfoParser {
    /// Creates a new IFO parser
    pub fn new() -> Self {
        Self
    }

    /// Parses an IFO file
    ///
    /// Blocks missing from the offset table decode as empty. Unknown block
    /// tags are skipped. A list block listed more than once has its objects
    /// appended in table order.
    pub fn parse<R: Read + Seek>(&self, reader: &mut R) -> Result<IfoFile> {
        let table = read_block_table(reader)?;
        debug!("Reading IFO with {} blocks", table.len());

        let mut file = IfoFile::new();
        for entry in table {
            let Some(block) = entry.kind() else {
                warn!(
                    "Skipping unknown IFO block {} at offset {}",
                    entry.block_type, entry.offset
                );
                continue;
            };
            let offset = u64::try_from(entry.offset).map_err(|_| IfoError::InvalidOffset {
                block: entry.block_type,
                offset: entry.offset,
            })?;

            reader.seek(SeekFrom::Start(offset))?;
            read_block(reader, block, &mut file)?;
        }

        Ok(file)
    }

    /// Writes an IFO file
    ///
    /// The offset table is reserved first and filled in once every block has
    /// been written. The writer is left positioned after the last block.
    pub fn write<W: Write + Seek>(&self, writer: &mut W, file: &IfoFile) -> Result<()> {
        let start = writer.stream_position()?;
        writer.write_i32_le(BLOCK_COUNT as i32)?;
        writer.write_all(&[0; HEADER_SIZE - 4])?;

        let mut offsets = [0i32; BLOCK_COUNT];
        for (slot, block) in offsets.iter_mut().zip(BlockType::ALL) {
            let position = writer.stream_position()? - start;
            *slot = i32::try_from(position).map_err(|_| IfoError::OffsetOverflow(position))?;
            write_block(writer, block, file)?;
        }

        let end = writer.stream_position()?;
        writer.seek(SeekFrom::Start(start + 4))?;
        for (block, offset) in BlockType::ALL.into_iter().zip(offsets) {
            writer.write_i32_le(block.raw())?;
            writer.write_i32_le(offset)?;
        }
        writer.seek(SeekFrom::Start(end))?;

        debug!("Wrote IFO with {} objects, {} bytes", file.object_count(), end - start);
        Ok(())
    }
}

fn read_count<R: Read>(reader: &mut R, what: &'static str) -> Result<usize> {
    let count = reader.read_i32_le()?;
    usize::try_from(count).map_err(|_| IfoError::InvalidCount { what, count })
}

fn write_count<W: Write>(writer: &mut W, what: &'static str, len: usize) -> Result<()> {
    let count = i32::try_from(len)
        .map_err(|_| IfoError::ValidationError(format!("too many {} entries: {}", what, len)))?;
    writer.write_i32_le(count)?;
    Ok(())
}

fn read_block<R: Read>(reader: &mut R, block: BlockType, file: &mut IfoFile) -> Result<()> {
    match block {
        BlockType::MapInfo => file.map_info = read_map_info(reader)?,
        BlockType::WideWater => file.wide_water = read_wide_water(reader)?,
        BlockType::Water => file.water = read_water(reader)?,
        _ => {
            let objects = read_objects(reader, block)?;
            debug!("Read {} {} objects", objects.len(), block);
            if let Some(list) = file.objects_mut(block) {
                list.extend(objects);
            }
        }
    }
    Ok(())
}

fn write_block<W: Write>(writer: &mut W, block: BlockType, file: &IfoFile) -> Result<()> {
    match block {
        BlockType::MapInfo => write_map_info(writer, &file.map_info),
        BlockType::WideWater => write_wide_water(writer, &file.wide_water),
        BlockType::Water => write_water(writer, &file.water),
        _ => write_objects(writer, block, file.objects(block)),
    }
}

fn read_map_info<R: Read>(reader: &mut R) -> Result<MapInfo> {
    Ok(MapInfo {
        width: reader.read_i32_le()?,
        height: reader.read_i32_le()?,
        map_cell_x: reader.read_i32_le()?,
        map_cell_y: reader.read_i32_le()?,
        world: read_mat4(reader)?,
        map_name: read_string(reader)?,
    })
}

fn write_map_info<W: Write>(writer: &mut W, info: &MapInfo) -> Result<()> {
    writer.write_i32_le(info.width)?;
    writer.write_i32_le(info.height)?;
    writer.write_i32_le(info.map_cell_x)?;
    writer.write_i32_le(info.map_cell_y)?;
    write_mat4(writer, &info.world)?;
    write_string(writer, &info.map_name)?;
    Ok(())
}

fn read_wide_water<R: Read>(reader: &mut R) -> Result<WideWaterBlock> {
    let width = reader.read_i32_le()?;
    let height = reader.read_i32_le()?;
    let mut water = WideWaterBlock {
        width,
        height,
        cells: Vec::new(),
    };
    let count = water.expected_cells().ok_or(IfoError::InvalidCount {
        what: "wide water cell",
        count: width.min(height),
    })?;

    water.cells.reserve(count.min(64 * 64));
    for _ in 0..count {
        water.cells.push(WideWaterCell {
            used: reader.read_u8()?,
            height: reader.read_f32_le()?,
            water_type: reader.read_i32_le()?,
            water_index: reader.read_i32_le()?,
            reserved: reader.read_i32_le()?,
        });
    }
    Ok(water)
}

fn write_wide_water<W: Write>(writer: &mut W, water: &WideWaterBlock) -> Result<()> {
    if water.expected_cells() != Some(water.cells.len()) {
        return Err(IfoError::ValidationError(format!(
            "wide water grid is {}x{} but holds {} cells",
            water.width,
            water.height,
            water.cells.len()
        )));
    }

    writer.write_i32_le(water.width)?;
    writer.write_i32_le(water.height)?;
    for cell in &water.cells {
        writer.write_u8(cell.used)?;
        writer.write_f32_le(cell.height)?;
        writer.write_i32_le(cell.water_type)?;
        writer.write_i32_le(cell.water_index)?;
        writer.write_i32_le(cell.reserved)?;
    }
    Ok(())
}

fn read_water<R: Read>(reader: &mut R) -> Result<WaterBlock> {
    let unused = reader.read_f32_le()?;
    let count = read_count(reader, "water plane")?;
    let mut planes = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        let minimum = read_water_position(reader)?;
        let maximum = read_water_position(reader)?;
        planes.push(WaterPlane { minimum, maximum });
    }
    debug!("Read {} water planes", planes.len());
    Ok(WaterBlock { unused, planes })
}

fn write_water<W: Write>(writer: &mut W, water: &WaterBlock) -> Result<()> {
    writer.write_f32_le(water.unused)?;
    write_count(writer, "water plane", water.planes.len())?;
    for plane in &water.planes {
        write_water_position(writer, plane.minimum)?;
        write_water_position(writer, plane.maximum)?;
    }
    Ok(())
}

fn read_objects<R: Read>(reader: &mut R, block: BlockType) -> Result<Vec<SceneObject>> {
    let count = read_count(reader, "object")?;
    let mut objects = Vec::with_capacity(count.min(1024));
    for index in 0..count {
        let header = read_header(reader)?;
        let payload = read_payload(reader, block)?;
        trace!("{}[{}]: object {}", block, index, header.object_id);
        objects.push(SceneObject { header, payload });
    }
    Ok(objects)
}

fn write_objects<W: Write>(writer: &mut W, block: BlockType, objects: &[SceneObject]) -> Result<()> {
    write_count(writer, "object", objects.len())?;
    for object in objects {
        if !object.payload.fits(block) {
            return Err(IfoError::PayloadMismatch {
                block,
                payload: object.payload.kind(),
            });
        }
        write_header(writer, &object.header)?;
        write_payload(writer, &object.payload)?;
    }
    Ok(())
}

fn read_header<R: Read>(reader: &mut R) -> Result<ObjectHeader> {
    Ok(ObjectHeader {
        description: read_string(reader)?,
        warp_id: reader.read_i16_le()?,
        event_id: reader.read_i16_le()?,
        object_type: ObjectType::from_raw(reader.read_i32_le()?),
        object_id: reader.read_i32_le()?,
        map_position: read_ivec2(reader)?,
        rotation: read_quat(reader)?,
        position: read_position(reader)?,
        scale: read_vec3(reader)?,
    })
}

fn write_header<W: Write>(writer: &mut W, header: &ObjectHeader) -> Result<()> {
    write_string(writer, &header.description)?;
    writer.write_i16_le(header.warp_id)?;
    writer.write_i16_le(header.event_id)?;
    writer.write_i32_le(header.object_type.raw())?;
    writer.write_i32_le(header.object_id)?;
    write_ivec2(writer, header.map_position)?;
    write_quat(writer, header.rotation)?;
    write_position(writer, header.position)?;
    write_vec3(writer, header.scale)?;
    Ok(())
}

fn read_payload<R: Read>(reader: &mut R, block: BlockType) -> Result<ObjectPayload> {
    let payload = match block {
        BlockType::Npc => ObjectPayload::Npc {
            ai_pattern_index: reader.read_i32_le()?,
            path: read_string(reader)?,
        },
        BlockType::Sound => ObjectPayload::Sound {
            path: read_string(reader)?,
            range: reader.read_i32_le()?,
            interval: reader.read_i32_le()?,
        },
        BlockType::Effect => ObjectPayload::Effect {
            path: read_string(reader)?,
        },
        BlockType::MonsterSpawn => ObjectPayload::MonsterSpawn(read_monster_spawn(reader)?),
        BlockType::EventTrigger => ObjectPayload::EventTrigger {
            qsd_trigger: read_string(reader)?,
            lua_trigger: read_string(reader)?,
        },
        _ => ObjectPayload::None,
    };
    Ok(payload)
}

fn write_payload<W: Write>(writer: &mut W, payload: &ObjectPayload) -> Result<()> {
    match payload {
        ObjectPayload::None => {}
        ObjectPayload::Npc {
            ai_pattern_index,
            path,
        } => {
            writer.write_i32_le(*ai_pattern_index)?;
            write_string(writer, path)?;
        }
        ObjectPayload::Sound {
            path,
            range,
            interval,
        } => {
            write_string(writer, path)?;
            writer.write_i32_le(*range)?;
            writer.write_i32_le(*interval)?;
        }
        ObjectPayload::Effect { path } => write_string(writer, path)?,
        ObjectPayload::MonsterSpawn(spawn) => write_monster_spawn(writer, spawn)?,
        ObjectPayload::EventTrigger {
            qsd_trigger,
            lua_trigger,
        } => {
            write_string(writer, qsd_trigger)?;
            write_string(writer, lua_trigger)?;
        }
    }
    Ok(())
}

fn read_monster_spawn<R: Read>(reader: &mut R) -> Result<MonsterSpawn> {
    let name = read_string(reader)?;
    let basic = read_monster_entries(reader)?;
    let tactic = read_monster_entries(reader)?;
    Ok(MonsterSpawn {
        name,
        basic,
        tactic,
        interval: reader.read_i32_le()?,
        limit: reader.read_i32_le()?,
        range: reader.read_i32_le()?,
        tactic_points: reader.read_i32_le()?,
    })
}

fn write_monster_spawn<W: Write>(writer: &mut W, spawn: &MonsterSpawn) -> Result<()> {
    write_string(writer, &spawn.name)?;
    write_monster_entries(writer, &spawn.basic)?;
    write_monster_entries(writer, &spawn.tactic)?;
    writer.write_i32_le(spawn.interval)?;
    writer.write_i32_le(spawn.limit)?;
    writer.write_i32_le(spawn.range)?;
    writer.write_i32_le(spawn.tactic_points)?;
    Ok(())
}

fn read_monster_entries<R: Read>(reader: &mut R) -> Result<Vec<MonsterEntry>> {
    let count = read_count(reader, "monster")?;
    let mut entries = Vec::with_capacity(count.min(64));
    for _ in 0..count {
        entries.push(MonsterEntry {
            description: read_string(reader)?,
            id: reader.read_i32_le()?,
            count: reader.read_i32_le()?,
        });
    }
    Ok(entries)
}

fn write_monster_entries<W: Write>(writer: &mut W, entries: &[MonsterEntry]) -> Result<()> {
    write_count(writer, "monster", entries.len())?;
    for entry in entries {
        write_string(writer, &entry.description)?;
        writer.write_i32_le(entry.id)?;
        writer.write_i32_le(entry.count)?;
    }
    Ok(())
}
