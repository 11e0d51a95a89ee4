//! Validation functions for IFO files
//!
//! Loading and saving never validate; these checks are for tools that want
//! to report problems before a save fails or a client misbehaves.

use log::warn;
use rose_data::string::{MAX_STRING_LEN, encode_legacy};

use crate::error::{IfoError, Result};
use crate::file::IfoFile;
use crate::types::BlockType;

/// Basic monster kinds the game spawns per point; extra entries are ignored
pub const MAX_BASIC_MONSTERS: usize = 5;

/// Validates an IFO file, returning non-fatal warnings
///
/// Problems that would make a save fail or produce a file that does not
/// read back are returned as errors.
pub fn validate_ifo_file(file: &IfoFile) -> Result<Vec<String>> {
    validate_payloads(file)?;
    validate_strings(file)?;
    validate_wide_water(file)?;

    let warnings = monster_warnings(file);
    for warning in &warnings {
        warn!("{}", warning);
    }
    Ok(warnings)
}

/// Checks that every object carries the payload its block stores
fn validate_payloads(file: &IfoFile) -> Result<()> {
    for handle in file.handles() {
        let Some(object) = file.get(handle) else {
            continue;
        };
        if !object.payload.fits(handle.block) {
            return Err(IfoError::ValidationError(format!(
                "{} holds a {} payload",
                handle,
                object.payload.kind()
            )));
        }
    }
    Ok(())
}

/// Checks that every string fits the single-byte, length-prefixed encoding
fn validate_strings(file: &IfoFile) -> Result<()> {
    check_string("map name", &file.map_info.map_name)?;
    for handle in file.handles() {
        let Some(object) = file.get(handle) else {
            continue;
        };
        let context = format!("{}", handle);
        check_string(&context, &object.header.description)?;
        for text in object.payload.strings() {
            check_string(&context, text)?;
        }
    }
    Ok(())
}

fn check_string(context: &str, text: &str) -> Result<()> {
    let bytes = encode_legacy(text)
        .map_err(|e| IfoError::ValidationError(format!("{}: {}", context, e)))?;
    if bytes.len() > MAX_STRING_LEN {
        return Err(IfoError::ValidationError(format!(
            "{}: string of {} bytes exceeds the {} byte limit",
            context,
            bytes.len(),
            MAX_STRING_LEN
        )));
    }
    Ok(())
}

fn validate_wide_water(file: &IfoFile) -> Result<()> {
    let water = &file.wide_water;
    match water.expected_cells() {
        Some(expected) if expected == water.cells.len() => Ok(()),
        _ => Err(IfoError::ValidationError(format!(
            "wide water grid is {}x{} but holds {} cells",
            water.width,
            water.height,
            water.cells.len()
        ))),
    }
}

fn monster_warnings(file: &IfoFile) -> Vec<String> {
    let mut warnings = Vec::new();
    for (index, object) in file.objects(BlockType::MonsterSpawn).iter().enumerate() {
        let Some(spawn) = object.monster_spawn() else {
            continue;
        };
        if spawn.basic.len() > MAX_BASIC_MONSTERS {
            warnings.push(format!(
                "{}[{}] '{}' has {} basic monsters, only {} are used",
                BlockType::MonsterSpawn,
                index,
                spawn.name,
                spawn.basic.len(),
                MAX_BASIC_MONSTERS
            ));
        }
        for entry in spawn.basic.iter().chain(&spawn.tactic) {
            if entry.count < 0 {
                warnings.push(format!(
                    "{}[{}] '{}' spawns a negative number of monster {}",
                    BlockType::MonsterSpawn,
                    index,
                    spawn.name,
                    entry.id
                ));
            }
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ObjectPayload, SceneObject};
    use crate::types::{MonsterEntry, MonsterSpawn};

    fn spawn_with(basic: usize) -> SceneObject {
        SceneObject {
            payload: ObjectPayload::MonsterSpawn(MonsterSpawn {
                name: "wolves".to_string(),
                basic: vec![
                    MonsterEntry {
                        description: String::new(),
                        id: 101,
                        count: 2,
                    };
                    basic
                ],
                ..MonsterSpawn::default()
            }),
            ..SceneObject::default()
        }
    }

    #[test]
    fn test_empty_file_is_valid() {
        assert!(validate_ifo_file(&IfoFile::new()).unwrap().is_empty());
    }

    #[test]
    fn test_basic_monster_warning() {
        let mut file = IfoFile::new();
        file.monster_spawns.push(spawn_with(5));
        assert!(validate_ifo_file(&file).unwrap().is_empty());

        file.monster_spawns.push(spawn_with(6));
        let warnings = validate_ifo_file(&file).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("MonsterSpawn[1]"));
    }

    #[test]
    fn test_payload_mismatch() {
        let mut file = IfoFile::new();
        file.effects.push(SceneObject::new(BlockType::Npc));
        assert!(matches!(
            validate_ifo_file(&file),
            Err(IfoError::ValidationError(_))
        ));
    }

    #[test]
    fn test_unencodable_string() {
        let mut file = IfoFile::new();
        let mut object = SceneObject::new(BlockType::Effect);
        object.payload = ObjectPayload::Effect {
            path: "3DDATA/\u{4e16}.EFT".to_string(),
        };
        file.effects.push(object);
        assert!(validate_ifo_file(&file).is_err());

        file.effects.clear();
        file.map_info.map_name = "x".repeat(256);
        assert!(validate_ifo_file(&file).is_err());
    }

    #[test]
    fn test_wide_water_mismatch() {
        let mut file = IfoFile::new();
        file.wide_water.width = 1;
        file.wide_water.height = 1;
        assert!(validate_ifo_file(&file).is_err());
    }
}
