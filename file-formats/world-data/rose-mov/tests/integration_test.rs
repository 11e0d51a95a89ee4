//! Integration tests for the MOV reader and writer

use std::io::Cursor;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rose_mov::{MovError, MovParser, Walkability};

fn checkerboard() -> Walkability {
    let mut grid = Walkability::default();
    for y in 0..32 {
        for x in 0..32 {
            grid.set_cell(x, y, ((x + y) % 2) as u8);
        }
    }
    grid
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("31_30.mov");

    let grid = checkerboard();
    grid.save(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 8 + 32 * 32);
    assert_eq!(&bytes[..8], &[32, 0, 0, 0, 32, 0, 0, 0]);

    let loaded = Walkability::load(&path).unwrap();
    assert_eq!(loaded, grid);
    assert_eq!(loaded.walkable_count(), 512);
}

#[test]
fn test_truncated_file() {
    let mut bytes = Vec::new();
    MovParser::new().write(&mut bytes, &checkerboard()).unwrap();
    bytes.truncate(100);

    let err = MovParser::new()
        .parse(&mut Cursor::new(bytes))
        .unwrap_err();
    assert!(matches!(
        err,
        MovError::Data(rose_data::Error::StreamTruncated)
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Walkability::load(dir.path().join("absent.mov")),
        Err(MovError::Io(_))
    ));
}

#[test]
fn test_rejected_save_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("31_30.mov");
    checkerboard().save(&path).unwrap();
    let original = std::fs::read(&path).unwrap();

    assert!(matches!(
        Walkability::new(16, 16).save(&path),
        Err(MovError::GridTooSmall { .. })
    ));
    assert_eq!(std::fs::read(&path).unwrap(), original);
}

proptest! {
    #[test]
    fn prop_random_grid_roundtrip(cells in proptest::collection::vec(any::<u8>(), 32 * 32)) {
        let grid = Walkability::from_cells(32, 32, cells).unwrap();

        let mut bytes = Vec::new();
        MovParser::new().write(&mut bytes, &grid).unwrap();
        let back = MovParser::new().parse(&mut Cursor::new(bytes)).unwrap();

        prop_assert_eq!(back, grid);
    }
}
