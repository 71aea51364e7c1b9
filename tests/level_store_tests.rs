//! Level store decoding against hand-built level images.

use fruitland::core::level::{decode_bcd_time, time_budget, LEVEL_RECORD_LEN};
use fruitland::core::{Corruption, LevelError, LevelRecord, LevelStore, SimConfig, WorldState};
use fruitland::types::{GridPos, Tile, GRID_CELLS};

use proptest::prelude::*;

fn image(records: &[LevelRecord]) -> LevelStore {
    LevelStore::from_bytes(LevelRecord::encode_all(records), records.len() as u8)
}

#[test]
fn decodes_time_start_and_tiles() {
    let rec = LevelRecord::from_map(150, &["..P", "#oF"]);
    let level = image(&[rec]).load_level(1).unwrap();

    assert_eq!(level.time, 225);
    assert_eq!(level.start, GridPos::new(2, 0));
    assert_eq!(level.grid.get(GridPos::new(2, 0)), Some(Tile::PlayerStart));
    assert_eq!(level.grid.get(GridPos::new(0, 1)), Some(Tile::Wall));
    assert_eq!(level.grid.get(GridPos::new(1, 1)), Some(Tile::Rock));
    assert_eq!(level.grid.get(GridPos::new(2, 1)), Some(Tile::Fruit));
}

#[test]
fn start_cell_is_tagged_then_cleared_on_spawn() {
    let mut tiles = [0u8; GRID_CELLS];
    tiles[GridPos::new(3, 3).index().unwrap()] = Tile::Fruit.code();
    let mut rec = LevelRecord::new(0, GridPos::new(7, 5), tiles);
    rec.time_bcd = [0x01, 0x50];
    let level = image(&[rec]).load_level(1).unwrap();

    assert_eq!(level.time, 225);
    assert_eq!(level.start, GridPos::new(7, 5));
    assert_eq!(level.grid.get(level.start), Some(Tile::PlayerStart));

    let mut world = WorldState::new(SimConfig::standard());
    world.load_level(1, level, 0);
    assert_eq!(world.grid.get(GridPos::new(7, 5)), Some(Tile::Empty));
    assert_eq!(world.objects.player().cell, GridPos::new(7, 5));
    assert_eq!(world.counters.fruit, 1);
}

#[test]
fn later_levels_are_read_at_their_offset() {
    let store = image(&[
        LevelRecord::from_map(10, &["P"]),
        LevelRecord::from_map(20, &[".P"]),
        LevelRecord::from_map(30, &["..P"]),
    ]);
    let third = store.load_level(3).unwrap();
    assert_eq!(third.time, 45);
    assert_eq!(third.start, GridPos::new(2, 0));
}

#[test]
fn index_outside_range_is_rejected() {
    let store = image(&[LevelRecord::from_map(10, &["P"])]);
    assert!(matches!(
        store.load_level(0),
        Err(LevelError::InvalidLevelIndex { index: 0, count: 1 })
    ));
    assert!(matches!(
        store.load_level(2),
        Err(LevelError::InvalidLevelIndex { index: 2, count: 1 })
    ));
}

#[test]
fn short_image_is_corrupt() {
    let bytes = LevelRecord::from_map(10, &["P"]).encode();
    let store = LevelStore::from_bytes(bytes[..LEVEL_RECORD_LEN - 1].to_vec(), 1);
    match store.load_level(1) {
        Err(LevelError::CorruptLevelData {
            index: 1,
            detail: Corruption::Truncated { needed, available },
        }) => {
            assert_eq!(needed, LEVEL_RECORD_LEN);
            assert_eq!(available, LEVEL_RECORD_LEN - 1);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn start_outside_grid_is_corrupt() {
    let mut bytes = LevelRecord::from_map(10, &["P"]).encode();
    bytes[2] = 11;
    let store = LevelStore::from_bytes(bytes.to_vec(), 1);
    assert!(matches!(
        store.load_level(1),
        Err(LevelError::CorruptLevelData {
            detail: Corruption::StartOutOfBounds { col: 0, row: 11 },
            ..
        })
    ));
}

#[test]
fn stored_reservation_codes_are_cleared() {
    let mut tiles = [0u8; GRID_CELLS];
    tiles[5] = 80;
    tiles[6] = 81;
    tiles[7] = 255;
    let store = image(&[LevelRecord::new(10, GridPos::new(0, 0), tiles)]);
    let level = store.load_level(1).unwrap();
    for i in 5..8 {
        assert_eq!(level.grid.at(i), Tile::Empty);
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = LevelStore::open("/nonexistent/fruitland/levels.dat", 25).unwrap_err();
    assert!(matches!(err, LevelError::Io(_)));
}

#[test]
fn demo_levels_all_decode() {
    let store = LevelStore::demo();
    assert!(store.count() > 0);
    for index in 1..=store.count() {
        let level = store.load_level(index).unwrap();
        assert!(level.grid.count(Tile::Fruit) > 0, "level {index} has no fruit");
    }
}

proptest! {
    #[test]
    fn bcd_budget_is_one_and_a_half_times_decimal(seconds in 0u16..=9999) {
        let [b0, b1] = fruitland::core::level::encode_bcd_time(seconds);
        let base = decode_bcd_time(b0, b1);
        prop_assert_eq!(base, seconds as u32);
        prop_assert_eq!(time_budget(b0, b1), base + base / 2);
    }

    #[test]
    fn bcd_digits_weigh_by_position(d in proptest::array::uniform4(0u8..10)) {
        let b0 = (d[0] << 4) | d[1];
        let b1 = (d[2] << 4) | d[3];
        let expected = d[0] as u32 * 1000 + d[1] as u32 * 100 + d[2] as u32 * 10 + d[3] as u32;
        prop_assert_eq!(decode_bcd_time(b0, b1), expected);
    }
}
