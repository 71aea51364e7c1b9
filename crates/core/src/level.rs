//! Level store - decodes fixed-size level records
//!
//! # Record Layout
//!
//! Each level is a 169-byte block:
//!
//! | Offset | Meaning |
//! |--------|---------|
//! | 0..2 | level time, packed BCD (`0x01 0x50` is 150 seconds) |
//! | 2 | player start row |
//! | 3 | player start column |
//! | 4..169 | 165 tile codes, row-major |
//!
//! The decoded time budget is the BCD value plus 50%.

use std::path::Path;

use thiserror::Error;

use crate::grid::Grid;
use crate::reservation::ReservationKind;
use crate::types::{GridPos, Tile, GRID_CELLS, GRID_HEIGHT, GRID_WIDTH};

/// Size of one level record in bytes
pub const LEVEL_RECORD_LEN: usize = 4 + GRID_CELLS;

/// Legacy enemy code folded into [`Tile::EnemyHorizontal`] on load
const LEGACY_ENEMY_CODE: u8 = 15;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {index} is outside the configured range 1..={count}")]
    InvalidLevelIndex { index: u8, count: u8 },
    #[error("level {index} is corrupt: {detail}")]
    CorruptLevelData { index: u8, detail: Corruption },
    #[error("failed to read level data")]
    Io(#[from] std::io::Error),
}

/// What is wrong with a corrupt record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Corruption {
    #[error("needed {needed} bytes but only {available} are available")]
    Truncated { needed: usize, available: usize },
    #[error("player start column {col}, row {row} is outside the grid")]
    StartOutOfBounds { col: u8, row: u8 },
}

/// A decoded level, ready to be loaded into the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelData {
    /// Tile grid with the player start cell tagged [`Tile::PlayerStart`]
    pub grid: Grid,
    /// Time budget in seconds, bonus included
    pub time: u32,
    pub start: GridPos,
}

/// Decode the packed BCD time field (without the bonus).
pub fn decode_bcd_time(b0: u8, b1: u8) -> u32 {
    let lo = (b1 & 0x0F) as u32 + ((b1 & 0xF0) >> 4) as u32 * 10;
    let hi = (b0 & 0x0F) as u32 * 100 + ((b0 & 0xF0) >> 4) as u32 * 1000;
    lo + hi
}

/// Time budget for a level: BCD time plus a 50% bonus, truncated.
pub fn time_budget(b0: u8, b1: u8) -> u32 {
    let base = decode_bcd_time(b0, b1);
    base + base / 2
}

/// Pack seconds (0..=9999) into two BCD bytes.
pub fn encode_bcd_time(seconds: u16) -> [u8; 2] {
    let s = seconds.min(9999);
    let d = [s / 1000, (s / 100) % 10, (s / 10) % 10, s % 10];
    [((d[0] << 4) | d[1]) as u8, ((d[2] << 4) | d[3]) as u8]
}

/// One raw level record, used to build level sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRecord {
    pub time_bcd: [u8; 2],
    pub start: GridPos,
    pub tiles: [u8; GRID_CELLS],
}

impl LevelRecord {
    pub fn new(seconds: u16, start: GridPos, tiles: [u8; GRID_CELLS]) -> Self {
        Self {
            time_bcd: encode_bcd_time(seconds),
            start,
            tiles,
        }
    }

    /// Build a record from an ASCII map, one string per row.
    ///
    /// | char | tile |
    /// |------|------|
    /// | `#` | wall |
    /// | `.` | pellet |
    /// | `o` | rock |
    /// | `F` | fruit |
    /// | `$` | bonus |
    /// | `T` | teleporter |
    /// | `+` | time bonus |
    /// | `S` | screen flip |
    /// | `L` | extra life |
    /// | `Z` | freeze enemies |
    /// | `K` | pushable block |
    /// | `X` | death trap |
    /// | `V` / `H` | vertical / horizontal enemy |
    /// | `P` | player start |
    ///
    /// Any other char is empty; short rows are padded with empty cells.
    pub fn from_map(seconds: u16, rows: &[&str]) -> Self {
        let mut tiles = [0u8; GRID_CELLS];
        let mut start = GridPos::new(0, 0);
        for (y, row) in rows.iter().take(GRID_HEIGHT as usize).enumerate() {
            for (x, ch) in row.chars().take(GRID_WIDTH as usize).enumerate() {
                let code = match ch {
                    '#' => 2,
                    '.' => 1,
                    'o' => 3,
                    'F' => 4,
                    '$' => 5,
                    'T' => 6,
                    '+' => 7,
                    'S' => 8,
                    'L' => 9,
                    'Z' => 10,
                    'K' => 11,
                    'X' => 12,
                    'V' => 13,
                    'H' => 14,
                    'P' => {
                        start = GridPos::new(x as i8, y as i8);
                        0
                    }
                    _ => 0,
                };
                tiles[y * GRID_WIDTH as usize + x] = code;
            }
        }
        Self::new(seconds, start, tiles)
    }

    /// Serialize in the on-disk layout.
    pub fn encode(&self) -> [u8; LEVEL_RECORD_LEN] {
        let mut out = [0u8; LEVEL_RECORD_LEN];
        out[0] = self.time_bcd[0];
        out[1] = self.time_bcd[1];
        out[2] = self.start.y as u8;
        out[3] = self.start.x as u8;
        out[4..].copy_from_slice(&self.tiles);
        out
    }

    /// Concatenate records into a level file image.
    pub fn encode_all(records: &[LevelRecord]) -> Vec<u8> {
        let mut out = Vec::with_capacity(records.len() * LEVEL_RECORD_LEN);
        for r in records {
            out.extend_from_slice(&r.encode());
        }
        out
    }
}

/// Byte source for levels plus the configured level range.
#[derive(Debug, Clone)]
pub struct LevelStore {
    data: Vec<u8>,
    count: u8,
}

impl LevelStore {
    /// Wrap a level file image holding `count` levels.
    pub fn from_bytes(data: Vec<u8>, count: u8) -> Self {
        Self { data, count }
    }

    /// Read a level file from disk.
    pub fn open(path: impl AsRef<Path>, count: u8) -> Result<Self, LevelError> {
        let data = std::fs::read(path)?;
        Ok(Self::from_bytes(data, count))
    }

    /// Built-in levels so the game can run without asset files.
    pub fn demo() -> Self {
        let records = crate::demo::records();
        let count = records.len() as u8;
        Self::from_bytes(LevelRecord::encode_all(&records), count)
    }

    /// Number of levels in the configured range.
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Decode level `index` (1-based).
    pub fn load_level(&self, index: u8) -> Result<LevelData, LevelError> {
        if index == 0 || index > self.count {
            return Err(LevelError::InvalidLevelIndex {
                index,
                count: self.count,
            });
        }

        let a = (index as usize - 1) * LEVEL_RECORD_LEN;
        let needed = a + LEVEL_RECORD_LEN;
        let record = self.data.get(a..needed).ok_or(LevelError::CorruptLevelData {
            index,
            detail: Corruption::Truncated {
                needed,
                available: self.data.len(),
            },
        })?;

        let time = time_budget(record[0], record[1]);
        let row = record[2];
        let col = record[3];
        let start = GridPos::new(col as i8, row as i8);
        if col >= GRID_WIDTH || row >= GRID_HEIGHT {
            return Err(LevelError::CorruptLevelData {
                index,
                detail: Corruption::StartOutOfBounds { col, row },
            });
        }

        let mut grid = Grid::new();
        for (i, &raw) in record[4..].iter().enumerate() {
            let pos = GridPos::from_index(i);
            let code = if raw == LEGACY_ENEMY_CODE {
                Tile::EnemyHorizontal.code()
            } else {
                raw
            };
            let tile = if ReservationKind::from_code(code).is_some() {
                log::warn!(
                    "level {index}: clearing stored sentinel {code} at ({}, {})",
                    pos.x,
                    pos.y
                );
                Tile::Empty
            } else if code == Tile::PlayerStart.code() {
                log::warn!(
                    "level {index}: ignoring stray start marker at ({}, {})",
                    pos.x,
                    pos.y
                );
                Tile::Empty
            } else {
                Tile::from_code(code)
            };
            grid.set(pos, tile);
        }
        grid.set(start, Tile::PlayerStart);

        Ok(LevelData { grid, time, start })
    }
}
