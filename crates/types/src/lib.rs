//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no external dependencies, so they can be used
//! by the simulation core, the render planner, and any collaborator (terminal
//! renderer, keyboard input) alike.
//!
//! # Playfield Dimensions
//!
//! - **Grid**: 15 columns x 11 rows of 16x16 pixel tiles
//! - **Logical screen**: 256x224 pixels
//! - **Playfield origin**: tile (0, 0) has its top-left corner at pixel (8, 8)
//!
//! # Object Slots
//!
//! The object table is a fixed arena of 16 slots with positional roles:
//!
//! | Slots | Role |
//! |-------|------|
//! | 0 | player |
//! | 1-4 | enemies |
//! | 5-14 | rocks |
//! | 15 | pushable block |
//!
//! # Timing
//!
//! All timestamps are microseconds on a monotonic clock.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `STANDARD_FRAME_US` | 33 333 | 30 FPS frame period |
//! | `PERFORMANCE_FRAME_US` | 16 666 | 60 FPS frame period |
//! | `STANDARD_TILE_MOVE_US` | 120 000 | one tile of movement on standard hardware |
//! | `PERFORMANCE_TILE_MOVE_US` | 100 000 | one tile of movement on faster hardware |
//! | `ANIMATION_INTERVAL_US` | 100 000 | sprite animation step |
//!
//! # Examples
//!
//! ```
//! use fruitland_types::{Direction, GridPos, Tile, GRID_HEIGHT, GRID_WIDTH};
//!
//! // Tile codes are a stable contract with level data
//! assert_eq!(Tile::from_code(4), Tile::Fruit);
//! assert_eq!(Tile::Fruit.code(), 4);
//! assert!(Tile::Fruit.is_passable());
//! assert!(!Tile::Wall.is_passable());
//!
//! // Grid positions step by direction
//! let pos = GridPos::new(7, 5);
//! assert_eq!(pos.step(Direction::Left), GridPos::new(6, 5));
//! assert_eq!(pos.pixel().x, 7 * 16 + 8);
//!
//! assert_eq!(GRID_WIDTH, 15);
//! assert_eq!(GRID_HEIGHT, 11);
//! ```

use std::ops::Range;

/// Grid width in tiles (15 columns)
pub const GRID_WIDTH: u8 = 15;

/// Grid height in tiles (11 rows)
pub const GRID_HEIGHT: u8 = 11;

/// Total number of grid cells
pub const GRID_CELLS: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// Tile edge length in pixels
pub const TILE_SIZE: i32 = 16;

/// Pixel offset of tile (0, 0) from the screen origin (width of the border)
pub const PLAYFIELD_ORIGIN: i32 = 8;

/// Logical screen width in pixels
pub const SCREEN_WIDTH: i32 = 256;

/// Logical screen height in pixels
pub const SCREEN_HEIGHT: i32 = 224;

/// Number of slots in the object table
pub const MAX_OBJECTS: usize = 16;

/// Player slot
pub const PLAYER_SLOT: usize = 0;

/// Enemy slots (data only, no AI)
pub const ENEMY_SLOTS: Range<usize> = 1..5;

/// Rock slots (gravity-affected)
pub const ROCK_SLOTS: Range<usize> = 5..15;

/// Pushable block slot
pub const BLOCK_SLOT: usize = 15;

/// Frame period on standard hardware (30 FPS)
pub const STANDARD_FRAME_US: u64 = 1_000_000 / 30;

/// Frame period on performance hardware (60 FPS)
pub const PERFORMANCE_FRAME_US: u64 = 1_000_000 / 60;

/// Duration of one tile of movement on standard hardware
pub const STANDARD_TILE_MOVE_US: u64 = 120_000;

/// Duration of one tile of movement on performance hardware
pub const PERFORMANCE_TILE_MOVE_US: u64 = 100_000;

/// Wall-clock interval between animation frames (10 FPS animation)
pub const ANIMATION_INTERVAL_US: u64 = 100_000;

/// Walking animation frames per direction
pub const WALK_FRAMES: u8 = 4;

/// Idle animation frames
pub const IDLE_FRAMES: u8 = 2;

/// One second of level time
pub const SECOND_US: u64 = 1_000_000;

/// Number of levels in the stock level file
pub const DEFAULT_LEVEL_COUNT: u8 = 25;

/// Lives at the start of a session
pub const START_LIVES: u32 = 3;

/// Seconds added by a time-bonus tile
pub const DEFAULT_TIME_BONUS: u32 = 50;

/// Enemy freeze duration in frames
pub const DEFAULT_FREEZE_FRAMES: u32 = 300;

/// Score for a pellet
pub const PELLET_SCORE: u32 = 10;

/// Score for a fruit
pub const FRUIT_SCORE: u32 = 500;

/// Score for a bonus item
pub const BONUS_SCORE: u32 = 100;

/// Score for a successful teleport
pub const TELEPORT_SCORE: u32 = 200;

/// Score for a screen flip
pub const FLIP_SCORE: u32 = 300;

/// Score for the freeze-enemies item
pub const FREEZE_SCORE: u32 = 150;

/// Remaining seconds are multiplied by this when a level is cleared
pub const CLEAR_TIME_MULTIPLIER: u32 = 10;

/// Tile codes of the level grid.
///
/// The numeric codes are a stable contract with the level file format;
/// renumbering them breaks level compatibility. Codes outside the canonical
/// set decode to [`Tile::Decor`], which renders by code but is solid and inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    #[default]
    Empty,
    Pellet,
    Wall,
    Rock,
    Fruit,
    Bonus,
    Teleporter,
    TimeBonus,
    ScreenFlip,
    ExtraLife,
    FreezeEnemies,
    Block,
    DeathTrap,
    /// Vertical enemy spawn marker (13)
    EnemyVertical,
    /// Horizontal enemy spawn marker (14, legacy 15 is remapped here)
    EnemyHorizontal,
    /// Player start marker, only present between decode and spawn
    PlayerStart,
    Decor(u8),
}

impl Tile {
    /// Decode a raw tile code.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Tile::Empty,
            1 => Tile::Pellet,
            2 => Tile::Wall,
            3 => Tile::Rock,
            4 => Tile::Fruit,
            5 => Tile::Bonus,
            6 => Tile::Teleporter,
            7 => Tile::TimeBonus,
            8 => Tile::ScreenFlip,
            9 => Tile::ExtraLife,
            10 => Tile::FreezeEnemies,
            11 => Tile::Block,
            12 => Tile::DeathTrap,
            13 => Tile::EnemyVertical,
            14 => Tile::EnemyHorizontal,
            32 => Tile::PlayerStart,
            other => Tile::Decor(other),
        }
    }

    /// Raw tile code as stored in level data.
    pub fn code(&self) -> u8 {
        match self {
            Tile::Empty => 0,
            Tile::Pellet => 1,
            Tile::Wall => 2,
            Tile::Rock => 3,
            Tile::Fruit => 4,
            Tile::Bonus => 5,
            Tile::Teleporter => 6,
            Tile::TimeBonus => 7,
            Tile::ScreenFlip => 8,
            Tile::ExtraLife => 9,
            Tile::FreezeEnemies => 10,
            Tile::Block => 11,
            Tile::DeathTrap => 12,
            Tile::EnemyVertical => 13,
            Tile::EnemyHorizontal => 14,
            Tile::PlayerStart => 32,
            Tile::Decor(code) => *code,
        }
    }

    /// Whether the player may walk onto this tile.
    ///
    /// Rocks and the block are not passable; they are pushed instead.
    pub fn is_passable(&self) -> bool {
        matches!(
            self,
            Tile::Empty
                | Tile::Pellet
                | Tile::Fruit
                | Tile::Bonus
                | Tile::Teleporter
                | Tile::TimeBonus
                | Tile::ScreenFlip
                | Tile::ExtraLife
                | Tile::FreezeEnemies
                | Tile::DeathTrap
        )
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Tile::Empty)
    }

    /// Whether an enemy spawns from this marker.
    pub fn is_enemy_marker(&self) -> bool {
        matches!(self, Tile::EnemyVertical | Tile::EnemyHorizontal)
    }
}

/// Movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Grid delta (dx, dy); y grows downward.
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Direction after a vertical screen flip.
    pub fn mirrored(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            other => *other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Discrete grid coordinate.
///
/// Signed so that stepping off the edge yields an out-of-bounds position
/// rather than wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPos {
    pub x: i8,
    pub y: i8,
}

impl GridPos {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        self.x >= 0 && self.x < GRID_WIDTH as i8 && self.y >= 0 && self.y < GRID_HEIGHT as i8
    }

    /// Row-major cell index, or None when out of bounds.
    #[inline(always)]
    pub fn index(&self) -> Option<usize> {
        if !self.in_bounds() {
            return None;
        }
        Some((self.y as usize) * (GRID_WIDTH as usize) + (self.x as usize))
    }

    /// Inverse of [`GridPos::index`]. `index` must be below [`GRID_CELLS`].
    pub fn from_index(index: usize) -> Self {
        Self {
            x: (index % GRID_WIDTH as usize) as i8,
            y: (index / GRID_WIDTH as usize) as i8,
        }
    }

    /// Neighbouring position in `dir` (may be out of bounds).
    pub fn step(&self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Same column, mirrored row.
    pub fn mirrored(&self) -> Self {
        Self {
            x: self.x,
            y: GRID_HEIGHT as i8 - 1 - self.y,
        }
    }

    /// Screen position of this tile's top-left corner.
    pub fn pixel(&self) -> PixelPos {
        PixelPos {
            x: self.x as i32 * TILE_SIZE + PLAYFIELD_ORIGIN,
            y: self.y as i32 * TILE_SIZE + PLAYFIELD_ORIGIN,
        }
    }
}

/// Continuous screen coordinate in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Vertical mirror across the playfield (matches [`GridPos::mirrored`]).
    pub fn mirrored(&self) -> Self {
        let top = (GRID_HEIGHT as i32 - 1) * TILE_SIZE + PLAYFIELD_ORIGIN;
        Self {
            x: self.x,
            y: top - (self.y - PLAYFIELD_ORIGIN),
        }
    }
}

/// Axis-aligned rectangle in pixels (sprite sheet or screen space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Full logical screen
    pub const SCREEN: Rect = Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT);

    /// 16x16 sprite footprint at `pos`
    pub fn tile_at(pos: PixelPos) -> Self {
        Self::new(pos.x, pos.y, TILE_SIZE, TILE_SIZE)
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }
}

/// One operation for the rendering collaborator.
///
/// The core never touches a platform surface; it emits these instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawOp {
    /// Fill a screen region with background
    Clear(Rect),
    /// Copy a sprite sheet region `src` to screen region `dst`
    Blit { src: Rect, dst: Rect },
    /// End of frame; the collaborator should present what it has
    Present,
}

/// Per-axis "key is being held" flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisHeld {
    pub horizontal: bool,
    pub vertical: bool,
}

/// Normalized directional input for one tick.
///
/// Produced by input collaborators (keyboard, tilt sensor). The core consumes
/// at most one per tick; `held` drives continuous sliding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionalIntent {
    pub direction: Option<Direction>,
    pub held: AxisHeld,
}

impl DirectionalIntent {
    pub const NONE: DirectionalIntent = DirectionalIntent {
        direction: None,
        held: AxisHeld {
            horizontal: false,
            vertical: false,
        },
    };

    /// A single step that is not held afterwards.
    pub fn tap(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            held: AxisHeld::default(),
        }
    }

    /// A direction that is being held down.
    pub fn held(direction: Direction) -> Self {
        let held = if direction.is_horizontal() {
            AxisHeld {
                horizontal: true,
                vertical: false,
            }
        } else {
            AxisHeld {
                horizontal: false,
                vertical: true,
            }
        };
        Self {
            direction: Some(direction),
            held,
        }
    }

    /// True when `dir` is both the current direction and held on its axis.
    pub fn is_held(&self, dir: Direction) -> bool {
        if self.direction != Some(dir) {
            return false;
        }
        if dir.is_horizontal() {
            self.held.horizontal
        } else {
            self.held.vertical
        }
    }
}

/// Non-directional events from collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Leave the game loop without drawing further frames
    Quit,
    /// Forfeit the current life
    Escape,
    /// Debug: jump to the previous level
    PreviousLevel,
    /// Debug: jump to the next level
    NextLevel,
}
