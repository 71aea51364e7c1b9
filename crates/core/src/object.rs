//! Object table - fixed arena of 16 slots with positional roles
//!
//! Slot meaning is centralized in [`Role`]; other modules work on role-scoped
//! views ([`RoleSlice`]) instead of hard-coding slot numbers.

use std::ops::Range;

use crate::types::{
    Direction, GridPos, PixelPos, Tile, BLOCK_SLOT, ENEMY_SLOTS, MAX_OBJECTS, PLAYER_SLOT,
    ROCK_SLOTS,
};

/// Sprite sheet position of the rock
pub const ROCK_SPRITE: Sprite = Sprite { sx: 48, sy: 16 };

/// Sprite sheet position of the pushable block
pub const BLOCK_SPRITE: Sprite = Sprite { sx: 176, sy: 16 };

/// Sprite row of horizontal enemies
pub const ENEMY_HORIZONTAL_ROW: i32 = 32;

/// Sprite row of vertical enemies
pub const ENEMY_VERTICAL_ROW: i32 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Player,
    Enemy,
    Rock,
    Block,
}

impl Role {
    pub fn of_slot(slot: usize) -> Option<Role> {
        if slot == PLAYER_SLOT {
            Some(Role::Player)
        } else if ENEMY_SLOTS.contains(&slot) {
            Some(Role::Enemy)
        } else if ROCK_SLOTS.contains(&slot) {
            Some(Role::Rock)
        } else if slot == BLOCK_SLOT {
            Some(Role::Block)
        } else {
            None
        }
    }

    pub fn slots(&self) -> Range<usize> {
        match self {
            Role::Player => PLAYER_SLOT..PLAYER_SLOT + 1,
            Role::Enemy => ENEMY_SLOTS,
            Role::Rock => ROCK_SLOTS,
            Role::Block => BLOCK_SLOT..BLOCK_SLOT + 1,
        }
    }
}

/// Sprite sheet offset of an object's current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sprite {
    pub sx: i32,
    pub sy: i32,
}

/// One tile of movement between two tile centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub from: PixelPos,
    pub to: PixelPos,
    pub target: GridPos,
    pub direction: Direction,
    pub started_us: u64,
}

impl Segment {
    pub fn elapsed_us(&self, now_us: u64) -> u64 {
        now_us.saturating_sub(self.started_us)
    }

    pub fn is_complete(&self, now_us: u64, duration_us: u64) -> bool {
        self.elapsed_us(now_us) >= duration_us
    }

    /// Interpolated pixel position: `from + trunc((to - from) * progress)`.
    pub fn position_at(&self, now_us: u64, duration_us: u64) -> PixelPos {
        let elapsed = self.elapsed_us(now_us);
        if duration_us == 0 || elapsed >= duration_us {
            return self.to;
        }
        let lerp = |a: i32, b: i32| -> i32 {
            a + ((b - a) as i64 * elapsed as i64 / duration_us as i64) as i32
        };
        PixelPos::new(lerp(self.from.x, self.to.x), lerp(self.from.y, self.to.y))
    }

    /// Same segment after a vertical screen flip.
    pub fn mirrored(&self) -> Self {
        Self {
            from: self.from.mirrored(),
            to: self.to.mirrored(),
            target: self.target.mirrored(),
            direction: self.direction.mirrored(),
            started_us: self.started_us,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Motion {
    #[default]
    Idle,
    Moving(Segment),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Animation {
    pub frame: u8,
    pub last_us: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameObject {
    pub active: bool,
    /// Discrete grid coordinate
    pub cell: GridPos,
    /// Top-left pixel of the sprite
    pub pos: PixelPos,
    pub motion: Motion,
    pub facing: Direction,
    pub anim: Animation,
    pub sprite: Sprite,
}

impl Default for GameObject {
    fn default() -> Self {
        Self::INACTIVE
    }
}

impl GameObject {
    pub const INACTIVE: GameObject = GameObject {
        active: false,
        cell: GridPos::new(0, 0),
        pos: PixelPos::new(0, 0),
        motion: Motion::Idle,
        facing: Direction::Right,
        anim: Animation {
            frame: 0,
            last_us: 0,
        },
        sprite: Sprite { sx: 0, sy: 0 },
    };

    /// An active, idle object resting on `cell`.
    pub fn spawn(cell: GridPos, facing: Direction, sprite: Sprite, now_us: u64) -> Self {
        Self {
            active: true,
            cell,
            pos: cell.pixel(),
            motion: Motion::Idle,
            facing,
            anim: Animation {
                frame: 0,
                last_us: now_us,
            },
            sprite,
        }
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.motion, Motion::Moving(_))
    }

    pub fn segment(&self) -> Option<&Segment> {
        match &self.motion {
            Motion::Moving(seg) => Some(seg),
            Motion::Idle => None,
        }
    }

    /// Movement direction; None while idle.
    pub fn heading(&self) -> Option<Direction> {
        self.segment().map(|s| s.direction)
    }

    /// Start a one-tile segment from the current pixel position towards `target`.
    pub fn begin_move(&mut self, target: GridPos, direction: Direction, now_us: u64) {
        self.motion = Motion::Moving(Segment {
            from: self.pos,
            to: target.pixel(),
            target,
            direction,
            started_us: now_us,
        });
    }

    /// Snap onto the segment target and go idle.
    pub fn finish_move(&mut self) {
        if let Motion::Moving(seg) = self.motion {
            self.cell = seg.target;
            self.pos = seg.to;
        }
        self.motion = Motion::Idle;
    }

    /// Cells this object currently occupies or is moving into.
    pub fn footprint_cells(&self) -> [Option<GridPos>; 2] {
        [Some(self.cell), self.segment().map(|s| s.target)]
    }

    /// Mirror the row and vertical pixel position, including any in-flight segment.
    pub fn flip_vertical(&mut self) {
        self.cell = self.cell.mirrored();
        self.pos = self.pos.mirrored();
        if let Motion::Moving(seg) = self.motion {
            self.motion = Motion::Moving(seg.mirrored());
        }
        if !self.facing.is_horizontal() {
            self.facing = self.facing.mirrored();
        }
    }
}

/// Mutable view over the slots of one role.
pub struct RoleSlice<'a> {
    base: usize,
    objects: &'a mut [GameObject],
}

impl<'a> RoleSlice<'a> {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&GameObject> {
        let i = slot.checked_sub(self.base)?;
        self.objects.get(i)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut GameObject> {
        let i = slot.checked_sub(self.base)?;
        self.objects.get_mut(i)
    }

    /// `(slot, object)` pairs for the active objects of this role
    pub fn active_mut(&mut self) -> impl Iterator<Item = (usize, &mut GameObject)> + '_ {
        let base = self.base;
        self.objects
            .iter_mut()
            .enumerate()
            .filter(|(_, o)| o.active)
            .map(move |(i, o)| (base + i, o))
    }

    /// First active, idle object resting on `pos`
    pub fn resting_at(&self, pos: GridPos) -> Option<usize> {
        self.objects
            .iter()
            .position(|o| o.active && !o.is_moving() && o.cell == pos)
            .map(|i| self.base + i)
    }
}

/// The fixed-capacity object arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectTable {
    slots: [GameObject; MAX_OBJECTS],
}

impl Default for ObjectTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectTable {
    pub fn new() -> Self {
        Self {
            slots: [GameObject::INACTIVE; MAX_OBJECTS],
        }
    }

    pub fn reset(&mut self) {
        self.slots = [GameObject::INACTIVE; MAX_OBJECTS];
    }

    pub fn get(&self, slot: usize) -> Option<&GameObject> {
        self.slots.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut GameObject> {
        self.slots.get_mut(slot)
    }

    pub fn all(&self) -> &[GameObject; MAX_OBJECTS] {
        &self.slots
    }

    pub fn all_mut(&mut self) -> &mut [GameObject; MAX_OBJECTS] {
        &mut self.slots
    }

    pub fn player(&self) -> &GameObject {
        &self.slots[PLAYER_SLOT]
    }

    pub fn player_mut(&mut self) -> &mut GameObject {
        &mut self.slots[PLAYER_SLOT]
    }

    pub fn block(&self) -> &GameObject {
        &self.slots[BLOCK_SLOT]
    }

    pub fn block_mut(&mut self) -> &mut GameObject {
        &mut self.slots[BLOCK_SLOT]
    }

    pub fn role(&self, role: Role) -> &[GameObject] {
        &self.slots[role.slots()]
    }

    pub fn role_mut(&mut self, role: Role) -> RoleSlice<'_> {
        let range = role.slots();
        RoleSlice {
            base: range.start,
            objects: &mut self.slots[range],
        }
    }

    /// Active idle rock resting on `pos`
    pub fn rock_at(&self, pos: GridPos) -> Option<usize> {
        let range = Role::Rock.slots();
        let base = range.start;
        self.slots[range]
            .iter()
            .position(|o| o.active && !o.is_moving() && o.cell == pos)
            .map(|i| base + i)
    }

    /// Place an object into the first free slot of `role`.
    pub fn spawn(&mut self, role: Role, object: GameObject) -> Option<usize> {
        let range = role.slots();
        let base = range.start;
        let free = self.slots[range].iter().position(|o| !o.active)?;
        self.slots[base + free] = object;
        Some(base + free)
    }

    /// Populate the table from a freshly decoded grid.
    ///
    /// Rocks fill slots 5-14 and enemy markers fill slots 1-4 in row-major
    /// order; extra rocks or enemies beyond capacity stay as plain tiles.
    pub fn populate(&mut self, grid: &crate::grid::Grid, player_start: GridPos, now_us: u64) {
        self.reset();
        *self.player_mut() = GameObject::spawn(
            player_start,
            Direction::Right,
            Sprite {
                sx: 0,
                sy: crate::movement::sprite_row(Direction::Right),
            },
            now_us,
        );

        for (pos, tile) in grid.iter() {
            match tile {
                Tile::Rock => {
                    let rock = GameObject::spawn(pos, Direction::Down, ROCK_SPRITE, now_us);
                    if self.spawn(Role::Rock, rock).is_none() {
                        log::warn!("rock at ({}, {}) exceeds rock capacity", pos.x, pos.y);
                    }
                }
                Tile::EnemyHorizontal | Tile::EnemyVertical => {
                    let (facing, row) = if tile == Tile::EnemyHorizontal {
                        (Direction::Left, ENEMY_HORIZONTAL_ROW)
                    } else {
                        (Direction::Up, ENEMY_VERTICAL_ROW)
                    };
                    let enemy = GameObject::spawn(pos, facing, Sprite { sx: 0, sy: row }, now_us);
                    if self.spawn(Role::Enemy, enemy).is_none() {
                        log::warn!("enemy at ({}, {}) exceeds enemy capacity", pos.x, pos.y);
                    }
                }
                _ => {}
            }
        }
    }
}
