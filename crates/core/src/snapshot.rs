use crate::object::{GameObject, Sprite};
use crate::types::{GridPos, PixelPos, GRID_CELLS, MAX_OBJECTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ObjectSnapshot {
    pub active: bool,
    pub cell: GridPos,
    pub pos: PixelPos,
    pub sprite: Sprite,
    pub moving: bool,
}

impl From<GameObject> for ObjectSnapshot {
    fn from(value: GameObject) -> Self {
        Self {
            active: value.active,
            cell: value.cell,
            pos: value.pos,
            sprite: value.sprite,
            moving: value.is_moving(),
        }
    }
}

/// The numbers shown in the stats bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatsSnapshot {
    pub score: u32,
    pub time: u32,
    pub level: u32,
    pub lives: u32,
}

/// Read-only picture of the world handed to the render planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldSnapshot {
    /// Tile codes, row-major
    pub grid: [u8; GRID_CELLS],
    pub objects: [ObjectSnapshot; MAX_OBJECTS],
    pub stats: StatsSnapshot,
    pub fruit: u32,
    pub dead: bool,
    pub freeze: u32,
    pub layout_id: u32,
}

impl WorldSnapshot {
    pub fn clear(&mut self) {
        self.grid = [0u8; GRID_CELLS];
        self.objects = [ObjectSnapshot::default(); MAX_OBJECTS];
        self.stats = StatsSnapshot::default();
        self.fruit = 0;
        self.dead = false;
        self.freeze = 0;
        self.layout_id = 0;
    }

    /// Tile code at `pos`, 0 when out of bounds.
    pub fn tile_code(&self, pos: GridPos) -> u8 {
        pos.index().map_or(0, |i| self.grid[i])
    }
}

impl Default for WorldSnapshot {
    fn default() -> Self {
        Self {
            grid: [0u8; GRID_CELLS],
            objects: [ObjectSnapshot::default(); MAX_OBJECTS],
            stats: StatsSnapshot::default(),
            fruit: 0,
            dead: false,
            freeze: 0,
            layout_id: 0,
        }
    }
}
