//! Grid module - the 15x11 tile playfield
//!
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..14 (left to right), y ranges 0..10 (top to bottom).
//! The grid only ever holds renderable tiles; in-flight occupancy lives in
//! [`crate::reservation::Reservations`].

use crate::types::{GridPos, Tile, GRID_CELLS, GRID_HEIGHT, GRID_WIDTH};

/// The level grid - 15 columns x 11 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of tiles, row-major order (y * WIDTH + x)
    cells: [Tile; GRID_CELLS],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self {
            cells: [Tile::Empty; GRID_CELLS],
        }
    }

    /// Build a grid from raw codes without any remapping.
    pub fn from_codes(codes: &[u8; GRID_CELLS]) -> Self {
        let mut cells = [Tile::Empty; GRID_CELLS];
        for (cell, &code) in cells.iter_mut().zip(codes.iter()) {
            *cell = Tile::from_code(code);
        }
        Self { cells }
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get tile at `pos`, None if out of bounds
    pub fn get(&self, pos: GridPos) -> Option<Tile> {
        pos.index().map(|idx| self.cells[idx])
    }

    /// Set tile at `pos`. Returns false if out of bounds.
    pub fn set(&mut self, pos: GridPos, tile: Tile) -> bool {
        match pos.index() {
            Some(idx) => {
                self.cells[idx] = tile;
                true
            }
            None => false,
        }
    }

    /// Tile at a flat index. `idx` must be below [`GRID_CELLS`].
    pub fn at(&self, idx: usize) -> Tile {
        self.cells[idx]
    }

    pub fn tiles(&self) -> &[Tile; GRID_CELLS] {
        &self.cells
    }

    /// Whether `pos` is in bounds and holds an empty tile
    pub fn is_empty_at(&self, pos: GridPos) -> bool {
        matches!(self.get(pos), Some(Tile::Empty))
    }

    /// Number of cells holding `tile`
    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }

    /// First cell (row-major) holding `tile`
    pub fn find_first(&self, tile: Tile) -> Option<GridPos> {
        self.cells
            .iter()
            .position(|&t| t == tile)
            .map(GridPos::from_index)
    }

    /// Iterate over `(pos, tile)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, Tile)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &t)| (GridPos::from_index(i), t))
    }

    /// Mirror the grid vertically, row for row.
    pub fn flip_vertical(&mut self) {
        let w = GRID_WIDTH as usize;
        let h = GRID_HEIGHT as usize;
        for y in 0..h / 2 {
            let mirror = h - 1 - y;
            for x in 0..w {
                self.cells.swap(y * w + x, mirror * w + x);
            }
        }
    }
}
