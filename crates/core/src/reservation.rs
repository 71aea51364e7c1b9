//! In-flight occupancy kept alongside the grid.
//!
//! A reservation ties a cell to the object slot whose movement currently owns
//! it. Reservations never outlive the owning movement; the world sweeps any
//! stale entry at the start of every tick.

use crate::types::{GridPos, GRID_CELLS, GRID_HEIGHT, GRID_WIDTH};

/// Why a cell is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationKind {
    /// A falling rock is leaving this cell (legacy code 80)
    Vacating,
    /// The player is walking into this cell; does not block other movers (legacy code 81)
    PassThrough,
    /// Destination of a falling or pushed rock (legacy code 255)
    Claimed,
}

impl ReservationKind {
    /// Legacy sentinel code for this kind.
    pub fn code(&self) -> u8 {
        match self {
            ReservationKind::Vacating => 80,
            ReservationKind::PassThrough => 81,
            ReservationKind::Claimed => 255,
        }
    }

    /// Decode a legacy sentinel code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            80 => Some(ReservationKind::Vacating),
            81 => Some(ReservationKind::PassThrough),
            255 => Some(ReservationKind::Claimed),
            _ => None,
        }
    }

    /// Whether a mover may enter a cell carrying this reservation.
    pub fn is_passable(&self) -> bool {
        matches!(self, ReservationKind::PassThrough)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reservation {
    pub kind: ReservationKind,
    /// Object slot that owns the reservation
    pub owner: u8,
}

impl Reservation {
    pub fn new(kind: ReservationKind, owner: usize) -> Self {
        Self {
            kind,
            owner: owner as u8,
        }
    }

    pub fn code(&self) -> u8 {
        self.kind.code()
    }
}

/// Cell -> owning object relation, one entry per grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservations {
    cells: [Option<Reservation>; GRID_CELLS],
}

impl Default for Reservations {
    fn default() -> Self {
        Self::new()
    }
}

impl Reservations {
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_CELLS],
        }
    }

    pub fn get(&self, pos: GridPos) -> Option<Reservation> {
        pos.index().and_then(|i| self.cells[i])
    }

    pub fn at(&self, idx: usize) -> Option<Reservation> {
        self.cells[idx]
    }

    pub fn reserve(&mut self, pos: GridPos, kind: ReservationKind, owner: usize) {
        if let Some(i) = pos.index() {
            self.cells[i] = Some(Reservation::new(kind, owner));
        }
    }

    /// Release `pos` if `owner` holds it.
    pub fn release(&mut self, pos: GridPos, owner: usize) {
        if let Some(i) = pos.index() {
            if matches!(self.cells[i], Some(r) if r.owner as usize == owner) {
                self.cells[i] = None;
            }
        }
    }

    /// Release every cell held by `owner`.
    pub fn release_owner(&mut self, owner: usize) {
        for cell in self.cells.iter_mut() {
            if matches!(cell, Some(r) if r.owner as usize == owner) {
                *cell = None;
            }
        }
    }

    /// Whether a mover may not enter `pos` because of a reservation.
    pub fn blocks(&self, pos: GridPos) -> bool {
        matches!(self.get(pos), Some(r) if !r.kind.is_passable())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.cells = [None; GRID_CELLS];
    }

    /// Drop reservations whose owner no longer holds them.
    ///
    /// `owns` answers whether slot `owner` legitimately owns cell `pos`.
    /// Returns the number of entries removed.
    pub fn sweep(&mut self, mut owns: impl FnMut(usize, GridPos) -> bool) -> usize {
        let mut removed = 0;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            if let Some(r) = *cell {
                let pos = GridPos::from_index(i);
                if !owns(r.owner as usize, pos) {
                    log::warn!(
                        "clearing stale reservation {} at ({}, {}) owned by slot {}",
                        r.code(),
                        pos.x,
                        pos.y,
                        r.owner
                    );
                    *cell = None;
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Mirror vertically along with the grid.
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
