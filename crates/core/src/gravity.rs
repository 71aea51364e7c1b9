//! Gravity engine - rock falls, crush avoidance, and chained drops
//!
//! A resting rock falls when the cell below is empty (or only tagged
//! pass-through) and the player neither stands on nor is walking into that
//! cell. A fall vacates the current cell and claims the one below until the
//! segment completes; a completed fall immediately chains into the next one
//! when the same test still passes.

use crate::grid::Grid;
use crate::object::{GameObject, Motion, Role};
use crate::reservation::{ReservationKind, Reservations};
use crate::types::{Direction, GridPos, Tile, GRID_HEIGHT};
use crate::world::WorldState;

/// Cells a rock must never start falling into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrushGuard {
    cells: [Option<GridPos>; 2],
}

impl CrushGuard {
    pub fn for_player(player: &GameObject) -> Self {
        if !player.active {
            return Self { cells: [None; 2] };
        }
        Self {
            cells: player.footprint_cells(),
        }
    }

    pub fn protects(&self, pos: GridPos) -> bool {
        self.cells.iter().any(|c| *c == Some(pos))
    }
}

/// Below-cell test shared by fall start and fall chaining.
pub fn can_fall(grid: &Grid, reservations: &Reservations, cell: GridPos, guard: &CrushGuard) -> bool {
    if cell.y >= GRID_HEIGHT as i8 - 1 {
        return false;
    }
    let below = cell.step(Direction::Down);
    if grid.get(below) != Some(Tile::Empty) {
        return false;
    }
    if let Some(r) = reservations.get(below) {
        if r.kind != ReservationKind::PassThrough {
            return false;
        }
    }
    !guard.protects(below)
}

/// Start a one-tile fall for the rock in `slot`.
fn start_fall(world: &mut WorldState, slot: usize, start_us: u64) {
    let Some(rock) = world.objects.get_mut(slot) else {
        return;
    };
    let cell = rock.cell;
    let below = cell.step(Direction::Down);
    rock.begin_move(below, Direction::Down, start_us);
    rock.facing = Direction::Down;

    world.grid.set(cell, Tile::Empty);
    world
        .reservations
        .reserve(cell, ReservationKind::Vacating, slot);
    world
        .reservations
        .reserve(below, ReservationKind::Claimed, slot);
    log::trace!("rock {slot} falling from ({}, {})", cell.x, cell.y);
}

/// Start falls for every resting rock that is free to drop.
///
/// Returns the number of falls started.
pub fn apply_gravity(world: &mut WorldState, now_us: u64) -> usize {
    let guard = CrushGuard::for_player(world.objects.player());
    let mut started = 0;
    for slot in Role::Rock.slots() {
        let Some(rock) = world.objects.get(slot) else {
            continue;
        };
        if !rock.active || rock.is_moving() {
            continue;
        }
        if can_fall(&world.grid, &world.reservations, rock.cell, &guard) {
            start_fall(world, slot, now_us);
            started += 1;
        }
    }
    started
}

/// Complete a rock segment (fall or push) and chain the next fall if possible.
///
/// `completed_us` is the instant the finished segment reached its target; a
/// chained fall starts there so multi-tile drops keep a steady pace.
pub fn settle_rock(world: &mut WorldState, slot: usize, completed_us: u64, now_us: u64) {
    world.reservations.release_owner(slot);
    let Some(rock) = world.objects.get_mut(slot) else {
        return;
    };
    rock.finish_move();
    let cell = rock.cell;
    world.grid.set(cell, Tile::Rock);

    let guard = CrushGuard::for_player(world.objects.player());
    if can_fall(&world.grid, &world.reservations, cell, &guard) {
        let start = completed_us.min(now_us);
        start_fall(world, slot, start);
        let duration = world.config.tile_move_us;
        if let Some(rock) = world.objects.get_mut(slot) {
            if let Motion::Moving(seg) = rock.motion {
                rock.pos = seg.position_at(now_us, duration);
            }
        }
    } else {
        log::trace!("rock {slot} resting at ({}, {})", cell.x, cell.y);
    }
}
