//! Push resolver - decides pass, block, or push for the tile ahead of the player
//!
//! Rules by target tile:
//!
//! - **Passable tiles**: the player walks in; effects fire on arrival.
//! - **Pushable block**: the cell beyond must be empty. The block's tile is
//!   written to its destination immediately and slot 15 animates the slide.
//! - **Rock**: never pushed down. Sideways pushes need support under the
//!   destination (the bottom row counts as supported). The destination is
//!   claimed until the rock's segment completes.
//! - **Anything else**: rejected.
//!
//! Rejections are silent; the outcome value only reports what happened.

use crate::movement;
use crate::object::{GameObject, BLOCK_SPRITE};
use crate::reservation::ReservationKind;
use crate::types::{Direction, GridPos, Tile, GRID_HEIGHT};
use crate::world::WorldState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The player started walking onto a passable tile
    Moved,
    /// A rock started sliding and the player follows it
    PushedRock { slot: usize },
    /// The block started sliding and the player follows it
    PushedBlock,
    /// Nothing changed
    Blocked,
}

/// Whether a pushed object may land on `pos`: in bounds, empty, unreserved.
fn is_free(world: &WorldState, pos: GridPos) -> bool {
    world.grid.is_empty_at(pos) && world.reservations.get(pos).is_none()
}

/// Whether a rock landing on `pos` would rest there.
fn is_supported(world: &WorldState, pos: GridPos) -> bool {
    if pos.y >= GRID_HEIGHT as i8 - 1 {
        return true;
    }
    let below = pos.step(Direction::Down);
    let solid = !matches!(world.grid.get(below), Some(Tile::Empty) | None);
    solid || world.reservations.get(below).is_some()
}

/// Resolve one directional intent against the tile ahead of the player.
pub fn resolve_push(world: &mut WorldState, dir: Direction, now_us: u64) -> PushOutcome {
    let player = world.objects.player();
    if !player.active || player.is_moving() {
        return PushOutcome::Blocked;
    }
    let target = player.cell.step(dir);
    let Some(tile) = world.grid.get(target) else {
        return PushOutcome::Blocked;
    };

    let outcome = match tile {
        Tile::Block => push_block(world, target, dir, now_us),
        Tile::Rock => push_rock(world, target, dir, now_us),
        t if t.is_passable() && !world.reservations.blocks(target) => PushOutcome::Moved,
        _ => PushOutcome::Blocked,
    };

    if outcome == PushOutcome::Blocked {
        log::debug!(
            "move {} into ({}, {}) blocked by {:?}",
            dir.as_str(),
            target.x,
            target.y,
            tile
        );
        return outcome;
    }

    movement::start_player_move(world, target, dir, now_us);
    outcome
}

fn push_block(world: &mut WorldState, at: GridPos, dir: Direction, now_us: u64) -> PushOutcome {
    let beyond = at.step(dir);
    if !is_free(world, beyond) || world.objects.block().active {
        return PushOutcome::Blocked;
    }

    world.grid.set(at, Tile::Empty);
    world.grid.set(beyond, Tile::Block);

    let block = world.objects.block_mut();
    *block = GameObject::spawn(at, dir, BLOCK_SPRITE, now_us);
    block.begin_move(beyond, dir, now_us);
    block.cell = beyond;

    log::debug!(
        "block pushed {} from ({}, {}) to ({}, {})",
        dir.as_str(),
        at.x,
        at.y,
        beyond.x,
        beyond.y
    );
    PushOutcome::PushedBlock
}

fn push_rock(world: &mut WorldState, at: GridPos, dir: Direction, now_us: u64) -> PushOutcome {
    let Some(slot) = world.objects.rock_at(at) else {
        return PushOutcome::Blocked;
    };
    if dir == Direction::Down {
        return PushOutcome::Blocked;
    }
    let beyond = at.step(dir);
    if !is_free(world, beyond) {
        return PushOutcome::Blocked;
    }
    if dir.is_horizontal() && !is_supported(world, beyond) {
        return PushOutcome::Blocked;
    }

    world.grid.set(at, Tile::Empty);
    world
        .reservations
        .reserve(beyond, ReservationKind::Claimed, slot);
    if let Some(rock) = world.objects.get_mut(slot) {
        rock.begin_move(beyond, dir, now_us);
    }

    log::debug!(
        "rock {slot} pushed {} from ({}, {}) to ({}, {})",
        dir.as_str(),
        at.x,
        at.y,
        beyond.x,
        beyond.y
    );
    PushOutcome::PushedRock { slot }
}
