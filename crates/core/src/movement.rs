//! Movement scheduler - advances in-flight segments and picks animation frames
//!
//! Objects move one tile at a time. While a segment is in flight the pixel
//! position is interpolated from elapsed time; the discrete cell only changes
//! when the segment completes.

use crate::gravity;
use crate::items::{self, ItemEvent};
use crate::object::{Motion, Role, Segment, Sprite};
use crate::reservation::ReservationKind;
use crate::types::{Direction, DirectionalIntent, GridPos, IDLE_FRAMES, PLAYER_SLOT, WALK_FRAMES};
use crate::world::WorldState;

/// Sprite sheet row for a facing direction.
pub fn sprite_row(dir: Direction) -> i32 {
    match dir {
        Direction::Left => 32,
        Direction::Right => 48,
        Direction::Up => 64,
        Direction::Down => 80,
    }
}

/// Whether the player may step onto `pos` without pushing anything.
pub fn can_enter(world: &WorldState, pos: GridPos) -> bool {
    match world.grid.get(pos) {
        Some(tile) => tile.is_passable() && !world.reservations.blocks(pos),
        None => false,
    }
}

/// Start a fresh player move granted by the push resolver.
///
/// Resets the walk animation and tags the destination as pass-through.
pub fn start_player_move(world: &mut WorldState, target: GridPos, dir: Direction, now_us: u64) {
    let player = world.objects.player_mut();
    player.facing = dir;
    player.anim.frame = 0;
    player.anim.last_us = now_us;
    player.sprite = Sprite {
        sx: 0,
        sy: sprite_row(dir),
    };
    player.begin_move(target, dir, now_us);
    world
        .reservations
        .reserve(target, ReservationKind::PassThrough, PLAYER_SLOT);
}

/// Advance every in-flight segment to `now_us`.
///
/// Returns the item event produced when the player lands on a tile.
pub fn advance_movements(
    world: &mut WorldState,
    intent: DirectionalIntent,
    now_us: u64,
) -> Option<ItemEvent> {
    let duration = world.config.tile_move_us;

    let mut event = None;
    if let Some(seg) = world.objects.player().segment().copied() {
        if seg.is_complete(now_us, duration) {
            world.reservations.release(seg.target, PLAYER_SLOT);
            world.objects.player_mut().finish_move();
            event = items::collect(world);
            continue_player(world, intent, &seg, now_us);
        } else {
            world.objects.player_mut().pos = seg.position_at(now_us, duration);
        }
    }

    for slot in Role::Rock.slots() {
        let Some(seg) = world.objects.get(slot).and_then(|o| o.segment()).copied() else {
            continue;
        };
        if seg.is_complete(now_us, duration) {
            gravity::settle_rock(world, slot, seg.started_us + duration, now_us);
        } else if let Some(rock) = world.objects.get_mut(slot) {
            rock.pos = seg.position_at(now_us, duration);
        }
    }

    if let Some(seg) = world.objects.block().segment().copied() {
        if seg.is_complete(now_us, duration) {
            // The grid tile takes over rendering from here.
            let block = world.objects.block_mut();
            block.finish_move();
            block.active = false;
            world.bump_layout();
        } else {
            world.objects.block_mut().pos = seg.position_at(now_us, duration);
        }
    }

    event
}

/// Continuous sliding: re-arm the player in the same direction if it is still held.
fn continue_player(
    world: &mut WorldState,
    intent: DirectionalIntent,
    finished: &Segment,
    now_us: u64,
) {
    if world.counters.dead || !intent.is_held(finished.direction) {
        return;
    }
    let duration = world.config.tile_move_us;
    let next = world.objects.player().cell.step(finished.direction);
    if !can_enter(world, next) {
        return;
    }

    let start = (finished.started_us + duration).min(now_us);
    let player = world.objects.player_mut();
    player.begin_move(next, finished.direction, start);
    if let Motion::Moving(seg) = player.motion {
        player.pos = seg.position_at(now_us, duration);
    }
    world
        .reservations
        .reserve(next, ReservationKind::PassThrough, PLAYER_SLOT);
}

/// Step the player's animation on the fixed wall-clock interval.
///
/// Walking cycles through 4 frames, idling through 2. Only the sprite column
/// cycles; the row follows the facing direction.
pub fn update_animation(world: &mut WorldState, now_us: u64) {
    let interval = world.config.anim_interval_us;
    let player = world.objects.player_mut();
    if !player.active {
        return;
    }
    if now_us.saturating_sub(player.anim.last_us) >= interval {
        let frames = if player.is_moving() {
            WALK_FRAMES
        } else {
            IDLE_FRAMES
        };
        player.anim.frame = (player.anim.frame + 1) % frames;
        player.anim.last_us = now_us;
    }
    player.sprite = Sprite {
        sx: player.anim.frame as i32 * 16,
        sy: sprite_row(player.facing),
    };
}
