//! Item effect handler - tile effects applied when the player lands on a tile
//!
//! | Tile | Effect |
//! |------|--------|
//! | pellet | +10 score |
//! | fruit | one fewer fruit remaining, +500 score |
//! | bonus | +100 score |
//! | teleporter | jump to the other teleporter, +200 score |
//! | time bonus | remaining time + time bonus |
//! | screen flip | mirror the playfield vertically, +300 score |
//! | extra life | +1 life |
//! | freeze enemies | freeze countdown set, +150 score |
//! | death trap | player dies |
//!
//! The landed-on tile is always cleared.

use crate::types::{
    GridPos, Tile, BONUS_SCORE, FLIP_SCORE, FREEZE_SCORE, FRUIT_SCORE, PELLET_SCORE,
    TELEPORT_SCORE,
};
use crate::world::WorldState;

/// What a landing did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEvent {
    PelletEaten,
    FruitCollected { remaining: u32 },
    BonusCollected,
    Teleported { to: GridPos },
    /// Teleporter with no partner; the tile is still consumed and scored
    TeleportFizzled,
    TimeBonus { time: u32 },
    ScreenFlipped,
    ExtraLife { lives: u32 },
    EnemiesFrozen { frames: u32 },
    DeathTrap,
}

/// Apply the effect of the tile under the player and clear it.
pub fn collect(world: &mut WorldState) -> Option<ItemEvent> {
    let at = world.objects.player().cell;
    let tile = world.grid.get(at)?;
    world.grid.set(at, Tile::Empty);

    let c = &mut world.counters;
    let event = match tile {
        Tile::Pellet => {
            c.score += PELLET_SCORE;
            ItemEvent::PelletEaten
        }
        Tile::Fruit => {
            c.fruit = c.fruit.saturating_sub(1);
            c.score += FRUIT_SCORE;
            ItemEvent::FruitCollected { remaining: c.fruit }
        }
        Tile::Bonus => {
            c.score += BONUS_SCORE;
            ItemEvent::BonusCollected
        }
        Tile::Teleporter => {
            // Scored even when there is no partner to jump to.
            world.counters.score += TELEPORT_SCORE;
            match teleport(world) {
                Some(to) => ItemEvent::Teleported { to },
                None => ItemEvent::TeleportFizzled,
            }
        }
        Tile::TimeBonus => {
            c.time += world.config.time_bonus;
            ItemEvent::TimeBonus { time: c.time }
        }
        Tile::ScreenFlip => {
            flip_screen(world);
            world.counters.score += FLIP_SCORE;
            ItemEvent::ScreenFlipped
        }
        Tile::ExtraLife => {
            c.lives += 1;
            ItemEvent::ExtraLife { lives: c.lives }
        }
        Tile::FreezeEnemies => {
            c.freeze = world.config.freeze_frames;
            c.score += FREEZE_SCORE;
            ItemEvent::EnemiesFrozen { frames: c.freeze }
        }
        Tile::DeathTrap => {
            c.dead = true;
            ItemEvent::DeathTrap
        }
        _ => return None,
    };

    log::debug!("item at ({}, {}): {:?}", at.x, at.y, event);
    Some(event)
}

/// Move the player onto the first remaining teleporter and consume it.
///
/// The player's own teleporter must already be cleared. Returns the
/// destination, or None when there is no partner.
pub fn teleport(world: &mut WorldState) -> Option<GridPos> {
    let Some(dest) = world.grid.find_first(Tile::Teleporter) else {
        log::warn!("teleporter has no destination");
        return None;
    };
    world.grid.set(dest, Tile::Empty);
    let player = world.objects.player_mut();
    player.cell = dest;
    player.pos = dest.pixel();
    Some(dest)
}

/// Mirror the grid, reservations, and every active object vertically.
///
/// Forces a full redraw. Applying it twice restores the original layout.
pub fn flip_screen(world: &mut WorldState) {
    world.grid.flip_vertical();
    world.reservations.flip_vertical();
    for obj in world.objects.all_mut().iter_mut().filter(|o| o.active) {
        obj.flip_vertical();
    }
    world.bump_layout();
    log::info!("screen flipped");
}
