//! Effects applied when the player lands on a tile.

use fruitland::core::items::flip_screen;
use fruitland::core::{Grid, ItemEvent, LevelRecord, LevelStore, SimConfig, WorldState};
use fruitland::types::{Direction, DirectionalIntent, GridPos, Tile, GRID_CELLS, TELEPORT_SCORE};

use proptest::prelude::*;

const STEP: u64 = 120_000;

fn world(rows: &[&str]) -> WorldState {
    let store = LevelStore::from_bytes(LevelRecord::from_map(100, rows).encode().to_vec(), 1);
    let mut world = WorldState::new(SimConfig::standard());
    world.load_level(1, store.load_level(1).unwrap(), 0);
    world
}

/// Step right once and return the landing event.
fn step_right(w: &mut WorldState) -> Option<ItemEvent> {
    w.tick(DirectionalIntent::tap(Direction::Right), 0);
    w.tick(DirectionalIntent::NONE, STEP).item
}

#[test]
fn pellet_scores_and_is_consumed() {
    let mut w = world(&["P."]);
    assert_eq!(step_right(&mut w), Some(ItemEvent::PelletEaten));
    assert_eq!(w.counters.score, 10);
    assert_eq!(w.grid.get(GridPos::new(1, 0)), Some(Tile::Empty));
}

#[test]
fn fruit_counts_down() {
    let mut w = world(&["PF.F"]);
    assert_eq!(w.counters.fruit, 2);
    assert_eq!(
        step_right(&mut w),
        Some(ItemEvent::FruitCollected { remaining: 1 })
    );
    assert_eq!(w.counters.score, 500);
}

#[test]
fn bonus_scores() {
    let mut w = world(&["P$"]);
    assert_eq!(step_right(&mut w), Some(ItemEvent::BonusCollected));
    assert_eq!(w.counters.score, 100);
}

#[test]
fn teleporter_jumps_to_its_partner() {
    let mut rows = [""; 11];
    rows[0] = "PT";
    rows[5] = ".....T";
    let mut w = world(&rows);
    let dest = GridPos::new(5, 5);

    assert_eq!(step_right(&mut w), Some(ItemEvent::Teleported { to: dest }));
    let player = w.objects.player();
    assert_eq!(player.cell, dest);
    assert_eq!(player.pos, dest.pixel());
    assert_eq!(w.grid.count(Tile::Teleporter), 0);
    assert_eq!(w.counters.score, 200);
}

#[test]
fn lone_teleporter_still_scores() {
    let mut w = world(&["PT"]);
    assert_eq!(step_right(&mut w), Some(ItemEvent::TeleportFizzled));
    assert_eq!(w.objects.player().cell, GridPos::new(1, 0));
    assert_eq!(w.grid.get(GridPos::new(1, 0)), Some(Tile::Empty));
    assert_eq!(w.counters.score, TELEPORT_SCORE);
}

#[test]
fn time_bonus_extends_the_clock() {
    let mut w = world(&["P+"]);
    let before = w.counters.time;
    assert_eq!(
        step_right(&mut w),
        Some(ItemEvent::TimeBonus {
            time: before + SimConfig::standard().time_bonus
        })
    );
}

#[test]
fn extra_life() {
    let mut w = world(&["PL"]);
    let lives = w.counters.lives;
    assert_eq!(
        step_right(&mut w),
        Some(ItemEvent::ExtraLife { lives: lives + 1 })
    );
}

#[test]
fn freeze_sets_the_countdown_and_ticks_it_down() {
    let mut w = world(&["PZ"]);
    let frames = SimConfig::standard().freeze_frames;
    assert_eq!(step_right(&mut w), Some(ItemEvent::EnemiesFrozen { frames }));
    assert_eq!(w.counters.score, 150);

    w.tick(DirectionalIntent::NONE, STEP + 1);
    assert_eq!(w.counters.freeze, frames - 1);
}

#[test]
fn death_trap_kills() {
    let mut w = world(&["PX"]);
    assert_eq!(step_right(&mut w), Some(ItemEvent::DeathTrap));
    assert!(w.counters.dead);
}

#[test]
fn screen_flip_mirrors_the_playfield() {
    let mut w = world(&["PS F"]);
    let layout = w.layout_id();
    assert_eq!(step_right(&mut w), Some(ItemEvent::ScreenFlipped));

    assert_eq!(w.counters.score, 300);
    assert_eq!(w.objects.player().cell, GridPos::new(1, 10));
    assert_eq!(w.grid.get(GridPos::new(3, 10)), Some(Tile::Fruit));
    assert_eq!(w.grid.get(GridPos::new(3, 0)), Some(Tile::Empty));
    assert_ne!(w.layout_id(), layout);
}

#[test]
fn flipping_twice_restores_the_world() {
    let store = LevelStore::demo();
    let mut w = WorldState::new(SimConfig::standard());
    w.load_level(1, store.load_level(1).unwrap(), 0);
    // Put something in flight first.
    w.tick(DirectionalIntent::tap(Direction::Right), 0);
    let before = w.clone();

    flip_screen(&mut w);
    flip_screen(&mut w);
    assert_eq!(w.grid, before.grid);
    assert_eq!(w.reservations, before.reservations);
    assert_eq!(w.objects.all(), before.objects.all());
}

proptest! {
    #[test]
    fn grid_flip_is_an_involution(codes in proptest::collection::vec(0u8..15, GRID_CELLS)) {
        let mut arr = [0u8; GRID_CELLS];
        arr.copy_from_slice(&codes);
        let original = Grid::from_codes(&arr);

        let mut flipped = original.clone();
        flipped.flip_vertical();
        for (pos, tile) in original.iter() {
            prop_assert_eq!(flipped.get(pos.mirrored()), Some(tile));
        }

        flipped.flip_vertical();
        prop_assert_eq!(flipped, original);
    }
}
