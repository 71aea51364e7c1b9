//! Tile-to-tile movement, continuous sliding and animation.

use fruitland::core::{LevelRecord, LevelStore, ReservationKind, SimConfig, WorldState};
use fruitland::types::{Direction, DirectionalIntent, GridPos, PixelPos, TILE_SIZE};

const STEP: u64 = 120_000;

fn world(rows: &[&str]) -> WorldState {
    let store = LevelStore::from_bytes(LevelRecord::from_map(100, rows).encode().to_vec(), 1);
    let mut world = WorldState::new(SimConfig::standard());
    world.load_level(1, store.load_level(1).unwrap(), 0);
    world
}

#[test]
fn position_is_interpolated_from_elapsed_time() {
    let mut w = world(&["P.."]);
    let start = GridPos::new(0, 0).pixel();

    w.tick(DirectionalIntent::tap(Direction::Right), 0);
    w.tick(DirectionalIntent::NONE, STEP / 2);
    let player = w.objects.player();
    assert_eq!(player.cell, GridPos::new(0, 0));
    assert_eq!(player.pos, PixelPos::new(start.x + TILE_SIZE / 2, start.y));

    w.tick(DirectionalIntent::NONE, STEP);
    let player = w.objects.player();
    assert_eq!(player.cell, GridPos::new(1, 0));
    assert_eq!(player.pos, GridPos::new(1, 0).pixel());
    assert!(!player.is_moving());
}

#[test]
fn interpolation_is_independent_of_tick_rate() {
    let mut coarse = world(&["P.."]);
    let mut fine = world(&["P.."]);
    coarse.tick(DirectionalIntent::tap(Direction::Right), 0);
    fine.tick(DirectionalIntent::tap(Direction::Right), 0);

    for t in (16_666..90_000).step_by(16_666) {
        fine.tick(DirectionalIntent::NONE, t);
    }
    coarse.tick(DirectionalIntent::NONE, 83_330);
    fine.tick(DirectionalIntent::NONE, 83_330);
    assert_eq!(coarse.objects.player().pos, fine.objects.player().pos);
}

#[test]
fn destination_is_reserved_pass_through_while_moving() {
    let mut w = world(&["P.."]);
    w.tick(DirectionalIntent::tap(Direction::Right), 0);
    let r = w.reservations.get(GridPos::new(1, 0)).unwrap();
    assert_eq!(r.kind, ReservationKind::PassThrough);

    w.tick(DirectionalIntent::NONE, STEP);
    assert!(w.reservations.get(GridPos::new(1, 0)).is_none());
}

#[test]
fn tap_moves_one_tile() {
    let mut w = world(&["P...."]);
    w.tick(DirectionalIntent::tap(Direction::Right), 0);
    w.tick(DirectionalIntent::NONE, STEP);
    w.tick(DirectionalIntent::NONE, 2 * STEP);
    assert_eq!(w.objects.player().cell, GridPos::new(1, 0));
}

#[test]
fn held_direction_keeps_sliding_without_gaps() {
    let mut w = world(&["P...."]);
    let held = DirectionalIntent::held(Direction::Right);
    w.tick(held, 0);
    // Late tick: the chained segment still starts at the completion time.
    w.tick(held, STEP + 30_000);

    let player = w.objects.player();
    assert_eq!(player.cell, GridPos::new(1, 0));
    let seg = player.segment().unwrap();
    assert_eq!(seg.target, GridPos::new(2, 0));
    assert_eq!(seg.started_us, STEP);
}

#[test]
fn held_slide_stops_at_a_wall() {
    let mut w = world(&["P.#"]);
    let held = DirectionalIntent::held(Direction::Right);
    w.tick(held, 0);
    w.tick(held, STEP);
    w.tick(held, 2 * STEP);
    let player = w.objects.player();
    assert_eq!(player.cell, GridPos::new(1, 0));
    assert!(!player.is_moving());
}

#[test]
fn new_direction_is_ignored_mid_move() {
    let mut w = world(&[".P.", "..."]);
    w.tick(DirectionalIntent::tap(Direction::Right), 0);
    w.tick(DirectionalIntent::tap(Direction::Down), STEP / 2);
    w.tick(DirectionalIntent::NONE, STEP);
    assert_eq!(w.objects.player().cell, GridPos::new(2, 0));
}

#[test]
fn idle_animation_cycles_two_frames() {
    let mut w = world(&["P"]);
    let interval = SimConfig::standard().anim_interval_us;
    let mut columns = Vec::new();
    for i in 1..=4 {
        w.tick(DirectionalIntent::NONE, i * interval);
        columns.push(w.objects.player().sprite.sx);
    }
    assert_eq!(columns, vec![16, 0, 16, 0]);
}

#[test]
fn facing_selects_the_sprite_row() {
    let mut w = world(&["P.", ".."]);
    w.tick(DirectionalIntent::tap(Direction::Down), 0);
    assert_eq!(w.objects.player().sprite.sy, 80);
    w.tick(DirectionalIntent::NONE, STEP);
    w.tick(DirectionalIntent::tap(Direction::Right), STEP + 1);
    assert_eq!(w.objects.player().sprite.sy, 48);
}
