//! Render planning against real world snapshots.

use fruitland::core::{LevelRecord, LevelStore, SimConfig, WorldState};
use fruitland::render::atlas;
use fruitland::render::{DrawList, PlanDecision, RenderPlanner};
use fruitland::types::{Direction, DirectionalIntent, DrawOp, GridPos, Rect, Tile};

const STEP: u64 = 120_000;

fn world(rows: &[&str]) -> WorldState {
    let store = LevelStore::from_bytes(LevelRecord::from_map(100, rows).encode().to_vec(), 1);
    let mut world = WorldState::new(SimConfig::standard());
    world.load_level(1, store.load_level(1).unwrap(), 0);
    world
}

fn plan(planner: &mut RenderPlanner, w: &WorldState, out: &mut DrawList) -> PlanDecision {
    planner.plan(&w.snapshot(), out).decision
}

fn blits_with_src(out: &DrawList, src: Rect) -> usize {
    out.iter()
        .filter(|op| matches!(op, DrawOp::Blit { src: s, .. } if *s == src))
        .count()
}

#[test]
fn first_frame_is_full_and_second_is_skipped() {
    let w = world(&["P.F"]);
    let mut planner = RenderPlanner::new(true);
    let mut out = DrawList::new();

    assert_eq!(plan(&mut planner, &w, &mut out), PlanDecision::Full);
    assert_eq!(out.first(), Some(&DrawOp::Clear(Rect::SCREEN)));
    assert_eq!(out.last(), Some(&DrawOp::Present));

    assert_eq!(plan(&mut planner, &w, &mut out), PlanDecision::Skipped);
    assert!(out.is_empty());
}

#[test]
fn moving_player_erases_its_old_footprint() {
    let mut w = world(&["P.F"]);
    let mut planner = RenderPlanner::new(true);
    let mut out = DrawList::new();
    plan(&mut planner, &w, &mut out);

    let old = w.objects.player().pos;
    w.tick(DirectionalIntent::tap(Direction::Right), 0);
    w.tick(DirectionalIntent::NONE, STEP / 2);
    assert_eq!(plan(&mut planner, &w, &mut out), PlanDecision::Partial);

    assert!(out.contains(&DrawOp::Clear(Rect::tile_at(old))));
    assert!(!out.contains(&DrawOp::Clear(Rect::SCREEN)));
    let player = w.objects.player();
    assert!(out.contains(&DrawOp::Blit {
        src: atlas::sprite_src(player.sprite.sx, player.sprite.sy),
        dst: Rect::tile_at(player.pos),
    }));
    assert_eq!(out.last(), Some(&DrawOp::Present));
}

#[test]
fn eaten_pellet_cell_is_cleared() {
    let mut w = world(&["P.F"]);
    let mut planner = RenderPlanner::new(true);
    let mut out = DrawList::new();
    plan(&mut planner, &w, &mut out);

    w.tick(DirectionalIntent::tap(Direction::Right), 0);
    w.tick(DirectionalIntent::NONE, STEP);
    assert_eq!(plan(&mut planner, &w, &mut out), PlanDecision::Partial);
    assert!(out.contains(&DrawOp::Clear(atlas::cell_dst(1, 0))));
    assert_eq!(blits_with_src(&out, atlas::tile_src_for(Tile::Pellet)), 0);
}

#[test]
fn layout_change_forces_full_redraw() {
    let mut w = world(&["P.F"]);
    let mut planner = RenderPlanner::new(true);
    let mut out = DrawList::new();
    plan(&mut planner, &w, &mut out);

    w.bump_layout();
    assert_eq!(plan(&mut planner, &w, &mut out), PlanDecision::Full);
}

#[test]
fn many_changed_cells_become_a_full_frame() {
    let mut w = world(&["P"]);
    let mut planner = RenderPlanner::new(true);
    let mut out = DrawList::new();
    plan(&mut planner, &w, &mut out);

    for x in 0..15 {
        for y in 2..5 {
            w.grid.set(GridPos::new(x, y), Tile::Pellet);
        }
    }
    assert_eq!(plan(&mut planner, &w, &mut out), PlanDecision::Full);
}

#[test]
fn rocks_are_drawn_once_as_objects() {
    let w = world(&["Po"]);
    let mut planner = RenderPlanner::new(true);
    let mut out = DrawList::new();
    plan(&mut planner, &w, &mut out);
    assert_eq!(blits_with_src(&out, atlas::tile_src_for(Tile::Rock)), 1);
}

#[test]
fn stats_only_frames_are_throttled() {
    let mut w = world(&["P.F"]);
    let mut planner = RenderPlanner::new(true);
    let mut out = DrawList::new();
    plan(&mut planner, &w, &mut out);

    let mut decisions = Vec::new();
    for sec in 1..=3u64 {
        w.tick(DirectionalIntent::NONE, sec * 1_000_000);
        let fp = planner.plan(&w.snapshot(), &mut out);
        if fp.decision == PlanDecision::Partial {
            assert!(fp.dirty.stats_changed());
            assert!(!fp.dirty.objects_changed());
        }
        decisions.push(fp.decision);
    }
    assert_eq!(
        decisions,
        vec![PlanDecision::Partial, PlanDecision::Partial, PlanDecision::Throttled]
    );
}

#[test]
fn without_frame_skip_every_stats_change_is_drawn() {
    let mut w = world(&["P.F"]);
    let mut planner = RenderPlanner::new(false);
    let mut out = DrawList::new();
    plan(&mut planner, &w, &mut out);

    for sec in 1..=3u64 {
        w.tick(DirectionalIntent::NONE, sec * 1_000_000);
        assert_eq!(plan(&mut planner, &w, &mut out), PlanDecision::Partial);
    }
}

#[test]
fn forced_full_after_a_dropped_frame() {
    let w = world(&["P.F"]);
    let mut planner = RenderPlanner::new(true);
    let mut out = DrawList::new();
    plan(&mut planner, &w, &mut out);
    planner.force_full();
    assert_eq!(plan(&mut planner, &w, &mut out), PlanDecision::Full);
}
