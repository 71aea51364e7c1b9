//! World state - grid, reservations, object table, and level counters
//!
//! The world is the single owner of all mutable game state. Every component
//! function takes it by reference; there are no globals.

use crate::config::SimConfig;
use crate::gravity;
use crate::grid::Grid;
use crate::items::ItemEvent;
use crate::level::LevelData;
use crate::movement;
use crate::object::ObjectTable;
use crate::push::{self, PushOutcome};
use crate::reservation::Reservations;
use crate::snapshot::{ObjectSnapshot, StatsSnapshot, WorldSnapshot};
use crate::types::{DirectionalIntent, Tile, SECOND_US, START_LIVES};

/// Scalar level and session counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counters {
    pub score: u32,
    /// Remaining level time in seconds
    pub time: u32,
    pub lives: u32,
    /// 1-based level index
    pub level: u8,
    /// Fruit left on the level
    pub fruit: u32,
    pub dead: bool,
    /// Ticks left on the enemy freeze
    pub freeze: u32,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub push: Option<PushOutcome>,
    pub item: Option<ItemEvent>,
    /// Stale reservations cleared at the start of the tick
    pub swept: usize,
    /// Rock falls started from rest
    pub falls_started: usize,
}

#[derive(Debug, Clone)]
pub struct WorldState {
    pub grid: Grid,
    pub reservations: Reservations,
    pub objects: ObjectTable,
    pub counters: Counters,
    pub config: SimConfig,
    /// Changes whenever the static layout must be redrawn from scratch
    layout_id: u32,
    next_second_us: u64,
}

impl WorldState {
    /// An empty world; call [`WorldState::load_level`] before ticking.
    pub fn new(config: SimConfig) -> Self {
        Self {
            grid: Grid::new(),
            reservations: Reservations::new(),
            objects: ObjectTable::new(),
            counters: Counters {
                lives: START_LIVES,
                ..Counters::default()
            },
            config,
            layout_id: 0,
            next_second_us: SECOND_US,
        }
    }

    /// Re-initialize for a new level.
    ///
    /// The grid is replaced and the object table rebuilt; score and lives
    /// carry over, time and fruit come from the level.
    pub fn load_level(&mut self, level: u8, data: LevelData, now_us: u64) {
        self.grid = data.grid;
        self.reservations.clear();
        self.objects.populate(&self.grid, data.start, now_us);
        self.grid.set(data.start, Tile::Empty);

        let c = &mut self.counters;
        c.level = level;
        c.time = data.time;
        c.fruit = self.grid.count(Tile::Fruit) as u32;
        c.dead = false;
        c.freeze = 0;

        log::info!(
            "level {level} started: time {}, fruit {}, lives {}, score {}",
            c.time,
            c.fruit,
            c.lives,
            c.score
        );
        self.next_second_us = now_us + SECOND_US;
        self.bump_layout();
    }

    pub fn layout_id(&self) -> u32 {
        self.layout_id
    }

    /// Request a full redraw on the next planned frame.
    pub fn bump_layout(&mut self) {
        self.layout_id = self.layout_id.wrapping_add(1);
    }

    /// Advance the simulation to `now_us`.
    ///
    /// Order: reservation sweep, push resolution, movement (with item effects
    /// on landing), gravity, animation, level timer.
    pub fn tick(&mut self, intent: DirectionalIntent, now_us: u64) -> TickReport {
        let mut report = TickReport {
            swept: self.sweep_reservations(),
            ..TickReport::default()
        };

        if self.counters.freeze > 0 {
            self.counters.freeze -= 1;
        }

        if let Some(dir) = intent.direction {
            if !self.objects.player().is_moving() {
                report.push = Some(push::resolve_push(self, dir, now_us));
            }
        }

        report.item = movement::advance_movements(self, intent, now_us);
        report.falls_started = gravity::apply_gravity(self, now_us);
        movement::update_animation(self, now_us);
        self.run_timer(now_us);

        report
    }

    /// Clear reservations whose owner is no longer moving through the cell.
    fn sweep_reservations(&mut self) -> usize {
        let objects = &self.objects;
        self.reservations.sweep(|owner, pos| {
            objects.get(owner).is_some_and(|o| {
                o.active
                    && o
                        .segment()
                        .is_some_and(|seg| seg.target == pos || o.cell == pos)
            })
        })
    }

    fn run_timer(&mut self, now_us: u64) {
        while now_us >= self.next_second_us {
            self.next_second_us += SECOND_US;
            if self.counters.time == 0 {
                break;
            }
            self.counters.time -= 1;
        }
    }

    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot {
            score: self.counters.score,
            time: self.counters.time,
            level: self.counters.level as u32,
            lives: self.counters.lives,
        }
    }

    /// Fill `out` with a read-only picture of the world. Allocation-free.
    pub fn snapshot_into(&self, out: &mut WorldSnapshot) {
        for (code, tile) in out.grid.iter_mut().zip(self.grid.tiles().iter()) {
            *code = tile.code();
        }
        for (snap, obj) in out.objects.iter_mut().zip(self.objects.all().iter()) {
            *snap = ObjectSnapshot::from(*obj);
        }
        out.stats = self.stats();
        out.fruit = self.counters.fruit;
        out.dead = self.counters.dead;
        out.freeze = self.counters.freeze;
        out.layout_id = self.layout_id;
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let mut snap = WorldSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{LevelRecord, LevelStore};
    use crate::reservation::ReservationKind;
    use crate::types::GridPos;

    fn world_from(rows: &[&str]) -> WorldState {
        let store = LevelStore::from_bytes(LevelRecord::from_map(100, rows).encode().to_vec(), 1);
        let mut world = WorldState::new(SimConfig::standard());
        world.load_level(1, store.load_level(1).unwrap(), 0);
        world
    }

    #[test]
    fn load_level_spawns_player_and_clears_marker() {
        let world = world_from(&["P.F"]);
        assert_eq!(world.objects.player().cell, GridPos::new(0, 0));
        assert_eq!(world.grid.get(GridPos::new(0, 0)), Some(Tile::Empty));
        assert_eq!(world.counters.fruit, 1);
        assert_eq!(world.counters.time, 150);
    }

    #[test]
    fn timer_counts_whole_seconds() {
        let mut world = world_from(&["P.F"]);
        world.tick(DirectionalIntent::NONE, 999_999);
        assert_eq!(world.counters.time, 150);
        world.tick(DirectionalIntent::NONE, 1_000_000);
        assert_eq!(world.counters.time, 149);
        world.tick(DirectionalIntent::NONE, 3_500_000);
        assert_eq!(world.counters.time, 147);
    }

    #[test]
    fn stale_reservation_is_swept() {
        let mut world = world_from(&["P.F"]);
        world
            .reservations
            .reserve(GridPos::new(5, 5), ReservationKind::Claimed, 7);
        let report = world.tick(DirectionalIntent::NONE, 10);
        assert_eq!(report.swept, 1);
        assert!(world.reservations.is_empty());
    }

    #[test]
    fn freeze_counts_down_per_tick() {
        let mut world = world_from(&["P.F"]);
        world.counters.freeze = 2;
        world.tick(DirectionalIntent::NONE, 10);
        world.tick(DirectionalIntent::NONE, 20);
        world.tick(DirectionalIntent::NONE, 30);
        assert_eq!(world.counters.freeze, 0);
    }
}
