//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the tile-based simulation: level decoding, the world
//! state, movement, gravity, pushes, item effects and the level/session state
//! machine. It has **zero dependencies** on terminals, threads, or wall clocks;
//! every time-dependent operation takes an explicit microsecond timestamp.
//!
//! # Module Structure
//!
//! - [`level`]: fixed-format level records and the level store
//! - [`grid`]: 15x11 tile grid
//! - [`reservation`]: in-flight cell reservations kept beside the grid
//! - [`object`]: fixed-capacity object table with role-scoped slot ranges
//! - [`movement`]: tile-to-tile interpolation and animation
//! - [`gravity`]: rock falls, crush avoidance, chained drops
//! - [`push`]: pass/block/push resolution for the tile ahead of the player
//! - [`items`]: effects applied when the player lands on a tile
//! - [`world`]: the world state and the per-tick pipeline
//! - [`session`]: level outcomes, lives, and level changes
//! - [`snapshot`]: copyable read-only pictures for the renderer
//!
//! # Example
//!
//! ```
//! use fruitland_core::{LevelStore, Session, SimConfig};
//! use fruitland_types::{Direction, DirectionalIntent};
//!
//! let mut session = Session::new(LevelStore::demo(), SimConfig::standard(), 1, 3, 0).unwrap();
//! session.tick(DirectionalIntent::tap(Direction::Right), 0).unwrap();
//! session.tick(DirectionalIntent::NONE, 120_000).unwrap();
//! assert_eq!(session.level(), 1);
//! ```
//!
//! # Timing
//!
//! - **Tile move**: 120 ms (standard tier) or 100 ms (performance tier)
//! - **Animation**: one frame every 100 ms, independent of movement
//! - **Level timer**: one second of level time per second of simulation time

pub mod config;
mod demo;
pub mod gravity;
pub mod grid;
pub mod items;
pub mod level;
pub mod movement;
pub mod object;
pub mod push;
pub mod reservation;
pub mod session;
pub mod snapshot;
pub mod world;

pub use fruitland_types as types;

pub use config::SimConfig;
pub use grid::Grid;
pub use items::ItemEvent;
pub use level::{Corruption, LevelData, LevelError, LevelRecord, LevelStore};
pub use object::{GameObject, ObjectTable, Role};
pub use push::PushOutcome;
pub use reservation::{Reservation, ReservationKind, Reservations};
pub use session::{LevelOutcome, Session, SessionState, SessionTick};
pub use snapshot::{ObjectSnapshot, StatsSnapshot, WorldSnapshot};
pub use world::{Counters, TickReport, WorldState};
