//! Game engine - tick orchestration, pacing, and configuration.
//!
//! The engine wires a [`fruitland_core::Session`] to an input collaborator
//! ([`IntentProvider`]) and a rendering collaborator
//! ([`fruitland_render::RenderTarget`]), paced by a [`FrameClock`].

pub mod clock;
pub mod config;
pub mod frame_clock;
pub mod game;
pub mod handoff;

pub use fruitland_core as core;
pub use fruitland_render as render;
pub use fruitland_types as types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{GameConfig, Tier};
pub use frame_clock::{FpsReport, FrameClock};
pub use game::{FrameOutcome, Game, InputFrame, IntentProvider, RunSummary};
pub use handoff::{FrameHandoff, QuitSignal};
