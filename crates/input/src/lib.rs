//! Terminal input module (engine-facing).
//!
//! This crate is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::DirectionalIntent`] and
//! [`crate::types::ControlEvent`] values, and tracks held keys on terminals
//! without key-release events.

pub mod handler;
pub mod keyboard;
pub mod map;

pub use fruitland_types as types;

pub use handler::IntentSource;
pub use keyboard::{KeyboardInput, PolledInput};
pub use map::{control_for_key, direction_for_key, should_quit};
