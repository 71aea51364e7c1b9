//! Fruitland (workspace facade crate).
//!
//! Re-exports the workspace crates under short names so binaries, tests and
//! benches can write `fruitland::core::Session` and friends.

pub use fruitland_core as core;
pub use fruitland_engine as engine;
pub use fruitland_input as input;
pub use fruitland_render as render;
pub use fruitland_term as term;
pub use fruitland_types as types;
