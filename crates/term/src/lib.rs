//! Terminal rendering collaborator.
//!
//! Executes [`fruitland_types::DrawOp`] lists against a character canvas
//! and flushes only the changed runs to the terminal. Pattern sheet regions
//! are mapped to character art; there is no bitmap decoding.

pub mod canvas;
pub mod fb;
pub mod glyphs;
pub mod renderer;

pub use fruitland_render as render;
pub use fruitland_types as types;

pub use canvas::{Canvas, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
