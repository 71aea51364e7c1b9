//! Executes draw lists against a character framebuffer.
//!
//! One 8x8 pixel block of the logical 256x224 screen is two cells wide and
//! one cell tall, so the canvas is 64x28 cells.

use fruitland_types::{DrawOp, Rect, SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::fb::{Cell, FrameBuffer};
use crate::glyphs::{block_cells, BLOCK, CELLS_PER_BLOCK};

pub const CANVAS_WIDTH: u16 = (SCREEN_WIDTH / BLOCK * CELLS_PER_BLOCK) as u16;
pub const CANVAS_HEIGHT: u16 = (SCREEN_HEIGHT / BLOCK) as u16;

#[derive(Debug, Clone)]
pub struct Canvas {
    fb: FrameBuffer,
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            fb: FrameBuffer::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        }
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Apply one operation; returns true for [`DrawOp::Present`].
    pub fn apply(&mut self, op: &DrawOp) -> bool {
        match op {
            DrawOp::Clear(rect) => {
                self.clear_rect(rect);
                false
            }
            DrawOp::Blit { src, dst } => {
                self.blit(src, dst);
                false
            }
            DrawOp::Present => true,
        }
    }

    /// Blank every block the rect touches.
    fn clear_rect(&mut self, rect: &Rect) {
        let bx0 = rect.x.div_euclid(BLOCK);
        let by0 = rect.y.div_euclid(BLOCK);
        let bx1 = (rect.right() + BLOCK - 1).div_euclid(BLOCK);
        let by1 = (rect.bottom() + BLOCK - 1).div_euclid(BLOCK);
        self.fb.fill_rect(
            bx0 * CELLS_PER_BLOCK,
            by0,
            (bx1 - bx0) * CELLS_PER_BLOCK,
            by1 - by0,
            Cell::default(),
        );
    }

    /// Copy sheet blocks to the nearest block position of `dst`.
    fn blit(&mut self, src: &Rect, dst: &Rect) {
        let bx = (dst.x + BLOCK / 2).div_euclid(BLOCK);
        let by = (dst.y + BLOCK / 2).div_euclid(BLOCK);
        for j in 0..src.h / BLOCK {
            for i in 0..src.w / BLOCK {
                let cells = block_cells(src.x + i * BLOCK, src.y + j * BLOCK);
                let x = (bx + i) * CELLS_PER_BLOCK;
                self.fb.set(x, by + j, cells[0]);
                self.fb.set(x + 1, by + j, cells[1]);
            }
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}
