//! TerminalRenderer: executes draw lists and flushes changed cells.
//!
//! Draw operations land on a [`Canvas`]. On `Present` the canvas is diffed
//! against what the terminal already shows and only changed runs are written.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use fruitland_render::RenderTarget;
use fruitland_types::DrawOp;

use crate::canvas::{Canvas, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    canvas: Canvas,
    last: FrameBuffer,
    buf: Vec<u8>,
    origin: (u16, u16),
    needs_full: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            canvas: Canvas::new(),
            last: FrameBuffer::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            buf: Vec::with_capacity(64 * 1024),
            origin: (0, 0),
            needs_full: true,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.needs_full = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next present to rewrite every cell.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn present(&mut self) -> Result<()> {
        let (w, h) = terminal::size().unwrap_or((CANVAS_WIDTH, CANVAS_HEIGHT));
        let origin = (
            w.saturating_sub(CANVAS_WIDTH) / 2,
            h.saturating_sub(CANVAS_HEIGHT) / 2,
        );
        if origin != self.origin {
            self.origin = origin;
            self.needs_full = true;
        }

        let fb = self.canvas.framebuffer();
        self.buf.clear();
        if self.needs_full {
            encode_full_into(fb, self.origin, &mut self.buf)?;
            self.needs_full = false;
        } else {
            encode_diff_into(&self.last, fb, self.origin, &mut self.buf)?;
        }
        self.last.copy_from(fb);
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTarget for TerminalRenderer {
    fn submit(&mut self, ops: &[DrawOp]) -> Result<()> {
        for op in ops {
            if self.canvas.apply(op) {
                self.present()?;
            }
        }
        Ok(())
    }
}

/// Encode a full-frame redraw at `origin` into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &FrameBuffer, origin: (u16, u16), out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut current_style: Option<CellStyle> = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(origin.0, origin.1 + y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode a diff redraw (changed runs) at `origin` into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_diff_into(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    origin: (u16, u16),
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut current_style: Option<CellStyle> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(origin.0 + x, origin.1 + y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(x, y, len)` for every horizontal run of cells that differ.
pub fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    for y in 0..next.height() {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
