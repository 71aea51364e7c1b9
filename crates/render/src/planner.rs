//! Render planner - decides what to redraw and emits the draw list
//!
//! Per frame:
//!
//! 1. Compare object pixel positions, grid codes and stats with the last
//!    presented snapshot.
//! 2. Nothing changed: no draw list (`Skipped`).
//! 3. Layout changed (level load, flip, block landed) or first frame: clear
//!    the screen and draw border, tiles and labels (`Full`).
//! 4. Otherwise erase the old footprint of every moved object and restore
//!    the tiles beneath it (`Partial`).
//! 5. Draw every active object, then the stats when they changed.
//!
//! The hot path writes into a caller-owned [`DrawList`] and never allocates.

use fruitland_core::snapshot::{ObjectSnapshot, StatsSnapshot, WorldSnapshot};
use fruitland_types::{
    DrawOp, GridPos, Rect, Tile, BLOCK_SLOT, GRID_CELLS, GRID_HEIGHT, GRID_WIDTH,
    PLAYFIELD_ORIGIN, TILE_SIZE,
};

use crate::atlas::{self, NumberField};
use crate::dirty::DirtyRegion;
use crate::skip::FrameSkipper;
use crate::DrawList;

/// Above this many changed cells a partial frame becomes a full one.
const MAX_PARTIAL_CELLS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanDecision {
    /// Nothing changed; no draw list
    Skipped,
    /// Stats-only frame dropped by the frame skipper
    Throttled,
    Partial,
    Full,
}

/// Result of planning one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePlan {
    pub decision: PlanDecision,
    /// Damage that was drawn this frame
    pub dirty: DirtyRegion,
}

impl FramePlan {
    /// True when the draw list holds a frame to present.
    pub fn has_output(&self) -> bool {
        matches!(self.decision, PlanDecision::Partial | PlanDecision::Full)
    }
}

#[derive(Debug, Clone)]
pub struct RenderPlanner {
    prev: WorldSnapshot,
    presented: bool,
    dirty: DirtyRegion,
    skipper: FrameSkipper,
}

impl RenderPlanner {
    pub fn new(frame_skip: bool) -> Self {
        Self {
            prev: WorldSnapshot::default(),
            presented: false,
            dirty: DirtyRegion::new(),
            skipper: FrameSkipper::new(frame_skip),
        }
    }

    /// Make the next frame a full redraw.
    pub fn force_full(&mut self) {
        self.presented = false;
    }

    /// Plan the frame for `snap` into `out`. `out` is cleared first.
    pub fn plan(&mut self, snap: &WorldSnapshot, out: &mut DrawList) -> FramePlan {
        out.clear();
        self.dirty.clear();

        let cells = changed_cells(&self.prev, snap);
        let full = !self.presented
            || snap.layout_id != self.prev.layout_id
            || cells > MAX_PARTIAL_CELLS;
        if full {
            self.dirty.mark_full();
        } else {
            if cells > 0 || objects_changed(&self.prev, snap) {
                self.dirty.mark_objects();
            }
            if snap.stats != self.prev.stats {
                self.dirty.mark_stats();
            }
        }

        if self.dirty.is_clean() {
            return self.finish(PlanDecision::Skipped);
        }
        if self.skipper.should_skip(&self.dirty) {
            return self.finish(PlanDecision::Throttled);
        }

        let decision = if full {
            self.emit_static(snap, out);
            PlanDecision::Full
        } else {
            self.emit_erase(snap, out);
            PlanDecision::Partial
        };

        if self.dirty.objects_changed() {
            self.emit_objects(snap, out);
        }
        if self.dirty.stats_changed() {
            emit_stats(&snap.stats, &mut self.dirty, out);
        }
        push(out, DrawOp::Present);

        self.prev = *snap;
        self.presented = true;
        self.finish(decision)
    }

    fn finish(&mut self, decision: PlanDecision) -> FramePlan {
        let plan = FramePlan {
            decision,
            dirty: self.dirty,
        };
        self.dirty.clear();
        plan
    }

    /// Background, border, level tiles and labels.
    fn emit_static(&mut self, snap: &WorldSnapshot, out: &mut DrawList) {
        push(out, DrawOp::Clear(Rect::SCREEN));
        emit_border(out);

        let block_active = snap.objects[BLOCK_SLOT].active;
        for (i, &code) in snap.grid.iter().enumerate() {
            if is_static(code, block_active) {
                let pos = GridPos::from_index(i);
                push(
                    out,
                    DrawOp::Blit {
                        src: atlas::tile_src(code),
                        dst: atlas::cell_dst(pos.x as i32, pos.y as i32),
                    },
                );
            }
        }

        for (text, x, y) in atlas::LABELS {
            emit_text(out, x, y, text);
        }
    }

    /// Erase moved objects and changed cells, then restore the tiles beneath.
    fn emit_erase(&mut self, snap: &WorldSnapshot, out: &mut DrawList) {
        let block_active = snap.objects[BLOCK_SLOT].active;

        for (old, new) in self.prev.objects.iter().zip(snap.objects.iter()) {
            if !old.active || !object_changed(old, new) {
                continue;
            }
            let rect = Rect::tile_at(old.pos);
            push(out, DrawOp::Clear(rect));
            self.dirty.mark_rect(&rect);
            restore_tiles(snap, &rect, block_active, out);
        }

        for i in 0..GRID_CELLS {
            if self.prev.grid[i] == snap.grid[i] {
                continue;
            }
            let pos = GridPos::from_index(i);
            let rect = atlas::cell_dst(pos.x as i32, pos.y as i32);
            push(out, DrawOp::Clear(rect));
            self.dirty.mark_rect(&rect);
            if is_static(snap.grid[i], block_active) {
                push(
                    out,
                    DrawOp::Blit {
                        src: atlas::tile_src(snap.grid[i]),
                        dst: rect,
                    },
                );
            }
        }
    }

    fn emit_objects(&mut self, snap: &WorldSnapshot, out: &mut DrawList) {
        for obj in snap.objects.iter().filter(|o| o.active) {
            let dst = Rect::tile_at(obj.pos);
            push(
                out,
                DrawOp::Blit {
                    src: atlas::sprite_src(obj.sprite.sx, obj.sprite.sy),
                    dst,
                },
            );
            self.dirty.mark_rect(&dst);
        }
    }
}

impl Default for RenderPlanner {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Whether the static layer draws tile `code`.
///
/// Rocks and enemies are drawn as objects; the block tile is hidden while
/// the block object is sliding onto it.
fn is_static(code: u8, block_active: bool) -> bool {
    match Tile::from_code(code) {
        Tile::Empty | Tile::Rock | Tile::PlayerStart => false,
        Tile::Block => !block_active,
        t => !t.is_enemy_marker(),
    }
}

fn object_changed(old: &ObjectSnapshot, new: &ObjectSnapshot) -> bool {
    old.active != new.active || old.pos != new.pos
}

fn objects_changed(prev: &WorldSnapshot, snap: &WorldSnapshot) -> bool {
    prev.objects
        .iter()
        .zip(snap.objects.iter())
        .any(|(a, b)| object_changed(a, b))
}

fn changed_cells(prev: &WorldSnapshot, snap: &WorldSnapshot) -> usize {
    prev.grid
        .iter()
        .zip(snap.grid.iter())
        .filter(|(a, b)| a != b)
        .count()
}

/// Redraw the static tiles that overlap `rect`.
fn restore_tiles(snap: &WorldSnapshot, rect: &Rect, block_active: bool, out: &mut DrawList) {
    let x0 = (rect.x - PLAYFIELD_ORIGIN).div_euclid(TILE_SIZE).max(0);
    let y0 = (rect.y - PLAYFIELD_ORIGIN).div_euclid(TILE_SIZE).max(0);
    let x1 = (rect.right() - 1 - PLAYFIELD_ORIGIN)
        .div_euclid(TILE_SIZE)
        .min(GRID_WIDTH as i32 - 1);
    let y1 = (rect.bottom() - 1 - PLAYFIELD_ORIGIN)
        .div_euclid(TILE_SIZE)
        .min(GRID_HEIGHT as i32 - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let code = snap.tile_code(GridPos::new(x as i8, y as i8));
            if is_static(code, block_active) {
                push(
                    out,
                    DrawOp::Blit {
                        src: atlas::tile_src(code),
                        dst: atlas::cell_dst(x, y),
                    },
                );
            }
        }
    }
}

fn emit_border(out: &mut DrawList) {
    let mut x = 8;
    while x < atlas::BORDER_RIGHT_X {
        push(
            out,
            DrawOp::Blit {
                src: atlas::TOP_EDGE_SRC,
                dst: Rect::new(x, 0, 16, 8),
            },
        );
        push(
            out,
            DrawOp::Blit {
                src: atlas::BOTTOM_EDGE_SRC,
                dst: Rect::new(x, atlas::BORDER_BOTTOM_Y, 16, 8),
            },
        );
        x += TILE_SIZE;
    }

    let mut y = 8;
    while y < atlas::BORDER_BOTTOM_Y {
        push(
            out,
            DrawOp::Blit {
                src: atlas::LEFT_EDGE_SRC,
                dst: Rect::new(0, y, 8, 16),
            },
        );
        push(
            out,
            DrawOp::Blit {
                src: atlas::RIGHT_EDGE_SRC,
                dst: Rect::new(atlas::BORDER_RIGHT_X, y, 8, 16),
            },
        );
        y += TILE_SIZE;
    }

    for (src, dst) in atlas::CORNERS {
        push(out, DrawOp::Blit { src, dst });
    }
}

/// Font text; characters without a glyph leave a gap.
fn emit_text(out: &mut DrawList, x: i32, y: i32, text: &str) {
    for (i, ch) in text.chars().enumerate() {
        if let Some(src) = atlas::glyph_src(ch) {
            push(
                out,
                DrawOp::Blit {
                    src,
                    dst: Rect::new(x + i as i32 * atlas::GLYPH, y, atlas::GLYPH, atlas::GLYPH),
                },
            );
        }
    }
}

/// Fixed-width number, rightmost digit first; higher digits are dropped.
fn emit_number(out: &mut DrawList, field: NumberField, mut n: u32) {
    let mut px = field.x + atlas::GLYPH * (field.digits as i32 - 1);
    for _ in 0..field.digits {
        push(
            out,
            DrawOp::Blit {
                src: atlas::digit_src((n % 10) as u8),
                dst: Rect::new(px, field.y, atlas::GLYPH, atlas::GLYPH),
            },
        );
        n /= 10;
        px -= atlas::GLYPH;
    }
}

fn emit_stats(stats: &StatsSnapshot, dirty: &mut DirtyRegion, out: &mut DrawList) {
    let fields = [
        (atlas::SCORE_FIELD, stats.score),
        (atlas::TIME_FIELD, stats.time),
        (atlas::LEVEL_FIELD, stats.level),
        (atlas::LIVES_FIELD, stats.lives),
    ];
    for (field, value) in fields {
        emit_number(out, field, value);
        dirty.mark_rect(&field.area());
    }
}

fn push(out: &mut DrawList, op: DrawOp) {
    if out.try_push(op).is_err() {
        log::warn!("draw list full, dropping {:?}", op);
    }
}
