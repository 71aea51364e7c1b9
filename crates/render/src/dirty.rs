//! Pending screen damage between two presented frames

use fruitland_types::{Rect, SCREEN_HEIGHT};

/// Bands further apart than this are not merged.
pub const MERGE_DISTANCE: i32 = 32;

/// A vertical run of screen lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Band {
    pub start_line: i32,
    pub line_count: i32,
}

impl Band {
    pub fn end_line(&self) -> i32 {
        self.start_line + self.line_count
    }
}

/// What changed since the last presented frame.
///
/// Cleared every time a frame is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtyRegion {
    band: Option<Band>,
    full: bool,
    stats_changed: bool,
    objects_changed: bool,
}

impl DirtyRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a full redraw; overrides any pending band.
    pub fn mark_full(&mut self) {
        self.full = true;
        self.band = Some(Band {
            start_line: 0,
            line_count: SCREEN_HEIGHT,
        });
        self.stats_changed = true;
        self.objects_changed = true;
    }

    /// Add lines `y..y+height` to the pending band.
    ///
    /// A band more than [`MERGE_DISTANCE`] lines away from the end of the
    /// pending one is dropped; the pending band is kept as is.
    pub fn mark_area(&mut self, y: i32, height: i32) {
        if self.full || height <= 0 {
            return;
        }
        match self.band {
            None => {
                self.band = Some(Band {
                    start_line: y,
                    line_count: height,
                });
            }
            Some(band) => {
                let end = band.end_line();
                if (y - end).abs() < MERGE_DISTANCE {
                    let start = band.start_line.min(y);
                    let end = end.max(y + height);
                    self.band = Some(Band {
                        start_line: start,
                        line_count: end - start,
                    });
                }
            }
        }
    }

    pub fn mark_rect(&mut self, rect: &Rect) {
        self.mark_area(rect.y, rect.h);
    }

    pub fn mark_stats(&mut self) {
        self.stats_changed = true;
    }

    pub fn mark_objects(&mut self) {
        self.objects_changed = true;
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    pub fn band(&self) -> Option<Band> {
        self.band
    }

    pub fn stats_changed(&self) -> bool {
        self.stats_changed
    }

    pub fn objects_changed(&self) -> bool {
        self.objects_changed
    }

    /// Nothing to draw.
    pub fn is_clean(&self) -> bool {
        !self.full && !self.stats_changed && !self.objects_changed
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
