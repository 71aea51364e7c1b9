//! Pattern sheet coordinates
//!
//! Every sprite, tile, glyph and border piece comes from one pattern sheet.
//! Font glyphs and border pieces sit in the top 16 pixel rows, level tiles
//! start at y=16 with 16 tiles per row.

use fruitland_types::{Rect, Tile, PLAYFIELD_ORIGIN, TILE_SIZE};

/// Font glyph edge in pixels
pub const GLYPH: i32 = 8;

/// Playfield bottom edge; the lower border row starts here
pub const BORDER_BOTTOM_Y: i32 = 184;

/// Right border column
pub const BORDER_RIGHT_X: i32 = 248;

pub const TOP_EDGE_SRC: Rect = Rect::new(16, 0, 16, 8);
pub const BOTTOM_EDGE_SRC: Rect = Rect::new(16, 8, 16, 8);
pub const LEFT_EDGE_SRC: Rect = Rect::new(0, 0, 8, 16);
pub const RIGHT_EDGE_SRC: Rect = Rect::new(8, 0, 8, 16);

/// Corner pieces as (source, destination) pairs
pub const CORNERS: [(Rect, Rect); 4] = [
    (Rect::new(32, 0, 8, 8), Rect::new(0, 0, 8, 8)),
    (Rect::new(40, 0, 8, 8), Rect::new(0, BORDER_BOTTOM_Y, 8, 8)),
    (Rect::new(32, 8, 8, 8), Rect::new(BORDER_RIGHT_X, 0, 8, 8)),
    (Rect::new(40, 8, 8, 8), Rect::new(BORDER_RIGHT_X, BORDER_BOTTOM_Y, 8, 8)),
];

/// Static stats labels and their screen positions.
pub const LABELS: [(&str, i32, i32); 4] = [
    ("SCORE:", 8, 192),
    ("TIME :", 8, 200),
    ("LEVEL:", 176, 192),
    ("LIVES:", 176, 200),
];

/// Where a stats number is printed and how many digits it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberField {
    pub x: i32,
    pub y: i32,
    pub digits: u8,
}

pub const SCORE_FIELD: NumberField = NumberField { x: 64, y: 192, digits: 8 };
pub const TIME_FIELD: NumberField = NumberField { x: 64, y: 200, digits: 4 };
pub const LEVEL_FIELD: NumberField = NumberField { x: 232, y: 192, digits: 2 };
pub const LIVES_FIELD: NumberField = NumberField { x: 232, y: 200, digits: 2 };

impl NumberField {
    /// Screen area covered by the field.
    pub fn area(&self) -> Rect {
        Rect::new(self.x, self.y, GLYPH * self.digits as i32, GLYPH)
    }
}

/// Source rect of a level tile code.
pub fn tile_src(code: u8) -> Rect {
    let c = code as i32;
    Rect::new((c % 16) * TILE_SIZE, (c / 16) * TILE_SIZE + 16, TILE_SIZE, TILE_SIZE)
}

/// Source rect for a tile; same as [`tile_src`] on its code.
pub fn tile_src_for(tile: Tile) -> Rect {
    tile_src(tile.code())
}

/// Screen rect of grid cell `(x, y)`.
pub fn cell_dst(x: i32, y: i32) -> Rect {
    Rect::new(
        x * TILE_SIZE + PLAYFIELD_ORIGIN,
        y * TILE_SIZE + PLAYFIELD_ORIGIN,
        TILE_SIZE,
        TILE_SIZE,
    )
}

/// Source rect of a 16x16 object sprite at sheet offset `(sx, sy)`.
pub fn sprite_src(sx: i32, sy: i32) -> Rect {
    Rect::new(sx, sy, TILE_SIZE, TILE_SIZE)
}

/// Glyph source for a font character; None for characters without a glyph.
pub fn glyph_src(ch: char) -> Option<Rect> {
    match ch {
        ':' => Some(Rect::new(128, 8, GLYPH, GLYPH)),
        'A'..='Z' => {
            let i = ch as i32 - 'A' as i32;
            Some(Rect::new(i * GLYPH + 48, 0, GLYPH, GLYPH))
        }
        '0'..='9' => Some(digit_src(ch as u8 - b'0')),
        _ => None,
    }
}

pub fn digit_src(d: u8) -> Rect {
    Rect::new((d % 10) as i32 * GLYPH + 48, 8, GLYPH, GLYPH)
}
