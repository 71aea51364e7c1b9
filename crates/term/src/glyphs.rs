//! Pattern sheet to character art
//!
//! The terminal draws every 8x8 pixel block of the pattern sheet as two
//! character cells. Font glyphs and border pieces map to single characters;
//! 16x16 tiles and sprites map to 4x2 pieces of character art.

use crate::fb::{Cell, CellStyle, Rgb};

/// Character cells per 8 pixel block, horizontally
pub const CELLS_PER_BLOCK: i32 = 2;

/// Pixel edge of one block
pub const BLOCK: i32 = 8;

const TEXT: CellStyle = CellStyle::fg(Rgb::new(230, 230, 230));
const DIGITS: CellStyle = CellStyle::fg(Rgb::new(255, 220, 90)).bold();
const BORDER: CellStyle = CellStyle::fg(Rgb::new(90, 120, 220));
const CREATURE: CellStyle = CellStyle::fg(Rgb::new(255, 235, 60)).bold();

/// 16x16 art as two rows of four cells.
struct Art {
    rows: [&'static str; 2],
    style: CellStyle,
}

const fn art(top: &'static str, bottom: &'static str, fg: Rgb) -> Art {
    Art {
        rows: [top, bottom],
        style: CellStyle::fg(fg),
    }
}

/// Level tile art by tile code 0..=15.
const TILES: [Art; 16] = [
    art("    ", "    ", Rgb::new(0, 0, 0)),
    art(" ·· ", " ·· ", Rgb::new(240, 200, 120)),
    art("████", "████", Rgb::new(60, 90, 200)),
    art("▟██▙", "▜██▛", Rgb::new(150, 150, 150)),
    art(" ▄▄ ", "▐██▌", Rgb::new(230, 50, 50)),
    art("╭$$╮", "╰$$╯", Rgb::new(255, 200, 0)),
    art("◢◣◢◣", "◥◤◥◤", Rgb::new(210, 80, 230)),
    art("┌+T┐", "└──┘", Rgb::new(80, 220, 220)),
    art("▲▲▲▲", "▼▼▼▼", Rgb::new(120, 230, 120)),
    art("♥  ♥", " ♥♥ ", Rgb::new(255, 110, 170)),
    art("*  *", " ** ", Rgb::new(150, 200, 255)),
    art("┏━━┓", "┗━━┛", Rgb::new(190, 130, 70)),
    art("╳╳╳╳", "╳╳╳╳", Rgb::new(255, 40, 40)),
    art("<oo>", " ▀▀ ", Rgb::new(255, 140, 0)),
    art("<oo>", " ▀▀ ", Rgb::new(255, 140, 0)),
    art("░░░░", "░░░░", Rgb::new(120, 120, 120)),
];

const DECOR: Art = art("░░░░", "░░░░", Rgb::new(120, 120, 120));

/// Creature art by facing row (left, right, up, down) and leg phase.
const CREATURES: [[[&str; 2]; 2]; 4] = [
    [["<@@ ", " /\\ "], ["<@@ ", " || "]],
    [[" @@>", " /\\ "], [" @@>", " || "]],
    [["^@@^", " /\\ "], ["^@@^", " || "]],
    [[" @@ ", "v/\\v"], [" @@ ", "v||v"]],
];

/// First and last sheet rows holding creature frames
const CREATURE_ROWS: std::ops::Range<i32> = 32..96;

fn pick(row: &str, half: i32) -> [char; 2] {
    let mut chars = row.chars().skip((half * 2) as usize);
    let a = chars.next().unwrap_or(' ');
    let b = chars.next().unwrap_or(' ');
    [a, b]
}

fn pair(chars: [char; 2], style: CellStyle) -> [Cell; 2] {
    [Cell::new(chars[0], style), Cell::new(chars[1], style)]
}

/// Font and border block in the top 16 sheet rows.
fn header_block(sx: i32, sy: i32) -> [Cell; 2] {
    let row = sy / BLOCK;
    match (sx, row) {
        (0..=7, _) => pair(['║', ' '], BORDER),
        (8..=15, _) => pair([' ', '║'], BORDER),
        (16..=31, _) => pair(['═', '═'], BORDER),
        (32..=39, 0) => pair(['╔', '═'], BORDER),
        (40..=47, 0) => pair(['╚', '═'], BORDER),
        (32..=39, _) => pair(['═', '╗'], BORDER),
        (40..=47, _) => pair(['═', '╝'], BORDER),
        (128..=135, 1) => pair([':', ' '], TEXT),
        (48..=127, 1) => {
            let digit = ((sx - 48) / BLOCK) as u8;
            pair([(b'0' + digit) as char, ' '], DIGITS)
        }
        (48..=255, 0) => {
            let letter = ((sx - 48) / BLOCK) as u8;
            if letter < 26 {
                pair([(b'A' + letter) as char, ' '], TEXT)
            } else {
                pair([' ', ' '], TEXT)
            }
        }
        _ => pair([' ', ' '], TEXT),
    }
}

/// Two cells for the 8x8 sheet block whose top-left is `(sx, sy)`.
pub fn block_cells(sx: i32, sy: i32) -> [Cell; 2] {
    if sy < 16 {
        return header_block(sx, sy);
    }

    // Which half of the 16x16 cell this block is.
    let half_x = (sx % 16) / BLOCK;
    let half_y = ((sy - 16) % 16) / BLOCK;

    if CREATURE_ROWS.contains(&sy) {
        let facing = ((sy - CREATURE_ROWS.start) / 16) as usize;
        let phase = ((sx / 16) % 2) as usize;
        let rows = CREATURES[facing.min(3)][phase];
        return pair(pick(rows[half_y as usize], half_x), CREATURE);
    }

    let code = (sx / 16) + ((sy - 16) / 16) * 16;
    let art = usize::try_from(code)
        .ok()
        .and_then(|c| TILES.get(c))
        .unwrap_or(&DECOR);
    pair(pick(art.rows[half_y as usize], half_x), art.style)
}
