//! Built-in level set used by `--demo` and the tests.

use crate::level::LevelRecord;

const LEVEL_1: [&str; 11] = [
    "###############",
    "#P....o.....F.#",
    "#.###.#.###...#",
    "#.....#...o...#",
    "#.F.#...#.#.F.#",
    "#...#.K.#.#...#",
    "#.o.....T.....#",
    "#.#.###.#.###.#",
    "#.#..+..#..$..#",
    "#..F..L.T..S..#",
    "###############",
];

const LEVEL_2: [&str; 11] = [
    "###############",
    "#P.o......o..F#",
    "#.. .......  .#",
    "#.. ...#...  .#",
    "#.#########.#.#",
    "#..F...V....#.#",
    "#.#.#####.#.#.#",
    "#.#...Z...#...#",
    "#.#####.#####.#",
    "#F....X....L.F#",
    "###############",
];

const LEVEL_3: [&str; 11] = [
    "###############",
    "#P..K  ...T..F#",
    "#.###.###.###.#",
    "#...o.....o...#",
    "#.#.#.#S#.#.#.#",
    "#F..+...$...L.#",
    "#.###.###.###.#",
    "#..T.......H..#",
    "#.###.#.#.###.#",
    "#F....#o#....F#",
    "###############",
];

pub(crate) fn records() -> Vec<LevelRecord> {
    vec![
        LevelRecord::from_map(100, &LEVEL_1),
        LevelRecord::from_map(120, &LEVEL_2),
        LevelRecord::from_map(150, &LEVEL_3),
    ]
}
