use crate::types::{
    ANIMATION_INTERVAL_US, DEFAULT_FREEZE_FRAMES, DEFAULT_TIME_BONUS, PERFORMANCE_TILE_MOVE_US,
    STANDARD_TILE_MOVE_US,
};

/// Tuning the simulation needs. Built from the engine's game configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Duration of one tile of movement
    pub tile_move_us: u64,
    /// Wall-clock interval between animation frames
    pub anim_interval_us: u64,
    /// Seconds granted by a time-bonus tile
    pub time_bonus: u32,
    /// Ticks the freeze-enemies item lasts
    pub freeze_frames: u32,
}

impl SimConfig {
    pub fn standard() -> Self {
        Self {
            tile_move_us: STANDARD_TILE_MOVE_US,
            anim_interval_us: ANIMATION_INTERVAL_US,
            time_bonus: DEFAULT_TIME_BONUS,
            freeze_frames: DEFAULT_FREEZE_FRAMES,
        }
    }

    pub fn performance() -> Self {
        Self {
            tile_move_us: PERFORMANCE_TILE_MOVE_US,
            ..Self::standard()
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::standard()
    }
}
