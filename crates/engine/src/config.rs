//! Game configuration - tier defaults, JSON files, and environment overrides

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use fruitland_core::SimConfig;
use fruitland_types::{
    ANIMATION_INTERVAL_US, DEFAULT_FREEZE_FRAMES, DEFAULT_LEVEL_COUNT, DEFAULT_TIME_BONUS,
    PERFORMANCE_FRAME_US, PERFORMANCE_TILE_MOVE_US, STANDARD_FRAME_US, STANDARD_TILE_MOVE_US,
    START_LIVES,
};

/// Default FPS statistics window: 10 seconds
pub const DEFAULT_STATS_WINDOW_US: u64 = 10_000_000;

/// Hardware tier; picks the frame period and tile move duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// 30 FPS, 120 ms per tile
    #[default]
    Standard,
    /// 60 FPS, 100 ms per tile
    Performance,
}

impl Tier {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Tier::Standard),
            "performance" => Some(Tier::Performance),
            _ => None,
        }
    }

    pub fn frame_period_us(&self) -> u64 {
        match self {
            Tier::Standard => STANDARD_FRAME_US,
            Tier::Performance => PERFORMANCE_FRAME_US,
        }
    }

    pub fn tile_move_us(&self) -> u64 {
        match self {
            Tier::Standard => STANDARD_TILE_MOVE_US,
            Tier::Performance => PERFORMANCE_TILE_MOVE_US,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tier: Tier,
    pub frame_period_us: u64,
    pub tile_move_us: u64,
    pub anim_interval_us: u64,
    pub level_count: u8,
    pub start_level: u8,
    pub start_lives: u32,
    pub time_bonus: u32,
    pub freeze_frames: u32,
    /// Drop every third stats-only frame
    pub frame_skip: bool,
    pub stats_window_us: u64,
    /// Level file; None means the built-in demo levels
    pub levels_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_tier(Tier::Standard)
    }
}

impl GameConfig {
    pub fn for_tier(tier: Tier) -> Self {
        Self {
            tier,
            frame_period_us: tier.frame_period_us(),
            tile_move_us: tier.tile_move_us(),
            anim_interval_us: ANIMATION_INTERVAL_US,
            level_count: DEFAULT_LEVEL_COUNT,
            start_level: 1,
            start_lives: START_LIVES,
            time_bonus: DEFAULT_TIME_BONUS,
            freeze_frames: DEFAULT_FREEZE_FRAMES,
            frame_skip: true,
            stats_window_us: DEFAULT_STATS_WINDOW_US,
            levels_path: None,
        }
    }

    /// Switch tier, resetting the tier-dependent timings.
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self.frame_period_us = tier.frame_period_us();
        self.tile_move_us = tier.tile_move_us();
        self
    }

    /// Read a JSON config file. Missing fields take standard-tier defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Build from the environment.
    ///
    /// - `FRUITLAND_CONFIG`: JSON file to start from
    /// - `FRUITLAND_TIER`: `standard` or `performance`
    /// - `FRUITLAND_LEVELS`: level file path
    /// - `FRUITLAND_START_LEVEL`: 1-based start level
    ///
    /// Unparseable values are ignored; an unreadable config file is an error.
    pub fn from_env() -> Result<Self> {
        use std::env;

        let mut config = match non_empty(env::var("FRUITLAND_CONFIG").ok()) {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(tier) = env::var("FRUITLAND_TIER").ok().and_then(|s| Tier::parse(&s)) {
            config = config.with_tier(tier);
        }
        if let Some(path) = non_empty(env::var("FRUITLAND_LEVELS").ok()) {
            config.levels_path = Some(PathBuf::from(path));
        }
        if let Some(level) = env::var("FRUITLAND_START_LEVEL")
            .ok()
            .and_then(|s| s.trim().parse().ok())
        {
            config.start_level = level;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.frame_period_us > 0, "frame_period_us must be positive");
        anyhow::ensure!(self.tile_move_us > 0, "tile_move_us must be positive");
        anyhow::ensure!(self.anim_interval_us > 0, "anim_interval_us must be positive");
        anyhow::ensure!(self.stats_window_us > 0, "stats_window_us must be positive");
        anyhow::ensure!(self.level_count > 0, "level_count must be at least 1");
        anyhow::ensure!(self.start_lives > 0, "start_lives must be at least 1");
        Ok(())
    }

    /// The subset the simulation needs.
    pub fn sim(&self) -> SimConfig {
        SimConfig {
            tile_move_us: self.tile_move_us,
            anim_interval_us: self.anim_interval_us,
            time_bonus: self.time_bonus,
            freeze_frames: self.freeze_frames,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_pick_timings() {
        let standard = GameConfig::for_tier(Tier::Standard);
        assert_eq!(standard.frame_period_us, 33_333);
        assert_eq!(standard.tile_move_us, 120_000);

        let fast = GameConfig::for_tier(Tier::Performance);
        assert_eq!(fast.frame_period_us, 16_666);
        assert_eq!(fast.tile_move_us, 100_000);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{"tier":"performance","start_level":3}"#).unwrap();
        assert_eq!(config.tier, Tier::Performance);
        assert_eq!(config.start_level, 3);
        assert_eq!(config.level_count, 25);
        assert!(config.frame_skip);
        // Fields absent from the file come from the standard defaults.
        assert_eq!(config.tile_move_us, 120_000);
    }

    #[test]
    fn zero_period_is_rejected() {
        assert!(GameConfig::from_json(r#"{"frame_period_us":0}"#).is_err());
    }

    #[test]
    fn sim_config_mirrors_fields() {
        let config = GameConfig::for_tier(Tier::Performance);
        let sim = config.sim();
        assert_eq!(sim.tile_move_us, 100_000);
        assert_eq!(sim.time_bonus, 50);
        assert_eq!(sim.freeze_frames, 300);
    }

    #[test]
    fn tier_names_parse() {
        assert_eq!(Tier::parse(" Performance "), Some(Tier::Performance));
        assert_eq!(Tier::parse("standard"), Some(Tier::Standard));
        assert_eq!(Tier::parse("turbo"), None);
    }

    // All environment cases live in one test so parallel tests never race on the variables.
    #[test]
    fn env_overrides_and_validation() {
        use std::env;

        env::set_var("FRUITLAND_TIER", "performance");
        env::set_var("FRUITLAND_START_LEVEL", "4");
        env::set_var("FRUITLAND_LEVELS", " levels.dat ");
        let config = GameConfig::from_env().unwrap();
        assert_eq!(config.tier, Tier::Performance);
        assert_eq!(config.frame_period_us, 16_666);
        assert_eq!(config.start_level, 4);
        assert_eq!(config.levels_path, Some(PathBuf::from("levels.dat")));

        env::set_var("FRUITLAND_START_LEVEL", "four");
        assert_eq!(GameConfig::from_env().unwrap().start_level, 1);

        let path = env::temp_dir().join(format!("fruitland-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"tile_move_us":0}"#).unwrap();
        env::set_var("FRUITLAND_CONFIG", &path);
        let err = GameConfig::from_env().unwrap_err();
        assert!(format!("{err:#}").contains("tile_move_us must be positive"));

        env::set_var("FRUITLAND_CONFIG", env::temp_dir().join("fruitland-missing.json"));
        assert!(GameConfig::from_env().is_err());

        let _ = std::fs::remove_file(&path);
        for key in [
            "FRUITLAND_CONFIG",
            "FRUITLAND_TIER",
            "FRUITLAND_START_LEVEL",
            "FRUITLAND_LEVELS",
        ] {
            env::remove_var(key);
        }
    }
}
