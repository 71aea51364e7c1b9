//! Level outcomes, lives and whole-game runs through the engine.

use anyhow::Result;

use fruitland::core::{
    LevelOutcome, LevelRecord, LevelStore, Session, SessionState, SimConfig,
};
use fruitland::engine::{Game, GameConfig, InputFrame, IntentProvider, ManualClock, Tier};
use fruitland::render::RecordingTarget;
use fruitland::types::{ControlEvent, Direction, DirectionalIntent, DrawOp};

struct Scripted {
    frames: Vec<InputFrame>,
    then: InputFrame,
}

impl Scripted {
    fn new(frames: Vec<InputFrame>, then: InputFrame) -> Self {
        Self { frames, then }
    }
}

impl IntentProvider for Scripted {
    fn poll(&mut self, _now_us: u64) -> Result<InputFrame> {
        if self.frames.is_empty() {
            Ok(self.then.clone())
        } else {
            Ok(self.frames.remove(0))
        }
    }
}

fn store(levels: &[&[&str]]) -> LevelStore {
    let records: Vec<LevelRecord> = levels
        .iter()
        .map(|rows| LevelRecord::from_map(100, rows))
        .collect();
    LevelStore::from_bytes(LevelRecord::encode_all(&records), levels.len() as u8)
}

fn config(levels: u8) -> GameConfig {
    GameConfig {
        level_count: levels,
        ..GameConfig::default()
    }
}

#[test]
fn time_runs_out_and_costs_a_life() {
    let mut s = Session::new(store(&[&["P.F"]]), SimConfig::standard(), 1, 3, 0).unwrap();
    let budget = s.world().counters.time as u64;
    assert_eq!(budget, 150);

    let mut outcome = None;
    for sec in 1..=budget {
        outcome = s.tick(DirectionalIntent::NONE, sec * 1_000_000).unwrap().outcome;
        if outcome.is_some() {
            break;
        }
    }
    assert_eq!(outcome, Some(LevelOutcome::TimeExpired));
    assert_eq!(s.world().counters.lives, 2);
    assert_eq!(s.world().counters.time, 150);
}

#[test]
fn death_trap_ends_the_level() {
    let mut s = Session::new(store(&[&["PXF"]]), SimConfig::standard(), 1, 3, 0).unwrap();
    s.tick(DirectionalIntent::tap(Direction::Right), 0).unwrap();
    let tick = s.tick(DirectionalIntent::NONE, 120_000).unwrap();
    assert_eq!(tick.outcome, Some(LevelOutcome::PlayerDead));
    assert_eq!(s.world().counters.lives, 2);
}

#[test]
fn debug_keys_walk_the_level_range() {
    let mut s = Session::new(LevelStore::demo(), SimConfig::standard(), 1, 3, 0).unwrap();
    s.handle_control(ControlEvent::NextLevel);
    s.tick(DirectionalIntent::NONE, 1).unwrap();
    assert_eq!(s.level(), 2);

    s.handle_control(ControlEvent::PreviousLevel);
    s.tick(DirectionalIntent::NONE, 2).unwrap();
    assert_eq!(s.level(), 1);
    assert_eq!(s.state(), SessionState::Playing);
}

#[test]
fn config_from_json_drives_the_game() {
    let text = serde_json::json!({
        "tier": "performance",
        "tile_move_us": 100000,
        "frame_period_us": 16666,
        "start_lives": 5,
        "level_count": 1
    })
    .to_string();
    let config = GameConfig::from_json(&text).unwrap();
    assert_eq!(config.tier, Tier::Performance);

    let game = Game::new(config, store(&[&["P.F"]]), 0).unwrap();
    assert_eq!(game.session().world().counters.lives, 5);
    assert_eq!(game.session().world().config.tile_move_us, 100_000);
}

#[test]
fn escape_until_game_over() {
    let mut game = Game::new(config(1), store(&[&["P.F"]]), 0).unwrap();
    let clock = ManualClock::new(0);
    let mut input = Scripted::new(Vec::new(), InputFrame::control(ControlEvent::Escape));
    let mut target = RecordingTarget::default();

    let summary = game.run(&clock, &mut input, &mut target).unwrap();
    assert_eq!(summary.state, SessionState::GameOver);
    assert_eq!(summary.ticks, 3);
    assert!(clock.slept_us() > 0);
}

#[test]
fn clearing_every_level_completes_the_run() {
    let levels: &[&[&str]] = &[&["PF"], &["P.F"]];
    let mut game = Game::new(config(2), store(levels), 0).unwrap();
    let clock = ManualClock::new(0);
    let mut input = Scripted::new(
        Vec::new(),
        InputFrame::intent(DirectionalIntent::held(Direction::Right)),
    );
    let mut target = RecordingTarget::default();

    let summary = game.run(&clock, &mut input, &mut target).unwrap();
    assert_eq!(summary.state, SessionState::Completed);
    assert_eq!(summary.level, 2);
    assert!(summary.score >= 2 * 500 + 10);
    assert_eq!(target.last.last(), Some(&DrawOp::Present));
}

#[test]
fn threaded_run_quits_cleanly() {
    let mut game = Game::new(config(1), store(&[&["P......F"]]), 0).unwrap();
    let clock = ManualClock::new(0);
    let mut frames = vec![InputFrame::default(); 20];
    frames.push(InputFrame::control(ControlEvent::Quit));
    let mut input = Scripted::new(frames, InputFrame::default());
    let mut target = RecordingTarget::default();

    let summary = game.run_threaded(&clock, &mut input, &mut target).unwrap();
    assert_eq!(summary.state, SessionState::Playing);
    assert_eq!(summary.ticks, 21);
    assert!(target.frames >= 1);
    assert_eq!(summary.frames, target.frames as u64);
}
