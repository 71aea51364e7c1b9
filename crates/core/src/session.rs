//! Session state machine - level loading and level outcomes
//!
//! ```text
//! LoadLevel -> Playing -> {Cleared | PlayerDead | TimeExpired | LevelChange} -> LoadLevel(next)
//! ```
//!
//! The session is over when lives reach zero or the final level is cleared.
//! A level change request preempts the other outcomes and keeps lives and
//! score untouched.

use crate::config::SimConfig;
use crate::level::{LevelError, LevelStore};
use crate::types::{ControlEvent, DirectionalIntent, CLEAR_TIME_MULTIPLIER};
use crate::world::{TickReport, WorldState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    /// Lives ran out
    GameOver,
    /// The final level was cleared
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    Cleared,
    PlayerDead,
    TimeExpired,
    LevelChange { to: u8 },
}

/// What one session tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionTick {
    pub world: TickReport,
    pub outcome: Option<LevelOutcome>,
}

#[derive(Debug, Clone)]
pub struct Session {
    store: LevelStore,
    world: WorldState,
    state: SessionState,
    pending_change: Option<u8>,
}

impl Session {
    /// Load `start_level` and start playing.
    pub fn new(
        store: LevelStore,
        config: SimConfig,
        start_level: u8,
        lives: u32,
        now_us: u64,
    ) -> Result<Self, LevelError> {
        let mut world = WorldState::new(config);
        world.counters.lives = lives;
        let data = store.load_level(start_level)?;
        world.load_level(start_level, data, now_us);
        Ok(Self {
            store,
            world,
            state: SessionState::Playing,
            pending_change: None,
        })
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state != SessionState::Playing
    }

    pub fn level(&self) -> u8 {
        self.world.counters.level
    }

    pub fn level_count(&self) -> u8 {
        self.store.count()
    }

    /// Ask for `level` to be loaded at the end of the current tick.
    ///
    /// Returns false (and changes nothing) when `level` is out of range.
    pub fn request_level(&mut self, level: u8) -> bool {
        if level == 0 || level > self.store.count() {
            return false;
        }
        self.pending_change = Some(level);
        true
    }

    /// Apply a non-directional collaborator event.
    ///
    /// `Quit` is the caller's business and is ignored here.
    pub fn handle_control(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::Escape => self.world.counters.dead = true,
            ControlEvent::PreviousLevel => {
                let level = self.level();
                if level > 1 {
                    self.request_level(level - 1);
                }
            }
            ControlEvent::NextLevel => {
                let level = self.level();
                if level < self.store.count() {
                    self.request_level(level + 1);
                }
            }
            ControlEvent::Quit => {}
        }
    }

    /// Run one simulation tick and resolve the level outcome, if any.
    pub fn tick(
        &mut self,
        intent: DirectionalIntent,
        now_us: u64,
    ) -> Result<SessionTick, LevelError> {
        if self.is_over() {
            return Ok(SessionTick::default());
        }

        let world = self.world.tick(intent, now_us);
        let outcome = self.outcome();
        if let Some(outcome) = outcome {
            self.apply(outcome, now_us)?;
        }
        Ok(SessionTick { world, outcome })
    }

    /// Level outcome for the current state; an external change wins.
    pub fn outcome(&self) -> Option<LevelOutcome> {
        let c = &self.world.counters;
        if let Some(to) = self.pending_change {
            Some(LevelOutcome::LevelChange { to })
        } else if c.dead {
            Some(LevelOutcome::PlayerDead)
        } else if c.time == 0 {
            Some(LevelOutcome::TimeExpired)
        } else if c.fruit == 0 {
            Some(LevelOutcome::Cleared)
        } else {
            None
        }
    }

    fn apply(&mut self, outcome: LevelOutcome, now_us: u64) -> Result<(), LevelError> {
        log::info!("level {} ended: {:?}", self.level(), outcome);
        match outcome {
            LevelOutcome::LevelChange { to } => {
                self.pending_change = None;
                self.load(to, now_us)
            }
            LevelOutcome::PlayerDead | LevelOutcome::TimeExpired => {
                let c = &mut self.world.counters;
                c.lives = c.lives.saturating_sub(1);
                if c.lives == 0 {
                    self.state = SessionState::GameOver;
                    log::info!("game over with score {}", c.score);
                    return Ok(());
                }
                self.load(self.level(), now_us)
            }
            LevelOutcome::Cleared => {
                let c = &mut self.world.counters;
                c.score += c.time * CLEAR_TIME_MULTIPLIER;
                let count = self.store.count();
                match self.level().checked_add(1).filter(|&next| next <= count) {
                    Some(next) => self.load(next, now_us),
                    None => {
                        self.state = SessionState::Completed;
                        log::info!("all levels cleared with score {}", self.world.counters.score);
                        Ok(())
                    }
                }
            }
        }
    }

    fn load(&mut self, level: u8, now_us: u64) -> Result<(), LevelError> {
        let data = self.store.load_level(level)?;
        self.world.load_level(level, data, now_us);
        Ok(())
    }
}
