//! Tick orchestration
//!
//! One tick: check the quit flag, consume input, advance the session,
//! snapshot the world, plan the frame, hand it to the renderer, pace.

use anyhow::{Context, Result};
use arrayvec::ArrayVec;

use fruitland_core::{LevelStore, Session, SessionState, SessionTick, WorldSnapshot};
use fruitland_render::{DrawList, FramePlan, RenderPlanner, RenderTarget};
use fruitland_types::{ControlEvent, DirectionalIntent};

use crate::clock::Clock;
use crate::config::GameConfig;
use crate::frame_clock::FrameClock;
use crate::handoff::{FrameHandoff, QuitSignal};

/// Input consumed by one tick.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    pub intent: DirectionalIntent,
    pub controls: ArrayVec<ControlEvent, 4>,
}

impl InputFrame {
    pub fn intent(intent: DirectionalIntent) -> Self {
        Self {
            intent,
            controls: ArrayVec::new(),
        }
    }

    pub fn control(event: ControlEvent) -> Self {
        let mut controls = ArrayVec::new();
        controls.push(event);
        Self {
            intent: DirectionalIntent::NONE,
            controls,
        }
    }
}

/// An input collaborator polled once per tick.
pub trait IntentProvider {
    fn poll(&mut self, now_us: u64) -> Result<InputFrame>;
}

/// What one tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    pub tick: SessionTick,
    pub plan: FramePlan,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// `Playing` when the run was quit
    pub state: SessionState,
    pub score: u32,
    pub level: u8,
    pub ticks: u64,
    pub frames: u64,
}

pub struct Game {
    config: GameConfig,
    session: Session,
    planner: RenderPlanner,
    snapshot: WorldSnapshot,
    draw: DrawList,
    quit: QuitSignal,
}

impl Game {
    pub fn new(config: GameConfig, store: LevelStore, now_us: u64) -> Result<Self> {
        config.validate()?;
        let session = Session::new(
            store,
            config.sim(),
            config.start_level,
            config.start_lives,
            now_us,
        )
        .with_context(|| format!("failed to start at level {}", config.start_level))?;

        Ok(Self {
            planner: RenderPlanner::new(config.frame_skip),
            config,
            session,
            snapshot: WorldSnapshot::default(),
            draw: DrawList::new(),
            quit: QuitSignal::new(),
        })
    }

    /// Load levels from `config.levels_path`, or the demo set when unset.
    pub fn from_config(config: GameConfig, now_us: u64) -> Result<Self> {
        let store = match &config.levels_path {
            Some(path) => LevelStore::open(path, config.level_count)
                .with_context(|| format!("failed to open level file {}", path.display()))?,
            None => LevelStore::demo(),
        };
        Self::new(config, store, now_us)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn quit_signal(&self) -> QuitSignal {
        self.quit.clone()
    }

    /// Draw list of the last planned frame.
    pub fn draw_list(&self) -> &DrawList {
        &self.draw
    }

    /// Run one tick at `now_us`. Allocation-free.
    pub fn tick(&mut self, input: &InputFrame, now_us: u64) -> Result<FrameOutcome> {
        for &event in &input.controls {
            match event {
                ControlEvent::Quit => self.quit.raise(),
                other => self.session.handle_control(other),
            }
        }

        let tick = self.session.tick(input.intent, now_us)?;
        if let Some(item) = tick.world.item {
            log::debug!("item event: {:?}", item);
        }

        self.session.world().snapshot_into(&mut self.snapshot);
        let plan = self.planner.plan(&self.snapshot, &mut self.draw);
        Ok(FrameOutcome { tick, plan })
    }

    fn summary(&self, ticks: u64, frames: u64) -> RunSummary {
        let counters = &self.session.world().counters;
        RunSummary {
            state: self.session.state(),
            score: counters.score,
            level: counters.level,
            ticks,
            frames,
        }
    }

    /// Paced loop on the calling thread until quit or the session ends.
    pub fn run<C, I, R>(&mut self, clock: &C, input: &mut I, target: &mut R) -> Result<RunSummary>
    where
        C: Clock,
        I: IntentProvider,
        R: RenderTarget,
    {
        let mut frame_clock = FrameClock::new(
            self.config.frame_period_us,
            self.config.stats_window_us,
            clock.now_us(),
        );
        let (mut ticks, mut frames) = (0u64, 0u64);

        loop {
            if self.quit.is_raised() {
                break;
            }
            let now = clock.now_us();
            let frame = input.poll(now)?;
            let out = self.tick(&frame, now)?;
            ticks += 1;
            if self.quit.is_raised() {
                break;
            }

            if out.plan.has_output() {
                let started = clock.now_us();
                target.submit(&self.draw).context("render target failed")?;
                let done = clock.now_us();
                frame_clock.record_frame(done.saturating_sub(started), done);
                frames += 1;
            }

            if self.session.is_over() {
                break;
            }
            frame_clock.pace(clock);
        }

        let summary = self.summary(ticks, frames);
        log::info!("run finished: {:?}", summary);
        Ok(summary)
    }

    /// Like [`Game::run`], with rendering on a second thread.
    ///
    /// At most one frame is in flight; frames produced while the renderer is
    /// busy are dropped. A render error stops the loop and is returned.
    pub fn run_threaded<C, I, R>(
        &mut self,
        clock: &C,
        input: &mut I,
        target: &mut R,
    ) -> Result<RunSummary>
    where
        C: Clock,
        I: IntentProvider,
        R: RenderTarget + Send,
    {
        let handoff = FrameHandoff::new();
        let quit = self.quit.clone();

        std::thread::scope(|scope| {
            let renderer = scope.spawn(|| -> Result<u64> {
                let mut frame = DrawList::new();
                let mut frames = 0u64;
                while handoff.take(&mut frame) {
                    if let Err(e) = target.submit(&frame) {
                        quit.raise();
                        return Err(e.context("render thread failed"));
                    }
                    frames += 1;
                }
                Ok(frames)
            });

            let result = self.produce(clock, input, &handoff);
            handoff.close();
            let rendered = match renderer.join() {
                Ok(r) => r,
                Err(_) => Err(anyhow::anyhow!("render thread panicked")),
            };

            let ticks = result?;
            let frames = rendered?;
            let summary = self.summary(ticks, frames);
            log::info!("threaded run finished: {:?}", summary);
            Ok(summary)
        })
    }

    fn produce<C, I>(&mut self, clock: &C, input: &mut I, handoff: &FrameHandoff) -> Result<u64>
    where
        C: Clock,
        I: IntentProvider,
    {
        let mut frame_clock = FrameClock::new(
            self.config.frame_period_us,
            self.config.stats_window_us,
            clock.now_us(),
        );
        let mut ticks = 0u64;
        let mut dropped = 0u64;

        loop {
            if self.quit.is_raised() {
                break;
            }
            let now = clock.now_us();
            let frame = input.poll(now)?;
            let out = self.tick(&frame, now)?;
            ticks += 1;
            if self.quit.is_raised() {
                break;
            }

            if out.plan.has_output() {
                let started = clock.now_us();
                if handoff.publish(&self.draw) {
                    let done = clock.now_us();
                    frame_clock.record_frame(done.saturating_sub(started), done);
                } else {
                    // The renderer missed this frame; redraw everything next time.
                    self.planner.force_full();
                    dropped += 1;
                }
            }

            if self.session.is_over() {
                break;
            }
            frame_clock.pace(clock);
        }

        if dropped > 0 {
            log::debug!("{} frames dropped at the render hand-off", dropped);
        }
        Ok(ticks)
    }
}
