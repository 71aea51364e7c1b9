//! Frame clock - fixed-interval pacing plus rolling FPS statistics
//!
//! Pacing never catches up: a late tick simply starts the next one
//! immediately. Statistics are observational only.

use crate::clock::Clock;

/// Remaining time at or below this is not worth a sleep.
pub const MIN_SLEEP_US: u64 = 1_000;

/// Statistics for one closed window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsReport {
    pub fps: f64,
    pub frames: u32,
    pub window_us: u64,
    pub avg_render_us: u64,
    pub min_render_us: u64,
    pub max_render_us: u64,
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    period_us: u64,
    tick_start_us: u64,
    window_us: u64,
    window_start_us: u64,
    frames: u32,
    render_total_us: u64,
    render_min_us: u64,
    render_max_us: u64,
}

impl FrameClock {
    pub fn new(period_us: u64, window_us: u64, now_us: u64) -> Self {
        Self {
            period_us,
            tick_start_us: now_us,
            window_us,
            window_start_us: now_us,
            frames: 0,
            render_total_us: 0,
            render_min_us: u64::MAX,
            render_max_us: 0,
        }
    }

    pub fn period_us(&self) -> u64 {
        self.period_us
    }

    /// Time left in the current tick's period.
    pub fn remaining_us(&self, now_us: u64) -> u64 {
        let elapsed = now_us.saturating_sub(self.tick_start_us);
        self.period_us.saturating_sub(elapsed)
    }

    /// Wait out the rest of the period and start the next tick.
    ///
    /// Returns the microseconds slept.
    pub fn pace(&mut self, clock: &impl Clock) -> u64 {
        let remaining = self.remaining_us(clock.now_us());
        let slept = if remaining > MIN_SLEEP_US {
            clock.sleep_us(remaining);
            remaining
        } else {
            0
        };
        self.tick_start_us = clock.now_us();
        slept
    }

    /// Record one presented frame; returns a report when a window closes.
    pub fn record_frame(&mut self, render_us: u64, now_us: u64) -> Option<FpsReport> {
        self.frames += 1;
        self.render_total_us += render_us;
        self.render_min_us = self.render_min_us.min(render_us);
        self.render_max_us = self.render_max_us.max(render_us);

        let elapsed = now_us.saturating_sub(self.window_start_us);
        if elapsed < self.window_us {
            return None;
        }

        let report = FpsReport {
            fps: self.frames as f64 * 1_000_000.0 / elapsed as f64,
            frames: self.frames,
            window_us: elapsed,
            avg_render_us: self.render_total_us / self.frames as u64,
            min_render_us: self.render_min_us,
            max_render_us: self.render_max_us,
        };
        log::info!(
            "fps {:.1} over {} frames, render avg {}us min {}us max {}us",
            report.fps,
            report.frames,
            report.avg_render_us,
            report.min_render_us,
            report.max_render_us
        );

        self.window_start_us = now_us;
        self.frames = 0;
        self.render_total_us = 0;
        self.render_min_us = u64::MAX;
        self.render_max_us = 0;
        Some(report)
    }
}
