//! Non-blocking crossterm keyboard polling.

use std::io;
use std::time::Duration;

use arrayvec::ArrayVec;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::handler::IntentSource;
use crate::map::{control_for_key, direction_for_key};
use crate::types::{ControlEvent, DirectionalIntent};

/// Events drained in one poll.
#[derive(Debug, Clone, Default)]
pub struct PolledInput {
    pub intent: DirectionalIntent,
    pub controls: ArrayVec<ControlEvent, 4>,
}

/// Keyboard collaborator: drains pending terminal events once per tick.
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    source: IntentSource,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(source: IntentSource) -> Self {
        Self { source }
    }

    /// Feed one key event.
    pub fn handle_key(&mut self, key: KeyEvent, now_us: u64, out: &mut PolledInput) {
        if let Some(dir) = direction_for_key(key.code) {
            match key.kind {
                KeyEventKind::Press => self.source.press(dir, now_us),
                KeyEventKind::Repeat => self.source.repeat(dir, now_us),
                KeyEventKind::Release => self.source.release(dir),
            }
            return;
        }
        if key.kind == KeyEventKind::Press {
            if let Some(control) = control_for_key(key) {
                let _ = out.controls.try_push(control);
            }
        }
    }

    /// Drain every event already queued, without waiting.
    pub fn poll(&mut self, now_us: u64) -> io::Result<PolledInput> {
        let mut out = PolledInput::default();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key, now_us, &mut out);
            }
        }
        out.intent = self.source.take(now_us);
        Ok(out)
    }
}
