//! Directional intent source for terminal environments.
//!
//! Terminals often send no key-release events, only repeated presses while a
//! key is down. A key counts as held until it is released or no press has
//! arrived for the release timeout.

use crate::types::{AxisHeld, Direction, DirectionalIntent};

// Longer than the typical terminal auto-repeat interval, short enough that a
// tap does not read as a hold.
const DEFAULT_KEY_RELEASE_TIMEOUT_US: u64 = 150_000;

/// Turns key presses and releases into one [`DirectionalIntent`] per tick.
///
/// A press is delivered exactly once through [`IntentSource::take`] even if
/// the key is released before the next tick. The most recent press wins.
#[derive(Debug, Clone)]
pub struct IntentSource {
    pending: Option<Direction>,
    held: Option<Direction>,
    last_key_us: u64,
    key_release_timeout_us: u64,
}

impl IntentSource {
    pub fn new() -> Self {
        Self {
            pending: None,
            held: None,
            last_key_us: 0,
            key_release_timeout_us: DEFAULT_KEY_RELEASE_TIMEOUT_US,
        }
    }

    pub fn with_key_release_timeout_us(mut self, timeout_us: u64) -> Self {
        self.key_release_timeout_us = timeout_us;
        self
    }

    pub fn key_release_timeout_us(&self) -> u64 {
        self.key_release_timeout_us
    }

    pub fn press(&mut self, dir: Direction, now_us: u64) {
        self.last_key_us = now_us;
        if self.held != Some(dir) {
            self.pending = Some(dir);
            self.held = Some(dir);
        }
    }

    /// Terminal auto-repeat: keeps the key held without a new one-shot.
    pub fn repeat(&mut self, dir: Direction, now_us: u64) {
        if self.held == Some(dir) {
            self.last_key_us = now_us;
        } else {
            self.press(dir, now_us);
        }
    }

    pub fn release(&mut self, dir: Direction) {
        if self.held == Some(dir) {
            self.held = None;
        }
    }

    pub fn held(&self) -> Option<Direction> {
        self.held
    }

    /// Intent for this tick. The one-shot press is cleared once taken; a held
    /// direction keeps being reported until released or timed out.
    pub fn take(&mut self, now_us: u64) -> DirectionalIntent {
        if self.held.is_some()
            && now_us.saturating_sub(self.last_key_us) > self.key_release_timeout_us
        {
            self.held = None;
        }

        let direction = self.pending.take().or(self.held);
        let held = match self.held {
            Some(d) if d.is_horizontal() => AxisHeld {
                horizontal: true,
                vertical: false,
            },
            Some(_) => AxisHeld {
                horizontal: false,
                vertical: true,
            },
            None => AxisHeld::default(),
        };
        DirectionalIntent { direction, held }
    }

    pub fn reset(&mut self) {
        self.pending = None;
        self.held = None;
    }
}

impl Default for IntentSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_is_delivered_once() {
        let mut src = IntentSource::new();
        src.press(Direction::Left, 0);
        src.release(Direction::Left);

        let first = src.take(10);
        assert_eq!(first.direction, Some(Direction::Left));
        assert!(!first.is_held(Direction::Left));

        assert_eq!(src.take(20), DirectionalIntent::NONE);
    }

    #[test]
    fn held_key_keeps_reporting_until_timeout() {
        let mut src = IntentSource::new().with_key_release_timeout_us(50_000);
        src.press(Direction::Up, 0);
        assert!(src.take(10_000).is_held(Direction::Up));
        assert!(src.take(40_000).is_held(Direction::Up));

        // No auto-repeat arrived: treated as released.
        assert_eq!(src.take(60_000), DirectionalIntent::NONE);
    }

    #[test]
    fn repeats_extend_the_hold() {
        let mut src = IntentSource::new().with_key_release_timeout_us(50_000);
        src.press(Direction::Right, 0);
        src.take(0);
        src.repeat(Direction::Right, 40_000);
        let intent = src.take(80_000);
        assert!(intent.is_held(Direction::Right));
    }

    #[test]
    fn most_recent_press_wins() {
        let mut src = IntentSource::new();
        src.press(Direction::Left, 0);
        src.press(Direction::Down, 5);
        let intent = src.take(10);
        assert_eq!(intent.direction, Some(Direction::Down));
        assert!(intent.held.vertical);
        assert!(!intent.held.horizontal);
    }

    #[test]
    fn default_key_release_timeout_is_non_zero() {
        assert!(IntentSource::new().key_release_timeout_us() > 0);
    }
}
