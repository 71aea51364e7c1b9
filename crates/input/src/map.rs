//! Key mapping from terminal events to directions and control events.

use crate::types::{ControlEvent, Direction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Movement keys: arrows, WASD, and hjkl.
pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L') => Some(Direction::Right),
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k' | 'K') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J') => Some(Direction::Down),
        _ => None,
    }
}

/// Non-directional keys: quit, escape (forfeit a life), and the F2/F3
/// level-change debug keys.
pub fn control_for_key(key: KeyEvent) -> Option<ControlEvent> {
    if should_quit(key) {
        return Some(ControlEvent::Quit);
    }
    match key.code {
        KeyCode::Esc => Some(ControlEvent::Escape),
        KeyCode::F(2) => Some(ControlEvent::PreviousLevel),
        KeyCode::F(3) => Some(ControlEvent::NextLevel),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(direction_for_key(KeyCode::Left), Some(Direction::Left));
        assert_eq!(direction_for_key(KeyCode::Char('D')), Some(Direction::Right));
        assert_eq!(direction_for_key(KeyCode::Char('k')), Some(Direction::Up));
        assert_eq!(direction_for_key(KeyCode::Down), Some(Direction::Down));
        assert_eq!(direction_for_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            control_for_key(KeyEvent::from(KeyCode::Esc)),
            Some(ControlEvent::Escape)
        );
        assert_eq!(
            control_for_key(KeyEvent::from(KeyCode::F(2))),
            Some(ControlEvent::PreviousLevel)
        );
        assert_eq!(
            control_for_key(KeyEvent::from(KeyCode::F(3))),
            Some(ControlEvent::NextLevel)
        );
        assert_eq!(control_for_key(KeyEvent::from(KeyCode::F(4))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert_eq!(
            control_for_key(KeyEvent::from(KeyCode::Char('Q'))),
            Some(ControlEvent::Quit)
        );
    }
}
