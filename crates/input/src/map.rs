//! Key mapping from terminal events to app actions.

use crate::types::{AppAction, Direction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Movement direction for a key, if it is a movement key.
pub fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Direction::Up)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Direction::Right)
        }
        _ => None,
    }
}

/// Map keyboard input to app actions.
pub fn handle_key_event(key: KeyEvent) -> Option<AppAction> {
    if should_quit(key) {
        return Some(AppAction::Quit);
    }
    if let Some(dir) = direction_for(key.code) {
        return Some(AppAction::Move(dir));
    }

    match key.code {
        // Avatar
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Tab => Some(AppAction::NextEmoji),
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::BackTab => Some(AppAction::PrevEmoji),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(AppAction::CycleTone),
        KeyCode::Char('0') => Some(AppAction::ClearTone),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Char('/') => Some(AppAction::BeginHexEntry),

        // Display
        KeyCode::Char('u') | KeyCode::Char('U') => Some(AppAction::ToggleKeyStyle),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => Some(AppAction::TogglePause),

        _ => None,
    }
}

/// Check if key should quit the app.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(AppAction::Move(Direction::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(AppAction::Move(Direction::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('J'))),
            Some(AppAction::Move(Direction::Down))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('d'))),
            Some(AppAction::Move(Direction::Right))
        );
    }

    #[test]
    fn test_avatar_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Tab)),
            Some(AppAction::NextEmoji)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('b'))),
            Some(AppAction::PrevEmoji)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('t'))),
            Some(AppAction::CycleTone)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('0'))),
            Some(AppAction::ClearTone)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('/'))),
            Some(AppAction::BeginHexEntry)
        );
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
            handle_key_event(KeyEvent::from(KeyCode::Esc)),
            Some(AppAction::Quit)
        );
    }

    #[test]
    fn test_unmapped_key() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('z'))), None);
    }
}
