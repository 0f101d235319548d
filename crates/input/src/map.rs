//! Key mapping from terminal events to game events.

use crate::types::Event;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key code to a game event.
pub fn key_to_event(code: KeyCode) -> Option<Event> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Event::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Event::Right),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Event::SoftDrop),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(Event::RotateRight),
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => Some(Event::RotateLeft),

        // Actions
        KeyCode::Char(' ') | KeyCode::Enter => Some(Event::HardDrop),
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('c') | KeyCode::Char('C') => {
            Some(Event::Hold)
        }
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Event::TogglePause),

        _ => None,
    }
}

/// Map keyboard input to game events.
///
/// Ctrl-modified keys never map to gameplay, so Ctrl-C is left to
/// [`should_quit`].
pub fn handle_key_event(key: KeyEvent) -> Option<Event> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    key_to_event(key.code)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
