//! Keyboard input for the session.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// A user action the session understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// A keypad digit. Non-directional digits are filtered by the session.
    Numpad(u8),
    /// Take back the last move.
    Undo,
    /// Start a new game from the configured parameters.
    Generate,
    /// Write the current game to disk.
    Save,
    /// Replace the current game with the saved one.
    Load,
    /// Leave the session.
    Quit,
}

/// Maps a key event to a command.
///
/// Digits map straight to [`SessionCommand::Numpad`]. With num lock off a
/// keypad reports navigation keys instead, so those map to the digit
/// printed on the same key.
pub fn command_for_key(key: KeyEvent, undo_key: char) -> Option<SessionCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            c.to_digit(10).map(|d| SessionCommand::Numpad(d as u8))
        }
        KeyCode::Char(c) if c.eq_ignore_ascii_case(&undo_key) => Some(SessionCommand::Undo),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(SessionCommand::Generate),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(SessionCommand::Save),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(SessionCommand::Load),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(SessionCommand::Quit),
        KeyCode::Up => Some(SessionCommand::Numpad(8)),
        KeyCode::Down => Some(SessionCommand::Numpad(2)),
        KeyCode::Left => Some(SessionCommand::Numpad(4)),
        KeyCode::Right => Some(SessionCommand::Numpad(6)),
        KeyCode::Home => Some(SessionCommand::Numpad(7)),
        KeyCode::PageUp => Some(SessionCommand::Numpad(9)),
        KeyCode::End => Some(SessionCommand::Numpad(1)),
        KeyCode::PageDown => Some(SessionCommand::Numpad(3)),
        KeyCode::Insert => Some(SessionCommand::Numpad(0)),
        KeyCode::KeypadBegin => Some(SessionCommand::Numpad(5)),
        _ => None,
    }
}
