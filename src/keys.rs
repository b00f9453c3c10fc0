use crate::selection::Direction;
use crate::session::PickError;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};

/// A decoded keypress
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Key {
    Up,
    Down,
    Left,
    Right,
    Toggle,
    Confirm,
    Quit,
    Other(KeyCode),
}

impl Key {
    pub(crate) fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

pub(crate) trait KeyReader {
    /// Blocks until the next keypress
    fn read_key(&mut self) -> Result<Key, PickError>;
}

/// Reads keys from the terminal.  The terminal must be in raw mode.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct CrosstermKeys;

impl CrosstermKeys {
    fn decode(code: KeyCode) -> Key {
        match code {
            KeyCode::Char('k') | KeyCode::Up => Key::Up,
            KeyCode::Char('j') | KeyCode::Down => Key::Down,
            KeyCode::Char('h') | KeyCode::Left => Key::Left,
            KeyCode::Char('l') | KeyCode::Right => Key::Right,
            KeyCode::Char(' ' | 'x') | KeyCode::Tab => Key::Toggle,
            KeyCode::Enter => Key::Confirm,
            KeyCode::Char('q') | KeyCode::Esc => Key::Quit,
            other => Key::Other(other),
        }
    }
}

impl KeyReader for CrosstermKeys {
    fn read_key(&mut self) -> Result<Key, PickError> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        loop {
            // Resizes, focus changes, and key releases are of no interest
            if let Some(KeyEvent {
                code, modifiers, ..
            }) = read()?.as_key_press_event()
            {
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    return Err(PickError::Interrupted);
                } else if normal_modifiers.contains(modifiers) {
                    let key = CrosstermKeys::decode(code);
                    tracing::trace!(?key, "read key");
                    return Ok(key);
                }
            }
        }
    }
}
