//! Input handling - key translation for the completion popup

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keys the core reacts to; everything else passes through to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Escape,
    Backspace,
    /// A printable character other than space
    Char(char),
    /// A control chord such as C-q
    Ctrl(char),
    Other,
}

impl Key {
    /// Whether this key commits the selected candidate
    pub fn is_accept(&self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }

    /// Translate a crossterm KeyEvent to our Key representation
    ///
    /// Only press events are translated. Release and repeat events
    /// return `None`; crossterm reports them on Windows and on terminals
    /// with enhanced keyboard reporting.
    pub fn from_event(event: KeyEvent) -> Option<Key> {
        let KeyEvent {
            code, modifiers, kind, ..
        } = event;

        if kind != KeyEventKind::Press {
            return None;
        }

        let key = match code {
            KeyCode::Char(ch) if modifiers.contains(KeyModifiers::CONTROL) => {
                Key::Ctrl(ch.to_ascii_lowercase())
            }
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(ch) => Key::Char(ch),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            _ => Key::Other,
        };
        Some(key)
    }
}
