//! Input events delivered to the editor.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::buffer::Motion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// Caret movement keys. These never change content.
    pub fn motion(&self) -> Option<Motion> {
        match self {
            Key::Up => Some(Motion::Up),
            Key::Down => Some(Motion::Down),
            Key::Left => Some(Motion::Left),
            Key::Right => Some(Motion::Right),
            Key::Home => Some(Motion::Home),
            Key::End => Some(Motion::End),
            Key::PageUp => Some(Motion::PageUp),
            Key::PageDown => Some(Motion::PageDown),
            _ => None,
        }
    }

    pub fn is_navigation(&self) -> bool {
        self.motion().is_some()
    }

    /// Character the key produces, if any.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Key::Char(c) => Some(*c),
            Key::Enter => Some('\n'),
            Key::Tab => Some('\t'),
            _ => None,
        }
    }
}

/// One event from the host. Key presses edit, key releases drive completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    KeyPress { key: Key },
    KeyRelease { key: Key },
    /// Press and release of every character in `text`.
    Type { text: String },
    Paste { text: String },
    Undo,
    Redo,
    /// Explicit completion request (Ctrl+Space).
    TriggerCompletion,
    ClickText { line: usize, col: usize },
    ClickCompletion { index: usize },
    NewTab,
    OpenFile { path: PathBuf },
    SwitchTab { index: usize },
    CloseTab { index: usize },
    Save,
    SaveAs { path: PathBuf },
}

impl InputEvent {
    pub fn press(key: Key) -> Self {
        Self::KeyPress { key }
    }

    pub fn release(key: Key) -> Self {
        Self::KeyRelease { key }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_keys() {
        assert!(Key::PageDown.is_navigation());
        assert!(!Key::Backspace.is_navigation());
        assert!(!Key::Char('a').is_navigation());
        assert_eq!(Key::Enter.as_char(), Some('\n'));
    }

    #[test]
    fn test_events_deserialize_from_script_json() {
        let json = r#"[
            {"event": "type", "text": "pri"},
            {"event": "key_press", "key": "enter"},
            {"event": "key_release", "key": {"char": "x"}},
            {"event": "click_text", "line": 0, "col": 2},
            {"event": "undo"},
            {"event": "save_as", "path": "/tmp/out.py"}
        ]"#;
        let events: Vec<InputEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events.len(), 6);
        assert_eq!(events[1], InputEvent::press(Key::Enter));
        assert_eq!(events[2], InputEvent::release(Key::Char('x')));
        assert_eq!(events[4], InputEvent::Undo);
    }
}
