//! Keyboard input

use serde::{Deserialize, Serialize};

/// A key press, by `KeyboardEvent.code`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    KeyA,
    KeyB,
    Other(String),
}

impl Key {
    /// Parse a `KeyboardEvent.code` value
    pub fn from_code(code: &str) -> Self {
        match code {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "KeyA" => Key::KeyA,
            "KeyB" => Key::KeyB,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Up up down down left right left right B A
pub const KONAMI: [Key; 10] = [
    Key::ArrowUp,
    Key::ArrowUp,
    Key::ArrowDown,
    Key::ArrowDown,
    Key::ArrowLeft,
    Key::ArrowRight,
    Key::ArrowLeft,
    Key::ArrowRight,
    Key::KeyB,
    Key::KeyA,
];

/// Sliding-window matcher for the Konami sequence
#[derive(Debug, Clone, Default)]
pub struct KonamiDetector {
    recent: Vec<Key>,
}

impl KonamiDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key; true when it completes the sequence
    ///
    /// The window is cleared after a match.
    pub fn push(&mut self, key: &Key) -> bool {
        self.recent.push(key.clone());
        if self.recent.len() > KONAMI.len() {
            self.recent.remove(0);
        }
        if self.recent == KONAMI {
            self.recent.clear();
            true
        } else {
            false
        }
    }
}
