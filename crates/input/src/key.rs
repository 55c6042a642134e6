use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Keys the demos react to. Platform layers translate their key codes into
/// these; anything else is dropped at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Escape,
    KeyD,
}

impl Key {
    /// Parse the short names used by scripted key timelines.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name.trim().to_ascii_lowercase().as_str() {
            "left" | "arrow_left" => Key::ArrowLeft,
            "right" | "arrow_right" => Key::ArrowRight,
            "up" | "arrow_up" => Key::ArrowUp,
            "down" | "arrow_down" => Key::ArrowDown,
            "space" => Key::Space,
            "escape" | "esc" => Key::Escape,
            "d" => Key::KeyD,
            _ => return None,
        };
        Some(key)
    }
}

/// Snapshot of the keys currently held down, plus every key pressed since
/// the last [`KeyState::end_frame`].
///
/// A key pressed and released between two frames is not held, but it still
/// reports [`KeyState::was_pressed`] until the frame that sees it ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            held: keys.into_iter().collect(),
            pressed: HashSet::new(),
        }
    }

    /// Returns `true` if the key was not already held.
    pub fn press(&mut self, key: Key) -> bool {
        self.pressed.insert(key);
        self.held.insert(key)
    }

    /// Returns `true` if the key was held.
    pub fn release(&mut self, key: Key) -> bool {
        self.held.remove(&key)
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Held now, or pressed at any point since the last `end_frame`.
    pub fn was_pressed(&self, key: Key) -> bool {
        self.held.contains(&key) || self.pressed.contains(&key)
    }

    /// Forget presses already seen by a frame. Held keys stay held.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    /// Drop every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}
