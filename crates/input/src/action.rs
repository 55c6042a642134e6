use serde::{Deserialize, Serialize};

use crate::key::{Key, KeyState};

/// Frame-level commands derived from the key snapshot.
///
/// Demos consume actions and directional intents, never raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Stop the frame loop. Fires on the press itself, so a tap shorter
    /// than one frame still counts.
    Quit,
    /// Speed up whatever the demo is driving while held.
    Boost,
    /// Draw polygon outlines instead of filled faces while held.
    Wireframe,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Quit, Action::Boost, Action::Wireframe];

    pub fn trigger(self) -> Key {
        match self {
            Action::Quit => Key::Escape,
            Action::Boost => Key::Space,
            Action::Wireframe => Key::KeyD,
        }
    }

    /// Actions active for the frame sampling `keys`.
    pub fn active(keys: &KeyState) -> Vec<Action> {
        Self::ALL
            .into_iter()
            .filter(|action| action.is_active(keys))
            .collect()
    }

    pub fn is_active(self, keys: &KeyState) -> bool {
        match self {
            Action::Quit => keys.was_pressed(self.trigger()),
            Action::Boost | Action::Wireframe => keys.is_held(self.trigger()),
        }
    }
}
