use serde::{Deserialize, Serialize};

use crate::key::{Key, KeyState};

/// Discrete direction derived from a pair of opposing keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectionalIntent {
    Negative,
    #[default]
    Neutral,
    Positive,
}

impl DirectionalIntent {
    pub fn sign(self) -> f32 {
        match self {
            Self::Negative => -1.0,
            Self::Neutral => 0.0,
            Self::Positive => 1.0,
        }
    }
}

/// A pair of opposing keys forming one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisBinding {
    pub negative: Key,
    pub positive: Key,
}

impl AxisBinding {
    pub const HORIZONTAL_ARROWS: Self = Self::new(Key::ArrowLeft, Key::ArrowRight);
    pub const VERTICAL_ARROWS: Self = Self::new(Key::ArrowDown, Key::ArrowUp);

    pub const fn new(negative: Key, positive: Key) -> Self {
        Self { negative, positive }
    }

    /// Both keys held cancel out to `Neutral`; press order does not matter.
    pub fn sample(&self, keys: &KeyState) -> DirectionalIntent {
        match (keys.is_held(self.negative), keys.is_held(self.positive)) {
            (true, false) => DirectionalIntent::Negative,
            (false, true) => DirectionalIntent::Positive,
            _ => DirectionalIntent::Neutral,
        }
    }
}
