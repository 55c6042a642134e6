//! Input sampling: key snapshots mapped to directional intents and actions.
//!
//! # Invariants
//! - Sampling reads a snapshot; it never mutates entity state.
//! - Opposing keys held together resolve to `Neutral`, independent of press order.

pub mod action;
pub mod intent;
pub mod key;

pub use action::Action;
pub use intent::{AxisBinding, DirectionalIntent};
pub use key::{Key, KeyState};
