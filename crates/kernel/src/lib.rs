//! Frame kernel: entity state, velocity integration and frame timing.
//!
//! # Invariants
//! - `velocity.x == intent * speed` after every intent update.
//! - Integration is linear and unbounded; there is no collision.
//! - The frame clock never blocks.

pub mod clock;
pub mod world;

pub use clock::{FrameClock, FrameLimiter, FrameTime, ManualTimer, MonotonicTimer, TimeSource};
pub use world::{Entity, KernelError, World};
