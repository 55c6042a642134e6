//! Demo scenes and the frame loop that drives them.
//!
//! Each frame runs clock, input, integration, transforms and submission in
//! that order. The loop owns every piece of per-demo state.

mod arcade;
pub mod demo;
pub mod frame_loop;
mod lit;
mod scenes;

pub use arcade::{BrickBreaker, CLEAR_COLOR, JetAttack, STEER_SPEED};
pub use demo::{Demo, DemoError, DemoKind, build};
pub use frame_loop::{FrameLoop, LoopState, StopReason};
pub use lit::{CONTAINER_CUBES, DirectionalLightDemo, PointLightDemo, container_angle};
pub use scenes::{BasicColors, COORDINATE_CUBES, CUBE_AXIS, Coordinates};
