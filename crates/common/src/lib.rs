//! Shared types and configuration for the framekit workspace.

pub mod config;
pub mod types;

pub use config::{ConfigError, EngineConfig, FrameConfig, ShaderPolicy, WindowConfig};
pub use types::{AxisAngle, EntityId, Transform};
