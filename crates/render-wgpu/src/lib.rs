//! wgpu render backend.
//!
//! Compiles the fixed shader programs, uploads meshes and materials once, and
//! issues one draw call per render record.
//!
//! # Invariants
//! - Shader failures surface as `Result`s; the configured policy decides
//!   whether startup aborts or the flat program stands in.
//! - Pipelines are built lazily per (shader, layout, primitive) and cached.
//! - The renderer never touches simulation state.

mod gpu;
mod policy;
pub mod shaders;

pub use gpu::{GpuError, WgpuRenderer};
pub use policy::{ShaderRoster, resolve_shaders};
