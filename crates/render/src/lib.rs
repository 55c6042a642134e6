//! Rendering adapter: transforms, meshes, materials and per-record frame
//! submissions, independent of any graphics API.
//!
//! # Invariants
//! - Model matrices are composed as translate, rotate, scale.
//! - View and projection are rebuilt every frame; nothing is cached.
//! - One draw per record per frame, with no batching or culling.
//! - Vertex data is length-checked before it reaches a backend.

pub mod camera;
pub mod lighting;
pub mod mesh;
pub mod record;
mod renderer;
pub mod shader;
pub mod texture;
pub mod transform;

pub use camera::{Camera, orbit_eye};
pub use lighting::{Attenuation, Light, LightKind};
pub use mesh::{MeshData, MeshError, MeshId, Primitive, VertexAttribute, VertexLayout};
pub use record::{FrameSubmission, RenderError, RenderRecord, SceneResources, validate_record};
pub use renderer::{DebugTextRenderer, DrawStats, Renderer};
pub use shader::{AttributeBinding, ShaderError, ShaderKind, attribute_bindings};
pub use texture::{Image, ImageError, Material, MaterialId};
pub use transform::{build_model, build_projection, build_view, model_from, spin_angle};

pub fn crate_info() -> &'static str {
    concat!("framekit-render v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
