use glam::{Mat4, Vec3};
use thiserror::Error;

use crate::camera::Camera;
use crate::lighting::Light;
use crate::mesh::{MeshData, MeshError, MeshId};
use crate::shader::{ShaderError, ShaderKind, attribute_bindings};
use crate::texture::{Material, MaterialId};

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("record {label:?}: {source}")]
    Shader {
        label: String,
        #[source]
        source: ShaderError,
    },
    #[error("record {label:?} references unknown mesh {mesh:?}")]
    UnknownMesh { label: String, mesh: MeshId },
    #[error("record {label:?} references unknown material {material:?}")]
    UnknownMaterial { label: String, material: MaterialId },
    #[error("record {label:?} uses the {shader} shader without a material")]
    MissingMaterial { label: String, shader: ShaderKind },
    #[error("record {label:?} uses the {shader} shader but the frame has no light")]
    MissingLight { label: String, shader: ShaderKind },
}

/// Meshes and materials uploaded once at startup and referenced by handle.
#[derive(Debug, Clone, Default)]
pub struct SceneResources {
    meshes: Vec<MeshData>,
    materials: Vec<Material>,
}

impl SceneResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        tracing::debug!(
            ?id,
            layout = ?mesh.layout(),
            draw_count = mesh.draw_count(),
            "mesh registered"
        );
        self.meshes.push(mesh);
        id
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(material);
        id
    }

    pub fn mesh(&self, id: MeshId) -> Option<&MeshData> {
        self.meshes.get(id.0 as usize)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &MeshData)> {
        self.meshes
            .iter()
            .enumerate()
            .map(|(i, mesh)| (MeshId(i as u32), mesh))
    }

    pub fn materials(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, material)| (MaterialId(i as u32), material))
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

/// One draw call: which mesh, with which program, where.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRecord {
    pub label: String,
    pub mesh: MeshId,
    pub shader: ShaderKind,
    pub material: Option<MaterialId>,
    pub model: Mat4,
    pub color: [f32; 4],
}

impl RenderRecord {
    pub fn new(label: impl Into<String>, mesh: MeshId, shader: ShaderKind, model: Mat4) -> Self {
        Self {
            label: label.into(),
            mesh,
            shader,
            material: None,
            model,
            color: [1.0; 4],
        }
    }

    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    /// World-space translation of the model matrix.
    pub fn position(&self) -> Vec3 {
        self.model.w_axis.truncate()
    }
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSubmission {
    pub clear_color: [f32; 4],
    pub view: Mat4,
    pub projection: Mat4,
    pub view_pos: Vec3,
    pub light: Option<Light>,
    /// Draw triangle outlines instead of filled faces.
    pub wireframe: bool,
    pub records: Vec<RenderRecord>,
}

impl FrameSubmission {
    /// Empty frame seen through `camera` at the given aspect ratio.
    pub fn new(clear_color: [f32; 4], camera: &Camera, aspect: f32) -> Self {
        Self {
            clear_color,
            view: camera.view(),
            projection: camera.projection(aspect),
            view_pos: camera.eye,
            light: None,
            wireframe: false,
            records: Vec::new(),
        }
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.light = Some(light);
        self
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    pub fn push(&mut self, record: RenderRecord) {
        self.records.push(record);
    }

    /// One draw call per record, visible or not.
    pub fn draw_calls(&self) -> usize {
        self.records.len()
    }

    /// Check every record against the registered resources.
    pub fn validate(&self, resources: &SceneResources) -> Result<(), RenderError> {
        for record in &self.records {
            validate_record(record, self.light.is_some(), resources)?;
        }
        Ok(())
    }
}

/// Check that a record's mesh and material exist and its shader fits the mesh
/// layout.
pub fn validate_record(
    record: &RenderRecord,
    has_light: bool,
    resources: &SceneResources,
) -> Result<(), RenderError> {
    let label = || record.label.clone();
    let mesh = resources
        .mesh(record.mesh)
        .ok_or_else(|| RenderError::UnknownMesh {
            label: label(),
            mesh: record.mesh,
        })?;
    attribute_bindings(record.shader, mesh.layout()).map_err(|source| RenderError::Shader {
        label: label(),
        source,
    })?;
    match record.material {
        Some(material) if resources.material(material).is_none() => {
            return Err(RenderError::UnknownMaterial {
                label: label(),
                material,
            });
        }
        None if record.shader.needs_material() => {
            return Err(RenderError::MissingMaterial {
                label: label(),
                shader: record.shader,
            });
        }
        _ => {}
    }
    if record.shader.needs_light() && !has_light {
        return Err(RenderError::MissingLight {
            label: label(),
            shader: record.shader,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::VertexLayout;
    use crate::texture::Image;

    fn scene() -> (SceneResources, MeshId, MeshId, MaterialId) {
        let mut res = SceneResources::new();
        let quad = res.add_mesh(MeshData::quad(20.0, 1.0));
        let cube = res.add_mesh(MeshData::unit_cube(VertexLayout::PositionNormalUv));
        let mat = res.add_material(Material::textured(Image::fallback()));
        (res, quad, cube, mat)
    }

    fn frame() -> FrameSubmission {
        FrameSubmission::new([0.2, 0.3, 0.3, 1.0], &Camera::default(), 16.0 / 9.0)
    }

    #[test]
    fn handles_are_sequential() {
        let (res, quad, cube, mat) = scene();
        assert_eq!(quad, MeshId(0));
        assert_eq!(cube, MeshId(1));
        assert_eq!(mat, MaterialId(0));
        assert_eq!(res.mesh_count(), 2);
        assert_eq!(res.material_count(), 1);
        assert_eq!(res.mesh(cube).map(MeshData::draw_count), Some(36));
    }

    #[test]
    fn valid_frame_passes() {
        let (res, quad, cube, mat) = scene();
        let mut frame = frame().with_light(crate::Light::directional(Vec3::NEG_Y));
        frame.push(RenderRecord::new("paddle", quad, ShaderKind::Flat, Mat4::IDENTITY));
        frame.push(
            RenderRecord::new("cube", cube, ShaderKind::Phong, Mat4::IDENTITY).with_material(mat),
        );
        assert_eq!(frame.validate(&res), Ok(()));
        assert_eq!(frame.draw_calls(), 2);
    }

    #[test]
    fn unknown_mesh_rejected() {
        let (res, ..) = scene();
        let mut frame = frame();
        frame.push(RenderRecord::new("ghost", MeshId(9), ShaderKind::Flat, Mat4::IDENTITY));
        assert!(matches!(
            frame.validate(&res),
            Err(RenderError::UnknownMesh { mesh: MeshId(9), .. })
        ));
    }

    #[test]
    fn shader_layout_mismatch_rejected() {
        let (res, quad, _, mat) = scene();
        let mut frame = frame();
        frame.push(
            RenderRecord::new("paddle", quad, ShaderKind::Textured, Mat4::IDENTITY)
                .with_material(mat),
        );
        assert!(matches!(
            frame.validate(&res),
            Err(RenderError::Shader { .. })
        ));
    }

    #[test]
    fn textured_without_material_rejected() {
        let (res, _, cube, _) = scene();
        let mut frame = frame();
        frame.push(RenderRecord::new("cube", cube, ShaderKind::Textured, Mat4::IDENTITY));
        assert!(matches!(
            frame.validate(&res),
            Err(RenderError::MissingMaterial { .. })
        ));
    }

    #[test]
    fn phong_without_light_rejected() {
        let (res, _, cube, mat) = scene();
        let mut frame = frame();
        frame.push(
            RenderRecord::new("cube", cube, ShaderKind::Phong, Mat4::IDENTITY).with_material(mat),
        );
        assert!(matches!(
            frame.validate(&res),
            Err(RenderError::MissingLight { .. })
        ));
    }

    #[test]
    fn unknown_material_rejected() {
        let (res, _, cube, _) = scene();
        let mut frame = frame();
        frame.push(
            RenderRecord::new("cube", cube, ShaderKind::Textured, Mat4::IDENTITY)
                .with_material(MaterialId(4)),
        );
        assert!(matches!(
            frame.validate(&res),
            Err(RenderError::UnknownMaterial { .. })
        ));
    }

    #[test]
    fn record_position_reads_translation() {
        let record = RenderRecord::new(
            "ball",
            MeshId(0),
            ShaderKind::Flat,
            Mat4::from_translation(Vec3::new(0.0, 10.0, 0.0)),
        );
        assert_eq!(record.position(), Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn submission_uses_camera() {
        let cam = Camera::looking_at(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO);
        let frame = FrameSubmission::new([0.0; 4], &cam, 1.5);
        assert_eq!(frame.view, cam.view());
        assert_eq!(frame.projection, cam.projection(1.5));
        assert_eq!(frame.view_pos, cam.eye);
    }
}
