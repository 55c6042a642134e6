use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("mesh has no vertices")]
    Empty,
    #[error("{len} floats is not a multiple of the {stride}-float stride of {layout:?}")]
    Stride {
        layout: VertexLayout,
        len: usize,
        stride: usize,
    },
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("{count} elements do not form whole triangles")]
    PartialTriangle { count: usize },
    #[error("point meshes cannot be indexed")]
    IndexedPoints,
}

/// Per-vertex attribute a shader may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexAttribute {
    Position,
    Normal,
    Uv,
}

impl VertexAttribute {
    pub fn components(self) -> usize {
        match self {
            VertexAttribute::Position | VertexAttribute::Normal => 3,
            VertexAttribute::Uv => 2,
        }
    }
}

/// Interleaved float layout of a vertex array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VertexLayout {
    /// `x y z`
    Position,
    /// `x y z u v`
    PositionUv,
    /// `x y z nx ny nz u v`
    PositionNormalUv,
}

impl VertexLayout {
    pub fn stride_floats(self) -> usize {
        match self {
            VertexLayout::Position => 3,
            VertexLayout::PositionUv => 5,
            VertexLayout::PositionNormalUv => 8,
        }
    }

    pub fn stride_bytes(self) -> u64 {
        (self.stride_floats() * std::mem::size_of::<f32>()) as u64
    }

    /// Float offset of `attribute` within one vertex, if the layout carries it.
    pub fn offset_of(self, attribute: VertexAttribute) -> Option<usize> {
        match (self, attribute) {
            (_, VertexAttribute::Position) => Some(0),
            (VertexLayout::PositionUv, VertexAttribute::Uv) => Some(3),
            (VertexLayout::PositionNormalUv, VertexAttribute::Normal) => Some(3),
            (VertexLayout::PositionNormalUv, VertexAttribute::Uv) => Some(6),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Primitive {
    Triangles,
    Points,
}

/// Handle of a mesh registered in [`crate::SceneResources`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshId(pub u32);

/// Validated vertex data: the float count is a whole number of vertices and
/// every index points at one of them.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    layout: VertexLayout,
    primitive: Primitive,
    vertices: Vec<f32>,
    indices: Option<Vec<u32>>,
}

impl MeshData {
    pub fn new(
        layout: VertexLayout,
        primitive: Primitive,
        vertices: Vec<f32>,
        indices: Option<Vec<u32>>,
    ) -> Result<Self, MeshError> {
        let stride = layout.stride_floats();
        if vertices.is_empty() {
            return Err(MeshError::Empty);
        }
        if !vertices.len().is_multiple_of(stride) {
            return Err(MeshError::Stride {
                layout,
                len: vertices.len(),
                stride,
            });
        }
        let vertex_count = vertices.len() / stride;
        if let Some(indices) = &indices {
            if primitive == Primitive::Points {
                return Err(MeshError::IndexedPoints);
            }
            if !indices.len().is_multiple_of(3) {
                return Err(MeshError::PartialTriangle {
                    count: indices.len(),
                });
            }
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    index,
                    vertex_count,
                });
            }
        } else if primitive == Primitive::Triangles && !vertex_count.is_multiple_of(3) {
            return Err(MeshError::PartialTriangle {
                count: vertex_count,
            });
        }
        Ok(Self {
            layout,
            primitive,
            vertices,
            indices,
        })
    }

    /// Unit cube as a 36-vertex triangle list.
    ///
    /// Faces wind counter-clockwise seen from outside.
    pub fn unit_cube(layout: VertexLayout) -> Self {
        // (normal, u axis, v axis) per face, u x v == normal
        const FACES: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];
        const CORNERS: [(f32, f32); 6] = [
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.0),
        ];

        let mut vertices = Vec::with_capacity(36 * layout.stride_floats());
        for (normal, u_axis, v_axis) in FACES {
            for (a, b) in CORNERS {
                let p = normal * 0.5 + u_axis * (a - 0.5) + v_axis * (b - 0.5);
                vertices.extend_from_slice(&p.to_array());
                if layout == VertexLayout::PositionNormalUv {
                    vertices.extend_from_slice(&normal.to_array());
                }
                if layout != VertexLayout::Position {
                    // image rows run top to bottom
                    vertices.extend_from_slice(&[a, 1.0 - b]);
                }
            }
        }
        Self {
            layout,
            primitive: Primitive::Triangles,
            vertices,
            indices: None,
        }
    }

    /// Axis-aligned quad in the XY plane centred on the origin, drawn with
    /// six indices.
    pub fn quad(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        #[rustfmt::skip]
        let vertices = vec![
             hw,  hh, 0.0, // top right
             hw, -hh, 0.0, // bottom right
            -hw, -hh, 0.0, // bottom left
            -hw,  hh, 0.0, // top left
        ];
        Self {
            layout: VertexLayout::Position,
            primitive: Primitive::Triangles,
            vertices,
            indices: Some(vec![0, 1, 3, 1, 2, 3]),
        }
    }

    /// Single vertex at the origin, drawn as a point.
    pub fn point() -> Self {
        Self {
            layout: VertexLayout::Position,
            primitive: Primitive::Points,
            vertices: vec![0.0, 0.0, 0.0],
            indices: None,
        }
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.layout.stride_floats()
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Elements consumed by one draw call: indices when indexed, vertices
    /// otherwise.
    pub fn draw_count(&self) -> u32 {
        match &self.indices {
            Some(indices) => indices.len() as u32,
            None => self.vertex_count() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides() {
        assert_eq!(VertexLayout::Position.stride_floats(), 3);
        assert_eq!(VertexLayout::PositionUv.stride_floats(), 5);
        assert_eq!(VertexLayout::PositionNormalUv.stride_floats(), 8);
        assert_eq!(VertexLayout::PositionNormalUv.stride_bytes(), 32);
    }

    #[test]
    fn offsets_follow_interleaving() {
        use VertexAttribute::*;
        assert_eq!(VertexLayout::Position.offset_of(Position), Some(0));
        assert_eq!(VertexLayout::Position.offset_of(Uv), None);
        assert_eq!(VertexLayout::PositionUv.offset_of(Uv), Some(3));
        assert_eq!(VertexLayout::PositionUv.offset_of(Normal), None);
        assert_eq!(VertexLayout::PositionNormalUv.offset_of(Normal), Some(3));
        assert_eq!(VertexLayout::PositionNormalUv.offset_of(Uv), Some(6));
    }

    #[test]
    fn rejects_partial_vertex() {
        let err = MeshData::new(
            VertexLayout::PositionUv,
            Primitive::Points,
            vec![0.0; 7],
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            MeshError::Stride {
                layout: VertexLayout::PositionUv,
                len: 7,
                stride: 5
            }
        );
    }

    #[test]
    fn rejects_empty() {
        let err = MeshData::new(VertexLayout::Position, Primitive::Points, vec![], None);
        assert_eq!(err.unwrap_err(), MeshError::Empty);
    }

    #[test]
    fn rejects_index_out_of_range() {
        let err = MeshData::new(
            VertexLayout::Position,
            Primitive::Triangles,
            vec![0.0; 9],
            Some(vec![0, 1, 3]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn rejects_partial_triangle() {
        let err = MeshData::new(
            VertexLayout::Position,
            Primitive::Triangles,
            vec![0.0; 12],
            Some(vec![0, 1]),
        );
        assert_eq!(err.unwrap_err(), MeshError::PartialTriangle { count: 2 });
    }

    #[test]
    fn rejects_indexed_points() {
        let err = MeshData::new(
            VertexLayout::Position,
            Primitive::Points,
            vec![0.0; 3],
            Some(vec![0, 0, 0]),
        );
        assert_eq!(err.unwrap_err(), MeshError::IndexedPoints);
    }

    #[test]
    fn builtin_meshes_pass_validation() {
        for mesh in [
            MeshData::unit_cube(VertexLayout::Position),
            MeshData::unit_cube(VertexLayout::PositionUv),
            MeshData::unit_cube(VertexLayout::PositionNormalUv),
            MeshData::quad(20.0, 1.0),
            MeshData::point(),
        ] {
            let rebuilt = MeshData::new(
                mesh.layout(),
                mesh.primitive(),
                mesh.vertices().to_vec(),
                mesh.indices().map(<[u32]>::to_vec),
            );
            assert_eq!(rebuilt, Ok(mesh));
        }
    }

    #[test]
    fn draw_counts() {
        let cube = MeshData::unit_cube(VertexLayout::PositionUv);
        assert_eq!(cube.draw_count(), 36);
        let quad = MeshData::quad(20.0, 1.0);
        assert!(quad.is_indexed());
        assert_eq!(quad.draw_count(), 6);
        assert_eq!(quad.vertex_count(), 4);
        assert_eq!(MeshData::point().draw_count(), 1);
    }

    #[test]
    fn cube_is_unit_sized_and_centered() {
        let cube = MeshData::unit_cube(VertexLayout::PositionNormalUv);
        let stride = cube.layout().stride_floats();
        for vertex in cube.vertices().chunks(stride) {
            for c in &vertex[..3] {
                assert_eq!(c.abs(), 0.5);
            }
        }
    }

    #[test]
    fn cube_winding_faces_outward() {
        let cube = MeshData::unit_cube(VertexLayout::PositionNormalUv);
        let stride = cube.layout().stride_floats();
        let verts: Vec<&[f32]> = cube.vertices().chunks(stride).collect();
        for tri in verts.chunks(3) {
            let p = |v: &[f32]| Vec3::new(v[0], v[1], v[2]);
            let n = Vec3::new(tri[0][3], tri[0][4], tri[0][5]);
            let face = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
            assert!(face.dot(n) > 0.0);
        }
    }

    #[test]
    fn quad_extent() {
        let quad = MeshData::quad(20.0, 1.0);
        let xs: Vec<f32> = quad.vertices().chunks(3).map(|v| v[0]).collect();
        let ys: Vec<f32> = quad.vertices().chunks(3).map(|v| v[1]).collect();
        assert_eq!(xs, vec![10.0, 10.0, -10.0, -10.0]);
        assert_eq!(ys, vec![0.5, -0.5, -0.5, 0.5]);
    }
}
