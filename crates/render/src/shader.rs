use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mesh::{VertexAttribute, VertexLayout};

#[derive(Debug, Error, PartialEq)]
pub enum ShaderError {
    #[error("{kind} shader failed to compile: {diagnostic}")]
    Compile {
        kind: ShaderKind,
        diagnostic: String,
    },
    #[error("{kind} shader reads {attribute:?}, which {layout:?} does not provide")]
    MissingAttribute {
        kind: ShaderKind,
        layout: VertexLayout,
        attribute: VertexAttribute,
    },
}

/// The fixed shader programs a record can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderKind {
    /// Solid record color. Also the substitute when another program fails.
    Flat,
    /// Diffuse texture modulated by the record color.
    Textured,
    /// Ambient + diffuse + specular lighting from the frame light, sampling
    /// diffuse and specular maps.
    Phong,
}

impl ShaderKind {
    pub const ALL: [ShaderKind; 3] = [ShaderKind::Flat, ShaderKind::Textured, ShaderKind::Phong];

    pub fn name(self) -> &'static str {
        match self {
            ShaderKind::Flat => "flat",
            ShaderKind::Textured => "textured",
            ShaderKind::Phong => "phong",
        }
    }

    /// Vertex inputs in shader location order.
    pub fn inputs(self) -> &'static [VertexAttribute] {
        match self {
            ShaderKind::Flat => &[VertexAttribute::Position],
            ShaderKind::Textured => &[VertexAttribute::Position, VertexAttribute::Uv],
            ShaderKind::Phong => &[
                VertexAttribute::Position,
                VertexAttribute::Normal,
                VertexAttribute::Uv,
            ],
        }
    }

    pub fn needs_material(self) -> bool {
        matches!(self, ShaderKind::Textured | ShaderKind::Phong)
    }

    pub fn needs_light(self) -> bool {
        self == ShaderKind::Phong
    }
}

impl std::fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where one shader input lives inside a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeBinding {
    pub location: u32,
    /// Offset in floats from the start of the vertex.
    pub offset: usize,
    pub components: usize,
}

impl AttributeBinding {
    pub fn byte_offset(&self) -> u64 {
        (self.offset * std::mem::size_of::<f32>()) as u64
    }
}

/// Match a shader's inputs against a vertex layout.
///
/// Fails when the shader reads an attribute the layout does not carry.
/// Extra layout attributes are skipped.
pub fn attribute_bindings(
    kind: ShaderKind,
    layout: VertexLayout,
) -> Result<Vec<AttributeBinding>, ShaderError> {
    kind.inputs()
        .iter()
        .enumerate()
        .map(|(location, &attribute)| {
            let offset = layout
                .offset_of(attribute)
                .ok_or(ShaderError::MissingAttribute {
                    kind,
                    layout,
                    attribute,
                })?;
            Ok(AttributeBinding {
                location: location as u32,
                offset,
                components: attribute.components(),
            })
        })
        .collect()
}
