use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Identifier of an entity owned by the kernel world.
///
/// Ids are handed out sequentially at spawn time, so iteration order over a
/// world matches creation order on every platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rotation expressed as an axis and an angle in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAngle {
    pub axis: Vec3,
    pub radians: f32,
}

impl AxisAngle {
    pub fn new(axis: Vec3, radians: f32) -> Self {
        Self { axis, radians }
    }

    pub fn from_degrees(axis: Vec3, degrees: f32) -> Self {
        Self::new(axis, degrees.to_radians())
    }

    /// Unit-length axis, or `None` when the axis has no usable direction.
    pub fn unit_axis(&self) -> Option<Vec3> {
        self.axis.try_normalize()
    }
}

/// Placement of a static object: translation, then optional rotation, then
/// optional scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Option<AxisAngle>,
    pub scale: Option<Vec3>,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: AxisAngle) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_uniform_scale(mut self, factor: f32) -> Self {
        self.scale = Some(Vec3::splat(factor));
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: None,
            scale: None,
        }
    }
}
