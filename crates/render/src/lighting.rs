use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Distance falloff `1 / (constant + linear * d + quadratic * d²)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    /// No falloff.
    pub const NONE: Self = Self::new(1.0, 0.0, 0.0);
    /// Falloff tuned for a range of roughly 50 units.
    pub const RANGE_50: Self = Self::new(1.0, 0.09, 0.032);

    pub const fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }

    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LightKind {
    Directional { direction: Vec3 },
    Point {
        position: Vec3,
        attenuation: Attenuation,
    },
}

/// The single light of a frame, with per-term intensities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub kind: LightKind,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Light {
    pub fn directional(direction: Vec3) -> Self {
        Self::with_kind(LightKind::Directional { direction })
    }

    pub fn point(position: Vec3, attenuation: Attenuation) -> Self {
        Self::with_kind(LightKind::Point {
            position,
            attenuation,
        })
    }

    fn with_kind(kind: LightKind) -> Self {
        Self {
            kind,
            ambient: Vec3::splat(0.1),
            diffuse: Vec3::ONE,
            specular: Vec3::splat(0.5),
            shininess: 32.0,
        }
    }

    pub fn with_intensities(mut self, ambient: f32, diffuse: f32, specular: f32) -> Self {
        self.ambient = Vec3::splat(ambient);
        self.diffuse = Vec3::splat(diffuse);
        self.specular = Vec3::splat(specular);
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Point position with `w = 1`, or direction with `w = 0`.
    pub fn position_or_direction(&self) -> Vec4 {
        match self.kind {
            LightKind::Directional { direction } => direction.extend(0.0),
            LightKind::Point { position, .. } => position.extend(1.0),
        }
    }

    /// Directional lights do not fall off.
    pub fn attenuation(&self) -> Attenuation {
        match self.kind {
            LightKind::Directional { .. } => Attenuation::NONE,
            LightKind::Point { attenuation, .. } => attenuation,
        }
    }

    pub fn position(&self) -> Option<Vec3> {
        match self.kind {
            LightKind::Point { position, .. } => Some(position),
            LightKind::Directional { .. } => None,
        }
    }
}
