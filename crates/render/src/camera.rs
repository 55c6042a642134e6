use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::transform::{build_projection, build_view};

/// Fixed camera parameters. View and projection are rebuilt from these on
/// every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub const DEFAULT_FOV_DEGREES: f32 = 45.0;
    pub const DEFAULT_NEAR: f32 = 0.1;
    pub const DEFAULT_FAR: f32 = 100.0;

    /// Camera at `eye` looking at `target`, Y up, 45° fov, 0.1..100.
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            fov_y: Self::DEFAULT_FOV_DEGREES.to_radians(),
            near: Self::DEFAULT_NEAR,
            far: Self::DEFAULT_FAR,
        }
    }

    pub fn with_eye(mut self, eye: Vec3) -> Self {
        self.eye = eye;
        self
    }

    pub fn view(&self) -> Mat4 {
        build_view(self.eye, self.target, self.up)
    }

    /// A non-positive or non-finite aspect (minimised window) falls back to 1.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        build_projection(self.fov_y, aspect, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::looking_at(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO)
    }
}

/// Eye position circling the Y axis once every 2π seconds.
pub fn orbit_eye(radius: f32, height: f32, elapsed: Duration) -> Vec3 {
    let angle = elapsed.as_secs_f32();
    Vec3::new(angle.sin() * radius, height, angle.cos() * radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looking_at_defaults() {
        let cam = Camera::looking_at(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO);
        assert_eq!(cam.up, Vec3::Y);
        assert!((cam.fov_y - 45f32.to_radians()).abs() < 1e-6);
        assert_eq!(cam.near, 0.1);
        assert_eq!(cam.far, 100.0);
    }

    #[test]
    fn degenerate_aspect_falls_back() {
        let cam = Camera::default();
        assert_eq!(cam.projection(0.0), cam.projection(1.0));
        assert_eq!(cam.projection(f32::NAN), cam.projection(1.0));
    }

    #[test]
    fn orbit_starts_on_positive_z() {
        let eye = orbit_eye(10.0, 2.0, Duration::ZERO);
        assert_eq!(eye, Vec3::new(0.0, 2.0, 10.0));
    }

    #[test]
    fn orbit_keeps_radius() {
        for ms in [0u64, 250, 1_000, 7_777] {
            let eye = orbit_eye(10.0, 2.0, Duration::from_millis(ms));
            assert!((Vec3::new(eye.x, 0.0, eye.z).length() - 10.0).abs() < 1e-4);
            assert_eq!(eye.y, 2.0);
        }
    }
}
