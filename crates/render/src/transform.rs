use framekit_common::{AxisAngle, Transform};
use glam::{Mat4, Vec3};
use std::time::Duration;

/// Model matrix composed as translate, then rotate, then scale (`T * R * S`).
///
/// A rotation whose axis has no direction is skipped.
pub fn build_model(position: Vec3, rotation: Option<AxisAngle>, scale: Option<Vec3>) -> Mat4 {
    let mut model = Mat4::from_translation(position);
    if let Some((axis, radians)) = rotation.and_then(|r| Some((r.unit_axis()?, r.radians))) {
        model *= Mat4::from_axis_angle(axis, radians);
    }
    if let Some(scale) = scale {
        model *= Mat4::from_scale(scale);
    }
    model
}

pub fn model_from(transform: &Transform) -> Mat4 {
    build_model(transform.position, transform.rotation, transform.scale)
}

/// Right-handed look-at view matrix.
pub fn build_view(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, target, up)
}

/// Right-handed perspective projection with a 0..1 depth range.
pub fn build_projection(fov_y_radians: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh(fov_y_radians, aspect, near, far)
}

/// Angle derived from elapsed time: `base + elapsed_ms * rate`.
///
/// Nothing is accumulated, so the same elapsed time always gives the same
/// angle.
pub fn spin_angle(base_radians: f32, elapsed: Duration, rate_radians_per_ms: f32) -> f32 {
    base_radians + elapsed.as_secs_f32() * 1000.0 * rate_radians_per_ms
}
