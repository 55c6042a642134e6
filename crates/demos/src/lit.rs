//! Container cubes under a directional or a point light.

use framekit_common::AxisAngle;
use framekit_input::{Action, AxisBinding, KeyState};
use framekit_kernel::FrameTime;
use framekit_render::{
    Attenuation, Camera, FrameSubmission, Image, Light, Material, MaterialId, MeshData, MeshId,
    RenderRecord, SceneResources, ShaderKind, VertexLayout, build_model, spin_angle,
};
use glam::Vec3;
use std::path::Path;

use crate::arcade::CLEAR_COLOR;
use crate::demo::{Demo, DemoKind};
use crate::scenes::CUBE_AXIS;

pub const CONTAINER_CUBES: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(3.0, 5.0, -15.0),
    Vec3::new(-3.5, -2.2, -2.5),
    Vec3::new(-4.8, -2.0, -12.3),
    Vec3::new(4.4, -0.4, -3.5),
    Vec3::new(-3.7, 3.0, -7.5),
    Vec3::new(3.3, -2.0, -2.5),
    Vec3::new(3.5, 2.0, -2.5),
    Vec3::new(3.5, 0.2, -1.5),
    Vec3::new(-3.3, 1.0, -1.5),
];

pub const CONTAINER_SHININESS: f32 = 76.8;
pub const EYE: Vec3 = Vec3::new(-5.0, 2.0, -5.0);

/// Angle of container `i`: `20°·i + 20°`, plus `(i + 1)°` every 100 ms.
pub fn container_angle(i: usize, time: &FrameTime) -> f32 {
    let base = (20.0 * i as f32 + 20.0).to_radians();
    let rate = 1f32.to_radians() / 100.0 * (i + 1) as f32;
    spin_angle(base, time.elapsed, rate)
}

/// The spinning containers both lighting demos share.
#[derive(Debug)]
struct Containers {
    resources: SceneResources,
    cube: MeshId,
    material: MaterialId,
    camera: Camera,
}

impl Containers {
    const DIFFUSE: &'static str = "container.png";
    const SPECULAR: &'static str = "container_specular.png";

    fn new(assets_dir: &Path) -> Self {
        let mut resources = SceneResources::new();
        let cube = resources.add_mesh(MeshData::unit_cube(VertexLayout::PositionNormalUv));
        let material = resources.add_material(
            Material::textured(Image::load_or_fallback(assets_dir.join(Self::DIFFUSE)))
                .with_specular(Image::load_or_fallback(assets_dir.join(Self::SPECULAR))),
        );
        Self {
            resources,
            cube,
            material,
            camera: Camera::looking_at(EYE, Vec3::ZERO),
        }
    }

    fn frame(&self, time: &FrameTime, aspect: f32, light: Light) -> FrameSubmission {
        let mut frame = FrameSubmission::new(CLEAR_COLOR, &self.camera, aspect).with_light(light);
        for (i, position) in CONTAINER_CUBES.into_iter().enumerate() {
            let rotation = AxisAngle::new(CUBE_AXIS, container_angle(i, time));
            frame.push(
                RenderRecord::new(
                    format!("container{i}"),
                    self.cube,
                    ShaderKind::Phong,
                    build_model(position, Some(rotation), None),
                )
                .with_material(self.material),
            );
        }
        frame
    }
}

#[derive(Debug)]
pub struct DirectionalLightDemo {
    containers: Containers,
}

impl DirectionalLightDemo {
    pub const DIRECTION: Vec3 = Vec3::new(-1.0, -0.6, 1.0);

    pub fn new(assets_dir: &Path) -> Self {
        Self {
            containers: Containers::new(assets_dir),
        }
    }

    pub fn light() -> Light {
        Light::directional(Self::DIRECTION)
            .with_intensities(0.2, 0.5, 1.0)
            .with_shininess(CONTAINER_SHININESS)
    }
}

impl Demo for DirectionalLightDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::DirectionalLight
    }

    fn resources(&self) -> &SceneResources {
        &self.containers.resources
    }

    fn update(&mut self, _keys: &KeyState, _time: &FrameTime) {}

    fn submission(&self, time: &FrameTime, aspect: f32) -> FrameSubmission {
        self.containers.frame(time, aspect, Self::light())
    }
}

/// A point light circling the containers, steered with the arrow keys.
///
/// Left/Right turn it around the Y axis, Up/Down swing it vertically, and
/// Space triples the turn rate.
#[derive(Debug)]
pub struct PointLightDemo {
    containers: Containers,
    horizontal: f32,
    vertical: f32,
}

impl PointLightDemo {
    pub const RADIUS: f32 = 2.0;
    /// Radians per second.
    pub const TURN_RATE: f32 = 0.6;
    pub const BOOST: f32 = 3.0;
    const H_AXIS: AxisBinding = AxisBinding::HORIZONTAL_ARROWS;
    const V_AXIS: AxisBinding = AxisBinding::VERTICAL_ARROWS;

    pub fn new(assets_dir: &Path) -> Self {
        Self {
            containers: Containers::new(assets_dir),
            horizontal: 0.0,
            vertical: 0.0,
        }
    }

    pub fn light_position(&self) -> Vec3 {
        Vec3::new(
            self.horizontal.sin() * Self::RADIUS,
            self.vertical.sin() * Self::RADIUS,
            self.horizontal.cos() * Self::RADIUS,
        )
    }

    pub fn light(&self) -> Light {
        Light::point(self.light_position(), Attenuation::RANGE_50)
            .with_intensities(0.2, 0.5, 1.0)
            .with_shininess(CONTAINER_SHININESS)
    }
}

impl Demo for PointLightDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::PointLight
    }

    fn resources(&self) -> &SceneResources {
        &self.containers.resources
    }

    fn update(&mut self, keys: &KeyState, time: &FrameTime) {
        let boost = if Action::Boost.is_active(keys) {
            Self::BOOST
        } else {
            1.0
        };
        let step = Self::TURN_RATE * boost * time.delta;
        self.horizontal += Self::H_AXIS.sample(keys).sign() * step;
        self.vertical += Self::V_AXIS.sample(keys).sign() * step;
    }

    fn submission(&self, time: &FrameTime, aspect: f32) -> FrameSubmission {
        let mut frame = self.containers.frame(time, aspect, self.light());
        frame.push(RenderRecord::new(
            "lamp",
            self.containers.cube,
            ShaderKind::Flat,
            build_model(self.light_position(), None, Some(Vec3::splat(0.2))),
        ));
        frame
    }
}
