use framekit_common::AxisAngle;
use framekit_input::KeyState;
use framekit_kernel::FrameTime;
use framekit_render::{
    Attenuation, Camera, FrameSubmission, Image, Light, Material, MaterialId, MeshData, MeshId,
    RenderRecord, SceneResources, ShaderKind, VertexLayout, build_model, orbit_eye,
};
use glam::Vec3;
use std::path::Path;

use crate::arcade::CLEAR_COLOR;
use crate::demo::{Demo, DemoKind};

/// Rotation axis shared by every cube scene.
pub const CUBE_AXIS: Vec3 = Vec3::new(1.0, 0.3, 0.5);

pub const COORDINATE_CUBES: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

/// Ten textured cubes, each tilted a further 20° about [`CUBE_AXIS`].
#[derive(Debug)]
pub struct Coordinates {
    resources: SceneResources,
    cube: MeshId,
    face: MaterialId,
    camera: Camera,
}

impl Coordinates {
    pub const TEXTURE: &'static str = "awesomeface.png";

    pub fn new(assets_dir: &Path) -> Self {
        let mut resources = SceneResources::new();
        let cube = resources.add_mesh(MeshData::unit_cube(VertexLayout::PositionUv));
        let face = resources.add_material(Material::textured(Image::load_or_fallback(
            assets_dir.join(Self::TEXTURE),
        )));
        Self {
            resources,
            cube,
            face,
            // same as translating the scene 3 units away
            camera: Camera::looking_at(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO),
        }
    }
}

impl Demo for Coordinates {
    fn kind(&self) -> DemoKind {
        DemoKind::Coordinates
    }

    fn resources(&self) -> &SceneResources {
        &self.resources
    }

    fn update(&mut self, _keys: &KeyState, _time: &FrameTime) {}

    fn submission(&self, _time: &FrameTime, aspect: f32) -> FrameSubmission {
        let mut frame = FrameSubmission::new(CLEAR_COLOR, &self.camera, aspect);
        for (i, position) in COORDINATE_CUBES.into_iter().enumerate() {
            let rotation = AxisAngle::from_degrees(CUBE_AXIS, 20.0 * i as f32);
            frame.push(
                RenderRecord::new(
                    format!("cube{i}"),
                    self.cube,
                    ShaderKind::Textured,
                    build_model(position, Some(rotation), None),
                )
                .with_material(self.face),
            );
        }
        frame
    }
}

/// One lit cube and a small marker where the light sits, seen from a camera
/// circling the origin.
#[derive(Debug)]
pub struct BasicColors {
    resources: SceneResources,
    cube: MeshId,
    plain: MaterialId,
}

impl BasicColors {
    pub const OBJECT_COLOR: [f32; 4] = [1.0, 0.5, 0.31, 1.0];
    pub const LIGHT_POSITION: Vec3 = Vec3::new(3.0, 3.0, 0.0);
    pub const ORBIT_RADIUS: f32 = 10.0;
    pub const ORBIT_HEIGHT: f32 = 2.0;

    pub fn new() -> Self {
        let mut resources = SceneResources::new();
        let cube = resources.add_mesh(MeshData::unit_cube(VertexLayout::PositionNormalUv));
        let plain = resources.add_material(Material::plain());
        Self {
            resources,
            cube,
            plain,
        }
    }

    pub fn camera_at(&self, time: &FrameTime) -> Camera {
        let eye = orbit_eye(Self::ORBIT_RADIUS, Self::ORBIT_HEIGHT, time.elapsed);
        Camera::looking_at(eye, Vec3::ZERO)
    }
}

impl Default for BasicColors {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for BasicColors {
    fn kind(&self) -> DemoKind {
        DemoKind::BasicColors
    }

    fn resources(&self) -> &SceneResources {
        &self.resources
    }

    fn update(&mut self, _keys: &KeyState, _time: &FrameTime) {}

    fn submission(&self, time: &FrameTime, aspect: f32) -> FrameSubmission {
        let light = Light::point(Self::LIGHT_POSITION, Attenuation::NONE);
        let mut frame =
            FrameSubmission::new(CLEAR_COLOR, &self.camera_at(time), aspect).with_light(light);
        frame.push(
            RenderRecord::new(
                "object",
                self.cube,
                ShaderKind::Phong,
                build_model(Vec3::ZERO, None, None),
            )
            .with_material(self.plain)
            .with_color(Self::OBJECT_COLOR),
        );
        frame.push(RenderRecord::new(
            "lamp",
            self.cube,
            ShaderKind::Flat,
            build_model(Self::LIGHT_POSITION, None, Some(Vec3::splat(0.2))),
        ));
        frame
    }
}
