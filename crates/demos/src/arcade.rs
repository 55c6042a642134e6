//! The two toy games: a paddle, and a ball over a strip of terrain.
//!
//! Both steer every body with Left/Right at a constant speed. Nothing is
//! bounded and nothing collides.

use framekit_common::EntityId;
use framekit_input::{AxisBinding, KeyState};
use framekit_kernel::{FrameTime, World};
use framekit_render::{
    Camera, FrameSubmission, MeshData, MeshId, RenderRecord, SceneResources, ShaderKind,
    build_model,
};
use glam::Vec3;

use crate::demo::{Demo, DemoKind};

pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];
pub const STEER_SPEED: f32 = 10.0;

/// A world entity drawn with one mesh.
#[derive(Debug, Clone, Copy)]
struct Body {
    label: &'static str,
    entity: EntityId,
    mesh: MeshId,
    color: [f32; 4],
}

/// Shared state of the arcade demos: bodies in a world, steered together.
#[derive(Debug)]
struct Arcade {
    world: World,
    bodies: Vec<Body>,
    resources: SceneResources,
    camera: Camera,
    steering: AxisBinding,
}

impl Arcade {
    fn new() -> Self {
        Self {
            world: World::new(),
            bodies: Vec::new(),
            resources: SceneResources::new(),
            camera: Camera::looking_at(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO),
            steering: AxisBinding::HORIZONTAL_ARROWS,
        }
    }

    fn add_body(
        &mut self,
        label: &'static str,
        mesh: MeshData,
        position: Vec3,
        color: [f32; 4],
    ) -> EntityId {
        let mesh = self.resources.add_mesh(mesh);
        let entity = self.world.spawn(position, STEER_SPEED);
        self.bodies.push(Body {
            label,
            entity,
            mesh,
            color,
        });
        entity
    }

    /// Sample the steering axis, set every body's velocity, then integrate.
    fn update(&mut self, keys: &KeyState, time: &FrameTime) {
        let intent = self.steering.sample(keys);
        for body in &self.bodies {
            if let Err(err) = self.world.set_intent(body.entity, intent) {
                tracing::warn!(body = body.label, error = %err, "steering skipped");
            }
        }
        self.world.integrate(time.delta);
    }

    fn submission(&self, aspect: f32) -> FrameSubmission {
        let mut frame = FrameSubmission::new(CLEAR_COLOR, &self.camera, aspect);
        for body in &self.bodies {
            let Some(entity) = self.world.get(body.entity) else {
                continue;
            };
            frame.push(
                RenderRecord::new(
                    body.label,
                    body.mesh,
                    ShaderKind::Flat,
                    build_model(entity.position, None, None),
                )
                .with_color(body.color),
            );
        }
        frame
    }

    fn position(&self, entity: EntityId) -> Vec3 {
        self.world
            .get(entity)
            .map(|e| e.position)
            .unwrap_or_default()
    }
}

/// A 20x1 paddle at the bottom of the view.
#[derive(Debug)]
pub struct BrickBreaker {
    arcade: Arcade,
    paddle: EntityId,
}

impl BrickBreaker {
    pub const PADDLE_START: Vec3 = Vec3::new(0.0, -20.0, 0.0);

    pub fn new() -> Self {
        let mut arcade = Arcade::new();
        let paddle = arcade.add_body(
            "paddle",
            MeshData::quad(20.0, 1.0),
            Self::PADDLE_START,
            [1.0, 1.0, 1.0, 1.0],
        );
        Self { arcade, paddle }
    }

    pub fn paddle_position(&self) -> Vec3 {
        self.arcade.position(self.paddle)
    }

    pub fn world(&self) -> &World {
        &self.arcade.world
    }
}

impl Default for BrickBreaker {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for BrickBreaker {
    fn kind(&self) -> DemoKind {
        DemoKind::BrickBreaker
    }

    fn resources(&self) -> &SceneResources {
        &self.arcade.resources
    }

    fn update(&mut self, keys: &KeyState, time: &FrameTime) {
        self.arcade.update(keys, time);
    }

    fn submission(&self, _time: &FrameTime, aspect: f32) -> FrameSubmission {
        self.arcade.submission(aspect)
    }
}

/// A point-rendered ball above a strip of terrain.
#[derive(Debug)]
pub struct JetAttack {
    arcade: Arcade,
    ball: EntityId,
    terrain: EntityId,
}

impl JetAttack {
    pub const BALL_START: Vec3 = Vec3::new(0.0, 10.0, 0.0);
    pub const TERRAIN_START: Vec3 = Vec3::new(0.0, -20.0, 0.0);

    pub fn new() -> Self {
        let mut arcade = Arcade::new();
        let terrain = arcade.add_body(
            "terrain",
            MeshData::quad(20.0, 1.0),
            Self::TERRAIN_START,
            [0.4, 0.8, 0.3, 1.0],
        );
        let ball = arcade.add_body(
            "ball",
            MeshData::point(),
            Self::BALL_START,
            [1.0, 1.0, 1.0, 1.0],
        );
        Self {
            arcade,
            ball,
            terrain,
        }
    }

    pub fn ball_position(&self) -> Vec3 {
        self.arcade.position(self.ball)
    }

    pub fn terrain_position(&self) -> Vec3 {
        self.arcade.position(self.terrain)
    }
}

impl Default for JetAttack {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for JetAttack {
    fn kind(&self) -> DemoKind {
        DemoKind::JetAttack
    }

    fn resources(&self) -> &SceneResources {
        &self.arcade.resources
    }

    fn update(&mut self, keys: &KeyState, time: &FrameTime) {
        self.arcade.update(keys, time);
    }

    fn submission(&self, _time: &FrameTime, aspect: f32) -> FrameSubmission {
        self.arcade.submission(aspect)
    }
}
