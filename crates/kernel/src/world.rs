use framekit_common::EntityId;
use framekit_input::DirectionalIntent;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Errors from world operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),
}

/// A movable object: position plus velocity, driven along x by an intent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Units per second applied along x while an intent is active.
    pub speed: f32,
}

impl Entity {
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            speed,
        }
    }

    /// Set `velocity.x` from the intent. Other components keep their value.
    pub fn apply_intent(&mut self, intent: DirectionalIntent) {
        self.velocity.x = intent.sign() * self.speed;
    }

    /// `position += velocity * dt`, component-wise, unbounded.
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

/// Owner of every entity in a running demo.
///
/// Entities live for the whole process; there is no despawn. BTreeMap keeps
/// iteration in spawn order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    entities: BTreeMap<EntityId, Entity>,
    next_id: u32,
    /// Number of completed integration steps.
    tick: u64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> &BTreeMap<EntityId, Entity> {
        &self.entities
    }

    /// Spawn an entity at rest and return its id.
    pub fn spawn(&mut self, position: Vec3, speed: f32) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, Entity::new(position, speed));
        tracing::debug!(%id, ?position, speed, "spawned entity");
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn position(&self, id: EntityId) -> Result<Vec3, KernelError> {
        self.get(id)
            .map(|e| e.position)
            .ok_or(KernelError::UnknownEntity(id))
    }

    pub fn set_intent(
        &mut self,
        id: EntityId,
        intent: DirectionalIntent,
    ) -> Result<(), KernelError> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(KernelError::UnknownEntity(id))?;
        entity.apply_intent(intent);
        Ok(())
    }

    /// Advance every entity by `dt` seconds.
    ///
    /// No clamping and no collision: entities may leave the view indefinitely.
    pub fn integrate(&mut self, dt: f32) {
        debug_assert!(dt >= 0.0, "negative delta-time {dt}");
        let dt = dt.max(0.0);
        for entity in self.entities.values_mut() {
            entity.integrate(dt);
        }
        self.tick += 1;
    }
}
