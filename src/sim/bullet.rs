//! Bullet payload

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};
use super::vector::{Vector, VectorExt};
use crate::config::BulletConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletState {
    pub speed: f32,
    /// seconds
    pub lifetime: f32,
    /// seconds alive so far
    pub age: f32,
}

impl BulletState {
    pub fn new(speed: f32, lifetime: f32) -> Self {
        Self {
            speed,
            lifetime,
            age: 0.0,
        }
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.age >= self.lifetime
    }
}

/// Build a bullet travelling along `direction` at the configured speed.
/// A zero direction yields a stationary bullet.
pub fn new_bullet(id: EntityId, position: Vector, direction: Vector, config: &BulletConfig) -> Entity {
    let mut bullet = Entity::new(
        id,
        position,
        config.radius,
        EntityKind::Bullet(BulletState::new(config.speed, config.lifetime)),
    );
    bullet.velocity = direction.safe_normalize() * config.speed;
    bullet.rotation = direction.y.atan2(direction.x);
    bullet
}
