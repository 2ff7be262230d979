//! Player ship: aim rotation, thrust toward a target, drag and speed cap
//!
//! Facing and thrust are independent. The nose turns toward the pointer at a
//! bounded rate while thrust always pushes toward the last thrust target.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};
use super::vector::{Vector, VectorExt};
use crate::config::ShipConfig;
use crate::normalize_angle;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipState {
    pub max_speed: f32,
    pub acceleration: f32,
    /// radians per second
    pub rotation_speed: f32,
    /// Per-second velocity retention factor
    pub drag: f32,
    pub accelerating: bool,
    pub target: Option<Vector>,
}

impl ShipState {
    pub fn from_config(config: &ShipConfig) -> Self {
        Self {
            max_speed: config.max_speed,
            acceleration: config.acceleration,
            rotation_speed: config.rotation_speed,
            drag: config.drag,
            accelerating: false,
            target: None,
        }
    }

    pub fn accelerate_towards(&mut self, target: Vector) {
        self.target = Some(target);
        self.accelerating = true;
    }

    pub fn stop_accelerating(&mut self) {
        self.target = None;
        self.accelerating = false;
    }
}

/// Build a ship at rest
pub fn new_ship(id: EntityId, position: Vector, config: &ShipConfig) -> Entity {
    Entity::new(
        id,
        position,
        config.radius,
        EntityKind::Ship(ShipState::from_config(config)),
    )
}

impl Entity {
    /// Put the entity back at `position` at rest, active again.
    /// Ships also lose their thrust state.
    pub fn reset(&mut self, position: Vector) {
        self.position = position;
        self.velocity = Vector::ZERO;
        self.rotation = 0.0;
        self.active = true;
        if let EntityKind::Ship(ship) = &mut self.kind {
            ship.stop_accelerating();
        }
    }

    pub(super) fn update_ship(&mut self, dt: f32, aim: Option<Vector>) {
        let EntityKind::Ship(ship) = &mut self.kind else {
            return;
        };

        if let Some(aim) = aim {
            let to_aim = aim - self.position;
            let bearing = to_aim.y.atan2(to_aim.x);
            let delta = normalize_angle(bearing - self.rotation);
            let max_step = ship.rotation_speed * dt;
            if delta.abs() <= max_step {
                self.rotation += delta;
            } else {
                self.rotation += delta.signum() * max_step;
            }
        }

        if ship.accelerating {
            if let Some(target) = ship.target {
                let direction = (target - self.position).safe_normalize();
                self.velocity += direction * ship.acceleration * dt;
            }
        }

        // Exponential decay keeps drag independent of step size
        self.velocity *= ship.drag.powf(dt);
        self.velocity = self.velocity.limit_magnitude(ship.max_speed);

        self.position += self.velocity * dt;
    }
}
