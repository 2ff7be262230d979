//! Ship weapon: fire-rate gated bullet spawning

use super::bullet::new_bullet;
use super::entity::EntityId;
use super::vector::{Vector, checked_recip};
use super::world::World;
use crate::config::ControllerConfig;
use crate::error::SimError;

#[derive(Debug, Clone)]
pub struct ShipController {
    ship_id: EntityId,
    config: ControllerConfig,
    /// Minimum seconds between shots
    min_interval: f32,
    /// Grows without bound while not firing
    time_since_last_shot: f32,
}

impl ShipController {
    pub fn new(ship_id: EntityId, config: ControllerConfig) -> Result<Self, SimError> {
        let min_interval = checked_recip(config.fire_rate, "fire interval")?;
        Ok(Self {
            ship_id,
            config,
            min_interval,
            // Ready to fire immediately
            time_since_last_shot: min_interval,
        })
    }

    pub fn ship_id(&self) -> EntityId {
        self.ship_id
    }

    pub fn min_interval(&self) -> f32 {
        self.min_interval
    }

    pub fn can_fire(&self) -> bool {
        self.time_since_last_shot >= self.min_interval
    }

    pub fn update(&mut self, dt: f32) {
        self.time_since_last_shot += dt;
    }

    /// Spawn a bullet from the ship's nose. Returns None if the weapon is still
    /// cooling down or the ship is gone.
    pub fn fire(&mut self, world: &mut World) -> Option<EntityId> {
        if !self.can_fire() {
            return None;
        }
        let ship = world.get(self.ship_id).filter(|s| s.active)?;
        let position = ship.position;
        let direction = Vector::from_angle(ship.rotation);

        let bullet_config = &self.config.bullet;
        let id = world.spawn(|id| new_bullet(id, position, direction, bullet_config));
        self.time_since_last_shot = 0.0;
        log::debug!("Ship {} fired bullet {}", self.ship_id, id);
        Some(id)
    }
}
