//! Entities: shared spatial state plus a per-variant payload
//!
//! Every simulated object carries position, velocity, rotation, radius and an
//! `active` flag. Once `active` is false the entity is logically deleted: it is
//! never updated or collided with again and the world drops it on its next pass.

use serde::{Deserialize, Serialize};

use super::asteroid::AsteroidState;
use super::bullet::BulletState;
use super::ship::ShipState;
use super::vector::{Vector, VectorExt};
use crate::consts::BOUNDS_MARGIN;

/// Unique entity identifier, never reused within a session
pub type EntityId = u32;

/// Variant tag for queries and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Ship,
    Bullet,
    Asteroid,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Ship => "ship",
            EntityType::Bullet => "bullet",
            EntityType::Asteroid => "asteroid",
        }
    }
}

/// Variant-specific payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntityKind {
    Ship(ShipState),
    Bullet(BulletState),
    Asteroid(AsteroidState),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub position: Vector,
    pub velocity: Vector,
    /// Radians, unconstrained
    pub rotation: f32,
    pub radius: f32,
    pub active: bool,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(id: EntityId, position: Vector, radius: f32, kind: EntityKind) -> Self {
        Self {
            id,
            position,
            velocity: Vector::ZERO,
            rotation: 0.0,
            radius,
            active: true,
            kind,
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match self.kind {
            EntityKind::Ship(_) => EntityType::Ship,
            EntityKind::Bullet(_) => EntityType::Bullet,
            EntityKind::Asteroid(_) => EntityType::Asteroid,
        }
    }

    #[inline]
    pub fn is_type(&self, ty: EntityType) -> bool {
        self.entity_type() == ty
    }

    pub fn as_ship(&self) -> Option<&ShipState> {
        match &self.kind {
            EntityKind::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn as_ship_mut(&mut self) -> Option<&mut ShipState> {
        match &mut self.kind {
            EntityKind::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn as_bullet(&self) -> Option<&BulletState> {
        match &self.kind {
            EntityKind::Bullet(bullet) => Some(bullet),
            _ => None,
        }
    }

    pub fn as_asteroid(&self) -> Option<&AsteroidState> {
        match &self.kind {
            EntityKind::Asteroid(asteroid) => Some(asteroid),
            _ => None,
        }
    }

    /// Advance by `dt` seconds. `aim` is only consumed by ships.
    pub fn update(&mut self, dt: f32, aim: Option<Vector>) {
        if !self.active {
            return;
        }
        match self.entity_type() {
            EntityType::Ship => self.update_ship(dt, aim),
            EntityType::Bullet => self.update_bullet(dt),
            EntityType::Asteroid => self.update_asteroid(dt),
        }
    }

    /// Circle overlap test; inactive entities never collide
    pub fn collides_with(&self, other: &Entity) -> bool {
        if !self.active || !other.active {
            return false;
        }
        self.position.distance_to(other.position) < self.radius + other.radius
    }

    /// Logical delete, idempotent
    #[inline]
    pub fn destroy(&mut self) {
        self.active = false;
    }

    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.is_out_of_bounds_with_margin(width, height, BOUNDS_MARGIN)
    }

    pub fn is_out_of_bounds_with_margin(&self, width: f32, height: f32, margin: f32) -> bool {
        let p = self.position;
        p.x < -margin || p.x > width + margin || p.y < -margin || p.y > height + margin
    }

    /// Teleport to the opposite edge once strictly past one
    pub fn wrap_around_bounds(&mut self, width: f32, height: f32) {
        if self.position.x < 0.0 {
            self.position.x = width;
        } else if self.position.x > width {
            self.position.x = 0.0;
        }
        if self.position.y < 0.0 {
            self.position.y = height;
        } else if self.position.y > height {
            self.position.y = 0.0;
        }
    }

    fn update_bullet(&mut self, dt: f32) {
        let EntityKind::Bullet(bullet) = &mut self.kind else {
            return;
        };
        self.position += self.velocity * dt;
        bullet.age += dt;
        if bullet.expired() {
            self.active = false;
        }
    }

    fn update_asteroid(&mut self, dt: f32) {
        let EntityKind::Asteroid(asteroid) = &self.kind else {
            return;
        };
        self.rotation += asteroid.rotation_speed * dt;
        self.position += self.velocity * dt;
    }
}
