//! Simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod bullet;
pub mod collision;
pub mod controller;
pub mod entity;
pub mod events;
pub mod manager;
pub mod ship;
pub mod spawner;
pub mod vector;
pub mod world;

pub use asteroid::{AsteroidSize, AsteroidState};
pub use bullet::{BulletState, new_bullet};
pub use collision::CollisionResolver;
pub use controller::ShipController;
pub use entity::{Entity, EntityId, EntityKind, EntityType};
pub use events::GameEvent;
pub use manager::{GameManager, PointerButton};
pub use ship::{ShipState, new_ship};
pub use spawner::{Spawner, new_asteroid};
pub use vector::{Vector, VectorExt, checked_recip};
pub use world::{GamePhase, World};
