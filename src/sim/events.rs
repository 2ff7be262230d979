//! Gameplay events for the presentation layer (sounds, particles, HUD)

use serde::{Deserialize, Serialize};

use super::asteroid::AsteroidSize;
use super::entity::EntityId;
use super::vector::Vector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    AsteroidDestroyed {
        id: EntityId,
        size: AsteroidSize,
        points: u64,
        position: Vector,
        /// Ids of the smaller asteroids that replaced it
        children: Vec<EntityId>,
    },
    ShipDestroyed {
        id: EntityId,
        position: Vector,
    },
    BulletFired {
        id: EntityId,
    },
    LevelStarted {
        level: u32,
        asteroids: usize,
    },
    GameOver {
        score: u64,
        level: u32,
    },
}
