//! Rock Breaker - A wrapping-arena asteroid shooter
//!
//! Core modules:
//! - `sim`: Simulation core (entities, world state machine, spawning, collisions)
//! - `config`: In-memory game options with JSON loading
//! - `error`: Error types for fallible operations

pub mod config;
pub mod error;
pub mod sim;

pub use config::GameConfig;
pub use error::SimError;

/// Game configuration constants
pub mod consts {
    /// Default arena dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Margin past the arena edge before an entity counts as out of bounds
    pub const BOUNDS_MARGIN: f32 = 100.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 15.0;
    pub const SHIP_MAX_SPEED: f32 = 300.0;
    pub const SHIP_ACCELERATION: f32 = 400.0;
    /// radians per second
    pub const SHIP_ROTATION_SPEED: f32 = 5.0;
    /// Fraction of velocity kept after one second of coasting
    pub const SHIP_DRAG: f32 = 0.3;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 500.0;
    pub const BULLET_LIFETIME: f32 = 2.0;
    pub const BULLET_RADIUS: f32 = 3.0;

    /// Shots per second
    pub const FIRE_RATE: f32 = 5.0;

    /// Spawner defaults
    pub const MIN_SPAWN_DISTANCE: f32 = 150.0;
    pub const MAX_SPAWN_ATTEMPTS: u32 = 50;
    pub const SPLIT_COUNT: u32 = 2;
    /// Upper bound of the random angular jitter applied to split children
    pub const SPLIT_JITTER: f32 = 0.5;
    /// Asteroids on level 1 = BASE_ASTEROIDS + 1
    pub const BASE_ASTEROIDS: u32 = 3;

    pub const MAX_LIVES: u32 = 3;
}

/// Normalize angle to (-π, π]
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}
