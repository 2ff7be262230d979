//! Game options
//!
//! Plain in-memory structure; every section falls back to defaults so partial
//! JSON documents are accepted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// How asteroids move once placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AsteroidMotion {
    /// Zero velocity; split children are offset from the parent instead
    #[default]
    Static,
    /// Velocity drawn from the size's speed range; split children fly apart
    Drifting,
}

impl AsteroidMotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            AsteroidMotion::Static => "static",
            AsteroidMotion::Drifting => "drifting",
        }
    }
}

/// Ship handling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub max_speed: f32,
    pub acceleration: f32,
    /// radians per second
    pub rotation_speed: f32,
    /// Per-second velocity retention factor in (0, 1]
    pub drag: f32,
    pub radius: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            max_speed: SHIP_MAX_SPEED,
            acceleration: SHIP_ACCELERATION,
            rotation_speed: SHIP_ROTATION_SPEED,
            drag: SHIP_DRAG,
            radius: SHIP_RADIUS,
        }
    }
}

/// Asteroid placement and splitting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub min_distance_from_ship: f32,
    pub split_count: u32,
    pub max_spawn_attempts: u32,
    pub motion: AsteroidMotion,
    /// RNG seed for placement and split jitter
    pub seed: u64,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            min_distance_from_ship: MIN_SPAWN_DISTANCE,
            split_count: SPLIT_COUNT,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
            motion: AsteroidMotion::Static,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub speed: f32,
    /// seconds
    pub lifetime: f32,
    pub radius: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: BULLET_SPEED,
            lifetime: BULLET_LIFETIME,
            radius: BULLET_RADIUS,
        }
    }
}

/// Weapon settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Shots per second
    pub fire_rate: f32,
    pub bullet: BulletConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            fire_rate: FIRE_RATE,
            bullet: BulletConfig::default(),
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub ship: ShipConfig,
    pub spawner: SpawnerConfig,
    pub controller: ControllerConfig,
    /// Lives at the start of a new game
    pub max_lives: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ship: ShipConfig::default(),
            spawner: SpawnerConfig::default(),
            controller: ControllerConfig::default(),
            max_lives: MAX_LIVES,
        }
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(field, format!("must be positive, got {value}")))
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: {}x{} world, {} lives, {} asteroids",
            config.world_width,
            config.world_height,
            config.max_lives,
            config.spawner.motion.as_str()
        );
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make the simulation degenerate
    pub fn validate(&self) -> Result<(), SimError> {
        require_positive("world_width", self.world_width)?;
        require_positive("world_height", self.world_height)?;

        require_positive("ship.max_speed", self.ship.max_speed)?;
        require_positive("ship.acceleration", self.ship.acceleration)?;
        require_positive("ship.rotation_speed", self.ship.rotation_speed)?;
        require_positive("ship.radius", self.ship.radius)?;
        if !(self.ship.drag > 0.0 && self.ship.drag <= 1.0) {
            return Err(SimError::invalid(
                "ship.drag",
                format!("must be in (0, 1], got {}", self.ship.drag),
            ));
        }

        if self.spawner.split_count == 0 {
            return Err(SimError::invalid("spawner.split_count", "must be at least 1"));
        }
        if self.spawner.min_distance_from_ship < 0.0 {
            return Err(SimError::invalid(
                "spawner.min_distance_from_ship",
                "must not be negative",
            ));
        }

        require_positive("controller.fire_rate", self.controller.fire_rate)?;
        require_positive("controller.bullet.speed", self.controller.bullet.speed)?;
        require_positive("controller.bullet.lifetime", self.controller.bullet.lifetime)?;
        require_positive("controller.bullet.radius", self.controller.bullet.radius)?;

        if self.max_lives == 0 {
            return Err(SimError::invalid("max_lives", "must be at least 1"));
        }
        Ok(())
    }
}
