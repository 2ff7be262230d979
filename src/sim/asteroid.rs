//! Asteroid sizes and the split chain
//!
//! Smaller rocks are faster, harder to hit and worth more.

use serde::{Deserialize, Serialize};

/// Asteroid size class, ordered largest to smallest in the split chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Small,
    Medium,
    Large,
}

impl AsteroidSize {
    pub fn radius(&self) -> f32 {
        match self {
            AsteroidSize::Small => 15.0,
            AsteroidSize::Medium => 30.0,
            AsteroidSize::Large => 50.0,
        }
    }

    pub fn points(&self) -> u64 {
        match self {
            AsteroidSize::Small => 100,
            AsteroidSize::Medium => 50,
            AsteroidSize::Large => 20,
        }
    }

    /// (min, max) drift speed in pixels/s
    pub fn speed_range(&self) -> (f32, f32) {
        match self {
            AsteroidSize::Small => (80.0, 120.0),
            AsteroidSize::Medium => (50.0, 80.0),
            AsteroidSize::Large => (20.0, 50.0),
        }
    }

    /// Maximum spin magnitude (radians/s)
    pub fn max_spin(&self) -> f32 {
        match self {
            AsteroidSize::Small => 2.0,
            AsteroidSize::Medium => 1.0,
            AsteroidSize::Large => 0.5,
        }
    }

    /// Next size down, or None for the smallest
    pub fn smaller(&self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }

    pub fn can_split(&self) -> bool {
        self.smaller().is_some()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AsteroidSize::Small => "small",
            AsteroidSize::Medium => "medium",
            AsteroidSize::Large => "large",
        }
    }
}

/// Asteroid-specific entity payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsteroidState {
    pub size: AsteroidSize,
    /// Spin in radians/s
    pub rotation_speed: f32,
}

impl AsteroidState {
    pub fn new(size: AsteroidSize, rotation_speed: f32) -> Self {
        Self {
            size,
            rotation_speed,
        }
    }

    #[inline]
    pub fn points(&self) -> u64 {
        self.size.points()
    }

    #[inline]
    pub fn can_split(&self) -> bool {
        self.size.can_split()
    }

    #[inline]
    pub fn smaller_size(&self) -> Option<AsteroidSize> {
        self.size.smaller()
    }
}
