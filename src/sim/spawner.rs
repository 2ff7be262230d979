//! Asteroid placement and splitting
//!
//! All randomness comes from a seeded `Pcg32`, so a given seed always lays out
//! the same field and the same split patterns.

use std::f32::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::asteroid::{AsteroidSize, AsteroidState};
use super::entity::{Entity, EntityId, EntityKind};
use super::vector::{Vector, VectorExt};
use super::world::World;
use crate::config::{AsteroidMotion, SpawnerConfig};
use crate::consts::{BASE_ASTEROIDS, SPLIT_JITTER};

#[derive(Debug, Clone)]
pub struct Spawner {
    config: SpawnerConfig,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(config: SpawnerConfig) -> Self {
        let rng = Pcg32::seed_from_u64(config.seed);
        Self { config, rng }
    }

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    /// Restart the random sequence
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    /// Number of asteroids a level starts with
    pub fn asteroids_for_level(level: u32) -> u32 {
        BASE_ASTEROIDS + level
    }

    /// Spawn `3 + level` large asteroids, keeping clear of `avoid` where possible
    pub fn spawn_level_asteroids(
        &mut self,
        world: &mut World,
        level: u32,
        avoid: Option<Vector>,
    ) -> Vec<EntityId> {
        let count = Self::asteroids_for_level(level);
        (0..count)
            .map(|_| self.spawn_asteroid(world, AsteroidSize::Large, avoid))
            .collect()
    }

    /// Place one asteroid at a random position inside the world.
    ///
    /// With `avoid`, positions closer than the configured minimum distance are
    /// redrawn up to the attempt cap; after that the last draw is used anyway.
    pub fn spawn_asteroid(
        &mut self,
        world: &mut World,
        size: AsteroidSize,
        avoid: Option<Vector>,
    ) -> EntityId {
        let mut position = self.random_position(world);

        if let Some(avoid) = avoid {
            let min_distance = self.config.min_distance_from_ship;
            let max_attempts = self.config.max_spawn_attempts.max(1);
            let mut attempts = 1;
            while position.distance_to(avoid) < min_distance && attempts < max_attempts {
                position = self.random_position(world);
                attempts += 1;
            }
            if position.distance_to(avoid) < min_distance {
                log::warn!(
                    "Asteroid placed {:.0}px from ship after {} attempts (wanted {:.0})",
                    position.distance_to(avoid),
                    attempts,
                    min_distance
                );
            }
        }

        let velocity = match self.config.motion {
            AsteroidMotion::Static => Vector::ZERO,
            AsteroidMotion::Drifting => {
                let angle = self.rng.random_range(0.0..TAU);
                Vector::from_angle(angle) * self.random_speed(size)
            }
        };

        let spin = self.random_spin(size);
        world.spawn(|id| new_asteroid(id, position, velocity, size, spin))
    }

    /// Replace a destroyed asteroid with `split_count` smaller ones.
    /// Returns an empty list for small asteroids and non-asteroids.
    pub fn split_asteroid(&mut self, world: &mut World, parent: &Entity) -> Vec<EntityId> {
        let Some(size) = parent.as_asteroid().and_then(|a| a.smaller_size()) else {
            return Vec::new();
        };

        let count = self.config.split_count;
        let mut children = Vec::with_capacity(count as usize);
        for i in 0..count {
            let jitter = self.rng.random_range(0.0..SPLIT_JITTER);
            let angle = TAU * i as f32 / count as f32 + jitter;
            let direction = Vector::from_angle(angle);

            let (position, velocity) = match self.config.motion {
                AsteroidMotion::Static => (parent.position + direction * size.radius(), Vector::ZERO),
                AsteroidMotion::Drifting => (parent.position, direction * self.random_speed(size)),
            };

            let spin = self.random_spin(size);
            children.push(world.spawn(|id| new_asteroid(id, position, velocity, size, spin)));
        }

        log::debug!(
            "Split {} asteroid {} into {} x {}",
            parent.as_asteroid().map(|a| a.size.as_str()).unwrap_or("?"),
            parent.id,
            count,
            size.as_str()
        );
        children
    }

    fn random_position(&mut self, world: &World) -> Vector {
        Vector::new(
            self.rng.random_range(0.0..=world.width),
            self.rng.random_range(0.0..=world.height),
        )
    }

    fn random_speed(&mut self, size: AsteroidSize) -> f32 {
        let (min, max) = size.speed_range();
        self.rng.random_range(min..=max)
    }

    fn random_spin(&mut self, size: AsteroidSize) -> f32 {
        let max = size.max_spin();
        self.rng.random_range(-max..=max)
    }
}

pub fn new_asteroid(
    id: EntityId,
    position: Vector,
    velocity: Vector,
    size: AsteroidSize,
    spin: f32,
) -> Entity {
    let mut asteroid = Entity::new(
        id,
        position,
        size.radius(),
        EntityKind::Asteroid(AsteroidState::new(size, spin)),
    );
    asteroid.velocity = velocity;
    asteroid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityType;

    fn world() -> World {
        let mut world = World::new(800.0, 600.0);
        world.start_game();
        world
    }

    fn spawner(motion: AsteroidMotion) -> Spawner {
        Spawner::new(SpawnerConfig {
            motion,
            seed: 42,
            ..Default::default()
        })
    }

    #[test]
    fn test_level_asteroid_counts() {
        let mut s = spawner(AsteroidMotion::Static);

        let mut w = world();
        let ids = s.spawn_level_asteroids(&mut w, 1, None);
        assert_eq!(ids.len(), 4);
        assert_eq!(w.count_active(EntityType::Asteroid), 4);

        let mut w = world();
        assert_eq!(s.spawn_level_asteroids(&mut w, 3, None).len(), 6);
        assert!(
            w.entities()
                .all(|e| e.as_asteroid().map(|a| a.size) == Some(AsteroidSize::Large))
        );
    }

    #[test]
    fn test_spawn_within_bounds_and_static() {
        let mut s = spawner(AsteroidMotion::Static);
        let mut w = world();
        for _ in 0..100 {
            let id = s.spawn_asteroid(&mut w, AsteroidSize::Medium, None);
            let a = w.get(id).unwrap();
            assert!((0.0..=800.0).contains(&a.position.x));
            assert!((0.0..=600.0).contains(&a.position.y));
            assert_eq!(a.velocity, Vector::ZERO);
            assert_eq!(a.radius, 30.0);
        }
    }

    #[test]
    fn test_avoids_position_when_possible() {
        let mut s = spawner(AsteroidMotion::Static);
        let mut w = world();
        let center = w.center();
        for id in s.spawn_level_asteroids(&mut w, 10, Some(center)) {
            assert!(w.get(id).unwrap().position.distance_to(center) >= 150.0);
        }
    }

    #[test]
    fn test_avoidance_is_best_effort() {
        // Whole world is within min distance of the center: still spawns
        let mut s = Spawner::new(SpawnerConfig {
            min_distance_from_ship: 10_000.0,
            ..Default::default()
        });
        let mut w = world();
        let center = w.center();
        let id = s.spawn_asteroid(&mut w, AsteroidSize::Large, Some(center));
        assert!(w.get(id).is_some());
    }

    #[test]
    fn test_split_static_offsets_children() {
        let mut s = spawner(AsteroidMotion::Static);
        let mut w = world();
        let id = s.spawn_asteroid(&mut w, AsteroidSize::Large, None);
        let parent = w.get(id).unwrap().clone();

        let children = s.split_asteroid(&mut w, &parent);
        assert_eq!(children.len(), 2);
        for child in children {
            let c = w.get(child).unwrap();
            assert_eq!(c.as_asteroid().unwrap().size, AsteroidSize::Medium);
            assert_eq!(c.velocity, Vector::ZERO);
            assert!((c.position.distance_to(parent.position) - 30.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_split_drifting_uses_speed_range() {
        let mut s = spawner(AsteroidMotion::Drifting);
        let mut w = world();
        let id = s.spawn_asteroid(&mut w, AsteroidSize::Medium, None);
        let parent = w.get(id).unwrap().clone();
        let speed = parent.velocity.magnitude();
        assert!((50.0 - 1e-3..=80.0 + 1e-3).contains(&speed));

        for child in s.split_asteroid(&mut w, &parent) {
            let c = w.get(child).unwrap();
            assert_eq!(c.as_asteroid().unwrap().size, AsteroidSize::Small);
            assert_eq!(c.position, parent.position);
            let speed = c.velocity.magnitude();
            assert!((80.0 - 1e-3..=120.0 + 1e-3).contains(&speed));
        }
    }

    #[test]
    fn test_small_does_not_split() {
        let mut s = spawner(AsteroidMotion::Static);
        let mut w = world();
        let id = s.spawn_asteroid(&mut w, AsteroidSize::Small, None);
        let parent = w.get(id).unwrap().clone();
        assert!(s.split_asteroid(&mut w, &parent).is_empty());
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn test_full_split_tree() {
        let mut s = spawner(AsteroidMotion::Static);
        let mut w = world();
        let root = s.spawn_asteroid(&mut w, AsteroidSize::Large, None);

        let mut frontier = vec![root];
        let mut terminal = 0;
        while let Some(id) = frontier.pop() {
            let parent = w.get(id).unwrap().clone();
            let children = s.split_asteroid(&mut w, &parent);
            if children.is_empty() {
                terminal += 1;
            }
            frontier.extend(children);
        }
        // 1 large -> 2 medium -> 4 small
        assert_eq!(terminal, 4);
        assert_eq!(w.len(), 1 + 2 + 4);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = spawner(AsteroidMotion::Drifting);
        let mut b = spawner(AsteroidMotion::Drifting);
        let mut wa = world();
        let mut wb = world();
        a.spawn_level_asteroids(&mut wa, 2, None);
        b.spawn_level_asteroids(&mut wb, 2, None);
        for (x, y) in wa.entities().zip(wb.entities()) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.velocity, y.velocity);
        }
    }
}
