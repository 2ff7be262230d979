//! Collision detection and resolution
//!
//! One pass per tick, after entity updates and removal of inactive entities.
//! Bullets that hit an asteroid are spent, score the asteroid's points and split
//! it. Ships that touch an asteroid are destroyed; the asteroid survives.

use super::entity::{EntityId, EntityType};
use super::events::GameEvent;
use super::spawner::Spawner;
use super::world::World;

#[derive(Debug, Default, Clone)]
pub struct CollisionResolver {
    /// Bullet-asteroid hits resolved over the resolver's lifetime
    pub hits: u64,
}

impl CollisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve all collisions for this tick.
    ///
    /// Candidate lists are snapshotted up front, so split children spawned
    /// during the pass are not tested until the next tick. Each bullet kills
    /// at most one asteroid per pass.
    pub fn resolve(&mut self, world: &mut World, spawner: &mut Spawner) -> Vec<GameEvent> {
        let ships = world.active_ids(EntityType::Ship);
        let bullets = world.active_ids(EntityType::Bullet);
        let asteroids = world.active_ids(EntityType::Asteroid);

        let mut events = Vec::new();

        for &bullet_id in &bullets {
            for &asteroid_id in &asteroids {
                if !self.is_active(world, bullet_id) {
                    break;
                }
                if let Some(event) = self.resolve_bullet_hit(world, spawner, bullet_id, asteroid_id) {
                    events.push(event);
                }
            }
        }

        for &ship_id in &ships {
            for &asteroid_id in &asteroids {
                if !self.is_active(world, ship_id) {
                    break;
                }
                let (Some(ship), Some(asteroid)) = (world.get(ship_id), world.get(asteroid_id)) else {
                    continue;
                };
                if !ship.collides_with(asteroid) {
                    continue;
                }
                let position = ship.position;
                if let Some(ship) = world.get_mut(ship_id) {
                    ship.destroy();
                }
                log::debug!("Ship {} hit asteroid {}", ship_id, asteroid_id);
                events.push(GameEvent::ShipDestroyed {
                    id: ship_id,
                    position,
                });
            }
        }

        events
    }

    /// True once no active asteroid remains
    pub fn is_level_complete(&self, world: &World) -> bool {
        world.count_active(EntityType::Asteroid) == 0
    }

    fn is_active(&self, world: &World, id: EntityId) -> bool {
        world.get(id).is_some_and(|e| e.active)
    }

    fn resolve_bullet_hit(
        &mut self,
        world: &mut World,
        spawner: &mut Spawner,
        bullet_id: EntityId,
        asteroid_id: EntityId,
    ) -> Option<GameEvent> {
        let bullet = world.get(bullet_id)?;
        let asteroid = world.get(asteroid_id)?;
        if !bullet.collides_with(asteroid) {
            return None;
        }

        let parent = asteroid.clone();
        let state = parent.as_asteroid()?;
        let (size, points) = (state.size, state.points());

        world.get_mut(bullet_id)?.destroy();
        world.add_score(points);
        let children = if state.can_split() {
            spawner.split_asteroid(world, &parent)
        } else {
            Vec::new()
        };
        world.get_mut(asteroid_id)?.destroy();
        self.hits += 1;

        Some(GameEvent::AsteroidDestroyed {
            id: asteroid_id,
            size,
            points,
            position: parent.position,
            children,
        })
    }
}
