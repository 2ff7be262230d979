//! Game manager: the single control surface for presentation and input
//!
//! Owns the world, spawner, collision resolver, ship controller and lives.
//! One `update(dt)` per frame drives everything; between calls the state is
//! stable and can be read for rendering.

use serde::{Deserialize, Serialize};

use super::collision::CollisionResolver;
use super::controller::ShipController;
use super::entity::{Entity, EntityId, EntityType};
use super::events::GameEvent;
use super::ship::new_ship;
use super::spawner::Spawner;
use super::vector::Vector;
use super::world::{GamePhase, World};
use crate::config::GameConfig;
use crate::error::SimError;

/// Pointer buttons the manager reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    /// Fire
    Left,
    /// Thrust toward the pointer while held
    Right,
}

#[derive(Debug)]
pub struct GameManager {
    config: GameConfig,
    world: World,
    spawner: Spawner,
    resolver: CollisionResolver,
    controller: Option<ShipController>,
    ship_id: Option<EntityId>,
    lives: u32,
    /// Events not yet handed to the presentation layer
    events: Vec<GameEvent>,
}

impl GameManager {
    pub fn new(config: GameConfig) -> Result<Self, SimError> {
        config.validate()?;
        let world = World::new(config.world_width, config.world_height);
        let spawner = Spawner::new(config.spawner.clone());
        let lives = config.max_lives;
        Ok(Self {
            config,
            world,
            spawner,
            resolver: CollisionResolver::new(),
            controller: None,
            ship_id: None,
            lives,
            events: Vec::new(),
        })
    }

    // === Session control ===

    /// Fresh session: empty world, full lives, level 1
    pub fn start_new_game(&mut self) -> Result<(), SimError> {
        self.world.reset();
        self.lives = self.config.max_lives;
        self.events.clear();
        self.world.start_game();
        log::info!("New game with {} lives", self.lives);
        self.start_level(1)
    }

    /// Replace the ship and asteroid field for `level`
    pub fn start_level(&mut self, level: u32) -> Result<(), SimError> {
        self.world.clear_entities();
        self.controller = None;
        self.ship_id = None;

        let center = self.world.center();
        let ship_config = &self.config.ship;
        let ship_id = self.world.spawn(|id| new_ship(id, center, ship_config));
        self.controller = Some(ShipController::new(ship_id, self.config.controller.clone())?);
        self.ship_id = Some(ship_id);

        let asteroids = self
            .spawner
            .spawn_level_asteroids(&mut self.world, level, Some(center));
        log::info!("Level {} started with {} asteroids", level, asteroids.len());
        self.events.push(GameEvent::LevelStarted {
            level,
            asteroids: asteroids.len(),
        });
        Ok(())
    }

    /// Retry the current level with a new ship. Ignored before a game starts
    /// and after game over.
    pub fn restart_level(&mut self) -> Result<(), SimError> {
        match self.world.phase() {
            GamePhase::Playing | GamePhase::Paused => self.start_level(self.world.level()),
            phase => {
                log::debug!("Ignoring restart in {:?}", phase);
                Ok(())
            }
        }
    }

    pub fn pause(&mut self) {
        self.world.pause_game();
    }

    pub fn resume(&mut self) {
        self.world.resume_game();
    }

    // === Per-frame driver ===

    pub fn update(&mut self, dt: f32) -> Result<(), SimError> {
        let mut tick_events = Vec::new();
        {
            let resolver = &mut self.resolver;
            let spawner = &mut self.spawner;
            self.world.update(dt, |world| {
                tick_events = resolver.resolve(world, spawner);
            });
        }
        for event in tick_events {
            self.events.push(event.clone());
            self.handle_event(&event);
        }

        if self.world.is_playing() {
            if let Some(controller) = self.controller.as_mut() {
                controller.update(dt);
            }
        }

        let (width, height) = (self.world.width, self.world.height);
        for entity in self.world.entities_mut() {
            if !entity.active {
                continue;
            }
            if entity.is_type(EntityType::Bullet) {
                if entity.is_out_of_bounds(width, height) {
                    entity.destroy();
                }
            } else {
                entity.wrap_around_bounds(width, height);
            }
        }

        if self.world.is_playing() && self.resolver.is_level_complete(&self.world) {
            let level = self.world.next_level();
            self.start_level(level)?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ShipDestroyed { id, .. } => {
                self.lives = self.lives.saturating_sub(1);
                log::debug!("Ship {} destroyed, {} lives left", id, self.lives);
                if self.lives == 0 {
                    self.world.game_over();
                    log::info!(
                        "Game over at level {} with score {}",
                        self.world.level(),
                        self.world.score()
                    );
                    self.events.push(GameEvent::GameOver {
                        score: self.world.score(),
                        level: self.world.level(),
                    });
                }
            }
            GameEvent::AsteroidDestroyed { id, points, .. } => {
                log::debug!("Asteroid {} destroyed for {} points", id, points);
            }
            _ => {}
        }
    }

    // === Input relay ===

    pub fn handle_pointer_down(&mut self, button: PointerButton, world_position: Vector) {
        if !self.world.is_playing() || self.ship().is_none() {
            return;
        }
        match button {
            PointerButton::Left => {
                if let Some(controller) = self.controller.as_mut() {
                    if let Some(id) = controller.fire(&mut self.world) {
                        self.events.push(GameEvent::BulletFired { id });
                    }
                }
            }
            PointerButton::Right => {
                if let Some(ship) = self.ship_mut().and_then(|s| s.as_ship_mut()) {
                    ship.accelerate_towards(world_position);
                }
            }
        }
    }

    pub fn handle_pointer_up(&mut self, button: PointerButton) {
        if !self.world.is_playing() {
            return;
        }
        if button == PointerButton::Right {
            if let Some(ship) = self.ship_mut().and_then(|s| s.as_ship_mut()) {
                ship.stop_accelerating();
            }
        }
    }

    pub fn update_mouse_position(&mut self, world_position: Vector) {
        self.world.set_mouse_position(world_position);
    }

    // === Read accessors ===

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for tools and tests
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The current ship while it is alive
    pub fn ship(&self) -> Option<&Entity> {
        self.ship_id
            .and_then(|id| self.world.get(id))
            .filter(|s| s.active)
    }

    fn ship_mut(&mut self) -> Option<&mut Entity> {
        let id = self.ship_id?;
        self.world.get_mut(id).filter(|s| s.active)
    }

    pub fn ship_id(&self) -> Option<EntityId> {
        self.ship_id
    }

    pub fn can_fire(&self) -> bool {
        self.ship().is_some() && self.controller.as_ref().is_some_and(|c| c.can_fire())
    }

    pub fn score(&self) -> u64 {
        self.world.score()
    }

    pub fn level(&self) -> u32 {
        self.world.level()
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase()
    }

    pub fn is_playing(&self) -> bool {
        self.world.phase() == GamePhase::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.world.phase() == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.world.phase() == GamePhase::GameOver
    }

    /// Take every event produced since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::asteroid::AsteroidSize;
    use crate::sim::spawner::new_asteroid;

    const DT: f32 = 1.0 / 60.0;

    fn manager() -> GameManager {
        let mut m = GameManager::new(GameConfig::default()).unwrap();
        m.start_new_game().unwrap();
        m
    }

    fn asteroid_ids(m: &GameManager) -> Vec<EntityId> {
        m.world().active_ids(EntityType::Asteroid)
    }

    #[test]
    fn test_new_game_setup() {
        let m = manager();
        assert!(m.is_playing());
        assert_eq!(m.lives(), 3);
        assert_eq!(m.level(), 1);
        assert_eq!(m.score(), 0);
        assert_eq!(asteroid_ids(&m).len(), 4);
        let ship = m.ship().unwrap();
        assert_eq!(ship.position, Vector::new(400.0, 300.0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::default();
        config.world_width = 0.0;
        assert!(GameManager::new(config).is_err());
    }

    #[test]
    fn test_three_crashes_end_the_game() {
        let mut m = manager();
        let ship_id = m.ship_id().unwrap();
        let rock = asteroid_ids(&m)[0];
        let rock_pos = m.world().get(rock).unwrap().position;

        for expected in [2, 1, 0] {
            m.world_mut().get_mut(ship_id).unwrap().reset(rock_pos);
            m.update(DT).unwrap();
            assert_eq!(m.lives(), expected);
            assert!(m.ship().is_none());
        }
        assert!(m.is_game_over());
        assert!(
            m.drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }))
        );

        // Nothing moves after game over
        let before = m.world().len();
        m.update(DT).unwrap();
        assert_eq!(m.world().len(), before);
    }

    #[test]
    fn test_no_auto_respawn_until_restart() {
        let mut m = manager();
        let ship_id = m.ship_id().unwrap();
        let rock_pos = m.world().get(asteroid_ids(&m)[0]).unwrap().position;
        m.world_mut().get_mut(ship_id).unwrap().reset(rock_pos);
        m.update(DT).unwrap();
        assert_eq!(m.lives(), 2);

        for _ in 0..10 {
            m.update(DT).unwrap();
        }
        assert!(m.ship().is_none());
        assert!(m.world().get(ship_id).is_none());

        m.restart_level().unwrap();
        assert!(m.ship().is_some());
        assert_ne!(m.ship_id(), Some(ship_id));
        assert_eq!(m.level(), 1);
        assert_eq!(asteroid_ids(&m).len(), 4);
    }

    #[test]
    fn test_level_advances_when_field_cleared() {
        let mut m = manager();
        for id in asteroid_ids(&m) {
            m.world_mut().get_mut(id).unwrap().destroy();
        }
        m.update(DT).unwrap();
        assert_eq!(m.level(), 2);
        assert_eq!(asteroid_ids(&m).len(), 5);
        assert!(m.ship().is_some());
        assert!(
            m.drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::LevelStarted { level: 2, asteroids: 5 }))
        );
    }

    #[test]
    fn test_shooting_scores_and_splits() {
        let mut m = manager();
        for id in asteroid_ids(&m) {
            m.world_mut().get_mut(id).unwrap().destroy();
        }
        // Large rock directly right of the ship, ship facing right
        let center = m.world().center();
        let target = Vector::new(center.x + 100.0, center.y);
        m.world_mut()
            .spawn(|id| new_asteroid(id, target, Vector::ZERO, AsteroidSize::Large, 0.0));

        m.handle_pointer_down(PointerButton::Left, target);
        for _ in 0..30 {
            m.update(DT).unwrap();
        }
        assert_eq!(m.score(), 20);
        assert_eq!(m.level(), 1);
        assert_eq!(asteroid_ids(&m).len(), 2);
    }

    #[test]
    fn test_fire_rate_through_pointer() {
        let mut m = manager();
        m.handle_pointer_down(PointerButton::Left, Vector::ZERO);
        m.handle_pointer_down(PointerButton::Left, Vector::ZERO);
        let fired = m
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::BulletFired { .. }))
            .count();
        assert_eq!(fired, 1);
        assert!(!m.can_fire());
    }

    #[test]
    fn test_right_button_thrust() {
        let mut m = manager();
        m.handle_pointer_down(PointerButton::Right, Vector::new(400.0, 0.0));
        assert!(m.ship().unwrap().as_ship().unwrap().accelerating);
        m.update(0.1).unwrap();
        assert!(m.ship().unwrap().velocity.y < 0.0);

        m.handle_pointer_up(PointerButton::Right);
        assert!(!m.ship().unwrap().as_ship().unwrap().accelerating);
    }

    #[test]
    fn test_input_ignored_while_paused() {
        let mut m = manager();
        m.pause();
        assert!(m.is_paused());
        m.handle_pointer_down(PointerButton::Left, Vector::ZERO);
        m.handle_pointer_down(PointerButton::Right, Vector::ZERO);
        assert_eq!(m.world().count_active(EntityType::Bullet), 0);
        assert!(!m.ship().unwrap().as_ship().unwrap().accelerating);

        let pos = m.ship().unwrap().position;
        m.update(1.0).unwrap();
        assert_eq!(m.ship().unwrap().position, pos);

        m.resume();
        assert!(m.is_playing());
    }

    #[test]
    fn test_ship_wraps_and_bullets_culled() {
        let mut m = manager();
        let ship_id = m.ship_id().unwrap();
        m.world_mut().get_mut(ship_id).unwrap().position = Vector::new(850.0, 20.0);

        let bullet_config = m.config().controller.bullet.clone();
        let stray = m.world_mut().spawn(|id| {
            crate::sim::bullet::new_bullet(id, Vector::new(-150.0, 300.0), Vector::NEG_X, &bullet_config)
        });
        m.update(DT).unwrap();

        let ship = m.world().get(ship_id).unwrap();
        if ship.active {
            assert_eq!(ship.position.x, 0.0);
        }
        assert!(!m.world().get(stray).unwrap().active);
    }

    #[test]
    fn test_mouse_position_aims_ship() {
        let mut m = manager();
        m.update_mouse_position(Vector::new(400.0, 600.0));
        m.update(0.5).unwrap();
        let rotation = m.ship().map(|s| s.rotation);
        if let Some(rotation) = rotation {
            assert!((rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        }
    }

    #[test]
    fn test_same_seed_same_session() {
        let mut a = manager();
        let mut b = manager();
        for step in 0..120 {
            let aim = Vector::new(100.0 + step as f32, 50.0);
            for m in [&mut a, &mut b] {
                m.update_mouse_position(aim);
                m.handle_pointer_down(PointerButton::Left, aim);
                m.update(DT).unwrap();
            }
        }
        assert_eq!(a.score(), b.score());
        assert_eq!(a.world().len(), b.world().len());
        for (x, y) in a.world().entities().zip(b.world().entities()) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.position, y.position);
        }
    }
}
