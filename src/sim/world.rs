//! World: entity table, game phase, score and level
//!
//! The world owns every entity. Entities are kept in a `BTreeMap` keyed by id so
//! iteration order is stable across runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityType};
use super::vector::Vector;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a game to start
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Out of lives
    GameOver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    entities: BTreeMap<EntityId, Entity>,
    next_id: EntityId,
    phase: GamePhase,
    score: u64,
    level: u32,
    /// Last known pointer position in world space, used for ship aim
    mouse_position: Option<Vector>,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            entities: BTreeMap::new(),
            next_id: 1,
            phase: GamePhase::Ready,
            score: 0,
            level: 1,
            mouse_position: None,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Build an entity with a fresh id and insert it
    pub fn spawn(&mut self, build: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = self.next_entity_id();
        let entity = build(id);
        debug_assert_eq!(entity.id, id);
        self.entities.insert(id, entity);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// All entities, active or pending removal, in id order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    /// Active entities of one type, in id order
    pub fn entities_of(&self, ty: EntityType) -> impl Iterator<Item = &Entity> {
        self.entities
            .values()
            .filter(move |e| e.active && e.is_type(ty))
    }

    pub fn active_ids(&self, ty: EntityType) -> Vec<EntityId> {
        self.entities_of(ty).map(|e| e.id).collect()
    }

    pub fn count_active(&self, ty: EntityType) -> usize {
        self.entities_of(ty).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop every entity; the id counter keeps counting
    pub fn clear_entities(&mut self) {
        self.entities.clear();
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn next_level(&mut self) -> u32 {
        self.level += 1;
        self.level
    }

    pub fn mouse_position(&self) -> Option<Vector> {
        self.mouse_position
    }

    pub fn set_mouse_position(&mut self, position: Vector) {
        self.mouse_position = Some(position);
    }

    pub fn center(&self) -> Vector {
        Vector::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Back to Ready with an empty table and zeroed counters
    pub fn reset(&mut self) {
        self.phase = GamePhase::Ready;
        self.entities.clear();
        self.score = 0;
        self.level = 1;
        self.next_id = 1;
    }

    /// Force Playing with score and level reset. Entities are left alone.
    pub fn start_game(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.level = 1;
    }

    pub fn pause_game(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume_game(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    pub fn game_over(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::GameOver;
        }
    }

    /// Advance one tick while playing: update active entities, drop inactive
    /// ones, then run the collision pass supplied by the caller.
    pub fn update<F>(&mut self, dt: f32, collide: F)
    where
        F: FnOnce(&mut World),
    {
        if self.phase != GamePhase::Playing {
            return;
        }

        let aim = self.mouse_position;
        for entity in self.entities.values_mut() {
            if !entity.active {
                continue;
            }
            let aim = if entity.is_type(EntityType::Ship) {
                aim
            } else {
                None
            };
            entity.update(dt, aim);
        }

        self.entities.retain(|_, e| e.active);

        collide(self);
    }
}
