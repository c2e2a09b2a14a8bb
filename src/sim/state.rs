//! Game state and entity storage
//!
//! Entities live in a single table kept in id order. Removal compacts the
//! table and rebuilds the player -> slot index in the same pass, so slot
//! numbers are only valid until the next structural change. Hold an
//! [`EntityId`] across steps, never a slot.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityId, EntityKind, PlayerState};
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::{heading, wrap_position, wrapped_distance};

/// Placement attempts before an initial asteroid ignores the ship clearance
const SPAWN_ATTEMPTS: u32 = 32;

/// Complete simulation state. Owned and mutated only by the simulation stages.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) config: SimConfig,
    /// Simulation step counter
    pub(crate) step_count: u64,
    /// All entities, sorted by id
    pub(crate) entities: Vec<Entity>,
    /// Per-player state, indexed by player index
    pub(crate) players: Vec<PlayerState>,
    /// Player index -> slot in `entities` (None once the ship is gone)
    player_slots: Vec<Option<usize>>,
    /// Random source for placement and asteroid splits
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a populated world from a seed, rejecting an invalid config
    pub fn try_new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, seed))
    }

    /// Create a populated world from a seed.
    ///
    /// The config is taken as already validated, as [`SimConfig::load`] and
    /// [`SimConfig::from_json_str`] leave it. Use [`GameState::try_new`] for
    /// configs built by hand.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }

    /// Create a populated world drawing from the given random source
    pub fn with_rng(config: SimConfig, rng: Pcg32) -> Self {
        let mut state = Self::empty_with_rng(config, rng);

        for _ in 0..state.config.initial_players {
            let pos = state.random_position();
            state.spawn_player(pos);
        }
        for _ in 0..state.config.initial_asteroids {
            let pos = state.asteroid_spawn_position();
            let vel = state.random_asteroid_velocity();
            let radius = state.config.asteroids_max_radius;
            state.spawn_asteroid(pos, vel, radius);
        }

        log::info!(
            "World {}x{}: {} players, {} asteroids",
            state.config.borders.x,
            state.config.borders.y,
            state.players.len(),
            state.asteroid_count()
        );
        state
    }

    /// Create a world with no entities, for building scenarios by hand
    pub fn empty(config: SimConfig, seed: u64) -> Self {
        Self::empty_with_rng(config, Pcg32::seed_from_u64(seed))
    }

    fn empty_with_rng(config: SimConfig, rng: Pcg32) -> Self {
        Self {
            config,
            step_count: 0,
            entities: Vec::new(),
            players: Vec::new(),
            player_slots: Vec::new(),
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push_entity(&mut self, kind: EntityKind, pos: Vec2, vel: Vec2, radius: f32) -> EntityId {
        let id = self.next_entity_id();
        let pos = wrap_position(pos, self.config.borders);
        self.entities.push(Entity::new(id, kind, pos, vel, radius));
        id
    }

    /// Register a new player with a ship at `pos`. Returns the player index.
    pub fn spawn_player(&mut self, pos: Vec2) -> usize {
        let player = self.players.len();
        self.players.push(PlayerState::default());
        self.player_slots.push(None);
        let radius = self.config.player_radius;
        self.push_entity(EntityKind::Player { player }, pos, Vec2::ZERO, radius);
        self.player_slots[player] = Some(self.entities.len() - 1);
        player
    }

    /// Add an asteroid
    pub fn spawn_asteroid(&mut self, pos: Vec2, vel: Vec2, radius: f32) -> EntityId {
        self.push_entity(EntityKind::Asteroid, pos, vel, radius)
    }

    /// Add a bullet
    pub fn spawn_bullet(&mut self, pos: Vec2, vel: Vec2, owner: Option<usize>) -> EntityId {
        let radius = self.config.bullet_radius;
        self.push_entity(EntityKind::Bullet { owner }, pos, vel, radius)
    }

    /// Fire a bullet from a player's ship along its facing
    pub(crate) fn fire_bullet(&mut self, player: usize) -> Option<EntityId> {
        let ship = self.player_entity(player)?;
        let pos = ship.pos;
        let vel = heading(ship.rotation) * self.config.bullet_speed;
        Some(self.spawn_bullet(pos, vel, Some(player)))
    }

    /// Bring a dead player back with a fresh ship at `pos`.
    ///
    /// Returns None if the index is unknown or the player is alive. Any
    /// wreckage left from the previous ship is removed.
    pub fn respawn_player(&mut self, player: usize, pos: Vec2) -> Option<EntityId> {
        if self.players.get(player)?.alive {
            return None;
        }
        if let Some(wreck) = self.player_entity(player).map(|e| e.id) {
            self.remove_entities(&[wreck]);
        }

        let radius = self.config.player_radius;
        let id = self.push_entity(EntityKind::Player { player }, pos, Vec2::ZERO, radius);
        self.players[player] = PlayerState::default();
        self.player_slots[player] = Some(self.entities.len() - 1);
        log::info!("Player {player} respawned as {id}");
        Some(id)
    }

    /// Remove the given entities, keeping survivors in order, and rebuild the
    /// player index. Returns how many were removed.
    pub(crate) fn remove_entities(&mut self, ids: &[EntityId]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let mut doomed = ids.to_vec();
        doomed.sort_unstable();
        let before = self.entities.len();
        self.entities.retain(|e| doomed.binary_search(&e.id).is_err());
        self.reindex();
        before - self.entities.len()
    }

    /// Rebuild the player -> slot index in one pass over the table
    fn reindex(&mut self) {
        self.player_slots.iter_mut().for_each(|s| *s = None);
        for (slot, entity) in self.entities.iter().enumerate() {
            if let EntityKind::Player { player } = entity.kind {
                if let Some(s) = self.player_slots.get_mut(player) {
                    *s = Some(slot);
                }
            }
        }
    }

    /// Uniform random position inside the world
    fn random_position(&mut self) -> Vec2 {
        let b = self.config.borders;
        let p = Vec2::new(self.rng.random::<f32>() * b.x, self.rng.random::<f32>() * b.y);
        wrap_position(p, b)
    }

    /// Random heading with a speed below `asteroids_speed`
    fn random_asteroid_velocity(&mut self) -> Vec2 {
        let angle = self.rng.random::<f32>() * 360.0;
        let speed = self.rng.random::<f32>() * self.config.asteroids_speed;
        heading(angle) * speed
    }

    /// Random position clear of every ship, falling back to any position
    fn asteroid_spawn_position(&mut self) -> Vec2 {
        let clearance = self.config.asteroids_spawn_clearance;
        let borders = self.config.borders;
        let mut pos = self.random_position();
        for _ in 1..SPAWN_ATTEMPTS {
            let clear = self
                .entities
                .iter()
                .filter(|e| e.kind.is_player())
                .all(|ship| wrapped_distance(ship.pos, pos, borders) >= clearance);
            if clear {
                return pos;
            }
            pos = self.random_position();
        }
        log::warn!("No clear spawn spot after {SPAWN_ATTEMPTS} attempts, placing asteroid anyway");
        pos
    }

    // === Read-only queries ===

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn borders(&self) -> Vec2 {
        self.config.borders
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// All entities in creation order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|slot| &self.entities[slot])
    }

    /// Current slot of a player's ship
    pub fn player_slot(&self, player: usize) -> Option<usize> {
        self.player_slots.get(player).copied().flatten()
    }

    /// A player's ship, if it is still in the world
    pub fn player_entity(&self, player: usize) -> Option<&Entity> {
        self.player_slot(player).map(|slot| &self.entities[slot])
    }

    pub(crate) fn player_entity_mut(&mut self, player: usize) -> Option<&mut Entity> {
        let slot = self.player_slot(player)?;
        self.entities.get_mut(slot)
    }

    pub fn asteroid_count(&self) -> usize {
        self.entities.iter().filter(|e| e.kind.is_asteroid()).count()
    }

    pub fn bullet_count(&self) -> usize {
        self.entities.iter().filter(|e| e.kind.is_bullet()).count()
    }
}
