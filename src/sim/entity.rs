//! Entity records
//!
//! One [`Entity`] per simulated object. The variant set is closed: every
//! stage dispatches on [`EntityKind`] with a `match`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable entity handle. Ids grow monotonically and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// A ship, owned by the player at this index
    Player { player: usize },
    Asteroid,
    /// A bullet, fired by the player at `owner` (None for bullets placed directly)
    Bullet { owner: Option<usize> },
}

impl EntityKind {
    pub fn is_player(&self) -> bool {
        matches!(self, EntityKind::Player { .. })
    }

    pub fn is_asteroid(&self) -> bool {
        matches!(self, EntityKind::Asteroid)
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self, EntityKind::Bullet { .. })
    }
}

/// A simulated object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Always inside [0, borders)
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision extent
    pub radius: f32,
    /// Degrees in [0, 360); always 0 for non-ships
    pub rotation: f32,
    /// Steps since creation
    pub age: u32,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            vel,
            radius,
            rotation: 0.0,
            age: 0,
        }
    }
}

/// Per-player state, indexed by player index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub alive: bool,
    /// Steps until the next shot is allowed
    pub shoot_cooldown: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            alive: true,
            shoot_cooldown: 0,
        }
    }
}
