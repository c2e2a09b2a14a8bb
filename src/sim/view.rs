//! Read-only snapshot for renderers and observers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityKind};
use super::state::GameState;

/// What a renderer needs to draw one entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec2,
    pub radius: f32,
    pub rotation: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub alive: bool,
    pub cooldown: u32,
}

/// Copy of the drawable world state after a step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldView {
    pub step: u64,
    pub borders: Vec2,
    pub entities: Vec<EntityView>,
    pub players: Vec<PlayerView>,
}

impl GameState {
    /// Snapshot the world for drawing
    pub fn snapshot(&self) -> WorldView {
        WorldView {
            step: self.step_count,
            borders: self.borders(),
            entities: self
                .entities
                .iter()
                .map(|e| EntityView {
                    id: e.id,
                    kind: e.kind,
                    position: e.pos,
                    radius: e.radius,
                    rotation: e.rotation,
                })
                .collect(),
            players: self
                .players
                .iter()
                .map(|p| PlayerView {
                    alive: p.alive,
                    cooldown: p.shoot_cooldown,
                })
                .collect(),
        }
    }
}
