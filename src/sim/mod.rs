//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per call, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod actions;
pub mod collision;
pub mod entity;
pub mod lifecycle;
pub mod movement;
pub mod state;
pub mod tick;
pub mod view;

pub use actions::{Action, PlayerActions, apply_actions};
pub use collision::{
    CollisionReport, Contact, find_overlaps, overlaps, resolve_collisions, split_velocities,
};
pub use entity::{Entity, EntityId, EntityKind, PlayerState};
pub use lifecycle::{advance_clocks, prune_expired_bullets};
pub use movement::move_all;
pub use state::GameState;
pub use tick::step;
pub use view::{EntityView, PlayerView, WorldView};
