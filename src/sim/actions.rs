//! Player actions
//!
//! Each step takes one [`PlayerActions`] per registered player, aligned by
//! player index. Flags that are absent count as false; unknown keys are
//! ignored so newer input layers can talk to older cores.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::state::GameState;
use crate::{heading, normalize_degrees};

/// A single recognised action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    RotateLeft,
    RotateRight,
    AccelerateForward,
    Shoot,
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rotate_left" => Ok(Action::RotateLeft),
            "rotate_right" => Ok(Action::RotateRight),
            "accelerate_forward" => Ok(Action::AccelerateForward),
            "shoot" => Ok(Action::Shoot),
            _ => Err(()),
        }
    }
}

/// Action flags for one player for one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerActions {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub accelerate_forward: bool,
    pub shoot: bool,
}

impl PlayerActions {
    /// No actions
    pub fn idle() -> Self {
        Self::default()
    }

    /// Builder-style: set one action
    pub fn with(mut self, action: Action) -> Self {
        self.set(action, true);
        self
    }

    pub fn set(&mut self, action: Action, value: bool) {
        match action {
            Action::RotateLeft => self.rotate_left = value,
            Action::RotateRight => self.rotate_right = value,
            Action::AccelerateForward => self.accelerate_forward = value,
            Action::Shoot => self.shoot = value,
        }
    }

    pub fn get(&self, action: Action) -> bool {
        match action {
            Action::RotateLeft => self.rotate_left,
            Action::RotateRight => self.rotate_right,
            Action::AccelerateForward => self.accelerate_forward,
            Action::Shoot => self.shoot,
        }
    }

    /// Build from `(key, flag)` pairs, skipping keys that are not actions
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        let mut actions = Self::default();
        for (key, value) in pairs {
            if let Ok(action) = key.parse() {
                actions.set(action, value);
            }
        }
        actions
    }
}

impl FromIterator<Action> for PlayerActions {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::with)
    }
}

/// Apply each living player's actions to its own ship.
///
/// Rotation is applied first, then thrust, then firing, so a shot leaves
/// along the heading chosen this step. Entries past the player count are
/// ignored. Returns the bullets fired.
pub fn apply_actions(state: &mut GameState, actions: &[PlayerActions]) -> Vec<EntityId> {
    let rotation_speed = state.config().player_rotation_speed;
    let acceleration = state.config().player_acceleration;
    let max_speed = state.config().player_max_speed;
    let cooldown = state.config().player_bullet_cooldown;

    let mut fired = Vec::new();
    let player_count = state.players.len();

    for (player, input) in actions.iter().take(player_count).enumerate() {
        if !state.players[player].alive {
            continue;
        }
        let Some(ship) = state.player_entity_mut(player) else {
            continue;
        };

        if input.rotate_left {
            ship.rotation = normalize_degrees(ship.rotation + rotation_speed);
        }
        if input.rotate_right {
            ship.rotation = normalize_degrees(ship.rotation - rotation_speed);
        }
        if input.accelerate_forward {
            ship.vel += heading(ship.rotation) * acceleration;
            ship.vel = ship.vel.clamp_length_max(max_speed);
        }

        if input.shoot && state.players[player].shoot_cooldown == 0 {
            if let Some(id) = state.fire_bullet(player) {
                state.players[player].shoot_cooldown = cooldown;
                fired.push(id);
            }
        }
    }

    fired
}
