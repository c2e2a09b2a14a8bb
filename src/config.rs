//! Simulation tuning
//!
//! Every constant the simulation reads lives here. Files are JSON; missing
//! fields fall back to the defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === World ===
    /// World extent; positions wrap at these borders
    pub borders: Vec2,

    // === Asteroids ===
    /// Upper bound of initial asteroid speed
    pub asteroids_speed: f32,
    /// Radius of initial asteroids
    pub asteroids_max_radius: f32,
    /// Children smaller than this are not spawned
    pub asteroids_min_radius: f32,
    /// Child radius = parent radius * ratio
    pub asteroids_split_radius_ratio: f32,
    /// Split spread range in degrees
    pub asteroids_split_angle_min: f32,
    pub asteroids_split_angle_max: f32,
    /// Minimum distance between an initial asteroid and any ship
    pub asteroids_spawn_clearance: f32,
    pub initial_asteroids: usize,

    // === Bullets ===
    pub bullet_radius: f32,
    pub bullet_speed: f32,
    /// Bullets older than this many steps are removed
    pub bullet_lifespan: u32,
    /// Steps during which a bullet ignores the ship that fired it
    pub bullet_owner_grace: u32,

    // === Players ===
    pub player_radius: f32,
    pub player_acceleration: f32,
    /// Degrees per step
    pub player_rotation_speed: f32,
    pub player_max_speed: f32,
    pub player_bullet_cooldown: u32,
    pub initial_players: usize,
    /// Remove a ship from the world when its player dies (otherwise it drifts as wreckage)
    pub remove_dead_ships: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            borders: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),

            asteroids_speed: ASTEROIDS_SPEED,
            asteroids_max_radius: ASTEROIDS_MAX_RADIUS,
            asteroids_min_radius: ASTEROIDS_MIN_RADIUS,
            asteroids_split_radius_ratio: ASTEROIDS_SPLIT_RADIUS_RATIO,
            asteroids_split_angle_min: ASTEROIDS_SPLIT_ANGLE_MIN,
            asteroids_split_angle_max: ASTEROIDS_SPLIT_ANGLE_MAX,
            asteroids_spawn_clearance: ASTEROIDS_SPAWN_CLEARANCE,
            initial_asteroids: INITIAL_ASTEROIDS,

            bullet_radius: BULLET_RADIUS,
            bullet_speed: BULLET_SPEED,
            bullet_lifespan: BULLET_LIFESPAN,
            bullet_owner_grace: BULLET_OWNER_GRACE,

            player_radius: PLAYER_RADIUS,
            player_acceleration: PLAYER_ACCELERATION,
            player_rotation_speed: PLAYER_ROTATION_SPEED,
            player_max_speed: PLAYER_MAX_SPEED,
            player_bullet_cooldown: PLAYER_BULLET_COOLDOWN,
            initial_players: INITIAL_PLAYERS,
            remove_dead_ships: true,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&contents)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Check that every value is inside the range the simulation can run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("borders.x", self.borders.x)?;
        positive("borders.y", self.borders.y)?;
        positive("asteroids_max_radius", self.asteroids_max_radius)?;
        positive("asteroids_min_radius", self.asteroids_min_radius)?;
        positive("bullet_radius", self.bullet_radius)?;
        positive("player_radius", self.player_radius)?;
        positive("player_max_speed", self.player_max_speed)?;

        if !(self.asteroids_split_radius_ratio > 0.0 && self.asteroids_split_radius_ratio < 1.0) {
            return Err(ConfigError::Invalid {
                field: "asteroids_split_radius_ratio",
                reason: "must lie in (0, 1)",
            });
        }
        if self.asteroids_min_radius > self.asteroids_max_radius {
            return Err(ConfigError::Invalid {
                field: "asteroids_min_radius",
                reason: "must not exceed asteroids_max_radius",
            });
        }
        if self.asteroids_split_angle_min > self.asteroids_split_angle_max {
            return Err(ConfigError::Invalid {
                field: "asteroids_split_angle_min",
                reason: "must not exceed asteroids_split_angle_max",
            });
        }
        if self.asteroids_speed < 0.0 || self.bullet_speed < 0.0 || self.player_acceleration < 0.0
        {
            return Err(ConfigError::Invalid {
                field: "speed",
                reason: "speeds and acceleration must not be negative",
            });
        }
        if self.initial_players == 0 {
            return Err(ConfigError::Invalid {
                field: "initial_players",
                reason: "at least one player is required",
            });
        }
        Ok(())
    }

    /// Radius of the children produced by splitting an asteroid, if any
    pub fn split_radius(&self, parent_radius: f32) -> Option<f32> {
        let child = parent_radius * self.asteroids_split_radius_ratio;
        (child >= self.asteroids_min_radius).then_some(child)
    }
}
