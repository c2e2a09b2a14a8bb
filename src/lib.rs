//! Asteroids - a wrap-around space-combat arena simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, actions, movement, collisions)
//! - `config`: Data-driven game tuning
//! - `error`: Input and configuration errors
//!
//! Rendering and input capture live outside this crate. A renderer reads
//! [`sim::GameState::snapshot`], an input layer builds [`sim::PlayerActions`].

pub mod config;
pub mod error;
pub mod sim;

pub use config::SimConfig;
pub use error::{ConfigError, SimError};

use glam::Vec2;

/// Default tuning constants
pub mod consts {
    /// World extent (the arena wraps at these borders)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 800.0;

    /// Asteroid defaults
    pub const ASTEROIDS_SPEED: f32 = 5.0;
    pub const ASTEROIDS_MAX_RADIUS: f32 = 80.0;
    pub const ASTEROIDS_MIN_RADIUS: f32 = 20.0;
    pub const ASTEROIDS_SPLIT_RADIUS_RATIO: f32 = 0.5;
    /// Children leave the parent heading rotated by +/- an angle in this range (degrees)
    pub const ASTEROIDS_SPLIT_ANGLE_MIN: f32 = 20.0;
    pub const ASTEROIDS_SPLIT_ANGLE_MAX: f32 = 45.0;
    /// Initial asteroids keep this distance from every ship
    pub const ASTEROIDS_SPAWN_CLEARANCE: f32 = 150.0;
    pub const INITIAL_ASTEROIDS: usize = 4;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 5.0;
    pub const BULLET_SPEED: f32 = 10.0;
    /// Steps a bullet survives (removed once its age exceeds this)
    pub const BULLET_LIFESPAN: u32 = 50;
    /// Steps before a bullet may hit the ship that fired it
    pub const BULLET_OWNER_GRACE: u32 = 5;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 10.0;
    pub const PLAYER_ACCELERATION: f32 = 0.5;
    /// Degrees per step
    pub const PLAYER_ROTATION_SPEED: f32 = 15.0;
    pub const PLAYER_MAX_SPEED: f32 = 7.0;
    /// Steps between consecutive shots
    pub const PLAYER_BULLET_COOLDOWN: u32 = 20;
    pub const INITIAL_PLAYERS: usize = 1;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Unit facing vector for a ship rotation in degrees.
///
/// Rotation 0 faces +y; positive rotation turns toward +x.
#[inline]
pub fn heading(rotation_deg: f32) -> Vec2 {
    let rad = rotation_deg.to_radians();
    Vec2::new(rad.sin(), rad.cos())
}

/// Wrap a single coordinate into [0, extent)
#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    let v = value.rem_euclid(extent);
    if v >= extent { 0.0 } else { v }
}

/// Wrap a position into the toroidal world [0, borders.x) x [0, borders.y)
#[inline]
pub fn wrap_position(pos: Vec2, borders: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, borders.x), wrap_axis(pos.y, borders.y))
}

/// Shortest displacement from `from` to `to` on the torus.
///
/// Each axis picks the smaller of the direct and the wrap-around offset.
#[inline]
pub fn wrapped_delta(from: Vec2, to: Vec2, borders: Vec2) -> Vec2 {
    let shortest = |d: f32, extent: f32| {
        let d = d.rem_euclid(extent);
        if d > extent * 0.5 { d - extent } else { d }
    };
    Vec2::new(shortest(to.x - from.x, borders.x), shortest(to.y - from.y, borders.y))
}

/// Distance between two points on the torus
#[inline]
pub fn wrapped_distance(a: Vec2, b: Vec2, borders: Vec2) -> f32 {
    wrapped_delta(a, b, borders).length()
}
