//! Collision detection and resolution
//!
//! Entities are circles on a torus. Every unordered pair is tested once
//! against the current positions, then the contacts are resolved in priority
//! order:
//!
//! 1. bullet hits asteroid: both destroyed, asteroid may split in two
//! 2. ship hits asteroid: player dies, asteroid unaffected
//! 3. bullet hits ship: bullet destroyed, player dies
//!
//! An entity used up by an earlier contact is skipped by later ones. Nothing
//! is removed or spawned until every contact has been decided.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};
use super::state::GameState;
use crate::config::SimConfig;
use crate::{heading, wrapped_delta};

/// Below this squared speed a parent is treated as stationary when splitting
const STATIONARY_SPEED_SQ: f32 = 1e-6;

/// A resolved contact, in the order it was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    /// A bullet destroyed an asteroid
    AsteroidShot {
        bullet: EntityId,
        asteroid: EntityId,
        shooter: Option<usize>,
    },
    /// A ship flew into an asteroid
    ShipWrecked {
        player: usize,
        ship: EntityId,
        asteroid: EntityId,
    },
    /// A bullet hit a ship
    ShipShot {
        player: usize,
        ship: EntityId,
        bullet: EntityId,
        shooter: Option<usize>,
    },
}

/// Outcome of one collision pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionReport {
    pub contacts: Vec<Contact>,
    /// Entities removed from the world
    pub destroyed: Vec<EntityId>,
    /// Entities added to the world: asteroid fragments, plus fired bullets
    /// when the report comes from a full step
    pub spawned: Vec<EntityId>,
    /// Players that died this step
    pub dead_players: Vec<usize>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

/// Circle overlap on the torus; touching counts
#[inline]
pub fn overlaps(a: &Entity, b: &Entity, borders: Vec2) -> bool {
    let reach = a.radius + b.radius;
    wrapped_delta(a.pos, b.pos, borders).length_squared() <= reach * reach
}

/// Slot pairs `(i, j)` with `i < j` whose circles overlap
pub fn find_overlaps(entities: &[Entity], borders: Vec2) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in entities.iter().enumerate() {
        for (j, b) in entities.iter().enumerate().skip(i + 1) {
            if overlaps(a, b, borders) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Velocities for the two fragments of a split asteroid.
///
/// The parent velocity is rotated by `+angle` and `-angle`, with the angle
/// drawn from the configured spread range. A stationary parent picks a
/// random heading at `asteroids_speed` instead.
pub fn split_velocities<R: Rng + ?Sized>(
    parent_vel: Vec2,
    config: &SimConfig,
    rng: &mut R,
) -> [Vec2; 2] {
    let (min, max) = (config.asteroids_split_angle_min, config.asteroids_split_angle_max);
    let spread = if min < max {
        rng.random_range(min..=max)
    } else {
        min
    };

    let base = if parent_vel.length_squared() > STATIONARY_SPEED_SQ {
        parent_vel
    } else {
        heading(rng.random::<f32>() * 360.0) * config.asteroids_speed
    };

    let turn = spread.to_radians();
    [
        Vec2::from_angle(turn).rotate(base),
        Vec2::from_angle(-turn).rotate(base),
    ]
}

/// What a detected pair means, with slots ordered by role
enum Pairing {
    Shot { bullet: usize, asteroid: usize },
    Wreck { ship: usize, asteroid: usize },
    ShipHit { bullet: usize, ship: usize },
}

fn classify(state: &GameState, i: usize, j: usize) -> Option<Pairing> {
    let (a, b) = (&state.entities[i], &state.entities[j]);
    let grace = state.config().bullet_owner_grace;
    let live_ship = |player: usize| state.players.get(player).is_some_and(|p| p.alive);

    match (a.kind, b.kind) {
        (EntityKind::Bullet { .. }, EntityKind::Asteroid) => Some(Pairing::Shot {
            bullet: i,
            asteroid: j,
        }),
        (EntityKind::Asteroid, EntityKind::Bullet { .. }) => Some(Pairing::Shot {
            bullet: j,
            asteroid: i,
        }),
        (EntityKind::Player { player }, EntityKind::Asteroid) if live_ship(player) => {
            Some(Pairing::Wreck {
                ship: i,
                asteroid: j,
            })
        }
        (EntityKind::Asteroid, EntityKind::Player { player }) if live_ship(player) => {
            Some(Pairing::Wreck {
                ship: j,
                asteroid: i,
            })
        }
        (EntityKind::Bullet { owner }, EntityKind::Player { player })
            if live_ship(player) && !(owner == Some(player) && a.age < grace) =>
        {
            Some(Pairing::ShipHit { bullet: i, ship: j })
        }
        (EntityKind::Player { player }, EntityKind::Bullet { owner })
            if live_ship(player) && !(owner == Some(player) && b.age < grace) =>
        {
            Some(Pairing::ShipHit { bullet: j, ship: i })
        }
        // Asteroids pass through asteroids, bullets through bullets, ships through ships
        _ => None,
    }
}

fn owner_of(entity: &Entity) -> Option<usize> {
    match entity.kind {
        EntityKind::Bullet { owner } => owner,
        _ => None,
    }
}

fn player_of(entity: &Entity) -> Option<usize> {
    match entity.kind {
        EntityKind::Player { player } => Some(player),
        _ => None,
    }
}

/// Detect and resolve all collisions for this step
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    let pairs = find_overlaps(&state.entities, state.borders());
    if pairs.is_empty() {
        return report;
    }

    let mut shots = Vec::new();
    let mut wrecks = Vec::new();
    let mut ship_hits = Vec::new();
    for (i, j) in pairs {
        match classify(state, i, j) {
            Some(Pairing::Shot { bullet, asteroid }) => shots.push((bullet, asteroid)),
            Some(Pairing::Wreck { ship, asteroid }) => wrecks.push((ship, asteroid)),
            Some(Pairing::ShipHit { bullet, ship }) => ship_hits.push((bullet, ship)),
            None => {}
        }
    }

    // Slots consumed by a contact this step
    let mut spent = vec![false; state.entities.len()];
    // Parents to split: (position, velocity, radius)
    let mut parents = Vec::new();

    for (bullet, asteroid) in shots {
        if spent[bullet] || spent[asteroid] {
            continue;
        }
        spent[bullet] = true;
        spent[asteroid] = true;

        let (b, a) = (&state.entities[bullet], &state.entities[asteroid]);
        report.contacts.push(Contact::AsteroidShot {
            bullet: b.id,
            asteroid: a.id,
            shooter: owner_of(b),
        });
        parents.push((a.pos, a.vel, a.radius));
    }

    for (ship, asteroid) in wrecks {
        if spent[ship] || spent[asteroid] {
            continue;
        }
        spent[ship] = true;

        let (s, a) = (&state.entities[ship], &state.entities[asteroid]);
        let Some(player) = player_of(s) else { continue };
        report.contacts.push(Contact::ShipWrecked {
            player,
            ship: s.id,
            asteroid: a.id,
        });
        report.dead_players.push(player);
    }

    for (bullet, ship) in ship_hits {
        if spent[bullet] || spent[ship] {
            continue;
        }
        spent[bullet] = true;
        spent[ship] = true;

        let (b, s) = (&state.entities[bullet], &state.entities[ship]);
        let Some(player) = player_of(s) else { continue };
        report.contacts.push(Contact::ShipShot {
            player,
            ship: s.id,
            bullet: b.id,
            shooter: owner_of(b),
        });
        report.dead_players.push(player);
    }

    // Apply: kill players, drop spent entities, then add fragments
    for &player in &report.dead_players {
        state.players[player].alive = false;
        log::info!("Player {player} died at step {}", state.step_count);
    }

    let remove_ships = state.config().remove_dead_ships;
    report.destroyed = state
        .entities
        .iter()
        .zip(&spent)
        .filter(|(e, used)| **used && (remove_ships || !e.kind.is_player()))
        .map(|(e, _)| e.id)
        .collect();
    state.remove_entities(&report.destroyed);

    for (pos, vel, radius) in parents {
        let Some(child_radius) = state.config().split_radius(radius) else {
            log::debug!("Asteroid of radius {radius} destroyed without fragments");
            continue;
        };
        let velocities = split_velocities(vel, &state.config, &mut state.rng);
        for child_vel in velocities {
            let id = state.spawn_asteroid(pos, child_vel, child_radius);
            report.spawned.push(id);
        }
        log::info!("Asteroid split into two of radius {child_radius}");
    }

    report
}
