//! Simulation step
//!
//! One call advances the world by one discrete step. Stage order is fixed:
//! clocks, actions, movement, bullet expiry, collisions.

use super::actions::{PlayerActions, apply_actions};
use super::collision::{CollisionReport, resolve_collisions};
use super::lifecycle::{advance_clocks, prune_expired_bullets};
use super::movement::move_all;
use super::state::GameState;
use crate::error::SimError;

/// Advance the game state by one step.
///
/// `actions` holds one entry per registered player, aligned by player index;
/// extra entries are ignored. A shorter list is rejected before anything is
/// touched.
///
/// The report covers the whole step: bullets fired lead `spawned` and bullets
/// that outlived their lifespan lead `destroyed`, ahead of the collision
/// results.
pub fn step(
    state: &mut GameState,
    actions: &[PlayerActions],
) -> Result<CollisionReport, SimError> {
    let expected = state.player_count();
    if actions.len() < expected {
        return Err(SimError::MalformedInput {
            expected,
            got: actions.len(),
        });
    }

    advance_clocks(state);
    let mut fired = apply_actions(state, actions);
    move_all(state);
    let mut expired = prune_expired_bullets(state);
    let mut report = resolve_collisions(state);

    log::debug!(
        "Step {}: fired {:?}, expired {:?}, {} contacts, {} entities",
        state.step_count,
        fired,
        expired,
        report.contacts.len(),
        state.entities.len()
    );

    fired.append(&mut report.spawned);
    report.spawned = fired;
    expired.append(&mut report.destroyed);
    report.destroyed = expired;
    Ok(report)
}

impl GameState {
    /// See [`step`]
    pub fn step(&mut self, actions: &[PlayerActions]) -> Result<CollisionReport, SimError> {
        step(self, actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::actions::Action;
    use crate::sim::collision::Contact;
    use crate::sim::entity::EntityKind;
    use glam::Vec2;

    fn lone_ship(config: SimConfig) -> GameState {
        let mut state = GameState::empty(config, 12345);
        state.spawn_player(Vec2::new(400.0, 400.0));
        state
    }

    #[test]
    fn test_short_action_list_rejected_without_mutation() {
        let mut state = GameState::new(SimConfig::default(), 12345);
        state.spawn_player(Vec2::new(10.0, 10.0));
        let before: Vec<_> = state.entities().iter().map(|e| (e.pos, e.age)).collect();

        let err = step(&mut state, &[PlayerActions::idle()]).unwrap_err();
        assert_eq!(err, SimError::MalformedInput { expected: 2, got: 1 });

        let after: Vec<_> = state.entities().iter().map(|e| (e.pos, e.age)).collect();
        assert_eq!(before, after);
        assert_eq!(state.step_count(), 0);
    }

    #[test]
    fn test_extra_action_sets_ignored() {
        let mut state = lone_ship(SimConfig::default());
        let extra = [PlayerActions::idle(), PlayerActions::idle().with(Action::Shoot)];
        assert!(state.step(&extra).is_ok());
        assert_eq!(state.bullet_count(), 0);
        assert_eq!(state.step_count(), 1);
    }

    #[test]
    fn test_ages_and_step_count_advance() {
        let mut state = lone_ship(SimConfig::default());
        state.spawn_asteroid(Vec2::new(100.0, 100.0), Vec2::ZERO, 20.0);
        for _ in 0..3 {
            state.step(&[PlayerActions::idle()]).unwrap();
        }
        assert_eq!(state.step_count(), 3);
        assert!(state.entities().iter().all(|e| e.age == 3));
    }

    #[test]
    fn test_accelerate_then_move_one_step() {
        let mut state = lone_ship(SimConfig::default());
        state
            .step(&[PlayerActions::idle().with(Action::AccelerateForward)])
            .unwrap();
        let ship = state.player_entity(0).unwrap();
        assert_eq!(ship.vel, Vec2::new(0.0, 0.5));
        assert_eq!(ship.pos, Vec2::new(400.0, 400.5));
    }

    #[test]
    fn test_wrap_on_negative_axis() {
        let mut state = GameState::empty(SimConfig::default(), 1);
        let p = state.spawn_player(Vec2::ZERO);
        state.player_entity_mut(p).unwrap().vel = Vec2::new(0.0, -1.0);

        state.step(&[PlayerActions::idle()]).unwrap();
        assert_eq!(state.player_entity(p).unwrap().pos, Vec2::new(0.0, 799.0));
    }

    #[test]
    fn test_consecutive_shots_fire_once() {
        let mut state = lone_ship(SimConfig::default());
        let fire = [PlayerActions::idle().with(Action::Shoot)];
        state.step(&fire).unwrap();
        state.step(&fire).unwrap();
        assert_eq!(state.bullet_count(), 1);
    }

    #[test]
    fn test_cooldown_expires() {
        let mut state = lone_ship(SimConfig::default());
        let fire = [PlayerActions::idle().with(Action::Shoot)];
        let idle = [PlayerActions::idle()];

        state.step(&fire).unwrap();
        for _ in 0..19 {
            state.step(&idle).unwrap();
        }
        assert_eq!(state.players()[0].shoot_cooldown, 1);
        state.step(&fire).unwrap();
        assert_eq!(state.bullet_count(), 2);
    }

    #[test]
    fn test_bullet_removed_after_lifespan() {
        let mut state = lone_ship(SimConfig::default());
        let idle = [PlayerActions::idle()];
        state.step(&[PlayerActions::idle().with(Action::Shoot)]).unwrap();
        assert_eq!(state.bullet_count(), 1);

        for _ in 0..50 {
            state.step(&idle).unwrap();
        }
        assert_eq!(state.bullet_count(), 1);

        state.step(&idle).unwrap();
        assert_eq!(state.bullet_count(), 0);
    }

    #[test]
    fn test_report_lists_fired_and_expired_bullets() {
        let config = SimConfig {
            bullet_lifespan: 1,
            ..Default::default()
        };
        let mut state = lone_ship(config);
        let idle = [PlayerActions::idle()];

        let report = state.step(&[PlayerActions::idle().with(Action::Shoot)]).unwrap();
        assert_eq!(report.spawned.len(), 1);
        let bullet = report.spawned[0];
        assert!(state.entity(bullet).unwrap().kind.is_bullet());
        assert!(report.destroyed.is_empty());

        let report = state.step(&idle).unwrap();
        assert!(report.destroyed.is_empty());
        assert!(state.entity(bullet).is_some());

        let report = state.step(&idle).unwrap();
        assert_eq!(report.destroyed, vec![bullet]);
        assert!(report.spawned.is_empty());
        assert_eq!(state.bullet_count(), 0);
    }

    #[test]
    fn test_zero_grace_shot_kills_shooter() {
        let config = SimConfig {
            bullet_owner_grace: 0,
            ..Default::default()
        };
        let mut state = lone_ship(config);
        let ship = state.player_entity(0).unwrap().id;

        let report = state.step(&[PlayerActions::idle().with(Action::Shoot)]).unwrap();
        assert_eq!(report.dead_players, vec![0]);
        assert_eq!(report.spawned.len(), 1);
        let bullet = report.spawned[0];
        assert_eq!(report.destroyed, vec![ship, bullet]);
        assert!(matches!(
            report.contacts[..],
            [Contact::ShipShot { player: 0, shooter: Some(0), .. }]
        ));
        assert!(!state.players()[0].alive);
    }

    #[test]
    fn test_own_shot_does_not_kill_shooter() {
        let mut state = lone_ship(SimConfig::default());
        let thrust_fire = [[Action::AccelerateForward, Action::Shoot]
            .into_iter()
            .collect::<PlayerActions>()];
        for _ in 0..60 {
            state.step(&thrust_fire).unwrap();
            assert!(state.players()[0].alive);
        }
    }

    #[test]
    fn test_step_splits_asteroid() {
        let mut state = GameState::empty(SimConfig::default(), 3);
        let pos = Vec2::new(250.0, 250.0);
        let rock = state.spawn_asteroid(pos, Vec2::ZERO, 80.0);
        let bullet = state.spawn_bullet(pos, Vec2::ZERO, None);

        let report = state.step(&[]).unwrap();
        assert_eq!(report.destroyed, vec![rock, bullet]);
        assert_eq!(report.spawned.len(), 2);
        for id in report.spawned {
            let child = state.entity(id).unwrap();
            assert_eq!(child.kind, EntityKind::Asteroid);
            assert_eq!(child.radius, 40.0);
            assert_eq!(child.pos, pos);
        }
    }

    #[test]
    fn test_ship_flies_into_asteroid() {
        let mut state = lone_ship(SimConfig::default());
        let rock = state.spawn_asteroid(Vec2::new(400.0, 450.0), Vec2::ZERO, 40.0);

        let report = state.step(&[PlayerActions::idle()]).unwrap();
        assert_eq!(report.dead_players, vec![0]);
        assert!(!state.players()[0].alive);
        assert!(state.entity(rock).is_some());

        // dead players are still counted for input alignment
        assert!(state.step(&[]).is_err());
        assert!(state.step(&[PlayerActions::idle().with(Action::Shoot)]).is_ok());
        assert_eq!(state.bullet_count(), 0);
    }

    #[test]
    fn test_determinism() {
        let script = |i: u64| {
            let mut actions = PlayerActions::idle();
            actions.rotate_left = i % 7 < 3;
            actions.accelerate_forward = i % 5 != 0;
            actions.shoot = i % 3 == 0;
            [actions]
        };

        let mut a = GameState::new(SimConfig::default(), 2024);
        let mut b = GameState::new(SimConfig::default(), 2024);
        for i in 0..300 {
            let ra = a.step(&script(i)).unwrap();
            let rb = b.step(&script(i)).unwrap();
            assert_eq!(ra, rb);
        }
        assert_eq!(a.entities().len(), b.entities().len());
        for (ea, eb) in a.entities().iter().zip(b.entities()) {
            assert_eq!(ea.id, eb.id);
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.vel, eb.vel);
        }
    }
}
