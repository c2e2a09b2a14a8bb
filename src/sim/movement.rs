//! Position integration on the toroidal world

use super::state::GameState;
use crate::wrap_position;

/// Advance every entity by its velocity, wrapping at the borders
pub fn move_all(state: &mut GameState) {
    let borders = state.borders();
    for entity in &mut state.entities {
        entity.pos = wrap_position(entity.pos + entity.vel, borders);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use glam::Vec2;
    use proptest::prelude::*;

    #[test]
    fn test_moves_every_kind() {
        let mut state = GameState::empty(SimConfig::default(), 1);
        let p = state.spawn_player(Vec2::new(10.0, 10.0));
        let a = state.spawn_asteroid(Vec2::new(100.0, 100.0), Vec2::new(3.0, -2.0), 40.0);
        let b = state.spawn_bullet(Vec2::new(795.0, 5.0), Vec2::new(10.0, -10.0), None);

        move_all(&mut state);

        assert_eq!(state.player_entity(p).unwrap().pos, Vec2::new(10.0, 10.0));
        assert_eq!(state.entity(a).unwrap().pos, Vec2::new(103.0, 98.0));
        assert_eq!(state.entity(b).unwrap().pos, Vec2::new(5.0, 795.0));
    }

    proptest! {
        #[test]
        fn positions_stay_inside_borders(
            x in 0.0f32..800.0,
            y in 0.0f32..800.0,
            vx in -1.0e5f32..1.0e5,
            vy in -1.0e5f32..1.0e5,
        ) {
            let mut state = GameState::empty(SimConfig::default(), 1);
            state.spawn_asteroid(Vec2::new(x, y), Vec2::new(vx, vy), 20.0);
            move_all(&mut state);
            let pos = state.entities()[0].pos;
            prop_assert!(pos.x >= 0.0 && pos.x < 800.0);
            prop_assert!(pos.y >= 0.0 && pos.y < 800.0);
        }
    }
}
