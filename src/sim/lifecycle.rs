//! Step clocks and bullet expiry

use super::entity::EntityId;
use super::state::GameState;

/// Advance the step counter, every entity's age and every player's cooldown
pub fn advance_clocks(state: &mut GameState) {
    state.step_count += 1;
    for entity in &mut state.entities {
        entity.age = entity.age.saturating_add(1);
    }
    for player in &mut state.players {
        player.shoot_cooldown = player.shoot_cooldown.saturating_sub(1);
    }
}

/// Remove bullets whose age exceeds the configured lifespan.
///
/// Survivors keep their relative order. Returns the removed ids.
pub fn prune_expired_bullets(state: &mut GameState) -> Vec<EntityId> {
    let lifespan = state.config().bullet_lifespan;
    let expired: Vec<EntityId> = state
        .entities
        .iter()
        .filter(|e| e.kind.is_bullet() && e.age > lifespan)
        .map(|e| e.id)
        .collect();
    state.remove_entities(&expired);
    expired
}
