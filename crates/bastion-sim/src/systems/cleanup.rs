//! Cleanup system: end-of-step sweep of every entity flagged inactive.
//!
//! Nothing is despawned mid-step; systems only clear `Liveness::active`.

use hecs::{Entity, World};

use bastion_core::components::Liveness;

/// Despawn every inactive entity.
/// Uses a pre-allocated buffer to avoid per-step allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, live) in world.query_mut::<&Liveness>() {
        if !live.active {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
