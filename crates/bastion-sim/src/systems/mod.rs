//! ECS systems that operate on the simulation world each step.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! Anything that outlives an entity lives in the `Session`, not here.

pub mod cleanup;
pub mod drones;
pub mod effects;
pub mod enemy_flight;
pub mod fire_control;
pub mod intercept;
pub mod missile_kinematics;
pub mod snapshot;
pub mod structures;
pub mod wave_spawner;

use glam::DVec2;
use hecs::World;

use bastion_core::components::{EnemyProjectile, Liveness};
use bastion_core::types::Position;

use crate::guidance::EnemyContact;

/// Every enemy still flagged active, in world iteration order.
pub fn live_enemies(world: &World) -> Vec<EnemyContact> {
    world
        .query::<(&EnemyProjectile, &Position, &Liveness)>()
        .iter()
        .filter(|(_, (_, _, live))| live.active)
        .map(|(_, (enemy, pos, _))| EnemyContact {
            id: enemy.id,
            position: pos.0,
        })
        .collect()
}

/// Nearest live enemy to `from` within `range`, if any.
pub fn nearest_enemy_within(
    enemies: &[EnemyContact],
    from: DVec2,
    range: f64,
) -> Option<EnemyContact> {
    enemies
        .iter()
        .filter(|e| e.position.distance(from) <= range)
        .min_by(|a, b| {
            a.position
                .distance_squared(from)
                .total_cmp(&b.position.distance_squared(from))
        })
        .copied()
}
