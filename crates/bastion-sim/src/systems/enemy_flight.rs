//! Enemy projectile flight: straight-line descent to the ground line.

use hecs::World;

use bastion_core::components::{EnemyProjectile, Liveness};
use bastion_core::types::{Arena, Position, Velocity};

/// Advance every live enemy. Enemies reaching the ground line are clamped to
/// it and deactivated; their x coordinates are returned for ground-impact
/// resolution, one entry per impacting enemy.
pub fn run(world: &mut World, arena: &Arena, dt_norm: f64) -> Vec<f64> {
    let ground = arena.ground_y();
    let mut impacts = Vec::new();

    for (_e, (_enemy, pos, vel, live)) in
        world.query_mut::<(&EnemyProjectile, &mut Position, &Velocity, &mut Liveness)>()
    {
        if !live.active {
            continue;
        }
        pos.advance(vel, dt_norm);
        if pos.y() >= ground {
            pos.0.y = ground;
            live.active = false;
            impacts.push(pos.x());
        }
    }

    impacts
}
