//! Defended structures: ground-impact damage, base recovery and the
//! game-over condition.

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::{City, DefenseBase};
use bastion_core::constants::*;
use bastion_core::enums::ExplosionKind;
use bastion_core::events::AudioEvent;

use crate::schedule::DeferredAction;
use crate::session::Session;
use crate::world_setup;

const BURST_JITTER_X: f64 = 10.0;
const BURST_JITTER_Y: f64 = 10.0;

/// Resolve one enemy reaching the ground at `x`.
///
/// Leaves a ground explosion, destroys any live city whose footprint covers
/// `x` and costs one hit to any operational base in range.
pub fn resolve_ground_impact(
    world: &mut World,
    session: &mut Session,
    rng: &mut ChaCha8Rng,
    audio: &mut Vec<AudioEvent>,
    x: f64,
) {
    let arena = session.arena;
    let now = session.now_ms();
    session.score.ground_impacts += 1;

    world_setup::spawn_explosion(
        world,
        rng,
        &arena,
        ExplosionKind::GroundImpact,
        DVec2::new(x, arena.ground_y()),
        audio,
    );

    for (_e, city) in world.query_mut::<&mut City>() {
        if !city.active || (city.x - x).abs() >= CITY_IMPACT_HALF_WIDTH {
            continue;
        }
        city.active = false;
        log::info!("City at x={:.0} destroyed", city.x);

        for k in 0..CITY_BURST_COUNT {
            let at = DVec2::new(
                city.x + rng.gen_range(-BURST_JITTER_X..BURST_JITTER_X),
                city.y - rng.gen::<f64>() * BURST_JITTER_Y,
            );
            session.schedule.schedule(
                now + CITY_BURST_INTERVAL_MS * k as f64,
                DeferredAction::CityBurst { at },
            );
        }
    }

    let mut fatal = Vec::new();
    for (_e, base) in world.query_mut::<&mut DefenseBase>() {
        if !base.is_active() || (base.x - x).abs() >= BASE_RADIUS {
            continue;
        }
        base.hits += 1;
        if base.is_destroyed() {
            log::info!("Base {} destroyed", base.id);
            fatal.push(base.position());
        } else {
            base.cooldown_ms = BASE_RECOVERY_MS;
            log::debug!("Base {} hit ({}/{})", base.id, base.hits, BASE_MAX_HITS);
        }
    }

    for at in fatal {
        world_setup::spawn_explosion(world, rng, &arena, ExplosionKind::GroundImpact, at, audio);
    }
}

/// Count down non-fatal recovery windows.
pub fn run_base_recovery(world: &mut World, dt_ms: f64) {
    for (_e, base) in world.query_mut::<&mut DefenseBase>() {
        if base.is_destroyed() || base.cooldown_ms <= 0.0 {
            continue;
        }
        base.cooldown_ms = (base.cooldown_ms - dt_ms).max(0.0);
    }
}

/// True when every city is gone and every base has exhausted its hits.
pub fn all_structures_lost(world: &World) -> bool {
    let cities_lost = world.query::<&City>().iter().all(|(_, c)| !c.active);
    let bases_lost = world
        .query::<&DefenseBase>()
        .iter()
        .all(|(_, b)| b.is_destroyed());
    cities_lost && bases_lost
}
