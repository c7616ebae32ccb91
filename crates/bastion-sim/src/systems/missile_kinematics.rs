//! Player projectile flight: guidance, acceleration, gravity, arrival
//! detonation and flight-time expiry.
//!
//! Behaviour per weapon comes from the static profile table in
//! `bastion_core::profiles`; nothing here branches on weapon kind directly
//! except the nuclear cooldown hook in `detonate`.

use std::collections::HashMap;

use glam::DVec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use bastion_core::components::{Liveness, PlayerProjectile};
use bastion_core::constants::NUCLEAR_COOLDOWN_MS;
use bastion_core::enums::ExplosionKind;
use bastion_core::events::AudioEvent;
use bastion_core::profiles::{projectile_profile, Terminal};
use bastion_core::types::{Position, Velocity};

use crate::guidance::{self, Seeker};
use crate::session::Session;
use crate::systems::live_enemies;
use crate::world_setup;

/// Run one step of player projectile flight.
pub fn run(
    world: &mut World,
    session: &mut Session,
    rng: &mut ChaCha8Rng,
    audio: &mut Vec<AudioEvent>,
    dt_norm: f64,
) {
    let now = session.now_ms();
    let arena = session.arena;
    let enemies = live_enemies(world);
    let enemy_positions: HashMap<u32, DVec2> =
        enemies.iter().map(|e| (e.id, e.position)).collect();

    let mut detonations: Vec<(ExplosionKind, DVec2)> = Vec::new();

    // Guided projectiles past their flight budget fizzle before steering.
    // Survivors are retargeted together so claims are visible to each other.
    let mut seeker_entities: Vec<Entity> = Vec::new();
    let mut seekers: Vec<Seeker> = Vec::new();
    for (entity, (projectile, pos, live)) in
        world.query_mut::<(&PlayerProjectile, &Position, &mut Liveness)>()
    {
        if !live.active {
            continue;
        }
        let Some(profile) = projectile_profile(projectile.weapon) else {
            continue;
        };
        if !profile.is_self_guided() {
            continue;
        }
        if profile
            .max_flight_ms
            .is_some_and(|max| now - projectile.launched_at_ms > max)
        {
            live.active = false;
            detonations.push((ExplosionKind::Fizzle, pos.0));
            continue;
        }
        seeker_entities.push(entity);
        seekers.push(Seeker {
            position: pos.0,
            target: projectile.target,
        });
    }

    guidance::assign_targets(&mut seekers, &enemies);
    for (entity, seeker) in seeker_entities.iter().zip(&seekers) {
        if let Ok(mut projectile) = world.get::<&mut PlayerProjectile>(*entity) {
            projectile.target = seeker.target;
        }
    }

    for (_e, (projectile, pos, vel, live)) in world.query_mut::<(
        &mut PlayerProjectile,
        &mut Position,
        &mut Velocity,
        &mut Liveness,
    )>() {
        if !live.active {
            continue;
        }
        let Some(profile) = projectile_profile(projectile.weapon) else {
            continue;
        };

        projectile.speed += profile.acceleration * dt_norm;

        if let Some(turn_rate) = profile.turn_rate {
            let mut heading = vel.heading();
            if let Some(target_pos) = projectile.target.and_then(|t| enemy_positions.get(&t)) {
                let desired = guidance::bearing(pos.0, *target_pos);
                heading = guidance::steer_heading(heading, desired, turn_rate * dt_norm);
            }
            *vel = Velocity::from_heading(heading, projectile.speed);
        } else if profile.acceleration > 0.0 {
            *vel = Velocity::from_heading(vel.heading(), projectile.speed);
        }

        vel.0.y += profile.gravity * dt_norm;

        match profile.terminal {
            Terminal::DetonateAtAim(kind) => {
                let step = vel.speed() * dt_norm;
                if pos.0.distance(projectile.aim) <= step {
                    pos.0 = projectile.aim;
                    live.active = false;
                    detonations.push((kind, projectile.aim));
                } else {
                    pos.advance(vel, dt_norm);
                }
            }
            Terminal::Contact { .. } => {
                pos.advance(vel, dt_norm);
                if profile.expires_offscreen && !arena.contains(pos) {
                    live.active = false;
                }
            }
        }
    }

    for (kind, at) in detonations {
        detonate(world, session, rng, audio, kind, at);
    }
}

/// Spawn a terminal explosion for a player projectile.
/// Nuclear detonations also start the nuclear cooldown.
pub fn detonate(
    world: &mut World,
    session: &mut Session,
    rng: &mut ChaCha8Rng,
    audio: &mut Vec<AudioEvent>,
    kind: ExplosionKind,
    at: DVec2,
) {
    if kind == ExplosionKind::Nuclear {
        session.nuclear_ready_at_ms = session.now_ms() + NUCLEAR_COOLDOWN_MS;
        log::debug!("Nuclear detonation at ({:.0}, {:.0})", at.x, at.y);
    }
    let arena = session.arena;
    world_setup::spawn_explosion(world, rng, &arena, kind, at, audio);
}
