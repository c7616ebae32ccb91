//! Collision and kill resolution.
//!
//! Four passes in fixed order: explosions, direct hits, beams, drones. Each
//! pass only considers enemies still alive when it runs. Every kill leaves a
//! chain explosion at the victim; those are spawned after the last pass, so
//! they start acting next step.

use glam::DVec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::{ExplosionKind, WeaponKind};
use bastion_core::events::AudioEvent;
use bastion_core::geometry::distance_to_segment;
use bastion_core::profiles::{projectile_profile, Terminal};
use bastion_core::types::{Arena, Position};

use crate::session::Session;
use crate::systems::missile_kinematics;
use crate::world_setup;

struct Target {
    entity: Entity,
    position: DVec2,
    alive: bool,
}

struct Striker {
    entity: Entity,
    weapon: WeaponKind,
    position: DVec2,
    hit_radius: f64,
}

/// Kills from one step, applied to the world once all passes are done.
#[derive(Default)]
struct Resolution {
    explosions: Vec<(ExplosionKind, DVec2)>,
    consumed: Vec<Entity>,
}

pub fn run(
    world: &mut World,
    session: &mut Session,
    rng: &mut ChaCha8Rng,
    audio: &mut Vec<AudioEvent>,
) {
    let arena = session.arena;
    let mut targets: Vec<Target> = world
        .query::<(&EnemyProjectile, &Position, &Liveness)>()
        .iter()
        .filter(|(_, (_, _, live))| live.active)
        .map(|(entity, (_, pos, _))| Target {
            entity,
            position: pos.0,
            alive: true,
        })
        .collect();
    if targets.is_empty() {
        return;
    }

    let mut resolution = Resolution::default();

    explosion_pass(world, session, &mut targets, &mut resolution);
    direct_hit_pass(world, session, &mut targets, &mut resolution);
    beam_pass(world, session, &mut targets, &mut resolution);
    drone_pass(world, session, &arena, &mut targets, &mut resolution);

    for target in targets.iter().filter(|t| !t.alive) {
        if let Ok(mut live) = world.get::<&mut Liveness>(target.entity) {
            live.active = false;
        }
    }
    for entity in resolution.consumed {
        if let Ok(mut live) = world.get::<&mut Liveness>(entity) {
            live.active = false;
        }
    }
    for (kind, at) in resolution.explosions {
        if kind == ExplosionKind::Nuclear {
            missile_kinematics::detonate(world, session, rng, audio, kind, at);
        } else {
            world_setup::spawn_explosion(world, rng, &arena, kind, at, audio);
        }
    }
}

/// Kill every live target within `radius` of `center`, returning the count.
fn kill_within(
    session: &mut Session,
    targets: &mut [Target],
    center: DVec2,
    radius: f64,
    chain_kind: ExplosionKind,
    resolution: &mut Resolution,
) -> u64 {
    let mut kills = 0;
    for target in targets.iter_mut().filter(|t| t.alive) {
        if target.position.distance(center) < radius {
            target.alive = false;
            kills += 1;
            session.record_kill();
            resolution.explosions.push((chain_kind, target.position));
        }
    }
    kills
}

/// Pass 1: area kills. Multi-kills score double per enemy.
fn explosion_pass(
    world: &World,
    session: &mut Session,
    targets: &mut [Target],
    resolution: &mut Resolution,
) {
    let blasts: Vec<(DVec2, f64)> = world
        .query::<(&Explosion, &Position, &Liveness)>()
        .iter()
        .filter(|(_, (_, _, live))| live.active)
        .map(|(_, (explosion, pos, _))| (pos.0, explosion.radius))
        .collect();

    for (center, radius) in blasts {
        let kills = kill_within(
            session,
            targets,
            center,
            radius,
            ExplosionKind::Intercept,
            resolution,
        );
        let points = match kills {
            0 => 0,
            1 => SCORE_AREA_SINGLE,
            n => SCORE_AREA_SINGLE * SCORE_AREA_MULTI_FACTOR * n,
        };
        session.award(points);
    }
}

/// Pass 2: contact kills by every non-standard projectile. A projectile is
/// consumed by its first kill.
fn direct_hit_pass(
    world: &World,
    session: &mut Session,
    targets: &mut [Target],
    resolution: &mut Resolution,
) {
    let strikers: Vec<Striker> = world
        .query::<(&PlayerProjectile, &Position, &Liveness)>()
        .iter()
        .filter(|(_, (p, _, live))| live.active && p.weapon != WeaponKind::Standard)
        .filter_map(|(entity, (p, pos, _))| {
            let hit_radius = match projectile_profile(p.weapon)?.terminal {
                Terminal::Contact { hit_radius } => hit_radius,
                Terminal::DetonateAtAim(_) => DIRECT_HIT_RADIUS,
            };
            Some(Striker {
                entity,
                weapon: p.weapon,
                position: pos.0,
                hit_radius,
            })
        })
        .collect();

    for striker in strikers {
        let Some(target) = targets
            .iter_mut()
            .find(|t| t.alive && t.position.distance(striker.position) < striker.hit_radius)
        else {
            continue;
        };

        target.alive = false;
        resolution.explosions.push((ExplosionKind::Intercept, target.position));
        resolution.consumed.push(striker.entity);
        session.record_kill();
        session.award(SCORE_DIRECT_HIT);

        match striker.weapon {
            WeaponKind::Homing => session.homing_speed_multiplier += HOMING_KILL_SPEED_BONUS,
            WeaponKind::Nuclear => resolution
                .explosions
                .push((ExplosionKind::Nuclear, striker.position)),
            _ => {}
        }
    }
}

/// Pass 3: anything within a few pixels of a live beam segment.
fn beam_pass(
    world: &World,
    session: &mut Session,
    targets: &mut [Target],
    resolution: &mut Resolution,
) {
    let segments: Vec<(DVec2, DVec2)> = world
        .query::<(&Beam, &Liveness)>()
        .iter()
        .filter(|(_, (_, live))| live.active)
        .map(|(_, (beam, _))| (beam.start, beam.end))
        .collect();

    for (start, end) in segments {
        for target in targets.iter_mut().filter(|t| t.alive) {
            if distance_to_segment(target.position, start, end) < BEAM_HIT_DISTANCE {
                target.alive = false;
                session.record_kill();
                session.award(SCORE_BEAM_HIT);
                resolution
                    .explosions
                    .push((ExplosionKind::BeamIntercept, target.position));
            }
        }
    }
}

/// Pass 4: a drone touching an enemy sacrifices itself, taking the enemy
/// and everything inside its blast radius with it.
fn drone_pass(
    world: &World,
    session: &mut Session,
    arena: &Arena,
    targets: &mut [Target],
    resolution: &mut Resolution,
) {
    let drones: Vec<(Entity, DVec2)> = world
        .query::<(&Drone, &Position, &Liveness)>()
        .iter()
        .filter(|(_, (_, _, live))| live.active)
        .map(|(entity, (_, pos, _))| (entity, pos.0))
        .collect();

    let contact = DRONE_BODY_RADIUS + DRONE_CONTACT_MARGIN;
    let blast_radius = arena.width * DRONE_BLAST_WIDTH_FRACTION;

    for (entity, at) in drones {
        let Some(victim) = targets
            .iter_mut()
            .find(|t| t.alive && t.position.distance(at) < contact)
        else {
            continue;
        };
        victim.alive = false;
        // The contact kill counts, but only sweep kills feed the combo.
        session.score.enemies_destroyed += 1;
        resolution.consumed.push(entity);
        resolution.explosions.push((ExplosionKind::DroneBlast, at));

        let swept = kill_within(session, targets, at, blast_radius, ExplosionKind::Drone, resolution);
        session.award(SCORE_DRONE_SWEEP * swept);
    }
}
