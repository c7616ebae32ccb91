//! Entity spawn factories.
//!
//! Lays out the defended structures for a fresh session and builds the
//! component bundles for every transient entity (explosions, beams, drones,
//! particles, floating text).

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::events::AudioEvent;
use bastion_core::geometry::random_range;
use bastion_core::profiles::explosion_radius;
use bastion_core::types::{Arena, Position, Velocity};

/// Spawn the six cities and three bases for a new session.
pub fn setup_session(world: &mut World, arena: &Arena) {
    spawn_cities(world, arena);
    spawn_bases(world, arena);
}

/// Cities sit at `width/7 × i` for i = 1..=6.
pub fn spawn_cities(world: &mut World, arena: &Arena) {
    let spacing = arena.width / (CITY_COUNT as f64 + 1.0);
    for i in 1..=CITY_COUNT {
        world.spawn((City {
            x: spacing * i as f64,
            y: arena.height - CITY_ELEVATION,
            width: CITY_WIDTH,
            height: CITY_HEIGHT,
            active: true,
        },));
    }
}

/// Bases at the left edge, centre and right edge.
pub fn spawn_bases(world: &mut World, arena: &Arena) {
    let xs = [
        BASE_EDGE_INSET,
        arena.width / 2.0,
        arena.width - BASE_EDGE_INSET,
    ];
    for (id, x) in xs.into_iter().enumerate() {
        world.spawn((DefenseBase {
            id: id as u8,
            x,
            y: arena.height - BASE_ELEVATION,
            hits: 0,
            cooldown_ms: 0.0,
            mg_ammo: MG_MAX_AMMO,
            mg_overheated: false,
            mg_last_shot_ms: None,
            cannon_last_shot_ms: None,
            laser_last_shot_ms: None,
        },));
    }
}

/// Spawn an explosion with its particle burst and shockwave.
///
/// Every explosion is a live area effect from the step after it appears.
pub fn spawn_explosion(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    arena: &Arena,
    kind: ExplosionKind,
    at: DVec2,
    audio: &mut Vec<AudioEvent>,
) -> Entity {
    audio.push(AudioEvent::Explosion { kind });

    let shock_radius = if kind.is_ground() {
        SHOCKWAVE_GROUND_RADIUS
    } else {
        SHOCKWAVE_AIR_RADIUS
    };
    apply_shockwave(world, at, shock_radius);

    if kind == ExplosionKind::Nuclear {
        emit_ring(world, rng, at, NUCLEAR_RING_PARTICLES);
        emit_particles(world, rng, at, ParticleKind::Fire, NUCLEAR_FIRE_PARTICLES);
        emit_particles(world, rng, at, ParticleKind::Smoke, NUCLEAR_SMOKE_PARTICLES);
    } else {
        emit_particles(world, rng, at, ParticleKind::Debris, DEBRIS_PER_EXPLOSION);
        emit_particles(world, rng, at, ParticleKind::Fire, FIRE_PER_EXPLOSION);
        emit_particles(world, rng, at, ParticleKind::Smoke, SMOKE_PER_EXPLOSION);
    }

    world.spawn((
        Explosion {
            kind,
            radius: EXPLOSION_START_RADIUS,
            max_radius: explosion_radius(kind, arena),
            life: 1.0,
        },
        Position(at),
        Liveness::ACTIVE,
    ))
}

/// Push nearby particles away from a new blast, harder the closer they are.
fn apply_shockwave(world: &mut World, center: DVec2, radius: f64) {
    for (_e, (pos, vel, _p)) in world.query_mut::<(&Position, &mut Velocity, &Particle)>() {
        let offset = pos.0 - center;
        let d = offset.length();
        if d > 0.0 && d < radius {
            let force = (radius - d) / SHOCKWAVE_FORCE_DIVISOR;
            vel.0 += offset / d * force;
        }
    }
}

fn emit_particles(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    at: DVec2,
    kind: ParticleKind,
    count: usize,
) {
    for _ in 0..count {
        let angle = rng.gen::<f64>() * TAU;
        let speed = random_range(rng, 1.0, 5.0);
        let mut velocity = Velocity::from_heading(angle, speed);
        let (life_decay, gravity, size) = match kind {
            ParticleKind::Debris | ParticleKind::Ring => {
                (random_range(rng, 0.01, 0.04), PARTICLE_GRAVITY, 3.0)
            }
            ParticleKind::Fire => {
                velocity.0.x /= 2.0;
                velocity.0.y = random_range(rng, -4.0, -1.0);
                (0.04, -0.05, random_range(rng, 2.0, 6.0))
            }
            ParticleKind::Smoke => {
                velocity.0.y /= 5.0;
                (0.01, 0.0, random_range(rng, 3.0, 8.0))
            }
        };
        world.spawn((
            Particle {
                kind,
                life: 1.0,
                decay_per_frame: life_decay,
                gravity,
                size,
            },
            Position(at),
            velocity,
            Liveness::ACTIVE,
        ));
    }
}

/// Evenly spaced 360° ring used by nuclear detonations.
fn emit_ring(world: &mut World, rng: &mut ChaCha8Rng, at: DVec2, count: usize) {
    for i in 0..count {
        let angle = TAU * i as f64 / count as f64;
        let speed = random_range(rng, 2.0, 10.0);
        world.spawn((
            Particle {
                kind: ParticleKind::Ring,
                life: 2.5,
                decay_per_frame: random_range(rng, 0.01, 0.04),
                gravity: PARTICLE_GRAVITY,
                size: 3.0,
            },
            Position(at),
            Velocity::from_heading(angle, speed),
            Liveness::ACTIVE,
        ));
    }
}

/// A fixed segment with decaying opacity.
pub fn spawn_beam(world: &mut World, kind: BeamKind, start: DVec2, end: DVec2) -> Entity {
    let decay_per_frame = match kind {
        BeamKind::Sweep => LASER_DECAY_PER_FRAME,
        BeamKind::Defensive => DEFENSIVE_BEAM_DECAY_PER_FRAME,
    };
    world.spawn((
        Beam {
            kind,
            start,
            end,
            life: 1.0,
            decay_per_frame,
        },
        Liveness::ACTIVE,
    ))
}

pub fn spawn_drone(world: &mut World, at: DVec2, now_ms: f64) -> Entity {
    world.spawn((
        Drone {
            last_teleport_ms: now_ms,
            last_shot_ms: None,
        },
        Position(at),
        Liveness::ACTIVE,
    ))
}

pub fn spawn_floating_text(world: &mut World, text: String, at: DVec2) -> Entity {
    world.spawn((
        FloatingText {
            text,
            life: FLOATING_TEXT_LIFE,
        },
        Position(at),
        Liveness::ACTIVE,
    ))
}
