//! Per-step updates for purely visual or decaying entities: particles,
//! floating text, explosions and beams.
//!
//! Explosions and beams are updated before anything moves so the collision
//! passes later in the step see their current geometry.

use hecs::World;

use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::ParticleKind;
use bastion_core::types::{Position, Velocity};

const SMOKE_FRICTION: f64 = 0.99;
const SMOKE_GROWTH_PER_FRAME: f64 = 0.1;
const FIRE_SHRINK_PER_FRAME: f64 = 0.1;
const FIRE_MIN_SIZE: f64 = 0.5;

pub fn run_particles(world: &mut World, dt_norm: f64) {
    for (_e, (particle, pos, vel, live)) in
        world.query_mut::<(&mut Particle, &mut Position, &mut Velocity, &mut Liveness)>()
    {
        if !live.active {
            continue;
        }
        pos.advance(vel, dt_norm);

        let friction = match particle.kind {
            ParticleKind::Smoke => SMOKE_FRICTION,
            _ => PARTICLE_FRICTION,
        };
        vel.0.y += particle.gravity * dt_norm;
        vel.0 *= friction.powf(dt_norm);

        match particle.kind {
            ParticleKind::Fire => {
                particle.size =
                    (particle.size - FIRE_SHRINK_PER_FRAME * dt_norm).max(FIRE_MIN_SIZE);
            }
            ParticleKind::Smoke => particle.size += SMOKE_GROWTH_PER_FRAME * dt_norm,
            ParticleKind::Debris | ParticleKind::Ring => {}
        }

        particle.life -= particle.decay_per_frame * dt_norm;
        if particle.life <= 0.0 {
            live.active = false;
        }
    }
}

pub fn run_floating_text(world: &mut World, dt_norm: f64) {
    for (_e, (text, pos, live)) in
        world.query_mut::<(&mut FloatingText, &mut Position, &mut Liveness)>()
    {
        if !live.active {
            continue;
        }
        pos.0.y -= FLOATING_TEXT_RISE_PER_FRAME * dt_norm;
        text.life -= FLOATING_TEXT_FADE_PER_FRAME * dt_norm;
        if text.life <= 0.0 {
            live.active = false;
        }
    }
}

/// Grow to the cap, then fade. Dies when fully faded.
pub fn run_explosions(world: &mut World, dt_norm: f64) {
    for (_e, (explosion, live)) in world.query_mut::<(&mut Explosion, &mut Liveness)>() {
        if !live.active {
            continue;
        }
        if explosion.radius < explosion.max_radius {
            explosion.radius =
                (explosion.radius + EXPLOSION_GROWTH_PER_FRAME * dt_norm).min(explosion.max_radius);
        } else {
            explosion.life -= EXPLOSION_FADE_PER_FRAME * dt_norm;
            if explosion.life <= 0.0 {
                live.active = false;
            }
        }
    }
}

pub fn run_beams(world: &mut World, dt_norm: f64) {
    for (_e, (beam, live)) in world.query_mut::<(&mut Beam, &mut Liveness)>() {
        if !live.active {
            continue;
        }
        beam.life -= beam.decay_per_frame * dt_norm;
        if beam.life <= 0.0 {
            live.active = false;
        }
    }
}
