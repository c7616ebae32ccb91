//! Static per-variant tables: projectile flight profiles and explosion sizes.

use crate::constants::*;
use crate::enums::{ExplosionKind, WeaponKind};
use crate::types::Arena;

/// What ends a projectile's flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Terminal {
    /// Detonates on reaching the aim point; never collides en route.
    DetonateAtAim(ExplosionKind),
    /// Consumed by the first enemy within `hit_radius`.
    Contact { hit_radius: f64 },
}

/// Fixed flight characteristics of one projectile variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileProfile {
    /// Launch speed (pixels per frame).
    pub speed: f64,
    /// Speed gained per frame. Unbounded; `max_flight_ms` caps the flight.
    pub acceleration: f64,
    /// Downward acceleration per frame.
    pub gravity: f64,
    /// Maximum heading change per frame for self-guided variants.
    pub turn_rate: Option<f64>,
    pub max_flight_ms: Option<f64>,
    /// Speed is multiplied by the session's homing speed multiplier.
    pub homing_bonus: bool,
    /// Removed once it leaves the arena.
    pub expires_offscreen: bool,
    pub terminal: Terminal,
}

impl ProjectileProfile {
    pub fn is_self_guided(&self) -> bool {
        self.turn_rate.is_some()
    }
}

const STANDARD: ProjectileProfile = ProjectileProfile {
    speed: 3.5,
    acceleration: 0.0,
    gravity: 0.0,
    turn_rate: None,
    max_flight_ms: None,
    homing_bonus: false,
    expires_offscreen: false,
    terminal: Terminal::DetonateAtAim(ExplosionKind::StandardArrival),
};

const HOMING: ProjectileProfile = ProjectileProfile {
    speed: 0.8,
    acceleration: 0.02,
    gravity: 0.0,
    turn_rate: Some(0.010),
    max_flight_ms: Some(7000.0),
    homing_bonus: true,
    expires_offscreen: false,
    terminal: Terminal::Contact {
        hit_radius: DIRECT_HIT_RADIUS,
    },
};

const MACHINE_GUN: ProjectileProfile = ProjectileProfile {
    speed: 6.0,
    acceleration: 0.0,
    gravity: 0.015,
    turn_rate: None,
    max_flight_ms: None,
    homing_bonus: false,
    expires_offscreen: true,
    terminal: Terminal::Contact {
        hit_radius: DIRECT_HIT_RADIUS,
    },
};

const CANNON: ProjectileProfile = ProjectileProfile {
    speed: 5.0,
    acceleration: 0.0,
    gravity: 0.02,
    turn_rate: None,
    max_flight_ms: None,
    homing_bonus: false,
    expires_offscreen: true,
    terminal: Terminal::Contact {
        hit_radius: CANNON_HIT_RADIUS,
    },
};

const NUCLEAR: ProjectileProfile = ProjectileProfile {
    speed: 2.0,
    acceleration: 0.0,
    gravity: 0.0,
    turn_rate: None,
    max_flight_ms: None,
    homing_bonus: true,
    expires_offscreen: false,
    terminal: Terminal::DetonateAtAim(ExplosionKind::Nuclear),
};

const GUIDED_BARRAGE: ProjectileProfile = ProjectileProfile {
    speed: 0.6,
    acceleration: 0.008,
    gravity: 0.0,
    turn_rate: Some(0.015),
    max_flight_ms: Some(15_000.0),
    homing_bonus: true,
    expires_offscreen: false,
    terminal: Terminal::Contact {
        hit_radius: DIRECT_HIT_RADIUS,
    },
};

/// Flight profile for a weapon's projectile. Laser and drone fire no projectiles.
pub fn projectile_profile(weapon: WeaponKind) -> Option<ProjectileProfile> {
    match weapon {
        WeaponKind::Standard => Some(STANDARD),
        WeaponKind::Homing => Some(HOMING),
        WeaponKind::MachineGun => Some(MACHINE_GUN),
        WeaponKind::Cannon => Some(CANNON),
        WeaponKind::Nuclear => Some(NUCLEAR),
        WeaponKind::GuidedBarrage => Some(GUIDED_BARRAGE),
        WeaponKind::Laser | WeaponKind::Drone => None,
    }
}

/// Final radius an explosion of `kind` grows to.
pub fn explosion_radius(kind: ExplosionKind, arena: &Arena) -> f64 {
    match kind {
        ExplosionKind::Intercept | ExplosionKind::BeamIntercept | ExplosionKind::Drone => {
            EXPLOSION_AIR_RADIUS
        }
        ExplosionKind::StandardArrival => EXPLOSION_AIR_RADIUS * STANDARD_ARRIVAL_RADIUS_FACTOR,
        ExplosionKind::Fizzle => EXPLOSION_AIR_RADIUS * FIZZLE_RADIUS_FACTOR,
        ExplosionKind::GroundImpact => EXPLOSION_GROUND_RADIUS,
        ExplosionKind::Nuclear => NUCLEAR_RADIUS,
        ExplosionKind::DroneBlast => arena.width * DRONE_BLAST_WIDTH_FRACTION,
    }
}
