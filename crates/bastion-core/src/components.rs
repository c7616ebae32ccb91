//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems; the few
//! methods here only derive state from fields.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::BASE_MAX_HITS;
use crate::enums::*;

/// Liveness flag carried by every transient entity.
///
/// Systems only ever clear it; the cleanup sweep at the end of a step
/// despawns entities whose flag is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liveness {
    pub active: bool,
}

impl Liveness {
    pub const ACTIVE: Liveness = Liveness { active: true };
}

/// A defended city. Destroyed permanently by a ground impact in its footprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub active: bool,
}

/// A launch site with its own weapon readiness state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseBase {
    pub id: u8,
    pub x: f64,
    pub y: f64,
    /// Structural hits taken, never decreases.
    pub hits: u32,
    /// Remaining recovery time after a non-fatal hit (ms).
    pub cooldown_ms: f64,
    pub mg_ammo: u32,
    pub mg_overheated: bool,
    pub mg_last_shot_ms: Option<f64>,
    pub cannon_last_shot_ms: Option<f64>,
    pub laser_last_shot_ms: Option<f64>,
}

impl DefenseBase {
    /// Terminal state: the hit budget is exhausted.
    pub fn is_destroyed(&self) -> bool {
        self.hits >= BASE_MAX_HITS
    }

    /// Able to fire and to be hit.
    pub fn is_active(&self) -> bool {
        !self.is_destroyed() && self.cooldown_ms <= 0.0
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Incoming enemy projectile. Never retargets after spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyProjectile {
    /// Stable identifier used by guided projectiles to refer to this enemy.
    pub id: u32,
    /// Spawn point, kept for trail rendering.
    pub origin: DVec2,
}

/// Player projectile of any weapon variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProjectile {
    pub weapon: WeaponKind,
    /// Id of the base that fired it.
    pub source_base: u8,
    pub aim: DVec2,
    /// Scalar speed before the homing multiplier (pixels per frame).
    pub speed: f64,
    /// Non-owning reference to an enemy by id. Re-validated every step.
    pub target: Option<u32>,
    pub launched_at_ms: f64,
}

/// Expanding area effect. Kills enemies inside its current radius.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub kind: ExplosionKind,
    pub radius: f64,
    pub max_radius: f64,
    /// Opacity, decays once `radius` reaches `max_radius`.
    pub life: f64,
}

/// Laser segment fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub kind: BeamKind,
    pub start: DVec2,
    pub end: DVec2,
    pub life: f64,
    pub decay_per_frame: f64,
}

/// Autonomous defense drone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drone {
    pub last_teleport_ms: f64,
    pub last_shot_ms: Option<f64>,
}

/// Cosmetic particle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub life: f64,
    pub decay_per_frame: f64,
    pub gravity: f64,
    pub size: f64,
}

/// Rising, fading text such as the combo announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub text: String,
    pub life: f64,
}
