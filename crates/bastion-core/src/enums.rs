//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// The eight player weapon systems, in number-key order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Straight shot that detonates on arrival at the aim point.
    #[default]
    Standard,
    /// Self-guided, accelerating missile.
    Homing,
    /// Rapid fire with ammo and overheat.
    MachineGun,
    /// Five-round spread.
    Cannon,
    /// Instant long-range beam.
    Laser,
    /// Autonomous teleporting defense drone.
    Drone,
    /// Slow projectile with a very large detonation.
    Nuclear,
    /// Staggered salvo of self-guided missiles from every base.
    GuidedBarrage,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 8] = [
        WeaponKind::Standard,
        WeaponKind::Homing,
        WeaponKind::MachineGun,
        WeaponKind::Cannon,
        WeaponKind::Laser,
        WeaponKind::Drone,
        WeaponKind::Nuclear,
        WeaponKind::GuidedBarrage,
    ];

    /// Map a number-key slot (1–8) to a weapon.
    pub fn from_slot(slot: u8) -> Option<WeaponKind> {
        match slot {
            1..=8 => Some(Self::ALL[(slot - 1) as usize]),
            _ => None,
        }
    }

    /// Number-key slot (1–8) of this weapon.
    pub fn slot(self) -> u8 {
        Self::ALL
            .iter()
            .position(|w| *w == self)
            .map(|i| i as u8 + 1)
            .unwrap_or(1)
    }
}

/// Top-level session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Running,
    Paused,
    /// Every city and base is gone; only `Reset` is accepted.
    GameOver,
}

/// Visual and sizing tag for an explosion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExplosionKind {
    /// Enemy destroyed in mid-air.
    Intercept,
    /// Enemy destroyed by a beam.
    BeamIntercept,
    /// Standard shot reaching its aim point.
    StandardArrival,
    /// Self-guided projectile out of flight time.
    Fizzle,
    /// Enemy striking the ground, or a structure being destroyed.
    GroundImpact,
    Nuclear,
    /// Drone teleport flash or kamikaze.
    Drone,
    /// Wide blast a drone leaves behind.
    DroneBlast,
}

impl ExplosionKind {
    pub fn is_ground(self) -> bool {
        matches!(self, ExplosionKind::GroundImpact)
    }
}

/// Beam variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamKind {
    /// Long player laser sweeping across the screen.
    Sweep,
    /// Short drone beam ending at its target.
    Defensive,
}

/// Particle flavour, for rendering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Debris,
    Fire,
    Smoke,
    /// Nuclear shock ring.
    Ring,
}
