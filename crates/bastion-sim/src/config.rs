//! Simulation configuration.

use serde::{Deserialize, Serialize};

use bastion_core::constants::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH, MAX_STEP_SECS};
use bastion_core::types::Arena;

/// Configuration for starting a new simulation. Every field has a default,
/// so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and step sequence = same simulation.
    pub seed: u64,
    pub arena_width: f64,
    pub arena_height: f64,
    /// Longest step integrated at once; longer steps are clamped.
    pub max_step_secs: f64,
    /// Run the enemy spawn scheduler. Off gives a quiet sandbox.
    pub auto_spawn: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            max_step_secs: MAX_STEP_SECS,
            auto_spawn: true,
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    /// Clamp a host-supplied step duration into `[0, max_step_secs]`.
    pub fn clamp_step(&self, dt_secs: f64) -> f64 {
        if dt_secs.is_nan() || dt_secs <= 0.0 {
            return 0.0;
        }
        dt_secs.min(self.max_step_secs)
    }
}
