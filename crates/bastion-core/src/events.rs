//! Events emitted by the simulation for audio feedback.
//!
//! Fire-and-forget: the simulation never waits on their consumer.

use serde::{Deserialize, Serialize};

use crate::enums::{ExplosionKind, WeaponKind};

/// Audio cues produced during one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    Explosion { kind: ExplosionKind },
    WeaponFired { weapon: WeaponKind },
}
