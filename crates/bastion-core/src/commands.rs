//! Player commands sent from the input source to the simulation.
//!
//! Commands are queued and applied at the next step boundary.

use serde::{Deserialize, Serialize};

use crate::enums::WeaponKind;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Aiming and firing ---
    /// Move the pointer (aim point).
    SetPointer { x: f64, y: f64 },
    /// Continuous fire signal (mouse button or space held).
    SetTriggerHeld { held: bool },
    /// Single trigger edge at the current pointer.
    Fire,
    /// Single trigger edge at an explicit aim point.
    FireAt { x: f64, y: f64 },
    /// Arm a weapon (number keys 1–8).
    SelectWeapon { weapon: WeaponKind },
    /// Toggle hands-free repeat fire at the pointer.
    ToggleAutoFire,

    // --- Session control ---
    Pause,
    Resume,
    TogglePause,
    /// Start over with a fresh world and session.
    Reset,
}
