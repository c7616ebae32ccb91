//! Game state snapshot: the complete visible state handed to the renderer each step.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::{Position, SimTime};

/// Complete game state broadcast after each step. Contains live entities only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub armed_weapon: WeaponKind,
    pub auto_fire: bool,
    pub score: ScoreView,
    pub combo: ComboView,
    pub difficulty_multiplier: f64,
    pub homing_speed_multiplier: f64,
    pub cities: Vec<CityView>,
    pub bases: Vec<BaseView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub explosions: Vec<ExplosionView>,
    pub beams: Vec<BeamView>,
    pub drones: Vec<DroneView>,
    pub particles: Vec<ParticleView>,
    pub floating_texts: Vec<FloatingTextView>,
    pub weapons: WeaponStatusView,
    pub audio_events: Vec<AudioEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u64,
    pub enemies_spawned: u32,
    pub enemies_destroyed: u32,
    pub ground_impacts: u32,
    pub shots_fired: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComboView {
    pub count: u32,
    pub active: bool,
    /// Time left before the combo window closes (ms).
    pub remaining_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityView {
    pub position: Position,
    pub width: f64,
    pub height: f64,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseView {
    pub id: u8,
    pub position: Position,
    pub hits: u32,
    pub active: bool,
    pub destroyed: bool,
    pub recovery_remaining_ms: f64,
    pub mg_ammo: u32,
    pub mg_overheated: bool,
    pub cannon_ready: bool,
    pub laser_ready: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub origin: Position,
    pub position: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub weapon: WeaponKind,
    pub position: Position,
    /// Heading in radians, for drawing the exhaust streak.
    pub heading: f64,
    pub speed: f64,
    pub target: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub kind: ExplosionKind,
    pub position: Position,
    pub radius: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamView {
    pub kind: BeamKind,
    pub start: Position,
    pub end: Position,
    pub opacity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneView {
    pub position: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub kind: ParticleKind,
    pub position: Position,
    pub size: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingTextView {
    pub text: String,
    pub position: Position,
    pub opacity: f64,
}

/// Global weapon readiness for HUD display. Per-base state lives in `BaseView`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponStatusView {
    pub nuclear_in_flight: bool,
    pub nuclear_cooldown_remaining_ms: f64,
    pub barrage_cooldown_remaining_ms: f64,
    pub drones_active: u32,
}
