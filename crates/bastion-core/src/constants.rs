//! Simulation constants and tuning parameters.
//!
//! Kinematic quantities are expressed per reference frame at 60 Hz and scaled
//! by the step's frame count; timers are in session milliseconds.

/// Frame rate the per-frame constants were tuned against (Hz).
pub const REFERENCE_FRAME_RATE: f64 = 60.0;

/// Longest step the driver will integrate in one go (seconds).
pub const MAX_STEP_SECS: f64 = 0.1;

// --- Arena ---

pub const DEFAULT_ARENA_WIDTH: f64 = 1280.0;
pub const DEFAULT_ARENA_HEIGHT: f64 = 780.0;

/// Height of the ground strip; enemies impact at `height - GROUND_MARGIN`.
pub const GROUND_MARGIN: f64 = 20.0;

/// Aim points are never lower than this distance above the bottom edge.
pub const AIM_FLOOR_MARGIN: f64 = 50.0;

// --- Structures ---

pub const CITY_COUNT: usize = 6;
pub const CITY_WIDTH: f64 = 40.0;
pub const CITY_HEIGHT: f64 = 20.0;
/// Offset of a city's top edge above the bottom of the arena.
pub const CITY_ELEVATION: f64 = 40.0;
/// Horizontal half-width of a city's impact footprint.
pub const CITY_IMPACT_HALF_WIDTH: f64 = 30.0;

/// Base x positions are `BASE_EDGE_INSET`, centre, and `width - BASE_EDGE_INSET`.
pub const BASE_EDGE_INSET: f64 = 50.0;
pub const BASE_ELEVATION: f64 = 10.0;
pub const BASE_RADIUS: f64 = 20.0;
pub const BASE_MAX_HITS: u32 = 5;
/// Recovery window after a non-fatal hit (ms).
pub const BASE_RECOVERY_MS: f64 = 2000.0;

/// Destroyed cities burst into this many ground explosions.
pub const CITY_BURST_COUNT: u32 = 5;
pub const CITY_BURST_INTERVAL_MS: f64 = 100.0;

// --- Enemy projectiles ---

/// Probability that a new enemy aims at a live structure rather than a random x.
pub const ENEMY_TARGETED_CHANCE: f64 = 0.7;
pub const ENEMY_MIN_SPEED: f64 = 0.5;
pub const ENEMY_SPEED_SPREAD: f64 = 1.5;
pub const ENEMY_SPEED_FACTOR: f64 = 0.7;

// --- Spawn & difficulty scheduling ---

/// Spawn interval at score 0 (seconds).
pub const SPAWN_INTERVAL_START_SECS: f64 = 1.67;
/// Spawn interval floor (seconds).
pub const SPAWN_INTERVAL_MIN_SECS: f64 = 0.33;
/// Score needed to shave one second off the spawn interval.
pub const SPAWN_INTERVAL_SCORE_SCALE: f64 = 3000.0;
pub const DIFFICULTY_MAX: f64 = 1.3;
/// Score needed to raise the difficulty multiplier by 1.0.
pub const DIFFICULTY_SCORE_SCALE: f64 = 5000.0;

// --- Weapons ---

/// Live standard shots allowed per base.
pub const STANDARD_MAX_PER_BASE: usize = 7;
/// Live homing projectiles allowed per base.
pub const HOMING_MAX_PER_BASE: usize = 4;

pub const MG_MAX_AMMO: u32 = 20;
pub const MG_MIN_INTERVAL_MS: f64 = 100.0;
pub const MG_OVERHEAT_MS: f64 = 2000.0;
/// Machine-gun aim jitter half-range on each axis (pixels).
pub const MG_AIM_JITTER: f64 = 20.0;

pub const CANNON_COOLDOWN_MS: f64 = 1000.0;
pub const CANNON_SPREAD: [f64; 5] = [-0.2, -0.1, 0.0, 0.1, 0.2];

pub const LASER_COOLDOWN_MS: f64 = 3000.0;

pub const DRONE_MAX_ACTIVE: usize = 3;

pub const NUCLEAR_COOLDOWN_MS: f64 = 30_000.0;

pub const BARRAGE_COOLDOWN_MS: f64 = 60_000.0;
pub const BARRAGE_MISSILES_PER_BASE: u32 = 10;
pub const BARRAGE_LAUNCH_INTERVAL_MS: f64 = 200.0;

/// Repeat interval while the trigger is held, for all weapons but the
/// machine gun (which relies on its own gate) and the standard missile.
pub const HOLD_FIRE_INTERVAL_MS: f64 = 480.0;
pub const HOLD_FIRE_STANDARD_INTERVAL_MS: f64 = 624.0;

/// Permanent bonus added to the homing speed multiplier per homing kill.
pub const HOMING_KILL_SPEED_BONUS: f64 = 0.001;

// --- Direct hits ---

pub const DIRECT_HIT_RADIUS: f64 = 15.0;
pub const CANNON_HIT_RADIUS: f64 = 25.0;

// --- Explosions ---

pub const EXPLOSION_START_RADIUS: f64 = 1.0;
pub const EXPLOSION_GROWTH_PER_FRAME: f64 = 2.0;
pub const EXPLOSION_FADE_PER_FRAME: f64 = 0.04;
pub const EXPLOSION_AIR_RADIUS: f64 = 70.0;
pub const EXPLOSION_GROUND_RADIUS: f64 = 80.0;
/// Standard shots detonate slightly larger than a plain air burst.
pub const STANDARD_ARRIVAL_RADIUS_FACTOR: f64 = 1.2;
/// Self-guided projectiles that run out of flight time fizzle with a small burst.
pub const FIZZLE_RADIUS_FACTOR: f64 = 0.5;
pub const NUCLEAR_RADIUS: f64 = 400.0;

// --- Scoring ---

pub const SCORE_AREA_SINGLE: u64 = 100;
/// Multi-kill explosions score `SCORE_AREA_SINGLE * SCORE_AREA_MULTI_FACTOR * kills`.
pub const SCORE_AREA_MULTI_FACTOR: u64 = 2;
pub const SCORE_DIRECT_HIT: u64 = 150;
pub const SCORE_BEAM_HIT: u64 = 200;
pub const SCORE_DRONE_SWEEP: u64 = 50;

pub const COMBO_WINDOW_MS: f64 = 2000.0;

// --- Beams ---

/// Long sweep beam length as a multiple of the larger arena dimension.
pub const LASER_LENGTH_FACTOR: f64 = 1.5;
pub const LASER_DECAY_PER_FRAME: f64 = 0.012;
pub const DEFENSIVE_BEAM_DECAY_PER_FRAME: f64 = 0.1;
/// Enemies closer than this to a beam segment are destroyed.
pub const BEAM_HIT_DISTANCE: f64 = 10.0;

// --- Drones ---

pub const DRONE_LAUNCH_HEIGHT: f64 = 30.0;
pub const DRONE_TELEPORT_INTERVAL_MS: f64 = 5000.0;
/// Teleport destinations lie in the top fraction of the arena.
pub const DRONE_TELEPORT_BAND: f64 = 0.6;
pub const DRONE_FIRE_INTERVAL_MS: f64 = 500.0;
pub const DRONE_BEAM_RANGE: f64 = 250.0;
pub const DRONE_BODY_RADIUS: f64 = 15.0;
pub const DRONE_CONTACT_MARGIN: f64 = 5.0;
/// Blast radius of a drone kamikaze as a fraction of arena width.
pub const DRONE_BLAST_WIDTH_FRACTION: f64 = 0.2;

// --- Particles ---

pub const PARTICLE_GRAVITY: f64 = 0.08;
pub const PARTICLE_FRICTION: f64 = 0.95;
pub const DEBRIS_PER_EXPLOSION: usize = 50;
pub const FIRE_PER_EXPLOSION: usize = 30;
pub const SMOKE_PER_EXPLOSION: usize = 20;
pub const NUCLEAR_RING_PARTICLES: usize = 4000;
pub const NUCLEAR_FIRE_PARTICLES: usize = 1000;
pub const NUCLEAR_SMOKE_PARTICLES: usize = 200;
pub const SHOCKWAVE_AIR_RADIUS: f64 = 100.0;
pub const SHOCKWAVE_GROUND_RADIUS: f64 = 150.0;
pub const SHOCKWAVE_FORCE_DIVISOR: f64 = 15.0;

// --- Floating text ---

pub const FLOATING_TEXT_LIFE: f64 = 3.0;
pub const FLOATING_TEXT_RISE_PER_FRAME: f64 = 1.0;
pub const FLOATING_TEXT_FADE_PER_FRAME: f64 = 0.016;
