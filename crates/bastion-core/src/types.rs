//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{GROUND_MARGIN, REFERENCE_FRAME_RATE};

/// 2D position in screen space (pixels). x = right, y = down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec2);

/// 2D velocity in pixels per reference frame (60 Hz).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec2);

/// Session clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of steps executed since the session started.
    pub tick: u64,
    /// Elapsed session time in milliseconds.
    pub elapsed_ms: f64,
}

/// Playfield dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.0.distance(other.0)
    }

    /// Advance along `velocity` for `dt_norm` reference frames.
    pub fn advance(&mut self, velocity: &Velocity, dt_norm: f64) {
        self.0 += velocity.0 * dt_norm;
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    /// Velocity of magnitude `speed` along `heading` (radians).
    pub fn from_heading(heading: f64, speed: f64) -> Self {
        Self(DVec2::new(heading.cos(), heading.sin()) * speed)
    }

    /// Speed magnitude (pixels per reference frame).
    pub fn speed(&self) -> f64 {
        self.0.length()
    }

    /// Heading in radians (0 = +x, clockwise in screen space).
    pub fn heading(&self) -> f64 {
        self.0.y.atan2(self.0.x)
    }
}

impl SimTime {
    /// Current session timestamp in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Advance by one step of `dt_secs` seconds.
    pub fn advance(&mut self, dt_secs: f64) {
        self.tick += 1;
        self.elapsed_ms += dt_secs * 1000.0;
    }
}

/// Convert a step duration into reference frames.
pub fn frames(dt_secs: f64) -> f64 {
    dt_secs * REFERENCE_FRAME_RATE
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The y coordinate at which enemy projectiles strike the ground.
    pub fn ground_y(&self) -> f64 {
        self.height - GROUND_MARGIN
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a point lies inside the visible playfield.
    pub fn contains(&self, pos: &Position) -> bool {
        pos.x() >= 0.0 && pos.x() <= self.width && pos.y() >= 0.0 && pos.y() <= self.height
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(
            crate::constants::DEFAULT_ARENA_WIDTH,
            crate::constants::DEFAULT_ARENA_HEIGHT,
        )
    }
}
