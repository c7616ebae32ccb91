//! Geometry utilities: point/segment distance, angle wrapping
//! and range randomization.

use std::f64::consts::{PI, TAU};

use glam::DVec2;
use rand::Rng;

/// Shortest distance from `p` to the segment `a`–`b`.
///
/// The projection parameter is clamped to [0, 1], so points beyond either
/// end measure to that endpoint. A degenerate segment measures to `a`.
pub fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Uniform sample in `[min, max)`. Returns `min` when the range is empty.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    rng.gen::<f64>() * (max - min) + min
}

/// Wrap an angle into (-π, π].
pub fn wrap_angle(angle: f64) -> f64 {
    let mut a = angle.rem_euclid(TAU);
    if a > PI {
        a -= TAU;
    }
    a
}
