//! Guidance for self-guided interceptors.
//!
//! Target acquisition under contention and rate-limited heading steering.
//! Pure functions over plain data so they can be tested without a world.

use std::collections::HashSet;

use glam::DVec2;

use bastion_core::geometry::wrap_angle;

/// A live enemy as seen by the guidance pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyContact {
    pub id: u32,
    pub position: DVec2,
}

/// The guidance-relevant state of one self-guided projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seeker {
    pub position: DVec2,
    pub target: Option<u32>,
}

/// Bearing from `from` to `to` in screen space (radians, +y down).
pub fn bearing(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}

fn nearest<'a>(from: DVec2, enemies: impl Iterator<Item = &'a EnemyContact>) -> Option<u32> {
    enemies
        .min_by(|a, b| {
            from.distance_squared(a.position)
                .total_cmp(&from.distance_squared(b.position))
        })
        .map(|e| e.id)
}

/// Pick a target: the nearest enemy nobody else is chasing, or failing that
/// the nearest enemy overall. `None` only when no enemy is alive.
pub fn acquire_target(
    from: DVec2,
    enemies: &[EnemyContact],
    claimed: &HashSet<u32>,
) -> Option<u32> {
    nearest(from, enemies.iter().filter(|e| !claimed.contains(&e.id)))
        .or_else(|| nearest(from, enemies.iter()))
}

/// Revalidate every seeker's target and reacquire stale ones.
///
/// Seekers are processed in order; each reacquisition sees the claims made by
/// every other seeker at that moment, including those reassigned earlier in
/// the same pass.
pub fn assign_targets(seekers: &mut [Seeker], enemies: &[EnemyContact]) {
    let live: HashSet<u32> = enemies.iter().map(|e| e.id).collect();

    for i in 0..seekers.len() {
        if seekers[i].target.is_some_and(|t| live.contains(&t)) {
            continue;
        }
        let claimed: HashSet<u32> = seekers
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .filter_map(|(_, s)| s.target)
            .filter(|t| live.contains(t))
            .collect();
        seekers[i].target = acquire_target(seekers[i].position, enemies, &claimed);
    }
}

/// Rotate `current` toward `desired` by at most `max_turn` radians.
/// Snaps exactly onto `desired` when the remaining error is inside the budget.
pub fn steer_heading(current: f64, desired: f64, max_turn: f64) -> f64 {
    let diff = wrap_angle(desired - current);
    if diff.abs() < max_turn {
        wrap_angle(desired)
    } else {
        wrap_angle(current + diff.signum() * max_turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    fn contact(id: u32, x: f64, y: f64) -> EnemyContact {
        EnemyContact {
            id,
            position: DVec2::new(x, y),
        }
    }

    #[test]
    fn test_prefers_unclaimed_enemy() {
        let enemies = [contact(1, 10.0, 0.0), contact(2, 100.0, 0.0)];
        let claimed = HashSet::from([1]);
        assert_eq!(acquire_target(DVec2::ZERO, &enemies, &claimed), Some(2));
    }

    #[test]
    fn test_falls_back_to_nearest_when_all_claimed() {
        let enemies = [contact(1, 10.0, 0.0), contact(2, 100.0, 0.0)];
        let claimed = HashSet::from([1, 2]);
        assert_eq!(acquire_target(DVec2::ZERO, &enemies, &claimed), Some(1));
    }

    #[test]
    fn test_no_enemies_no_target() {
        assert_eq!(acquire_target(DVec2::ZERO, &[], &HashSet::new()), None);
    }

    #[test]
    fn test_stale_target_is_reacquired() {
        let enemies = [contact(7, 50.0, 50.0)];
        let mut seekers = [Seeker {
            position: DVec2::ZERO,
            target: Some(3),
        }];
        assign_targets(&mut seekers, &enemies);
        assert_eq!(seekers[0].target, Some(7));
    }

    #[test]
    fn test_valid_target_is_kept() {
        let enemies = [contact(1, 500.0, 0.0), contact(2, 1.0, 0.0)];
        let mut seekers = [Seeker {
            position: DVec2::ZERO,
            target: Some(1),
        }];
        assign_targets(&mut seekers, &enemies);
        assert_eq!(seekers[0].target, Some(1), "no retargeting while the target lives");
    }

    #[test]
    fn test_steer_snaps_inside_budget() {
        assert_eq!(steer_heading(0.0, 0.005, 0.01), 0.005);
    }

    #[test]
    fn test_steer_takes_short_way_round() {
        // From just below +pi to just above -pi is a small positive turn.
        let h = steer_heading(PI - 0.1, -PI + 0.1, 0.05);
        assert!((h - (PI - 0.05)).abs() < 1e-12);
    }

    #[test]
    fn test_bearing_is_screen_space() {
        assert!((bearing(DVec2::ZERO, DVec2::new(0.0, 10.0)) - PI / 2.0).abs() < 1e-12);
    }

    fn arb_point() -> impl Strategy<Value = DVec2> {
        (0.0..1280.0f64, 0.0..780.0f64).prop_map(|(x, y)| DVec2::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_turn_never_exceeds_budget(
            current in -PI..PI,
            desired in -PI..PI,
            budget in 0.001..0.5f64,
        ) {
            let next = steer_heading(current, desired, budget);
            let turned = wrap_angle(next - current).abs();
            prop_assert!(turned <= budget + 1e-9, "turned {turned} > budget {budget}");
        }

        #[test]
        fn prop_no_shared_target_while_unclaimed_enemy_exists(
            seeker_points in prop::collection::vec(arb_point(), 2..8),
            enemy_points in prop::collection::vec(arb_point(), 1..8),
        ) {
            let enemies: Vec<EnemyContact> = enemy_points
                .iter()
                .enumerate()
                .map(|(i, p)| EnemyContact { id: i as u32, position: *p })
                .collect();
            let mut seekers: Vec<Seeker> = seeker_points
                .iter()
                .map(|p| Seeker { position: *p, target: None })
                .collect();

            assign_targets(&mut seekers, &enemies);

            let targets: Vec<u32> = seekers.iter().filter_map(|s| s.target).collect();
            prop_assert_eq!(targets.len(), seekers.len(), "every seeker has a target");

            let distinct: HashSet<u32> = targets.iter().copied().collect();
            if distinct.len() < targets.len() {
                prop_assert_eq!(distinct.len(), enemies.len(), "sharing only under scarcity");
            }
        }
    }
}
