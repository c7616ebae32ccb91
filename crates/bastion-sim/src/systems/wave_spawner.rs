//! Enemy spawn cadence and difficulty scaling.
//!
//! Both the spawn interval and the speed multiplier are continuous functions
//! of score, so difficulty ramps smoothly within a run.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::{City, DefenseBase, EnemyProjectile, Liveness};
use bastion_core::constants::*;
use bastion_core::types::{Position, Velocity};

use crate::session::Session;

/// Seconds between spawns: shrinks with score, floored.
pub fn spawn_interval_secs(score: u64) -> f64 {
    (SPAWN_INTERVAL_START_SECS - score as f64 / SPAWN_INTERVAL_SCORE_SCALE)
        .max(SPAWN_INTERVAL_MIN_SECS)
}

/// Enemy speed multiplier: rises with score, capped.
pub fn difficulty_for_score(score: u64) -> f64 {
    (1.0 + score as f64 / DIFFICULTY_SCORE_SCALE).min(DIFFICULTY_MAX)
}

/// Accumulate step time and spawn one enemy whenever the interval elapses.
pub fn run(world: &mut World, session: &mut Session, rng: &mut ChaCha8Rng, dt_secs: f64) {
    session.difficulty_multiplier = difficulty_for_score(session.score.score);
    session.spawn_timer_secs += dt_secs;

    if session.spawn_timer_secs >= spawn_interval_secs(session.score.score) {
        session.spawn_timer_secs = 0.0;
        spawn_enemy(world, session, rng);
    }
}

/// Spawn one enemy on the top edge, aimed at a live structure most of the
/// time and at a random ground point otherwise.
pub fn spawn_enemy(world: &mut World, session: &mut Session, rng: &mut ChaCha8Rng) -> Entity {
    let arena = session.arena;
    let start_x = rng.gen::<f64>() * arena.width;

    let targets = structure_targets(world);
    let target_x = if !targets.is_empty() && rng.gen::<f64>() < ENEMY_TARGETED_CHANCE {
        targets[rng.gen_range(0..targets.len())]
    } else {
        rng.gen::<f64>() * arena.width
    };

    let speed = (rng.gen::<f64>() * ENEMY_SPEED_SPREAD + ENEMY_MIN_SPEED)
        * session.difficulty_multiplier
        * ENEMY_SPEED_FACTOR;

    spawn_enemy_at(
        world,
        session,
        DVec2::new(start_x, 0.0),
        DVec2::new(target_x, arena.height),
        speed,
    )
}

/// Spawn an enemy flying from `origin` toward `aim` at `speed` per frame.
/// Its course is fixed for life.
pub fn spawn_enemy_at(
    world: &mut World,
    session: &mut Session,
    origin: DVec2,
    aim: DVec2,
    speed: f64,
) -> Entity {
    let id = session.allocate_enemy_id();
    session.score.enemies_spawned += 1;
    let direction = (aim - origin).normalize_or_zero();

    world.spawn((
        EnemyProjectile { id, origin },
        Position(origin),
        Velocity(direction * speed),
        Liveness::ACTIVE,
    ))
}

/// X coordinates of live cities and bases that still have hits left.
fn structure_targets(world: &World) -> Vec<f64> {
    let mut xs: Vec<f64> = world
        .query::<&City>()
        .iter()
        .filter(|(_, c)| c.active)
        .map(|(_, c)| c.x)
        .collect();
    xs.extend(
        world
            .query::<&DefenseBase>()
            .iter()
            .filter(|(_, b)| !b.is_destroyed())
            .map(|(_, b)| b.x),
    );
    xs
}
