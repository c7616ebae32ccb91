//! Autonomous defensive drones: periodic teleport and point-defense beam.

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::{Drone, Liveness};
use bastion_core::constants::*;
use bastion_core::enums::{BeamKind, ExplosionKind};
use bastion_core::events::AudioEvent;
use bastion_core::types::Position;

use crate::session::Session;
use crate::systems::{live_enemies, nearest_enemy_within};
use crate::world_setup;

pub fn run(
    world: &mut World,
    session: &Session,
    rng: &mut ChaCha8Rng,
    audio: &mut Vec<AudioEvent>,
) {
    let now = session.now_ms();
    let arena = session.arena;
    let enemies = live_enemies(world);

    let mut teleports: Vec<DVec2> = Vec::new();
    let mut beams: Vec<(DVec2, DVec2)> = Vec::new();

    for (_e, (drone, pos, live)) in world.query_mut::<(&mut Drone, &mut Position, &Liveness)>() {
        if !live.active {
            continue;
        }

        if now - drone.last_teleport_ms >= DRONE_TELEPORT_INTERVAL_MS {
            pos.0 = DVec2::new(
                rng.gen::<f64>() * arena.width,
                rng.gen::<f64>() * arena.height * DRONE_TELEPORT_BAND,
            );
            drone.last_teleport_ms = now;
            teleports.push(pos.0);
        }

        let ready = drone
            .last_shot_ms
            .map_or(true, |t| now - t >= DRONE_FIRE_INTERVAL_MS);
        if ready {
            if let Some(target) = nearest_enemy_within(&enemies, pos.0, DRONE_BEAM_RANGE) {
                drone.last_shot_ms = Some(now);
                beams.push((pos.0, target.position));
            }
        }
    }

    for at in teleports {
        world_setup::spawn_explosion(world, rng, &arena, ExplosionKind::Drone, at, audio);
    }
    for (start, end) in beams {
        world_setup::spawn_beam(world, BeamKind::Defensive, start, end);
    }
}

/// Number of drones still flying.
pub fn active_count(world: &World) -> usize {
    world
        .query::<(&Drone, &Liveness)>()
        .iter()
        .filter(|(_, (_, live))| live.active)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::components::{Beam, EnemyProjectile, Explosion};
    use bastion_core::types::{Arena, Velocity};
    use rand::SeedableRng;

    fn enemy_at(world: &mut World, id: u32, at: DVec2) {
        world.spawn((
            EnemyProjectile { id, origin: at },
            Position(at),
            Velocity::default(),
            Liveness::ACTIVE,
        ));
    }

    #[test]
    fn test_drone_fires_at_nearest_enemy_in_range() {
        let mut world = World::new();
        let session = Session::new(Arena::default());
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut audio = Vec::new();
        world_setup::spawn_drone(&mut world, DVec2::new(500.0, 300.0), 0.0);
        enemy_at(&mut world, 1, DVec2::new(500.0, 100.0));
        enemy_at(&mut world, 2, DVec2::new(600.0, 300.0));
        enemy_at(&mut world, 3, DVec2::new(900.0, 300.0));

        run(&mut world, &session, &mut rng, &mut audio);

        let beams: Vec<Beam> = world.query::<&Beam>().iter().map(|(_, b)| b.clone()).collect();
        assert_eq!(beams.len(), 1);
        assert_eq!(beams[0].kind, BeamKind::Defensive);
        assert_eq!(beams[0].end, DVec2::new(600.0, 300.0));

        // Rate-limited: no second beam within the fire interval.
        run(&mut world, &session, &mut rng, &mut audio);
        assert_eq!(world.query::<&Beam>().iter().count(), 1);
    }

    #[test]
    fn test_drone_teleports_into_upper_band() {
        let mut world = World::new();
        let mut session = Session::new(Arena::default());
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut audio = Vec::new();
        let drone = world_setup::spawn_drone(&mut world, DVec2::new(50.0, 740.0), 0.0);

        session.time.advance(4.9);
        run(&mut world, &session, &mut rng, &mut audio);
        assert_eq!(world.get::<&Position>(drone).unwrap().0, DVec2::new(50.0, 740.0));

        session.time.advance(0.2);
        run(&mut world, &session, &mut rng, &mut audio);
        let pos = world.get::<&Position>(drone).unwrap().0;
        assert!(pos.y < 780.0 * DRONE_TELEPORT_BAND);
        let flashes: Vec<ExplosionKind> =
            world.query::<&Explosion>().iter().map(|(_, e)| e.kind).collect();
        assert_eq!(flashes, vec![ExplosionKind::Drone]);
    }
}
