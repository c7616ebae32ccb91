//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world. Runs after cleanup,
//! so everything it reports is live.

use hecs::World;

use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::events::AudioEvent;
use bastion_core::state::*;
use bastion_core::types::{Position, Velocity};

use crate::session::Session;
use crate::systems::drones;

/// Build a complete GameStateSnapshot from the current world and session.
pub fn build_snapshot(
    world: &World,
    session: &Session,
    armed_weapon: WeaponKind,
    auto_fire: bool,
    audio_events: Vec<AudioEvent>,
) -> GameStateSnapshot {
    let now = session.now_ms();

    GameStateSnapshot {
        time: session.time,
        phase: session.phase,
        armed_weapon,
        auto_fire,
        score: ScoreView {
            score: session.score.score,
            enemies_spawned: session.score.enemies_spawned,
            enemies_destroyed: session.score.enemies_destroyed,
            ground_impacts: session.score.ground_impacts,
            shots_fired: session.score.shots_fired,
        },
        combo: ComboView {
            count: session.combo.count,
            active: session.combo.active,
            remaining_ms: session.combo.remaining_ms(now),
        },
        difficulty_multiplier: session.difficulty_multiplier,
        homing_speed_multiplier: session.homing_speed_multiplier,
        cities: build_cities(world),
        bases: build_bases(world, now),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        explosions: build_explosions(world),
        beams: build_beams(world),
        drones: build_drones(world),
        particles: build_particles(world),
        floating_texts: build_floating_texts(world),
        weapons: build_weapon_status(world, session),
        audio_events,
    }
}

fn build_cities(world: &World) -> Vec<CityView> {
    let mut cities: Vec<CityView> = world
        .query::<&City>()
        .iter()
        .map(|(_, c)| CityView {
            position: Position::new(c.x, c.y),
            width: c.width,
            height: c.height,
            active: c.active,
        })
        .collect();
    cities.sort_by(|a, b| a.position.x().total_cmp(&b.position.x()));
    cities
}

fn build_bases(world: &World, now: f64) -> Vec<BaseView> {
    let mut bases: Vec<BaseView> = world
        .query::<&DefenseBase>()
        .iter()
        .map(|(_, b)| BaseView {
            id: b.id,
            position: Position(b.position()),
            hits: b.hits,
            active: b.is_active(),
            destroyed: b.is_destroyed(),
            recovery_remaining_ms: b.cooldown_ms.max(0.0),
            mg_ammo: b.mg_ammo,
            mg_overheated: b.mg_overheated,
            cannon_ready: b
                .cannon_last_shot_ms
                .map_or(true, |t| now - t >= CANNON_COOLDOWN_MS),
            laser_ready: b
                .laser_last_shot_ms
                .map_or(true, |t| now - t >= LASER_COOLDOWN_MS),
        })
        .collect();
    bases.sort_by_key(|b| b.id);
    bases
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&EnemyProjectile, &Position)>()
        .iter()
        .map(|(_, (enemy, pos))| EnemyView {
            id: enemy.id,
            origin: Position(enemy.origin),
            position: *pos,
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&PlayerProjectile, &Position, &Velocity)>()
        .iter()
        .map(|(_, (p, pos, vel))| ProjectileView {
            weapon: p.weapon,
            position: *pos,
            heading: vel.heading(),
            speed: vel.speed(),
            target: p.target,
        })
        .collect()
}

fn build_explosions(world: &World) -> Vec<ExplosionView> {
    world
        .query::<(&Explosion, &Position)>()
        .iter()
        .map(|(_, (e, pos))| ExplosionView {
            kind: e.kind,
            position: *pos,
            radius: e.radius,
            opacity: e.life.clamp(0.0, 1.0),
        })
        .collect()
}

fn build_beams(world: &World) -> Vec<BeamView> {
    world
        .query::<&Beam>()
        .iter()
        .map(|(_, b)| BeamView {
            kind: b.kind,
            start: Position(b.start),
            end: Position(b.end),
            opacity: b.life.clamp(0.0, 1.0),
        })
        .collect()
}

fn build_drones(world: &World) -> Vec<DroneView> {
    world
        .query::<(&Drone, &Position)>()
        .iter()
        .map(|(_, (_, pos))| DroneView { position: *pos })
        .collect()
}

fn build_particles(world: &World) -> Vec<ParticleView> {
    world
        .query::<(&Particle, &Position)>()
        .iter()
        .map(|(_, (p, pos))| {
            let opacity = match p.kind {
                ParticleKind::Smoke => p.life * 0.5,
                _ => p.life,
            };
            ParticleView {
                kind: p.kind,
                position: *pos,
                size: p.size,
                opacity: opacity.clamp(0.0, 1.0),
            }
        })
        .collect()
}

fn build_floating_texts(world: &World) -> Vec<FloatingTextView> {
    world
        .query::<(&FloatingText, &Position)>()
        .iter()
        .map(|(_, (t, pos))| FloatingTextView {
            text: t.text.clone(),
            position: *pos,
            opacity: t.life.clamp(0.0, 1.0),
        })
        .collect()
}

fn build_weapon_status(world: &World, session: &Session) -> WeaponStatusView {
    let now = session.now_ms();
    let nuclear_in_flight = world
        .query::<(&PlayerProjectile, &Liveness)>()
        .iter()
        .any(|(_, (p, live))| live.active && p.weapon == WeaponKind::Nuclear);

    WeaponStatusView {
        nuclear_in_flight,
        nuclear_cooldown_remaining_ms: (session.nuclear_ready_at_ms - now).max(0.0),
        barrage_cooldown_remaining_ms: (session.barrage_ready_at_ms - now).max(0.0),
        drones_active: drones::active_count(world) as u32,
    }
}
