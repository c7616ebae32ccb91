//! Fire control: resolves fire requests against the nearest operational base
//! and each weapon's gate, then spawns what the weapon launches.
//!
//! A refused request (no operational base, cooldown, cap, no ammo) is a no-op.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::{BeamKind, GamePhase, WeaponKind};
use bastion_core::events::AudioEvent;
use bastion_core::profiles::projectile_profile;
use bastion_core::types::{Arena, Position, Velocity};

use crate::guidance::bearing;
use crate::schedule::DeferredAction;
use crate::session::Session;
use crate::systems::drones;
use crate::world_setup;

/// Keep aim points above the structures.
pub fn clamp_aim(arena: &Arena, aim: DVec2) -> DVec2 {
    DVec2::new(aim.x, aim.y.min(arena.height - AIM_FLOOR_MARGIN))
}

/// The operational base horizontally closest to `x`.
pub fn nearest_active_base(world: &World, x: f64) -> Option<Entity> {
    world
        .query::<&DefenseBase>()
        .iter()
        .filter(|(_, b)| b.is_active())
        .min_by(|(_, a), (_, b)| (a.x - x).abs().total_cmp(&(b.x - x).abs()))
        .map(|(e, _)| e)
}

fn find_base(world: &World, id: u8) -> Option<Entity> {
    world
        .query::<&DefenseBase>()
        .iter()
        .find(|(_, b)| b.id == id)
        .map(|(e, _)| e)
}

/// Resolve one fire request for `weapon` at `aim`. Returns whether anything
/// was launched.
pub fn fire(
    world: &mut World,
    session: &mut Session,
    rng: &mut ChaCha8Rng,
    audio: &mut Vec<AudioEvent>,
    weapon: WeaponKind,
    aim: DVec2,
) -> bool {
    let aim = clamp_aim(&session.arena, aim);
    let Some(entity) = nearest_active_base(world, aim.x) else {
        log::trace!("Fire request dropped: no operational base");
        return false;
    };
    let Ok(mut base) = world.get::<&DefenseBase>(entity).map(|b| (*b).clone()) else {
        return false;
    };

    let fired = match weapon {
        WeaponKind::Standard => fire_capped(world, session, &base, weapon, aim, STANDARD_MAX_PER_BASE),
        WeaponKind::Homing => fire_capped(world, session, &base, weapon, aim, HOMING_MAX_PER_BASE),
        WeaponKind::MachineGun => fire_machine_gun(world, session, rng, &mut base, aim),
        WeaponKind::Cannon => fire_cannon(world, session, &mut base, aim),
        WeaponKind::Laser => fire_laser(world, session, &mut base, aim),
        WeaponKind::Drone => fire_drone(world, session, &base),
        WeaponKind::Nuclear => fire_nuclear(world, session, &base, aim),
        WeaponKind::GuidedBarrage => fire_barrage(world, session, aim),
    };

    if fired {
        if let Ok(mut stored) = world.get::<&mut DefenseBase>(entity) {
            *stored = base;
        }
        audio.push(AudioEvent::WeaponFired { weapon });
    }
    fired
}

/// Spawn one player projectile. Speed comes from the profile table, scaled by
/// the homing multiplier for weapons that earn it.
pub fn launch_projectile(
    world: &mut World,
    session: &mut Session,
    weapon: WeaponKind,
    source_base: u8,
    from: DVec2,
    aim: DVec2,
    heading_offset: f64,
) -> Option<Entity> {
    let profile = projectile_profile(weapon)?;
    let speed = if profile.homing_bonus {
        profile.speed * session.homing_speed_multiplier
    } else {
        profile.speed
    };
    let heading = bearing(from, aim) + heading_offset;
    session.score.shots_fired += 1;

    Some(world.spawn((
        PlayerProjectile {
            weapon,
            source_base,
            aim,
            speed,
            target: None,
            launched_at_ms: session.now_ms(),
        },
        Position(from),
        Velocity::from_heading(heading, speed),
        Liveness::ACTIVE,
    )))
}

fn live_projectiles(world: &World, weapon: WeaponKind, base_id: Option<u8>) -> usize {
    world
        .query::<(&PlayerProjectile, &Liveness)>()
        .iter()
        .filter(|(_, (p, live))| {
            live.active && p.weapon == weapon && base_id.map_or(true, |id| p.source_base == id)
        })
        .count()
}

fn fire_capped(
    world: &mut World,
    session: &mut Session,
    base: &DefenseBase,
    weapon: WeaponKind,
    aim: DVec2,
    cap: usize,
) -> bool {
    if live_projectiles(world, weapon, Some(base.id)) >= cap {
        return false;
    }
    launch_projectile(world, session, weapon, base.id, base.position(), aim, 0.0).is_some()
}

fn interval_elapsed(last_ms: Option<f64>, now_ms: f64, interval_ms: f64) -> bool {
    last_ms.map_or(true, |t| now_ms - t >= interval_ms)
}

fn fire_machine_gun(
    world: &mut World,
    session: &mut Session,
    rng: &mut ChaCha8Rng,
    base: &mut DefenseBase,
    aim: DVec2,
) -> bool {
    let now = session.now_ms();
    if base.mg_overheated
        || base.mg_ammo == 0
        || !interval_elapsed(base.mg_last_shot_ms, now, MG_MIN_INTERVAL_MS)
    {
        return false;
    }

    let jittered = aim
        + DVec2::new(
            rng.gen_range(-MG_AIM_JITTER..MG_AIM_JITTER),
            rng.gen_range(-MG_AIM_JITTER..MG_AIM_JITTER),
        );
    launch_projectile(
        world,
        session,
        WeaponKind::MachineGun,
        base.id,
        base.position(),
        jittered,
        0.0,
    );

    base.mg_last_shot_ms = Some(now);
    base.mg_ammo -= 1;
    if base.mg_ammo == 0 {
        base.mg_overheated = true;
        session.schedule.schedule(
            now + MG_OVERHEAT_MS,
            DeferredAction::RefillMachineGun { base_id: base.id },
        );
        log::debug!("Base {} machine gun overheated", base.id);
    }
    true
}

fn fire_cannon(
    world: &mut World,
    session: &mut Session,
    base: &mut DefenseBase,
    aim: DVec2,
) -> bool {
    let now = session.now_ms();
    if !interval_elapsed(base.cannon_last_shot_ms, now, CANNON_COOLDOWN_MS) {
        return false;
    }
    for offset in CANNON_SPREAD {
        launch_projectile(
            world,
            session,
            WeaponKind::Cannon,
            base.id,
            base.position(),
            aim,
            offset,
        );
    }
    base.cannon_last_shot_ms = Some(now);
    true
}

fn fire_laser(world: &mut World, session: &mut Session, base: &mut DefenseBase, aim: DVec2) -> bool {
    let now = session.now_ms();
    if !interval_elapsed(base.laser_last_shot_ms, now, LASER_COOLDOWN_MS) {
        return false;
    }
    let arena = session.arena;
    let start = base.position();
    let length = arena.width.max(arena.height) * LASER_LENGTH_FACTOR;
    let end = start + (aim - start).normalize_or_zero() * length;
    world_setup::spawn_beam(world, BeamKind::Sweep, start, end);

    base.laser_last_shot_ms = Some(now);
    session.score.shots_fired += 1;
    true
}

fn fire_drone(world: &mut World, session: &mut Session, base: &DefenseBase) -> bool {
    if drones::active_count(world) >= DRONE_MAX_ACTIVE {
        return false;
    }
    let at = DVec2::new(base.x, base.y - DRONE_LAUNCH_HEIGHT);
    world_setup::spawn_drone(world, at, session.now_ms());
    session.score.shots_fired += 1;
    true
}

fn fire_nuclear(world: &mut World, session: &mut Session, base: &DefenseBase, aim: DVec2) -> bool {
    if live_projectiles(world, WeaponKind::Nuclear, None) > 0
        || session.now_ms() < session.nuclear_ready_at_ms
    {
        return false;
    }
    launch_projectile(
        world,
        session,
        WeaponKind::Nuclear,
        base.id,
        base.position(),
        aim,
        0.0,
    )
    .is_some()
}

/// Every operational base launches one missile now and the rest of its
/// salvo at fixed intervals. The cooldown starts here.
fn fire_barrage(world: &mut World, session: &mut Session, aim: DVec2) -> bool {
    let now = session.now_ms();
    if now < session.barrage_ready_at_ms {
        return false;
    }
    session.barrage_ready_at_ms = now + BARRAGE_COOLDOWN_MS;

    let launchers: Vec<(u8, DVec2)> = world
        .query::<&DefenseBase>()
        .iter()
        .filter(|(_, b)| b.is_active())
        .map(|(_, b)| (b.id, b.position()))
        .collect();
    log::debug!("Guided barrage from {} bases", launchers.len());

    for (base_id, from) in launchers {
        launch_projectile(world, session, WeaponKind::GuidedBarrage, base_id, from, aim, 0.0);
        for k in 1..BARRAGE_MISSILES_PER_BASE {
            session.schedule.schedule(
                now + BARRAGE_LAUNCH_INTERVAL_MS * k as f64,
                DeferredAction::LaunchBarrageMissile { base_id, aim },
            );
        }
    }
    true
}

/// Deferred: end an overheat. A base destroyed in the meantime stays empty.
pub fn refill_machine_gun(world: &mut World, base_id: u8) {
    let Some(entity) = find_base(world, base_id) else {
        return;
    };
    if let Ok(mut base) = world.get::<&mut DefenseBase>(entity) {
        if base.is_destroyed() {
            return;
        }
        base.mg_ammo = MG_MAX_AMMO;
        base.mg_overheated = false;
    }
}

/// Deferred: one staggered barrage launch, only from a base still operational
/// in a running session.
pub fn launch_barrage_missile(
    world: &mut World,
    session: &mut Session,
    audio: &mut Vec<AudioEvent>,
    base_id: u8,
    aim: DVec2,
) {
    if session.phase != GamePhase::Running {
        return;
    }
    let Some(entity) = find_base(world, base_id) else {
        return;
    };
    let from = match world.get::<&DefenseBase>(entity) {
        Ok(base) if base.is_active() => base.position(),
        _ => return,
    };
    if launch_projectile(world, session, WeaponKind::GuidedBarrage, base_id, from, aim, 0.0).is_some() {
        audio.push(AudioEvent::WeaponFired {
            weapon: WeaponKind::GuidedBarrage,
        });
    }
}
