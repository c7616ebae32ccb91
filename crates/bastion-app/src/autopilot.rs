//! Scripted input source for unattended runs.
//!
//! Reads snapshots and answers with the commands a (simple-minded) player
//! would issue: aim at the lowest enemy, hose close threats with the machine
//! gun, and spend the big weapons when they are ready and worth it.

use glam::DVec2;

use bastion_core::commands::PlayerCommand;
use bastion_core::enums::{GamePhase, WeaponKind};
use bastion_core::state::{EnemyView, GameStateSnapshot};

/// Enemies below this fraction of the arena height are close threats.
const CLOSE_THREAT_FRACTION: f64 = 0.6;
/// Enemy count at which area weapons are worth spending.
const SWARM_SIZE: usize = 6;
/// How far ahead of an enemy to aim, in px along its course.
const LEAD_DISTANCE: f64 = 40.0;

pub struct Autopilot {
    arena_height: f64,
    decide_every: u64,
    armed: WeaponKind,
    trigger_held: bool,
    reset_on_game_over: bool,
}

impl Autopilot {
    pub fn new(arena_height: f64, decide_every: u64) -> Self {
        Self {
            arena_height,
            decide_every: decide_every.max(1),
            armed: WeaponKind::default(),
            trigger_held: false,
            reset_on_game_over: false,
        }
    }

    /// Start a new session automatically after a loss.
    pub fn with_reset_on_game_over(mut self, reset: bool) -> Self {
        self.reset_on_game_over = reset;
        self
    }

    /// Commands to queue before the next step.
    pub fn decide(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();

        if snapshot.phase == GamePhase::GameOver {
            if self.reset_on_game_over {
                self.release(&mut commands);
                commands.push(PlayerCommand::Reset);
            }
            return commands;
        }
        if snapshot.phase != GamePhase::Running || snapshot.time.tick % self.decide_every != 0 {
            return commands;
        }

        let Some(target) = lowest_enemy(&snapshot.enemies) else {
            self.release(&mut commands);
            return commands;
        };
        let aim = lead(target);
        commands.push(PlayerCommand::SetPointer { x: aim.x, y: aim.y });

        let weapon = self.choose_weapon(snapshot, target);
        if weapon != self.armed {
            commands.push(PlayerCommand::SelectWeapon { weapon });
            self.armed = weapon;
        }

        if weapon == WeaponKind::MachineGun {
            if !self.trigger_held {
                commands.push(PlayerCommand::SetTriggerHeld { held: true });
                self.trigger_held = true;
            }
        } else {
            self.release(&mut commands);
            commands.push(PlayerCommand::Fire);
        }
        commands
    }

    fn choose_weapon(&self, snapshot: &GameStateSnapshot, target: &EnemyView) -> WeaponKind {
        let swarm = snapshot.enemies.len() >= SWARM_SIZE;
        let weapons = &snapshot.weapons;

        if swarm && weapons.barrage_cooldown_remaining_ms <= 0.0 {
            return WeaponKind::GuidedBarrage;
        }
        if swarm && !weapons.nuclear_in_flight && weapons.nuclear_cooldown_remaining_ms <= 0.0 {
            return WeaponKind::Nuclear;
        }
        if target.position.y() > self.arena_height * CLOSE_THREAT_FRACTION {
            let gun_ready = snapshot
                .bases
                .iter()
                .any(|b| b.active && !b.mg_overheated && b.mg_ammo > 0);
            if gun_ready {
                return WeaponKind::MachineGun;
            }
            return WeaponKind::Cannon;
        }
        WeaponKind::Standard
    }

    fn release(&mut self, commands: &mut Vec<PlayerCommand>) {
        if self.trigger_held {
            commands.push(PlayerCommand::SetTriggerHeld { held: false });
            self.trigger_held = false;
        }
    }
}

/// The enemy closest to the ground.
fn lowest_enemy(enemies: &[EnemyView]) -> Option<&EnemyView> {
    enemies
        .iter()
        .max_by(|a, b| a.position.y().total_cmp(&b.position.y()))
}

fn lead(enemy: &EnemyView) -> DVec2 {
    let course = (enemy.position.0 - enemy.origin.0).normalize_or_zero();
    enemy.position.0 + course * LEAD_DISTANCE
}
