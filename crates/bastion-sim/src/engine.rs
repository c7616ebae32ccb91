//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world and the session, processes
//! player commands, runs all systems, and produces `GameStateSnapshot`s.
//! Completely headless (no windowing or audio dependency), enabling
//! deterministic testing.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bastion_core::commands::PlayerCommand;
use bastion_core::constants::*;
use bastion_core::enums::{ExplosionKind, GamePhase, WeaponKind};
use bastion_core::events::AudioEvent;
use bastion_core::state::GameStateSnapshot;
use bastion_core::types::{frames, SimTime};

use crate::config::SimConfig;
use crate::schedule::DeferredAction;
use crate::session::Session;
use crate::systems;
use crate::world_setup;

/// Pointer and trigger state as last reported by the input source.
/// Survives resets.
#[derive(Debug, Clone, Default)]
struct Controls {
    pointer: DVec2,
    trigger_held: bool,
    auto_fire: bool,
    armed_weapon: WeaponKind,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    session: Session,
    config: SimConfig,
    controls: Controls,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    audio_events: Vec<AudioEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. The session
    /// starts running immediately.
    pub fn new(config: SimConfig) -> Self {
        let arena = config.arena();
        let mut world = World::new();
        world_setup::setup_session(&mut world, &arena);
        log::info!(
            "Session started: seed {}, arena {}x{}",
            config.seed,
            arena.width,
            arena.height
        );

        Self {
            world,
            session: Session::new(arena),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            controls: Controls::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next step boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt_secs` of wall time and return the
    /// resulting snapshot. Oversized steps are clamped; paused and finished
    /// sessions do not advance.
    pub fn tick(&mut self, dt_secs: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.session.phase == GamePhase::Running {
            let dt = self.config.clamp_step(dt_secs);
            self.session.time.advance(dt);
            self.run_systems(dt);
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.session,
            self.controls.armed_weapon,
            self.controls.auto_fire,
            audio_events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.session.time
    }

    pub fn armed_weapon(&self) -> WeaponKind {
        self.controls.armed_weapon
    }

    /// Get a read-only reference to the session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a mutable reference to the ECS world (for test setup).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Spawn an enemy on a fixed course (for tests needing exact geometry).
    #[cfg(test)]
    pub fn spawn_enemy_at(&mut self, origin: DVec2, aim: DVec2, speed: f64) -> hecs::Entity {
        systems::wave_spawner::spawn_enemy_at(
            &mut self.world,
            &mut self.session,
            origin,
            aim,
            speed,
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetPointer { x, y } => {
                self.controls.pointer = DVec2::new(x, y);
            }
            PlayerCommand::SetTriggerHeld { held } => {
                self.controls.trigger_held = held;
                if !held {
                    self.session.last_hold_fire_ms = None;
                }
            }
            PlayerCommand::Fire => self.fire_edge(),
            PlayerCommand::FireAt { x, y } => {
                self.controls.pointer = DVec2::new(x, y);
                self.fire_edge();
            }
            PlayerCommand::SelectWeapon { weapon } => {
                if self.controls.armed_weapon != weapon {
                    log::debug!("Armed {weapon:?}");
                }
                self.controls.armed_weapon = weapon;
            }
            PlayerCommand::ToggleAutoFire => {
                self.controls.auto_fire = !self.controls.auto_fire;
                log::debug!("Auto-fire {}", if self.controls.auto_fire { "on" } else { "off" });
            }
            PlayerCommand::Pause => {
                if self.session.phase == GamePhase::Running {
                    self.session.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.session.phase == GamePhase::Paused {
                    self.session.phase = GamePhase::Running;
                }
            }
            PlayerCommand::TogglePause => match self.session.phase {
                GamePhase::Running => self.session.phase = GamePhase::Paused,
                GamePhase::Paused => self.session.phase = GamePhase::Running,
                GamePhase::GameOver => {}
            },
            PlayerCommand::Reset => self.reset(),
        }
    }

    /// Replace the world and session in one go. Pending deferred events die
    /// with the old session; the RNG stream continues.
    fn reset(&mut self) {
        let arena = self.config.arena();
        let mut world = World::new();
        world_setup::setup_session(&mut world, &arena);
        self.world = world;
        self.session = Session::new(arena);
        self.audio_events.clear();
        log::info!("Session reset");
    }

    /// A discrete trigger press: one fire request at the pointer, now.
    fn fire_edge(&mut self) {
        if self.session.phase != GamePhase::Running {
            return;
        }
        self.session.last_hold_fire_ms = Some(self.session.now_ms());
        self.request_fire();
    }

    fn request_fire(&mut self) -> bool {
        systems::fire_control::fire(
            &mut self.world,
            &mut self.session,
            &mut self.rng,
            &mut self.audio_events,
            self.controls.armed_weapon,
            self.controls.pointer,
        )
    }

    /// Repeat fire while the trigger is held or auto-fire is on. The machine
    /// gun asks every step and relies on its own gate.
    fn poll_continuous_fire(&mut self) {
        if !(self.controls.trigger_held || self.controls.auto_fire) {
            return;
        }
        let now = self.session.now_ms();
        let interval = match self.controls.armed_weapon {
            WeaponKind::MachineGun => 0.0,
            WeaponKind::Standard => HOLD_FIRE_STANDARD_INTERVAL_MS,
            _ => HOLD_FIRE_INTERVAL_MS,
        };
        let due = self
            .session
            .last_hold_fire_ms
            .map_or(true, |t| now - t >= interval);
        if due {
            self.session.last_hold_fire_ms = Some(now);
            self.request_fire();
        }
    }

    /// Run deferred events that have come due.
    fn run_schedule(&mut self) {
        let now = self.session.now_ms();
        for action in self.session.schedule.drain_due(now) {
            match action {
                DeferredAction::RefillMachineGun { base_id } => {
                    systems::fire_control::refill_machine_gun(&mut self.world, base_id);
                }
                DeferredAction::LaunchBarrageMissile { base_id, aim } => {
                    systems::fire_control::launch_barrage_missile(
                        &mut self.world,
                        &mut self.session,
                        &mut self.audio_events,
                        base_id,
                        aim,
                    );
                }
                DeferredAction::CityBurst { at } => {
                    let arena = self.session.arena;
                    world_setup::spawn_explosion(
                        &mut self.world,
                        &mut self.rng,
                        &arena,
                        ExplosionKind::GroundImpact,
                        at,
                        &mut self.audio_events,
                    );
                }
            }
        }
    }

    /// Close a lapsed combo window, announcing chains of two or more.
    fn expire_combo(&mut self) {
        let now = self.session.now_ms();
        if let Some(count) = self.session.combo.expire(now) {
            log::debug!("Combo x{count}");
            let center = self.session.arena.center();
            world_setup::spawn_floating_text(&mut self.world, format!("COMBO {count} X"), center.0);
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt_secs: f64) {
        let dt_norm = frames(dt_secs);
        let arena = self.session.arena;

        // 1. Deferred events and combo timeout
        self.run_schedule();
        self.expire_combo();
        // 2. Enemy spawning
        if self.config.auto_spawn {
            systems::wave_spawner::run(&mut self.world, &mut self.session, &mut self.rng, dt_secs);
        }
        // 3. Continuous fire
        self.poll_continuous_fire();
        // 4. Effects, explosions, beams
        systems::effects::run_particles(&mut self.world, dt_norm);
        systems::effects::run_floating_text(&mut self.world, dt_norm);
        systems::effects::run_explosions(&mut self.world, dt_norm);
        systems::effects::run_beams(&mut self.world, dt_norm);
        // 5. Base recovery windows, before this step's impacts can open new ones
        systems::structures::run_base_recovery(&mut self.world, dt_secs * 1000.0);
        // 6. Enemy flight and ground impacts
        let impacts = systems::enemy_flight::run(&mut self.world, &arena, dt_norm);
        for x in impacts {
            systems::structures::resolve_ground_impact(
                &mut self.world,
                &mut self.session,
                &mut self.rng,
                &mut self.audio_events,
                x,
            );
        }
        // 7. Player projectiles
        systems::missile_kinematics::run(
            &mut self.world,
            &mut self.session,
            &mut self.rng,
            &mut self.audio_events,
            dt_norm,
        );
        // 8. Drones
        systems::drones::run(&mut self.world, &self.session, &mut self.rng, &mut self.audio_events);
        // 9. Collision passes
        systems::intercept::run(
            &mut self.world,
            &mut self.session,
            &mut self.rng,
            &mut self.audio_events,
        );
        // 10. Terminal condition
        if systems::structures::all_structures_lost(&self.world) {
            self.session.phase = GamePhase::GameOver;
            log::info!(
                "Game over: score {}, {} enemies destroyed",
                self.session.score.score,
                self.session.score.enemies_destroyed
            );
        }
        // 11. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        log::trace!(
            "Step {} done: {} entities",
            self.session.time.tick,
            self.world.len()
        );
    }
}
