//! Game loop: real-time on its own thread, or fixed-step for offline runs.
//!
//! The real-time engine is created inside the loop thread because it's
//! cleaner for ownership. Commands arrive via `mpsc` channel. Snapshots go
//! to the presenter and are stored in shared state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use bastion_core::constants::REFERENCE_FRAME_RATE;
use bastion_core::state::GameStateSnapshot;
use bastion_sim::{SimConfig, SimulationEngine};

use crate::autopilot::Autopilot;
use crate::presenter::Presenter;
use crate::state::{LoopCommand, LoopHandle};

/// Nominal duration of one frame at the reference rate.
pub const FRAME_DURATION: Duration =
    Duration::from_nanos(1_000_000_000 / REFERENCE_FRAME_RATE as u64);

/// Spawns the real-time game loop in a new thread.
///
/// Returns the handle the host uses to send commands and poll snapshots.
pub fn spawn_game_loop(
    config: SimConfig,
    mut presenter: Box<dyn Presenter + Send>,
) -> LoopHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("bastion-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, presenter.as_mut(), &shared);
        })
        .expect("Failed to spawn game loop thread");

    LoopHandle {
        command_tx: cmd_tx,
        latest_snapshot,
        thread,
    }
}

/// The real-time loop. Runs until Shutdown command or channel disconnect.
/// Each step is fed the measured wall time since the previous one.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    presenter: &mut dyn Presenter,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config);
    let mut last_frame = Instant::now();
    let mut next_frame = last_frame + FRAME_DURATION;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Player(cmd)) => engine.queue_command(cmd),
                Ok(LoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance by the measured frame time (engine clamps long stalls)
        let now = Instant::now();
        let dt = now.duration_since(last_frame);
        last_frame = now;
        let snapshot = engine.tick(dt.as_secs_f64());

        // 3. Hand the snapshot to the presenter
        presenter.present(&snapshot);

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until the next frame
        let now = Instant::now();
        if next_frame > now {
            std::thread::sleep(next_frame - now);
            next_frame += FRAME_DURATION;
        } else {
            // Behind schedule: skip ahead instead of spiralling
            next_frame = now + FRAME_DURATION;
        }
    }
}

/// Run `steps` fixed-duration steps on the calling thread, driving input from
/// the autopilot. Returns the last snapshot. Deterministic for a given config.
pub fn run_fixed_step(
    engine: &mut SimulationEngine,
    presenter: &mut dyn Presenter,
    autopilot: &mut Autopilot,
    steps: u64,
    dt_secs: f64,
) -> GameStateSnapshot {
    let mut snapshot = engine.tick(0.0);
    presenter.present(&snapshot);

    for _ in 0..steps {
        engine.queue_commands(autopilot.decide(&snapshot));
        snapshot = engine.tick(dt_secs);
        presenter.present(&snapshot);
    }
    snapshot
}
