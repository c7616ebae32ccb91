//! State shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use bastion_core::commands::PlayerCommand;
use bastion_core::state::GameStateSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle to a running game loop thread.
///
/// `mpsc::Sender` carries commands in; the latest snapshot is shared through
/// `Arc<Mutex<...>>` for synchronous polling.
pub struct LoopHandle {
    pub command_tx: mpsc::Sender<LoopCommand>,
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub thread: JoinHandle<()>,
}

impl LoopHandle {
    /// Forward a player command. Returns false once the loop has exited.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx.send(LoopCommand::Player(command)).is_ok()
    }

    /// Clone of the most recent snapshot, if a step has run yet.
    pub fn latest(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    /// Stop the loop and wait for the thread to exit.
    pub fn shutdown(self) {
        let _ = self.command_tx.send(LoopCommand::Shutdown);
        if self.thread.join().is_err() {
            log::error!("Game loop thread panicked");
        }
    }
}
