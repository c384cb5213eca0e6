//! Application state shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use shepherd_core::commands::PlayerCommand;
use shepherd_core::state::GameStateSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` (Sender is Send but not Sync)
/// - `Mutex<Option<...>>` for state that does not exist before `start_simulation`
/// - `Arc<Mutex<...>>` for the latest snapshot (shared with the game loop thread)
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    /// `None` before `start_simulation` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    /// Join handle of the running game loop.
    pub loop_handle: Mutex<Option<std::thread::JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
