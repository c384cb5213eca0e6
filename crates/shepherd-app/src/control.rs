//! Host-side control surface over a running game loop.
//!
//! These functions bridge host requests to the game loop thread via channels.

use anyhow::{anyhow, Result};

use shepherd_core::commands::PlayerCommand;
use shepherd_core::config::SimConfig;
use shepherd_core::state::GameStateSnapshot;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(state: &AppState, config: SimConfig) -> Result<()> {
    let mut handle_lock = state
        .loop_handle
        .lock()
        .map_err(|e| anyhow!(e.to_string()))?;

    if handle_lock.is_some() {
        return Err(anyhow!("simulation already running"));
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone())?;

    let mut tx_lock = state.command_tx.lock().map_err(|e| anyhow!(e.to_string()))?;
    *tx_lock = Some(cmd_tx);
    *handle_lock = Some(handle);

    Ok(())
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<()> {
    let tx_lock = state.command_tx.lock().map_err(|e| anyhow!(e.to_string()))?;

    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::PlayerCommand(command))
            .map_err(|e| anyhow!("failed to send command: {e}")),
        None => Err(anyhow!("simulation not started")),
    }
}

/// Get the latest snapshot, if the loop has produced one.
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>> {
    let lock = state
        .latest_snapshot
        .lock()
        .map_err(|e| anyhow!(e.to_string()))?;
    Ok(lock.clone())
}

/// Stop the game loop and wait for its thread to finish.
pub fn stop_simulation(state: &AppState) -> Result<()> {
    if let Some(tx) = state
        .command_tx
        .lock()
        .map_err(|e| anyhow!(e.to_string()))?
        .take()
    {
        // The loop may already have exited on its own.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }

    let handle = state
        .loop_handle
        .lock()
        .map_err(|e| anyhow!(e.to_string()))?
        .take();
    match handle {
        Some(handle) => handle
            .join()
            .map_err(|_| anyhow!("game loop thread panicked")),
        None => Err(anyhow!("simulation not started")),
    }
}
