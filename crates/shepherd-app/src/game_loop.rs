//! Game loop thread. Runs the simulation engine at `TICK_RATE` Hz and publishes snapshots.
//!
//! The engine is built on the caller's thread so a bad config fails fast,
//! then moved into the loop thread. Commands arrive via `mpsc` channel.
//! Snapshots are stored in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use shepherd_core::config::SimConfig;
use shepherd_core::constants::{DT, TICK_RATE};
use shepherd_core::enums::GamePhase;
use shepherd_core::state::GameStateSnapshot;
use shepherd_sim::SimulationEngine;

use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let engine = SimulationEngine::new(config).context("invalid simulation config")?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("shepherd-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut next_tick_time = Instant::now();
    let mut reported_game_over = false;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    tracing::debug!(tick = engine.time().tick, "game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let time_scale = engine.time_scale();
        let dt = if time_scale > 0.001 { DT } else { 0.0 };
        let snapshot = engine.tick(dt);

        if snapshot.phase == GamePhase::GameOver && !reported_game_over {
            tracing::info!(score = snapshot.score, "game loop reached game over");
            reported_game_over = true;
        }

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick, adjusting for time_scale
        let effective_tick_duration = if time_scale > 0.001 {
            TICK_DURATION.div_f32(time_scale)
        } else {
            TICK_DURATION
        };

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind, reset the schedule
            tracing::trace!("game loop fell behind, resetting schedule");
            next_tick_time = now;
        }
    }
}
