use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use shepherd_app::autopilot::Autopilot;
use shepherd_app::control;
use shepherd_app::state::AppState;
use shepherd_core::config::SimConfig;
use shepherd_core::constants::DT;
use shepherd_core::enums::{Difficulty, GamePhase};
use shepherd_core::events::SimEvent;
use shepherd_core::state::GameStateSnapshot;
use shepherd_sim::SimulationEngine;

/// Seconds of game time between autopilot orders.
const ORDER_INTERVAL_SECS: f32 = 4.0;
const ORDER_MARGIN: f32 = 60.0;

#[derive(Parser, Debug)]
#[command(name = "shepherd", about = "Keep the herd alive under lazers and rockets")]
struct Args {
    /// JSON file with simulation settings. Missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Game seconds to simulate before stopping.
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,

    /// Difficulty by name: debug, simple, easy, medium, hard, impossible.
    #[arg(long)]
    difficulty: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    /// Pace the run on the game-loop thread instead of stepping as fast as possible.
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let summary = if args.realtime {
        run_realtime(config, args.seconds)?
    } else {
        run_headless(config, args.seconds)?
    };

    println!(
        "{:?} after {:.1}s: score {}, {} units alive",
        summary.phase,
        summary.time.elapsed_secs,
        summary.score,
        summary.units.len()
    );
    Ok(())
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<SimConfig>(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => SimConfig::default(),
    };

    if let Some(name) = &args.difficulty {
        config.difficulty =
            Difficulty::from_name(name).ok_or_else(|| anyhow!("unknown difficulty '{name}'"))?;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate().context("invalid simulation config")?;
    Ok(config)
}

/// Step the engine directly at the fixed timestep.
fn run_headless(config: SimConfig, seconds: f32) -> Result<GameStateSnapshot> {
    let world_size = config.world_size();
    let mut autopilot = Autopilot::new(config.seed, ORDER_INTERVAL_SECS, ORDER_MARGIN);
    let mut engine = SimulationEngine::new(config).context("invalid simulation config")?;

    let mut snapshot = engine.snapshot();
    let mut next_report = 10.0;
    while snapshot.time.elapsed_secs < seconds && snapshot.phase != GamePhase::GameOver {
        engine.queue_commands(autopilot.orders(snapshot.time.elapsed_secs, world_size));
        snapshot = engine.tick(DT);
        log_events(&snapshot.events);

        if snapshot.time.elapsed_secs >= next_report {
            tracing::info!(
                elapsed = snapshot.time.elapsed_secs,
                score = snapshot.score,
                units = snapshot.units.len(),
                hazards = snapshot.hazards.len(),
                "progress"
            );
            next_report += 10.0;
        }
    }
    Ok(snapshot)
}

/// Run on the game-loop thread and poll snapshots like a host would.
fn run_realtime(config: SimConfig, seconds: f32) -> Result<GameStateSnapshot> {
    let world_size = config.world_size();
    let mut autopilot = Autopilot::new(config.seed, ORDER_INTERVAL_SECS, ORDER_MARGIN);
    let state = AppState::new();
    control::start_simulation(&state, config)?;

    let started = Instant::now();
    let mut last = None;
    let mut last_tick = None;
    loop {
        std::thread::sleep(Duration::from_millis(50));
        let Some(snapshot) = control::get_snapshot(&state)? else {
            continue;
        };
        // Events are per tick, so only look at snapshots we have not seen.
        if last_tick != Some(snapshot.time.tick) {
            log_events(&snapshot.events);
            last_tick = Some(snapshot.time.tick);
        }
        for command in autopilot.orders(snapshot.time.elapsed_secs, world_size) {
            control::send_command(&state, command)?;
        }

        let done = snapshot.time.elapsed_secs >= seconds
            || snapshot.phase == GamePhase::GameOver
            || started.elapsed().as_secs_f32() > seconds * 4.0 + 5.0;
        last = Some(snapshot);
        if done {
            break;
        }
    }

    control::stop_simulation(&state)?;
    last.ok_or_else(|| anyhow!("simulation produced no snapshot"))
}

fn log_events(events: &[SimEvent]) {
    for event in events {
        match event {
            SimEvent::UnitDestroyed { unit, cause } => {
                tracing::info!(unit = unit.0, ?cause, "unit lost");
            }
            SimEvent::PowerUpCollected { .. } | SimEvent::UnitSpawned { .. } => {
                tracing::debug!(?event, "herd grew");
            }
            _ => tracing::trace!(?event, "sim event"),
        }
    }
}
