//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing: the same config and the same inputs
//! yield the same snapshots.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use shepherd_core::commands::PlayerCommand;
use shepherd_core::components::{Health, Unit};
use shepherd_core::config::{ConfigError, SimConfig};
use shepherd_core::constants::MAX_TIME_SCALE;
use shepherd_core::enums::{DeathCause, Difficulty, GamePhase};
use shepherd_core::events::SimEvent;
use shepherd_core::state::GameStateSnapshot;
use shepherd_core::types::{Rect, SimTime, UnitId};

use crate::flock::{self, Flock};
use crate::systems;
use crate::systems::hazards::HazardHandler;
use crate::systems::score::ScoreState;
use crate::world_setup::{self, UnitTemplate};

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: SimConfig,
    time: SimTime,
    phase: GamePhase,
    time_scale: f32,
    rng: ChaCha8Rng,
    next_unit_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    hazards: HazardHandler,
    /// Flocks from the most recent group move.
    flocks: Vec<Flock>,
    score: ScoreState,
}

impl SimulationEngine {
    /// Validate the config, seed the RNG and place the starting herd.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut world = World::new();
        let mut next_unit_id = 0;
        let herd = world_setup::setup_herd(&mut world, &config, &mut next_unit_id);

        let mut hazards = HazardHandler::new(config.difficulty, config.world_size());
        hazards.init(&mut rng);

        tracing::info!(
            seed = config.seed,
            difficulty = ?config.difficulty,
            units = herd.len(),
            width = config.world_width,
            height = config.world_height,
            "simulation started"
        );

        Ok(Self {
            world,
            time: SimTime::default(),
            phase: GamePhase::Active,
            time_scale: config.time_scale,
            rng,
            next_unit_id,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            hazards,
            flocks: Vec::new(),
            score: ScoreState {
                score: 0,
                living_units: herd.len(),
            },
            config,
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f32) -> GameStateSnapshot {
        debug_assert!(dt.is_finite() && dt >= 0.0, "invalid dt {dt}");

        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        self.snapshot()
    }

    /// Build a snapshot of the current state, draining pending events.
    pub fn snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.hazards.difficulty(),
            self.config.world_size(),
            self.score.score,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn difficulty(&self) -> Difficulty {
        self.hazards.difficulty()
    }

    pub fn score(&self) -> u64 {
        self.score.score
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn hazards(&self) -> &HazardHandler {
        &self.hazards
    }

    /// Flocks built by the most recent `MoveSelected`.
    pub fn flocks(&self) -> &[Flock] {
        &self.flocks
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Number of units still alive.
    pub fn living_units(&self) -> usize {
        systems::score::living_units(&self.world)
    }

    /// Place a new idle unit, as a collected power-up would.
    pub fn spawn_unit(&mut self, position: Vec2) -> UnitId {
        let template = UnitTemplate::from_config(&self.config);
        let (_, id) =
            world_setup::spawn_unit(&mut self.world, &mut self.next_unit_id, template, position);
        self.events.push(SimEvent::UnitSpawned { unit: id, position });
        id
    }

    /// Kill a unit outside of the hazard system. It is despawned by the next cleanup.
    pub fn destroy_unit(&mut self, id: UnitId, cause: DeathCause) -> bool {
        let mut destroyed = false;
        for (_entity, (_unit, unit_id, health)) in
            self.world.query_mut::<(&Unit, &UnitId, &mut Health)>()
        {
            if *unit_id == id && health.alive {
                health.alive = false;
                destroyed = true;
                break;
            }
        }
        if destroyed {
            tracing::debug!(unit = id.0, ?cause, "unit destroyed");
            self.events.push(SimEvent::UnitDestroyed { unit: id, cause });
        }
        destroyed
    }

    /// Place a lazer at a fixed position and angle.
    pub fn spawn_lazer(&mut self, position: Vec2, angle: f32) -> Entity {
        self.hazards
            .spawn_lazer(&mut self.world, position, angle, &mut self.events)
    }

    /// Place a rocket at a fixed position, locked on `target`.
    pub fn spawn_rocket(&mut self, position: Vec2, target: UnitId) -> Entity {
        self.hazards
            .spawn_rocket(&mut self.world, position, target, &mut self.events)
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
            PlayerCommand::SelectInBox { min, max, additive } => {
                let rect = Rect::from_corners(min, max);
                let selected = systems::selection::select_in_box(&mut self.world, rect, additive);
                tracing::debug!(selected, additive, "box selection");
            }
            PlayerCommand::SelectAll => systems::selection::select_all(&mut self.world),
            PlayerCommand::DeselectAll => systems::selection::deselect_all(&mut self.world),
            PlayerCommand::MoveSelected { target } => {
                if self.phase == GamePhase::GameOver {
                    return;
                }
                let members = systems::selection::selected_members(&self.world);
                flock::recreate_flocks(
                    &members,
                    &mut self.flocks,
                    self.config.world_width,
                    self.config.world_height,
                    self.config.flock_threshold,
                );
                for flock in &self.flocks {
                    flock.move_to(&mut self.world, target);
                }
            }
            PlayerCommand::StopSelected => systems::selection::stop_selected(&mut self.world),
            PlayerCommand::SetDifficulty { difficulty } => {
                self.hazards.set_difficulty(difficulty, &mut self.rng);
                tracing::info!(?difficulty, "difficulty changed");
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        let elapsed = self.time.elapsed_secs;
        let world_size = self.config.world_size();

        // 1. Unit movement
        systems::movement::run(&mut self.world, dt);
        // 2. Collision resolution
        systems::collision::run(&mut self.world, world_size);
        // 3. Power-up collection and spawning
        systems::power_ups::run(
            &mut self.world,
            &mut self.rng,
            &mut self.next_unit_id,
            UnitTemplate::from_config(&self.config),
            world_size,
            self.config.power_up_interval_secs,
            elapsed,
            dt,
            &mut self.events,
        );
        // 4. Hazards (spawn, retarget, advance, damage)
        self.hazards
            .update(&mut self.world, &mut self.rng, dt, &mut self.events);
        // 5. Animation counters
        systems::animation::run(&mut self.world, elapsed, dt);
        // 6. Score and loss condition
        systems::score::run(&self.world, &mut self.score, elapsed, dt);
        self.check_game_over();
        // 7. Cleanup (pruning, dead units, finished hazards, collected power-ups)
        systems::cleanup::run(
            &mut self.world,
            self.config.max_units,
            &mut self.despawn_buffer,
            &mut self.events,
        );
    }

    fn check_game_over(&mut self) {
        let minimum = self.hazards.profile().min_surviving_units;
        if self.score.living_units >= minimum {
            return;
        }
        self.phase = GamePhase::GameOver;
        tracing::info!(
            score = self.score.score,
            living = self.score.living_units,
            minimum,
            "game over"
        );
        self.events.push(SimEvent::GameOver {
            score: self.score.score,
        });
    }
}
