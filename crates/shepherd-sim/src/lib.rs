//! Simulation engine for SHEPHERD.
//!
//! Owns the hecs ECS world, advances it by host-supplied time steps,
//! and produces GameStateSnapshots for the host.

pub mod engine;
pub mod flock;
pub mod input;
pub mod render;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use shepherd_core as core;
