//! SHEPHERD host application.
//!
//! Runs the simulation engine on a fixed-rate game-loop thread and
//! exposes a small control surface to whatever hosts it.

pub mod autopilot;
pub mod control;
pub mod game_loop;
pub mod state;

pub use shepherd_core as core;
