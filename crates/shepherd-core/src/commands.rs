//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::Difficulty;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Selection ---
    /// Select every unit overlapping the box. Units outside are deselected
    /// unless `additive` (shift held).
    SelectInBox { min: Vec2, max: Vec2, additive: bool },
    /// Select every living unit.
    SelectAll,
    /// Deselect every unit.
    DeselectAll,

    // --- Orders ---
    /// Regroup the selected units into flocks and move each flock toward `target`.
    MoveSelected { target: Vec2 },
    /// Stop every selected unit where it stands.
    StopSelected,

    // --- Simulation control ---
    /// Change hazard difficulty. Resets the hazard timers.
    SetDifficulty { difficulty: Difficulty },
    /// Set time scale (1.0 = normal, 0.0 = frozen).
    SetTimeScale { scale: f32 },
    Pause,
    Resume,
}
