//! Events emitted by the simulation for audio and UI feedback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::UnitId;

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A lazer or rocket appeared.
    HazardSpawned { family: HazardFamily, position: Vec2 },
    /// A lazer beam started firing.
    LazerFired { position: Vec2 },
    /// A hazard left the Active phase.
    HazardDetonated {
        family: HazardFamily,
        position: Vec2,
        detonation: Detonation,
    },
    /// A rocket's target died and it picked a new one.
    RocketRetargeted { from: Option<UnitId>, to: UnitId },
    UnitDestroyed { unit: UnitId, cause: DeathCause },
    UnitSpawned { unit: UnitId, position: Vec2 },
    PowerUpSpawned { position: Vec2 },
    PowerUpCollected { unit: UnitId, position: Vec2 },
    /// Living units fell below the difficulty's minimum.
    GameOver { score: u64 },
}
