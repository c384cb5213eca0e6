//! Game state snapshot: the complete visible state handed to the host each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{SimTime, UnitId};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub world_size: Vec2,
    pub score: u64,
    /// Units in `UnitId` order.
    pub units: Vec<UnitView>,
    pub hazards: Vec<HazardView>,
    pub power_ups: Vec<PowerUpView>,
    pub events: Vec<SimEvent>,
}

impl GameStateSnapshot {
    pub fn unit(&self, id: UnitId) -> Option<&UnitView> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn selected_count(&self) -> usize {
        self.units.iter().filter(|u| u.selected).count()
    }

    pub fn hazard_count(&self, family: HazardFamily) -> usize {
        self.hazards.iter().filter(|h| h.family == family).count()
    }
}

/// A living unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub id: UnitId,
    pub position: Vec2,
    pub size: Vec2,
    pub radius: f32,
    pub destination: Vec2,
    pub moving: bool,
    pub selected: bool,
    /// Walk-cycle frame.
    pub frame: u32,
}

/// A lazer or rocket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardView {
    pub family: HazardFamily,
    pub phase: HazardPhase,
    pub position: Vec2,
    pub size: Vec2,
    /// Sprite rotation (radians).
    pub rotation: f32,
    pub frame: u32,
    /// Where a rocket's target currently stands (for the reticle).
    pub target_position: Option<Vec2>,
}

/// A power-up waiting to be collected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpView {
    pub position: Vec2,
    pub size: Vec2,
}
