//! ECS components for hecs entities.
//!
//! Components are plain data. The small helpers on `Motion` and
//! `Selectable` are the unit operations every system shares; everything
//! else lives in systems.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::ARRIVAL_EPSILON;
use crate::enums::HazardPhase;
use crate::types::UnitId;

/// Marks an entity as a unit (a sheep).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Unit;

/// Sprite-sized footprint. The collision circle is derived from it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hitbox {
    pub size: Vec2,
}

impl Hitbox {
    /// Collision radius: half of the larger side.
    pub fn radius(&self) -> f32 {
        self.size.x.max(self.size.y) / 2.0
    }
}

/// Straight-line motion toward a destination.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Motion {
    pub destination: Vec2,
    /// Pixels per second.
    pub speed: f32,
    pub moving: bool,
}

impl Motion {
    /// A stationary unit parked at `position`.
    pub fn at_rest(position: Vec2, speed: f32) -> Self {
        Self {
            destination: position,
            speed,
            moving: false,
        }
    }

    /// Step `position` toward the destination without overshooting it.
    pub fn advance(&mut self, position: &mut Vec2, dt: f32) {
        if !self.moving {
            return;
        }

        let to_target = self.destination - *position;
        let distance = crate::geometry::norm(to_target);
        let step = self.speed * dt;

        if distance <= ARRIVAL_EPSILON || step >= distance {
            *position = self.destination;
            self.moving = false;
            return;
        }

        *position += to_target / distance * step;
        if crate::geometry::norm(self.destination - *position) <= ARRIVAL_EPSILON {
            *position = self.destination;
            self.moving = false;
        }
    }

    /// Head for `target`. Does nothing but record it when already there.
    pub fn set_destination(&mut self, position: Vec2, target: Vec2) {
        self.destination = target;
        self.moving = target != position;
    }

    /// Halt where the unit stands.
    pub fn stop(&mut self, position: Vec2) {
        self.moving = false;
        self.destination = position;
    }
}

/// Whether the player has this unit selected. Never affects physics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Selectable {
    pub selected: bool,
}

impl Selectable {
    pub fn select(&mut self) {
        self.selected = true;
    }

    pub fn deselect(&mut self) {
        self.selected = false;
    }
}

/// Units are one-hit: hazards flip `alive` and cleanup despawns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub alive: bool,
}

impl Default for Health {
    fn default() -> Self {
        Self { alive: true }
    }
}

/// Sprite-sheet frame counter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Animation {
    pub frame: u32,
}

/// Lazer: a static beam that destroys units while Active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lazer {
    /// Beam rotation (radians).
    pub angle: f32,
    /// Beam length (x) and width (y).
    pub size: Vec2,
    /// Seconds in Spawning before the beam fires.
    pub telegraph: f32,
    /// Seconds the beam stays Active.
    pub duration: f32,
}

/// Rocket: homes in on a unit and explodes on contact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rocket {
    /// Heading (radians, 0 = +X).
    pub heading: f32,
    /// Pixels per second.
    pub velocity: f32,
    /// Maximum turn rate (radians per second).
    pub angular_velocity: f32,
    /// Seconds in Spawning while the target reticle is shown.
    pub lock_time: f32,
    /// Maximum seconds Active before blowing up in place.
    pub fuel: f32,
    pub blast_radius: f32,
    pub size: Vec2,
    pub target: Option<UnitId>,
    /// Set when the rocket fizzled with nothing left to hit.
    pub harmless: bool,
}

/// The closed set of hazard kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum HazardKind {
    Lazer(Lazer),
    Rocket(Rocket),
}

/// A hazard entity's lifecycle state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hazard {
    pub kind: HazardKind,
    pub phase: HazardPhase,
    /// Seconds spent in the current phase.
    pub phase_elapsed: f32,
}

impl Hazard {
    pub fn new(kind: HazardKind) -> Self {
        Self {
            kind,
            phase: HazardPhase::Spawning,
            phase_elapsed: 0.0,
        }
    }

    /// Detonated and Removed hazards never damage units.
    pub fn is_detonated(&self) -> bool {
        matches!(self.phase, HazardPhase::Detonated | HazardPhase::Removed)
    }

    pub fn enter(&mut self, phase: HazardPhase) {
        self.phase = phase;
        self.phase_elapsed = 0.0;
    }
}

/// A pickup that spawns a new unit when collected.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PowerUp {
    pub collected: bool,
}
