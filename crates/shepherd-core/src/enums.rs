//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Hazard difficulty, ordered from most forgiving to least forgiving.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Difficulty {
    /// Hazards never spawn.
    Debug,
    #[default]
    Simple,
    Easy,
    Medium,
    Hard,
    Impossible,
}

impl Difficulty {
    pub const ALL: [Difficulty; 6] = [
        Difficulty::Debug,
        Difficulty::Simple,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Impossible,
    ];

    /// Parse a case-insensitive difficulty name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "debug" => Some(Difficulty::Debug),
            "simple" => Some(Difficulty::Simple),
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "impossible" => Some(Difficulty::Impossible),
            _ => None,
        }
    }
}

/// Hazard family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardFamily {
    Lazer,
    Rocket,
}

/// Hazard lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardPhase {
    /// Telegraphing: visible, harmless.
    #[default]
    Spawning,
    /// Dealing damage (lazer) or homing (rocket).
    Active,
    /// Exploding. Purely cosmetic.
    Detonated,
    /// Explosion finished; despawned by cleanup.
    Removed,
}

/// Why a hazard left the Active phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Detonation {
    /// A rocket reached its target.
    Impact,
    /// The beam ended, or a rocket ran out of fuel and blew up in place.
    Expired,
    /// No living unit left to chase. Deals no damage.
    Fizzled,
}

/// What destroyed a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Lazer,
    Rocket,
    Pruned,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
    GameOver,
}

/// Mouse buttons the input layer reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Button state as reported for the current and previous frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonAction {
    #[default]
    Release,
    Press,
}

/// Keys the core reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Stop every selected unit.
    S,
    Other(u32),
}
