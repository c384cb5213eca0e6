//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! The hazard handler is the one stateful system: it owns the spawn timers.

pub mod animation;
pub mod cleanup;
pub mod collision;
pub mod hazards;
pub mod movement;
pub mod power_ups;
pub mod score;
pub mod selection;
pub mod snapshot;
