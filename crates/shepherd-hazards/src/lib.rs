//! Hazard behaviour for SHEPHERD.
//!
//! Implements difficulty-driven hazard profiles, the lazer/rocket lifecycle
//! state machine, and rocket homing.

pub mod fsm;
pub mod profiles;

pub use shepherd_core as core;

#[cfg(test)]
mod tests;
