//! Survival scoring: one point per living unit for every whole second survived.

use hecs::World;

use shepherd_core::components::{Health, Unit};
use shepherd_core::constants::SCORE_INTERVAL_SECS;
use shepherd_core::geometry::crosses_interval;

/// Running score for the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreState {
    pub score: u64,
    /// Living units after the last scoring pass.
    pub living_units: usize,
}

pub fn living_units(world: &World) -> usize {
    world
        .query::<(&Unit, &Health)>()
        .iter()
        .filter(|(_, (_, health))| health.alive)
        .count()
}

/// Recount the herd and award points when a whole second went by. Returns the points awarded.
pub fn run(world: &World, score: &mut ScoreState, elapsed: f32, dt: f32) -> u64 {
    score.living_units = living_units(world);
    if !crosses_interval(elapsed, elapsed + dt, SCORE_INTERVAL_SECS) {
        return 0;
    }
    let awarded = score.living_units as u64;
    score.score += awarded;
    awarded
}
