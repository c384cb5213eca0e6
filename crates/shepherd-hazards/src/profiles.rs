//! Difficulty-specific hazard profiles.
//!
//! Consolidates per-difficulty spawn frequency and hazard tuning. Every
//! parameter moves monotonically from `Debug` (most forgiving) to
//! `Impossible` (least forgiving).

use rand::Rng;

use shepherd_core::enums::{Difficulty, HazardFamily};

/// Hazard tuning for one difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardProfile {
    /// Mean seconds between lazer spawns. `None` disables lazers.
    pub lazer_interval: Option<f32>,
    /// Mean seconds between rocket spawns. `None` disables rockets.
    pub rocket_interval: Option<f32>,
    /// Spawn intervals are scaled by a random factor in `[1 - j, 1 + j]`.
    pub spawn_jitter: f32,
    /// Seconds a lazer telegraphs before firing.
    pub lazer_telegraph: f32,
    /// Seconds a lazer beam stays lethal.
    pub lazer_duration: f32,
    /// Seconds a rocket shows its reticle before launching.
    pub rocket_lock_time: f32,
    /// Rocket speed (pixels per second).
    pub rocket_velocity: f32,
    /// Rocket turn rate (radians per second).
    pub rocket_angular_velocity: f32,
    /// Seconds a rocket flies before blowing up in place.
    pub rocket_fuel: f32,
    /// The game is lost once fewer units than this survive.
    pub min_surviving_units: usize,
}

impl HazardProfile {
    pub fn interval(&self, family: HazardFamily) -> Option<f32> {
        match family {
            HazardFamily::Lazer => self.lazer_interval,
            HazardFamily::Rocket => self.rocket_interval,
        }
    }

    pub fn spawning_enabled(&self) -> bool {
        self.lazer_interval.is_some() || self.rocket_interval.is_some()
    }

    /// Draw the next countdown for `family`, or `None` if it never spawns.
    pub fn next_interval<R: Rng>(&self, family: HazardFamily, rng: &mut R) -> Option<f32> {
        let base = self.interval(family)?;
        if self.spawn_jitter <= 0.0 {
            return Some(base);
        }
        let factor = rng.gen_range((1.0 - self.spawn_jitter)..=(1.0 + self.spawn_jitter));
        Some(base * factor)
    }
}

/// Get the hazard profile for a given difficulty.
pub fn get_profile(difficulty: Difficulty) -> HazardProfile {
    match difficulty {
        Difficulty::Debug => HazardProfile {
            lazer_interval: None,
            rocket_interval: None,
            spawn_jitter: 0.0,
            lazer_telegraph: 2.2,
            lazer_duration: 0.6,
            rocket_lock_time: 1.8,
            rocket_velocity: 80.0,
            rocket_angular_velocity: 1.2,
            rocket_fuel: 6.0,
            min_surviving_units: 0,
        },
        Difficulty::Simple => HazardProfile {
            lazer_interval: Some(7.0),
            rocket_interval: Some(15.0),
            spawn_jitter: 0.3,
            lazer_telegraph: 2.0,
            lazer_duration: 0.8,
            rocket_lock_time: 1.5,
            rocket_velocity: 100.0,
            rocket_angular_velocity: 1.5,
            rocket_fuel: 8.0,
            min_surviving_units: 3,
        },
        Difficulty::Easy => HazardProfile {
            lazer_interval: Some(6.0),
            rocket_interval: Some(12.0),
            spawn_jitter: 0.3,
            lazer_telegraph: 1.8,
            lazer_duration: 1.0,
            rocket_lock_time: 1.3,
            rocket_velocity: 120.0,
            rocket_angular_velocity: 2.0,
            rocket_fuel: 9.0,
            min_surviving_units: 4,
        },
        Difficulty::Medium => HazardProfile {
            lazer_interval: Some(5.0),
            rocket_interval: Some(10.0),
            spawn_jitter: 0.25,
            lazer_telegraph: 1.5,
            lazer_duration: 1.2,
            rocket_lock_time: 1.1,
            rocket_velocity: 140.0,
            rocket_angular_velocity: 2.5,
            rocket_fuel: 10.0,
            min_surviving_units: 5,
        },
        Difficulty::Hard => HazardProfile {
            lazer_interval: Some(4.0),
            rocket_interval: Some(8.0),
            spawn_jitter: 0.2,
            lazer_telegraph: 1.2,
            lazer_duration: 1.4,
            rocket_lock_time: 0.9,
            rocket_velocity: 160.0,
            rocket_angular_velocity: 3.0,
            rocket_fuel: 11.0,
            min_surviving_units: 5,
        },
        Difficulty::Impossible => HazardProfile {
            lazer_interval: Some(2.5),
            rocket_interval: Some(5.0),
            spawn_jitter: 0.15,
            lazer_telegraph: 0.9,
            lazer_duration: 1.6,
            rocket_lock_time: 0.7,
            rocket_velocity: 190.0,
            rocket_angular_velocity: 3.5,
            rocket_fuel: 12.0,
            min_surviving_units: 6,
        },
    }
}
