//! Session configuration.
//!
//! Every field has a default, so a JSON file only needs the values it
//! overrides. `validate` rejects values the simulation cannot run with.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::Difficulty;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same simulation.
    pub seed: u64,
    pub world_width: f32,
    pub world_height: f32,
    pub difficulty: Difficulty,
    /// Units closer than this join the same flock.
    pub flock_threshold: f32,
    /// Sprite size of each unit (square).
    pub unit_size: f32,
    pub unit_speed: f32,
    pub grid_columns: u32,
    pub grid_rows: u32,
    pub grid_spacing: f32,
    pub power_up_interval_secs: f32,
    pub max_units: usize,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            difficulty: Difficulty::default(),
            flock_threshold: FLOCK_DISTANCE_THRESHOLD,
            unit_size: UNIT_SIZE,
            unit_speed: UNIT_SPEED,
            grid_columns: GRID_COLUMNS,
            grid_rows: GRID_ROWS,
            grid_spacing: GRID_SPACING,
            power_up_interval_secs: POWER_UP_INTERVAL_SECS,
            max_units: MAX_UNITS,
            time_scale: 1.0,
        }
    }
}

/// Reasons a `SimConfig` is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A value that must be a positive, finite number was not.
    NotPositive { field: &'static str, value: f32 },
    /// The starting herd does not fit inside the world.
    GridOutOfBounds { width: f32, height: f32 },
    /// `max_units` is smaller than the starting herd.
    MaxUnitsTooSmall { max_units: usize, initial: usize },
    /// A value outside its allowed closed range.
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotPositive { field, value } => {
                write!(f, "{field} must be positive and finite, got {value}")
            }
            ConfigError::GridOutOfBounds { width, height } => write!(
                f,
                "starting herd ({width}x{height}) does not fit inside the world"
            ),
            ConfigError::MaxUnitsTooSmall { max_units, initial } => write!(
                f,
                "max_units ({max_units}) is smaller than the starting herd ({initial})"
            ),
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} must be within [{min}, {max}], got {value}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl SimConfig {
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    pub fn initial_unit_count(&self) -> usize {
        (self.grid_columns * self.grid_rows) as usize
    }

    /// Centers of the starting herd, column by column, centered in the world.
    pub fn grid_positions(&self) -> Vec<Vec2> {
        let span = Vec2::new(
            self.grid_columns.saturating_sub(1) as f32,
            self.grid_rows.saturating_sub(1) as f32,
        ) * self.grid_spacing;
        let origin = self.world_size() / 2.0 - span / 2.0;

        let mut positions = Vec::with_capacity(self.initial_unit_count());
        for column in 0..self.grid_columns {
            for row in 0..self.grid_rows {
                positions.push(origin + Vec2::new(column as f32, row as f32) * self.grid_spacing);
            }
        }
        positions
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("flock_threshold", self.flock_threshold),
            ("unit_size", self.unit_size),
            ("unit_speed", self.unit_speed),
            ("grid_spacing", self.grid_spacing),
            ("power_up_interval_secs", self.power_up_interval_secs),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(0.0..=MAX_TIME_SCALE).contains(&self.time_scale) {
            return Err(ConfigError::OutOfRange {
                field: "time_scale",
                value: self.time_scale,
                min: 0.0,
                max: MAX_TIME_SCALE,
            });
        }

        let radius = self.unit_size / 2.0;
        let span = Vec2::new(
            self.grid_columns.saturating_sub(1) as f32,
            self.grid_rows.saturating_sub(1) as f32,
        ) * self.grid_spacing
            + Vec2::splat(self.unit_size);
        if span.x > self.world_width || span.y > self.world_height || radius <= 0.0 {
            return Err(ConfigError::GridOutOfBounds {
                width: span.x,
                height: span.y,
            });
        }

        let initial = self.initial_unit_count();
        if self.max_units < initial {
            return Err(ConfigError::MaxUnitsTooSmall {
                max_units: self.max_units,
                initial,
            });
        }

        Ok(())
    }
}
