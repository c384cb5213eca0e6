//! Fundamental simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identifier of a unit. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// 2D position in world space (pixels, origin top-left, y down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Axis-aligned rectangle, stored as top-left corner and non-negative size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Build a rectangle from two arbitrary corners.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        Self {
            min,
            size: a.max(b) - min,
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Strict overlap test against another axis-aligned box given by center and size.
    pub fn overlaps_box(&self, center: Vec2, size: Vec2) -> bool {
        let half = size / 2.0;
        let max = self.max();
        center.x + half.x > self.min.x
            && center.x - half.x < max.x
            && center.y + half.y > self.min.y
            && center.y - half.y < max.y
    }
}

/// Simulation time tracking. Ticks carry a variable `dt` supplied by the host.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed game time in seconds.
    pub elapsed_secs: f32,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
