//! Simulation constants and tuning parameters.

/// Host loop tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal tick rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// Fastest allowed host pacing multiplier.
pub const MAX_TIME_SCALE: f32 = 4.0;

// --- World ---

/// Default field width in pixels.
pub const WORLD_WIDTH: f32 = 1280.0;

/// Default field height in pixels.
pub const WORLD_HEIGHT: f32 = 720.0;

// --- Units ---

/// Default sheep sprite size (pixels). Collision radius is half the larger side.
pub const UNIT_SIZE: f32 = 50.0;

/// Default sheep walking speed (pixels per second).
pub const UNIT_SPEED: f32 = 100.0;

/// Distance under which a unit counts as arrived.
pub const ARRIVAL_EPSILON: f32 = 0.5;

/// Starting herd layout.
pub const GRID_COLUMNS: u32 = 4;
pub const GRID_ROWS: u32 = 3;
pub const GRID_SPACING: f32 = 100.0;

/// Upper bound on living units; extras are pruned newest first.
pub const MAX_UNITS: usize = 40;

/// Frames in the walk cycle sprite sheet.
pub const UNIT_WALK_FRAMES: u32 = 7;

/// Seconds per walk-cycle frame.
pub const UNIT_FRAME_SECS: f32 = 0.1;

// --- Flocking ---

/// Units closer than this (center to center) move as one flock.
pub const FLOCK_DISTANCE_THRESHOLD: f32 = 65.0;

// --- Lazers ---

/// Beam length and width (pixels).
pub const LAZER_LENGTH: f32 = 400.0;
pub const LAZER_WIDTH: f32 = 40.0;

/// Seconds the explosion sprite plays after the beam ends.
pub const LAZER_EXPLOSION_SECS: f32 = 0.5;

/// Seconds per lazer animation frame.
pub const LAZER_FRAME_SECS: f32 = 0.05;

/// Frames in the lazer sprite sheet.
pub const LAZER_FRAMES: u32 = 4;

// --- Rockets ---

/// Rocket sprite size (pixels).
pub const ROCKET_LENGTH: f32 = 40.0;
pub const ROCKET_WIDTH: f32 = 20.0;

/// Radius around the impact point in which units are destroyed.
pub const ROCKET_BLAST_RADIUS: f32 = 40.0;

/// Seconds the explosion sprite plays after detonation.
pub const ROCKET_EXPLOSION_SECS: f32 = 0.6;

/// Size of the target reticle drawn over a rocket's target.
pub const ROCKET_RETICLE_SIZE: f32 = 70.0;

// --- Power-ups ---

/// Seconds between power-up spawns.
pub const POWER_UP_INTERVAL_SECS: f32 = 10.0;

/// Power-up sprite size (pixels).
pub const POWER_UP_SIZE: f32 = 50.0;

/// Power-ups never spawn closer than this to the field edge.
pub const POWER_UP_EDGE_MARGIN: f32 = 50.0;

// --- Score ---

/// Score is awarded once per this many seconds, one point per living unit.
pub const SCORE_INTERVAL_SECS: f32 = 1.0;
