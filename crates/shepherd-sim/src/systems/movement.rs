//! Unit movement system.
//!
//! Steps every living, moving unit straight toward its destination.

use hecs::World;

use shepherd_core::components::{Health, Motion, Unit};
use shepherd_core::types::Position;

/// Advance every living unit by `dt` seconds of motion.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, (_unit, pos, motion, health)) in
        world.query_mut::<(&Unit, &mut Position, &mut Motion, &Health)>()
    {
        if !health.alive {
            continue;
        }
        motion.advance(&mut pos.0, dt);
        debug_assert!(pos.0.is_finite(), "unit moved to {}", pos.0);
    }
}
