//! Sprite animation counters for units and lazers.

use hecs::World;

use shepherd_core::components::{Animation, Hazard, HazardKind, Motion, Unit};
use shepherd_core::constants::{LAZER_FRAMES, LAZER_FRAME_SECS, UNIT_FRAME_SECS, UNIT_WALK_FRAMES};
use shepherd_core::enums::HazardPhase;
use shepherd_core::geometry::crosses_interval;

/// Advance frame counters for the step from `elapsed` to `elapsed + dt`.
pub fn run(world: &mut World, elapsed: f32, dt: f32) {
    let walk_step = crosses_interval(elapsed, elapsed + dt, UNIT_FRAME_SECS);
    for (_entity, (_unit, motion, animation)) in
        world.query_mut::<(&Unit, &Motion, &mut Animation)>()
    {
        if !motion.moving {
            animation.frame = 0;
        } else if walk_step {
            animation.frame = (animation.frame + 1) % UNIT_WALK_FRAMES;
        }
    }

    let lazer_step = crosses_interval(elapsed, elapsed + dt, LAZER_FRAME_SECS);
    for (_entity, (hazard, animation)) in world.query_mut::<(&Hazard, &mut Animation)>() {
        if !matches!(hazard.kind, HazardKind::Lazer(_)) {
            continue;
        }
        match hazard.phase {
            HazardPhase::Spawning | HazardPhase::Active if lazer_step => {
                animation.frame = (animation.frame + 1) % LAZER_FRAMES;
            }
            HazardPhase::Detonated | HazardPhase::Removed => animation.frame = 0,
            _ => {}
        }
    }
}
