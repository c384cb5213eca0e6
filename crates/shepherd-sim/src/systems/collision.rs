//! Unit-vs-unit collision resolution.
//!
//! One pass per tick over every ordered pair of living units. When unit
//! `i` overlaps unit `j`, only `i` is pushed out by the penetration
//! vector. A moving unit that runs into a resting one stops, and the
//! resting one is told to stop too. Corrected positions are clamped to
//! the world bounds. The pass is order-dependent: units are visited in
//! `UnitId` order and later comparisons see earlier corrections.

use glam::Vec2;
use hecs::{Entity, World};

use shepherd_core::components::{Health, Hitbox, Motion, Unit};
use shepherd_core::geometry::{penetrates, penetration_vector};
use shepherd_core::types::{Position, UnitId};

/// Working copy of one unit for the resolution pass.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub entity: Entity,
    pub position: Vec2,
    pub radius: f32,
    pub moving: bool,
    /// Set when the pass ordered this unit to stop.
    pub stopped: bool,
}

/// Keep a circle of `radius` inside `[radius, world - radius]` on both axes.
pub fn clamp_to_world(position: Vec2, radius: f32, world_size: Vec2) -> Vec2 {
    let low = Vec2::splat(radius);
    let high = (world_size - low).max(low);
    position.clamp(low, high)
}

/// Resolve overlaps among `bodies` in place. Returns the number of corrections made.
pub fn resolve(bodies: &mut [Body], world_size: Vec2) -> usize {
    let mut corrections = 0;

    for i in 0..bodies.len() {
        for j in 0..bodies.len() {
            if i == j {
                continue;
            }
            let (a, b) = (bodies[i], bodies[j]);
            if !penetrates(a.position, a.radius, b.position, b.radius) {
                continue;
            }

            let push = penetration_vector(a.position, a.radius, b.position, b.radius);
            bodies[i].position = clamp_to_world(a.position - push, a.radius, world_size);
            corrections += 1;

            if !b.moving {
                for k in [i, j] {
                    bodies[k].moving = false;
                    bodies[k].stopped = true;
                }
            }
        }
    }

    corrections
}

/// Run collision resolution over all living units.
pub fn run(world: &mut World, world_size: Vec2) {
    let mut units: Vec<(UnitId, Body)> = world
        .query::<(&Unit, &UnitId, &Position, &Hitbox, &Motion, &Health)>()
        .iter()
        .filter(|(_, (_, _, _, _, _, health))| health.alive)
        .map(|(entity, (_, id, pos, hitbox, motion, _))| {
            (
                *id,
                Body {
                    entity,
                    position: pos.0,
                    radius: hitbox.radius(),
                    moving: motion.moving,
                    stopped: false,
                },
            )
        })
        .collect();
    units.sort_by_key(|(id, _)| *id);

    let mut bodies: Vec<Body> = units.into_iter().map(|(_, body)| body).collect();
    let corrections = resolve(&mut bodies, world_size);
    if corrections == 0 {
        return;
    }
    tracing::trace!(corrections, "resolved unit overlaps");

    for body in &bodies {
        if let Ok((pos, motion)) = world.query_one_mut::<(&mut Position, &mut Motion)>(body.entity)
        {
            pos.0 = body.position;
            if body.stopped {
                motion.stop(body.position);
            }
        }
    }
}
