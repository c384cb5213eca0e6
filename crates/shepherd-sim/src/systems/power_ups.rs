//! Power-up system: periodic spawns, collection, and the new unit each pickup brings.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use shepherd_core::components::{Health, Hitbox, PowerUp, Unit};
use shepherd_core::constants::POWER_UP_EDGE_MARGIN;
use shepherd_core::events::SimEvent;
use shepherd_core::geometry::{crosses_interval, penetrates};
use shepherd_core::types::{Position, UnitId};

use crate::world_setup::{self, UnitTemplate};

/// Collect touched power-ups, then spawn a new one if the interval elapsed.
#[allow(clippy::too_many_arguments)]
pub fn run<R: Rng>(
    world: &mut World,
    rng: &mut R,
    next_unit_id: &mut u32,
    template: UnitTemplate,
    world_size: Vec2,
    interval: f32,
    elapsed: f32,
    dt: f32,
    events: &mut Vec<SimEvent>,
) {
    collect(world, next_unit_id, template, events);

    if interval > 0.0 && crosses_interval(elapsed, elapsed + dt, interval) {
        let position = random_spawn_point(rng, world_size);
        world_setup::spawn_power_up(world, position);
        tracing::debug!(x = position.x, y = position.y, "power-up spawned");
        events.push(SimEvent::PowerUpSpawned { position });
    }
}

/// Hand each touched power-up to the lowest-id living unit touching it.
pub fn collect(
    world: &mut World,
    next_unit_id: &mut u32,
    template: UnitTemplate,
    events: &mut Vec<SimEvent>,
) {
    let mut units: Vec<(UnitId, Vec2, f32)> = world
        .query::<(&Unit, &UnitId, &Position, &Hitbox, &Health)>()
        .iter()
        .filter(|(_, (_, _, _, _, health))| health.alive)
        .map(|(_, (_, id, pos, hitbox, _))| (*id, pos.0, hitbox.radius()))
        .collect();
    if units.is_empty() {
        return;
    }
    units.sort_by_key(|(id, _, _)| *id);

    let mut collected: Vec<(Entity, UnitId, Vec2)> = Vec::new();
    for (entity, (pos, hitbox, power_up)) in world.query_mut::<(&Position, &Hitbox, &mut PowerUp)>()
    {
        if power_up.collected {
            continue;
        }
        let collector = units
            .iter()
            .find(|(_, unit_pos, radius)| penetrates(*unit_pos, *radius, pos.0, hitbox.radius()));
        if let Some(&(unit, _, _)) = collector {
            power_up.collected = true;
            collected.push((entity, unit, pos.0));
        }
    }

    for (_entity, unit, position) in collected {
        events.push(SimEvent::PowerUpCollected { unit, position });
        let (_, spawned) = world_setup::spawn_unit(world, next_unit_id, template, position);
        tracing::debug!(collector = unit.0, unit = spawned.0, "power-up collected");
        events.push(SimEvent::UnitSpawned {
            unit: spawned,
            position,
        });
    }
}

fn random_spawn_point<R: Rng>(rng: &mut R, world_size: Vec2) -> Vec2 {
    Vec2::new(
        within_margin(rng, world_size.x),
        within_margin(rng, world_size.y),
    )
}

fn within_margin<R: Rng>(rng: &mut R, extent: f32) -> f32 {
    if extent > 2.0 * POWER_UP_EDGE_MARGIN {
        rng.gen_range(POWER_UP_EDGE_MARGIN..extent - POWER_UP_EDGE_MARGIN)
    } else {
        extent / 2.0
    }
}
