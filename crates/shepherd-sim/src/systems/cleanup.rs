//! Cleanup system: structural removal deferred to the end of the tick.
//!
//! Despawns dead units, units pruned above the population cap, Removed
//! hazards and collected power-ups.

use hecs::{Entity, World};

use shepherd_core::components::{Hazard, Health, PowerUp, Unit};
use shepherd_core::enums::{DeathCause, HazardPhase};
use shepherd_core::events::SimEvent;
use shepherd_core::types::UnitId;

/// Prune, then despawn everything that is finished.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    max_units: usize,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();

    prune(world, max_units, events);

    for (entity, (_unit, health)) in world.query_mut::<(&Unit, &Health)>() {
        if !health.alive {
            despawn_buffer.push(entity);
        }
    }

    for (entity, hazard) in world.query_mut::<&Hazard>() {
        if hazard.phase == HazardPhase::Removed {
            despawn_buffer.push(entity);
        }
    }

    for (entity, power_up) in world.query_mut::<&PowerUp>() {
        if power_up.collected {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Kill the newest living units beyond `max_units`.
fn prune(world: &mut World, max_units: usize, events: &mut Vec<SimEvent>) {
    let mut living: Vec<(UnitId, Entity)> = world
        .query::<(&Unit, &UnitId, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| health.alive)
        .map(|(entity, (_, id, _))| (*id, entity))
        .collect();
    if living.len() <= max_units {
        return;
    }

    living.sort_by_key(|(id, _)| *id);
    tracing::warn!(living = living.len(), max_units, "herd over capacity, pruning");
    for (id, entity) in living.drain(max_units..).rev() {
        if let Ok(mut health) = world.get::<&mut Health>(entity) {
            health.alive = false;
        }
        events.push(SimEvent::UnitDestroyed {
            unit: id,
            cause: DeathCause::Pruned,
        });
    }
}
