//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use std::collections::HashMap;

use glam::Vec2;
use hecs::World;

use shepherd_core::components::*;
use shepherd_core::enums::{Difficulty, GamePhase, HazardPhase};
use shepherd_core::events::SimEvent;
use shepherd_core::state::*;
use shepherd_core::types::{Position, SimTime, UnitId};

use shepherd_hazards::fsm::family;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    difficulty: Difficulty,
    world_size: Vec2,
    score: u64,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    let units = build_units(world);
    let hazards = build_hazards(world, &units);

    GameStateSnapshot {
        time: *time,
        phase,
        difficulty,
        world_size,
        score,
        units,
        hazards,
        power_ups: build_power_ups(world),
        events,
    }
}

/// Build UnitView list from living units, in id order.
fn build_units(world: &World) -> Vec<UnitView> {
    let mut units: Vec<UnitView> = world
        .query::<(
            &Unit,
            &UnitId,
            &Position,
            &Hitbox,
            &Motion,
            &Selectable,
            &Health,
            &Animation,
        )>()
        .iter()
        .filter(|(_, (_, _, _, _, _, _, health, _))| health.alive)
        .map(
            |(_, (_, id, pos, hitbox, motion, selectable, _, animation))| UnitView {
                id: *id,
                position: pos.0,
                size: hitbox.size,
                radius: hitbox.radius(),
                destination: motion.destination,
                moving: motion.moving,
                selected: selectable.selected,
                frame: animation.frame,
            },
        )
        .collect();
    units.sort_by_key(|u| u.id);
    units
}

fn build_hazards(world: &World, units: &[UnitView]) -> Vec<HazardView> {
    let positions: HashMap<UnitId, Vec2> = units.iter().map(|u| (u.id, u.position)).collect();

    world
        .query::<(&Position, &Hazard, &Animation)>()
        .iter()
        .filter(|(_, (_, hazard, _))| hazard.phase != HazardPhase::Removed)
        .map(|(_, (pos, hazard, animation))| {
            let (size, rotation, target_position) = match &hazard.kind {
                HazardKind::Lazer(lazer) => (lazer.size, lazer.angle, None),
                HazardKind::Rocket(rocket) => {
                    let target = if hazard.is_detonated() {
                        None
                    } else {
                        rocket.target.and_then(|id| positions.get(&id).copied())
                    };
                    (rocket.size, rocket.heading, target)
                }
            };
            HazardView {
                family: family(&hazard.kind),
                phase: hazard.phase,
                position: pos.0,
                size,
                rotation,
                frame: animation.frame,
                target_position,
            }
        })
        .collect()
}

fn build_power_ups(world: &World) -> Vec<PowerUpView> {
    world
        .query::<(&Position, &Hitbox, &PowerUp)>()
        .iter()
        .filter(|(_, (_, _, power_up))| !power_up.collected)
        .map(|(_, (pos, hitbox, _))| PowerUpView {
            position: pos.0,
            size: hitbox.size,
        })
        .collect()
}
