//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the starting herd, new units, hazards and power-ups with
//! the appropriate component bundles.

use glam::Vec2;
use hecs::{Entity, World};

use shepherd_core::components::*;
use shepherd_core::config::SimConfig;
use shepherd_core::constants::POWER_UP_SIZE;
use shepherd_core::types::{Position, UnitId};

/// Size and speed shared by every unit of a session.
#[derive(Debug, Clone, Copy)]
pub struct UnitTemplate {
    pub size: Vec2,
    pub speed: f32,
}

impl UnitTemplate {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            size: Vec2::splat(config.unit_size),
            speed: config.unit_speed,
        }
    }
}

/// Spawn the starting herd on the configured grid.
pub fn setup_herd(world: &mut World, config: &SimConfig, next_unit_id: &mut u32) -> Vec<UnitId> {
    let template = UnitTemplate::from_config(config);
    config
        .grid_positions()
        .into_iter()
        .map(|position| spawn_unit(world, next_unit_id, template, position).1)
        .collect()
}

/// Spawn a single idle, unselected unit.
pub fn spawn_unit(
    world: &mut World,
    next_unit_id: &mut u32,
    template: UnitTemplate,
    position: Vec2,
) -> (Entity, UnitId) {
    debug_assert!(position.is_finite(), "unit spawned at {position}");
    debug_assert!(template.size.max_element() > 0.0, "unit radius must be positive");

    let id = UnitId(*next_unit_id);
    *next_unit_id += 1;

    let entity = world.spawn((
        Unit,
        id,
        Position(position),
        Hitbox {
            size: template.size,
        },
        Motion::at_rest(position, template.speed),
        Selectable::default(),
        Health::default(),
        Animation::default(),
    ));
    (entity, id)
}

/// Spawn a hazard in its Spawning phase.
pub fn spawn_hazard(world: &mut World, position: Vec2, kind: HazardKind) -> Entity {
    world.spawn((Position(position), Hazard::new(kind), Animation::default()))
}

/// Spawn a power-up waiting to be collected.
pub fn spawn_power_up(world: &mut World, position: Vec2) -> Entity {
    world.spawn((
        Position(position),
        Hitbox {
            size: Vec2::splat(POWER_UP_SIZE),
        },
        PowerUp::default(),
    ))
}
