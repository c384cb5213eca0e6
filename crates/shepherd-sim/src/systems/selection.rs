//! Selection handling for player commands.

use hecs::World;

use shepherd_core::components::{Health, Hitbox, Motion, Selectable, Unit};
use shepherd_core::types::{Position, Rect, UnitId};

use crate::flock::FlockMember;

/// Select the units overlapping `rect`. Others are deselected unless `additive`.
/// Returns how many units are selected afterwards.
pub fn select_in_box(world: &mut World, rect: Rect, additive: bool) -> usize {
    let mut selected = 0;
    for (_entity, (_unit, pos, hitbox, selectable, health)) in
        world.query_mut::<(&Unit, &Position, &Hitbox, &mut Selectable, &Health)>()
    {
        if health.alive && rect.overlaps_box(pos.0, hitbox.size) {
            selectable.select();
        } else if !additive {
            selectable.deselect();
        }
        if selectable.selected {
            selected += 1;
        }
    }
    selected
}

pub fn select_all(world: &mut World) {
    for (_entity, (_unit, selectable, health)) in
        world.query_mut::<(&Unit, &mut Selectable, &Health)>()
    {
        if health.alive {
            selectable.select();
        }
    }
}

pub fn deselect_all(world: &mut World) {
    for (_entity, selectable) in world.query_mut::<&mut Selectable>() {
        selectable.deselect();
    }
}

/// Stop every selected unit where it stands.
pub fn stop_selected(world: &mut World) {
    for (_entity, (pos, motion, selectable)) in
        world.query_mut::<(&Position, &mut Motion, &Selectable)>()
    {
        if selectable.selected {
            motion.stop(pos.0);
        }
    }
}

/// Living selected units in `UnitId` order, ready for flocking.
pub fn selected_members(world: &World) -> Vec<FlockMember> {
    let mut members: Vec<(UnitId, FlockMember)> = world
        .query::<(&Unit, &UnitId, &Position, &Hitbox, &Selectable, &Health)>()
        .iter()
        .filter(|(_, (_, _, _, _, selectable, health))| selectable.selected && health.alive)
        .map(|(entity, (_, id, pos, hitbox, _, _))| {
            (
                *id,
                FlockMember {
                    entity,
                    position: pos.0,
                    radius: hitbox.radius(),
                },
            )
        })
        .collect();
    members.sort_by_key(|(id, _)| *id);
    members.into_iter().map(|(_, member)| member).collect()
}
