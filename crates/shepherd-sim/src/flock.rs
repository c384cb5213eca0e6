//! Flocks: transient groups of selected units that share one move order.
//!
//! `recreate_flocks` clusters the selection into connected components
//! under a distance threshold. Each `Flock` then translates all of its
//! members by one offset, clamped so that nobody leaves the world.

use glam::Vec2;
use hecs::{Entity, World};

use shepherd_core::components::Motion;
use shepherd_core::geometry::norm;
use shepherd_core::types::Position;

/// A non-owning reference to a unit, with the state flocking needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockMember {
    pub entity: Entity,
    pub position: Vec2,
    pub radius: f32,
}

/// Units moving together under one clamped offset.
#[derive(Debug, Clone)]
pub struct Flock {
    members: Vec<FlockMember>,
    min: Vec2,
    max: Vec2,
    world_size: Vec2,
}

impl Flock {
    pub fn new(world_width: f32, world_height: f32) -> Self {
        Self {
            members: Vec::new(),
            min: Vec2::splat(f32::INFINITY),
            max: Vec2::splat(f32::NEG_INFINITY),
            world_size: Vec2::new(world_width, world_height),
        }
    }

    /// Add a member and grow the bounding box to include it.
    pub fn add(&mut self, member: FlockMember) {
        self.min = self.min.min(member.position);
        self.max = self.max.max(member.position);
        self.members.push(member);
    }

    pub fn members(&self) -> &[FlockMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.members.iter().any(|m| m.entity == entity)
    }

    /// Half extent of the members' bounding box.
    pub fn center(&self) -> Vec2 {
        if self.members.is_empty() {
            return Vec2::ZERO;
        }
        (self.max - self.min) / 2.0
    }

    /// Bounding-box corner with the smallest coordinates.
    pub fn min_corner(&self) -> Vec2 {
        self.min
    }

    /// Bounding-box corner with the largest coordinates.
    pub fn max_corner(&self) -> Vec2 {
        self.max
    }

    /// The shared offset `target + center()`, shrunk per axis so every member
    /// stays within `[radius, world - radius]`.
    pub fn clamped_offset(&self, target: Vec2) -> Vec2 {
        let mut offset = target + self.center();

        // Largest violation past each wall among all members.
        let mut below = Vec2::ZERO;
        let mut above = Vec2::ZERO;
        for member in &self.members {
            let radius = Vec2::splat(member.radius);
            let landing = member.position + offset;
            below = below.max(radius - landing);
            above = above.max(landing - (self.world_size - radius));
        }

        offset += below;
        offset -= above;
        if below.x > 0.0 && above.x > 0.0 || below.y > 0.0 && above.y > 0.0 {
            tracing::warn!(
                members = self.members.len(),
                "flock does not fit inside the world, favouring the far walls"
            );
        }
        offset
    }

    /// Move every member by the clamped offset. Returns the offset applied.
    pub fn set_destination(&self, world: &mut World, target: Vec2) -> Vec2 {
        let offset = self.clamped_offset(target);
        for member in &self.members {
            if let Ok((position, motion)) =
                world.query_one_mut::<(&Position, &mut Motion)>(member.entity)
            {
                motion.set_destination(position.0, position.0 + offset);
            }
        }
        offset
    }

    /// Move the flock so its bounding-box center lands on `point`, within bounds.
    pub fn move_to(&self, world: &mut World, point: Vec2) -> Vec2 {
        // offset = (point - max) + (max - min) / 2 = point - bbox center
        self.set_destination(world, point - self.max)
    }
}

/// Rebuild `flocks` from `units`, discarding the previous flocks.
///
/// Two units share a flock when a chain of units, each closer than
/// `threshold` to the next, connects them.
pub fn recreate_flocks(
    units: &[FlockMember],
    flocks: &mut Vec<Flock>,
    world_width: f32,
    world_height: f32,
    threshold: f32,
) {
    flocks.clear();
    let mut assigned = vec![false; units.len()];

    for seed in 0..units.len() {
        if assigned[seed] {
            continue;
        }

        let mut flock = Flock::new(world_width, world_height);
        flock.add(units[seed]);
        assigned[seed] = true;

        // Restart the scan after every addition so membership propagates transitively.
        loop {
            let joiner = (0..units.len()).find(|&candidate| {
                !assigned[candidate]
                    && flock
                        .members()
                        .iter()
                        .any(|m| norm(m.position - units[candidate].position) < threshold)
            });
            match joiner {
                Some(candidate) => {
                    flock.add(units[candidate]);
                    assigned[candidate] = true;
                }
                None => break,
            }
        }

        flocks.push(flock);
    }

    tracing::debug!(
        units = units.len(),
        flocks = flocks.len(),
        threshold,
        "rebuilt flocks"
    );
}
