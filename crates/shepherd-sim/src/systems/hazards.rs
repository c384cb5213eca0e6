//! Hazard handler: spawns lazers and rockets on difficulty-scaled timers,
//! drives them through the lifecycle FSM and applies their damage.
//!
//! Hazards never despawn units themselves. A hit only flips
//! `Health::alive`; cleanup removes the entity after all systems ran.

use std::f32::consts::PI;

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use shepherd_core::components::*;
use shepherd_core::constants::*;
use shepherd_core::enums::{DeathCause, Detonation, Difficulty, HazardFamily, HazardPhase};
use shepherd_core::events::SimEvent;
use shepherd_core::geometry::{circle_intersects_oriented_rect, norm, penetrates, rotated_half_extents};
use shepherd_core::types::{Position, UnitId};

use shepherd_hazards::fsm::{evaluate, family, steer, TargetFix};
use shepherd_hazards::profiles::{get_profile, HazardProfile};

use crate::world_setup;

/// A unit as hazards see it during one tick.
#[derive(Debug, Clone, Copy)]
struct Victim {
    entity: Entity,
    id: UnitId,
    position: Vec2,
    radius: f32,
    alive: bool,
}

/// Session hazard state: difficulty, its profile and the two spawn countdowns.
#[derive(Debug, Clone)]
pub struct HazardHandler {
    difficulty: Difficulty,
    profile: HazardProfile,
    world_size: Vec2,
    lazer_countdown: Option<f32>,
    rocket_countdown: Option<f32>,
}

impl HazardHandler {
    /// A handler with no running countdowns. Call `init` to arm them.
    pub fn new(difficulty: Difficulty, world_size: Vec2) -> Self {
        Self {
            difficulty,
            profile: get_profile(difficulty),
            world_size,
            lazer_countdown: None,
            rocket_countdown: None,
        }
    }

    /// Arm both countdowns from the current profile.
    pub fn init<R: Rng>(&mut self, rng: &mut R) {
        self.lazer_countdown = self.profile.next_interval(HazardFamily::Lazer, rng);
        self.rocket_countdown = self.profile.next_interval(HazardFamily::Rocket, rng);
        tracing::debug!(
            difficulty = ?self.difficulty,
            lazer = ?self.lazer_countdown,
            rocket = ?self.rocket_countdown,
            "hazard timers armed"
        );
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn profile(&self) -> &HazardProfile {
        &self.profile
    }

    /// Seconds until the next lazer and rocket, `None` when that family never spawns.
    pub fn countdowns(&self) -> (Option<f32>, Option<f32>) {
        (self.lazer_countdown, self.rocket_countdown)
    }

    /// Switch difficulty and restart both countdowns.
    pub fn set_difficulty<R: Rng>(&mut self, difficulty: Difficulty, rng: &mut R) {
        self.difficulty = difficulty;
        self.profile = get_profile(difficulty);
        self.init(rng);
    }

    /// Run one hazard tick: spawn, retarget, advance, damage.
    pub fn update<R: Rng>(
        &mut self,
        world: &mut World,
        rng: &mut R,
        dt: f32,
        events: &mut Vec<SimEvent>,
    ) {
        self.generate(world, rng, dt, events);
        self.update_rocket_targets(world, events);
        self.advance(world, dt, events);
    }

    /// Count the timers down and spawn whatever is due.
    pub fn generate<R: Rng>(
        &mut self,
        world: &mut World,
        rng: &mut R,
        dt: f32,
        events: &mut Vec<SimEvent>,
    ) {
        for _ in 0..self.tick_countdown(HazardFamily::Lazer, dt, rng) {
            self.add_lazer(world, rng, events);
        }
        for _ in 0..self.tick_countdown(HazardFamily::Rocket, dt, rng) {
            self.add_rocket(world, rng, events);
        }
    }

    /// Decrease one countdown by `dt`. Returns how many spawns fell due.
    fn tick_countdown<R: Rng>(&mut self, family: HazardFamily, dt: f32, rng: &mut R) -> u32 {
        let profile = self.profile;
        let slot = match family {
            HazardFamily::Lazer => &mut self.lazer_countdown,
            HazardFamily::Rocket => &mut self.rocket_countdown,
        };
        let Some(countdown) = slot.as_mut() else {
            return 0;
        };

        *countdown -= dt;
        let mut due = 0;
        while *countdown <= 0.0 {
            due += 1;
            match profile.next_interval(family, rng) {
                Some(next) if next > 0.0 => *countdown += next,
                _ => break,
            }
        }
        due
    }

    /// Spawn a lazer at a random angle and a random position that keeps the beam on the field.
    pub fn add_lazer<R: Rng>(
        &self,
        world: &mut World,
        rng: &mut R,
        events: &mut Vec<SimEvent>,
    ) -> Entity {
        let angle = rng.gen_range(0.0..PI);
        let size = Vec2::new(LAZER_LENGTH, LAZER_WIDTH);
        let position = self.random_position(rng, rotated_half_extents(size, angle));
        self.spawn_lazer(world, position, angle, events)
    }

    /// Spawn a lazer at a fixed place.
    pub fn spawn_lazer(
        &self,
        world: &mut World,
        position: Vec2,
        angle: f32,
        events: &mut Vec<SimEvent>,
    ) -> Entity {
        let lazer = Lazer {
            angle,
            size: Vec2::new(LAZER_LENGTH, LAZER_WIDTH),
            telegraph: self.profile.lazer_telegraph,
            duration: self.profile.lazer_duration,
        };
        let entity = world_setup::spawn_hazard(world, position, HazardKind::Lazer(lazer));
        tracing::debug!(x = position.x, y = position.y, angle, "lazer spawned");
        events.push(SimEvent::HazardSpawned {
            family: HazardFamily::Lazer,
            position,
        });
        entity
    }

    /// Spawn a rocket locked on a random living unit. Nothing spawns when the herd is gone.
    pub fn add_rocket<R: Rng>(
        &self,
        world: &mut World,
        rng: &mut R,
        events: &mut Vec<SimEvent>,
    ) -> Option<Entity> {
        let victims = living_units(world);
        if victims.is_empty() {
            tracing::trace!("no living units, rocket not spawned");
            return None;
        }
        let target = victims[rng.gen_range(0..victims.len())].id;
        let inset = Vec2::splat(ROCKET_LENGTH.max(ROCKET_WIDTH) / 2.0);
        let position = self.random_position(rng, inset);
        Some(self.spawn_rocket(world, position, target, events))
    }

    /// Spawn a rocket at a fixed place, locked on `target`.
    pub fn spawn_rocket(
        &self,
        world: &mut World,
        position: Vec2,
        target: UnitId,
        events: &mut Vec<SimEvent>,
    ) -> Entity {
        let heading = living_units(world)
            .iter()
            .find(|v| v.id == target)
            .map(|v| {
                let to_target = v.position - position;
                to_target.y.atan2(to_target.x)
            })
            .unwrap_or(0.0);

        let rocket = Rocket {
            heading,
            velocity: self.profile.rocket_velocity,
            angular_velocity: self.profile.rocket_angular_velocity,
            lock_time: self.profile.rocket_lock_time,
            fuel: self.profile.rocket_fuel,
            blast_radius: ROCKET_BLAST_RADIUS,
            size: Vec2::new(ROCKET_LENGTH, ROCKET_WIDTH),
            target: Some(target),
            harmless: false,
        };
        let entity = world_setup::spawn_hazard(world, position, HazardKind::Rocket(rocket));
        tracing::debug!(x = position.x, y = position.y, target = target.0, "rocket spawned");
        events.push(SimEvent::HazardSpawned {
            family: HazardFamily::Rocket,
            position,
        });
        entity
    }

    /// Point every live rocket whose target is gone at the nearest living unit.
    pub fn update_rocket_targets(&self, world: &mut World, events: &mut Vec<SimEvent>) {
        let victims = living_units(world);
        for (_entity, (pos, hazard)) in world.query_mut::<(&Position, &mut Hazard)>() {
            if hazard.is_detonated() {
                continue;
            }
            if let HazardKind::Rocket(rocket) = &mut hazard.kind {
                reacquire(rocket, pos.0, &victims, events);
            }
        }
    }

    /// Advance every hazard's lifecycle by `dt` and apply damage.
    fn advance(&self, world: &mut World, dt: f32, events: &mut Vec<SimEvent>) {
        let mut victims = living_units(world);
        let mut kills: Vec<(Entity, UnitId, DeathCause)> = Vec::new();

        for (_entity, (pos, hazard)) in world.query_mut::<(&mut Position, &mut Hazard)>() {
            hazard.phase_elapsed += dt;
            let phase = hazard.phase;
            let live = !hazard.is_detonated();

            let mut fix = None;
            if let HazardKind::Rocket(rocket) = &mut hazard.kind {
                if live {
                    // Units killed earlier in this pass are already marked dead.
                    reacquire(rocket, pos.0, &victims, events);
                    if let Some(target) = rocket.target.and_then(|id| find(&victims, id)) {
                        if phase == HazardPhase::Active {
                            let (position, heading) = steer(rocket, pos.0, target.position, dt);
                            pos.0 = position;
                            rocket.heading = heading;
                        } else {
                            let to_target = target.position - pos.0;
                            rocket.heading = to_target.y.atan2(to_target.x);
                        }
                        fix = Some(TargetFix {
                            distance: norm(target.position - pos.0),
                            radius: target.radius,
                        });
                    }
                }
            }

            let update = evaluate(hazard, fix);
            if update.phase_changed {
                hazard.enter(update.new_phase);
                let hazard_family = family(&hazard.kind);
                match update.new_phase {
                    HazardPhase::Active if hazard_family == HazardFamily::Lazer => {
                        tracing::debug!(x = pos.0.x, y = pos.0.y, "lazer fired");
                        events.push(SimEvent::LazerFired { position: pos.0 });
                    }
                    HazardPhase::Detonated => {
                        let detonation = update.detonation.unwrap_or(Detonation::Expired);
                        tracing::debug!(family = ?hazard_family, ?detonation, "hazard detonated");
                        events.push(SimEvent::HazardDetonated {
                            family: hazard_family,
                            position: pos.0,
                            detonation,
                        });
                        if let HazardKind::Rocket(rocket) = &mut hazard.kind {
                            match detonation {
                                Detonation::Fizzled => rocket.harmless = true,
                                Detonation::Impact | Detonation::Expired => {
                                    if detonation == Detonation::Impact {
                                        if let Some(target) = rocket.target {
                                            kill(&mut victims, target, DeathCause::Rocket, &mut kills);
                                        }
                                    }
                                    blast(
                                        &mut victims,
                                        pos.0,
                                        rocket.blast_radius,
                                        &mut kills,
                                    );
                                }
                            }
                        }
                    }
                    _ => {}
                }
            }

            if hazard.phase == HazardPhase::Active {
                if let HazardKind::Lazer(lazer) = &hazard.kind {
                    sweep_beam(&mut victims, pos.0, lazer, &mut kills);
                }
            }
        }

        for (entity, id, cause) in kills {
            if let Ok(mut health) = world.get::<&mut Health>(entity) {
                health.alive = false;
            }
            tracing::debug!(unit = id.0, ?cause, "unit destroyed");
            events.push(SimEvent::UnitDestroyed { unit: id, cause });
        }
    }

    /// Uniform random point at least `inset` away from every edge.
    fn random_position<R: Rng>(&self, rng: &mut R, inset: Vec2) -> Vec2 {
        Vec2::new(
            uniform_within(rng, self.world_size.x, inset.x),
            uniform_within(rng, self.world_size.y, inset.y),
        )
    }
}

fn uniform_within<R: Rng>(rng: &mut R, extent: f32, inset: f32) -> f32 {
    if extent > 2.0 * inset {
        rng.gen_range(inset..extent - inset)
    } else {
        extent / 2.0
    }
}

/// Living units in `UnitId` order.
fn living_units(world: &World) -> Vec<Victim> {
    let mut victims: Vec<Victim> = world
        .query::<(&Unit, &UnitId, &Position, &Hitbox, &Health)>()
        .iter()
        .filter(|(_, (_, _, _, _, health))| health.alive)
        .map(|(entity, (_, id, pos, hitbox, _))| Victim {
            entity,
            id: *id,
            position: pos.0,
            radius: hitbox.radius(),
            alive: true,
        })
        .collect();
    victims.sort_by_key(|v| v.id);
    victims
}

fn find(victims: &[Victim], id: UnitId) -> Option<Victim> {
    victims.iter().copied().find(|v| v.id == id && v.alive)
}

/// Keep the rocket's target if it still lives, otherwise lock on the nearest living unit.
fn reacquire(rocket: &mut Rocket, position: Vec2, victims: &[Victim], events: &mut Vec<SimEvent>) {
    if rocket.target.and_then(|id| find(victims, id)).is_some() {
        return;
    }

    let nearest = victims
        .iter()
        .filter(|v| v.alive)
        .min_by(|a, b| {
            norm(a.position - position).total_cmp(&norm(b.position - position))
        })
        .map(|v| v.id);

    let previous = rocket.target;
    rocket.target = nearest;
    match nearest {
        Some(to) => {
            tracing::debug!(from = ?previous.map(|id| id.0), to = to.0, "rocket retargeted");
            events.push(SimEvent::RocketRetargeted { from: previous, to });
        }
        None if previous.is_some() => tracing::debug!("rocket lost its last target"),
        None => {}
    }
}

fn kill(
    victims: &mut [Victim],
    id: UnitId,
    cause: DeathCause,
    kills: &mut Vec<(Entity, UnitId, DeathCause)>,
) {
    if let Some(victim) = victims.iter_mut().find(|v| v.id == id && v.alive) {
        victim.alive = false;
        kills.push((victim.entity, victim.id, cause));
    }
}

fn blast(
    victims: &mut [Victim],
    center: Vec2,
    radius: f32,
    kills: &mut Vec<(Entity, UnitId, DeathCause)>,
) {
    for victim in victims.iter_mut().filter(|v| v.alive) {
        if penetrates(victim.position, victim.radius, center, radius) {
            victim.alive = false;
            kills.push((victim.entity, victim.id, DeathCause::Rocket));
        }
    }
}

fn sweep_beam(
    victims: &mut [Victim],
    center: Vec2,
    lazer: &Lazer,
    kills: &mut Vec<(Entity, UnitId, DeathCause)>,
) {
    for victim in victims.iter_mut().filter(|v| v.alive) {
        if circle_intersects_oriented_rect(
            victim.position,
            victim.radius,
            center,
            lazer.size,
            lazer.angle,
        ) {
            victim.alive = false;
            kills.push((victim.entity, victim.id, DeathCause::Lazer));
        }
    }
}
