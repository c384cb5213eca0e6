//! Hazard lifecycle finite state machine.
//!
//! Pure functions that compute phase transitions for lazers and rockets
//! and rocket homing. No ECS dependency; operates on plain data.
//!
//! Lifecycle: `Spawning -> Active -> Detonated -> Removed`.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use shepherd_core::components::{Hazard, HazardKind, Lazer, Rocket};
use shepherd_core::constants::{LAZER_EXPLOSION_SECS, ROCKET_EXPLOSION_SECS};
use shepherd_core::enums::{Detonation, HazardFamily, HazardPhase};

/// Where a rocket's target stands this tick.
#[derive(Debug, Clone, Copy)]
pub struct TargetFix {
    pub distance: f32,
    /// Target hitbox radius; the rocket hits once it is inside it.
    pub radius: f32,
}

/// Output from the hazard FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseUpdate {
    pub new_phase: HazardPhase,
    pub phase_changed: bool,
    /// Set on the Active -> Detonated transition.
    pub detonation: Option<Detonation>,
}

impl PhaseUpdate {
    fn stay(phase: HazardPhase) -> Self {
        Self {
            new_phase: phase,
            phase_changed: false,
            detonation: None,
        }
    }

    fn to(phase: HazardPhase) -> Self {
        Self {
            new_phase: phase,
            phase_changed: true,
            detonation: None,
        }
    }

    fn detonate(detonation: Detonation) -> Self {
        Self {
            new_phase: HazardPhase::Detonated,
            phase_changed: true,
            detonation: Some(detonation),
        }
    }
}

pub fn family(kind: &HazardKind) -> HazardFamily {
    match kind {
        HazardKind::Lazer(_) => HazardFamily::Lazer,
        HazardKind::Rocket(_) => HazardFamily::Rocket,
    }
}

/// Seconds the explosion animation plays for a family.
pub fn explosion_secs(family: HazardFamily) -> f32 {
    match family {
        HazardFamily::Lazer => LAZER_EXPLOSION_SECS,
        HazardFamily::Rocket => ROCKET_EXPLOSION_SECS,
    }
}

/// Evaluate the FSM for one hazard whose `phase_elapsed` already includes this tick.
///
/// `target` is ignored for lazers. For rockets, `None` means no living unit
/// is left to chase.
pub fn evaluate(hazard: &Hazard, target: Option<TargetFix>) -> PhaseUpdate {
    match hazard.phase {
        HazardPhase::Removed => PhaseUpdate::stay(HazardPhase::Removed),
        HazardPhase::Detonated => {
            if hazard.phase_elapsed >= explosion_secs(family(&hazard.kind)) {
                PhaseUpdate::to(HazardPhase::Removed)
            } else {
                PhaseUpdate::stay(HazardPhase::Detonated)
            }
        }
        HazardPhase::Spawning | HazardPhase::Active => match &hazard.kind {
            HazardKind::Lazer(lazer) => evaluate_lazer(hazard, lazer),
            HazardKind::Rocket(rocket) => evaluate_rocket(hazard, rocket, target),
        },
    }
}

fn evaluate_lazer(hazard: &Hazard, lazer: &Lazer) -> PhaseUpdate {
    match hazard.phase {
        HazardPhase::Spawning if hazard.phase_elapsed >= lazer.telegraph => {
            PhaseUpdate::to(HazardPhase::Active)
        }
        HazardPhase::Active if hazard.phase_elapsed >= lazer.duration => {
            PhaseUpdate::detonate(Detonation::Expired)
        }
        phase => PhaseUpdate::stay(phase),
    }
}

fn evaluate_rocket(hazard: &Hazard, rocket: &Rocket, target: Option<TargetFix>) -> PhaseUpdate {
    match hazard.phase {
        HazardPhase::Spawning => {
            if target.is_none() {
                PhaseUpdate::detonate(Detonation::Fizzled)
            } else if hazard.phase_elapsed >= rocket.lock_time {
                PhaseUpdate::to(HazardPhase::Active)
            } else {
                PhaseUpdate::stay(HazardPhase::Spawning)
            }
        }
        HazardPhase::Active => {
            let Some(fix) = target else {
                return PhaseUpdate::detonate(Detonation::Fizzled);
            };
            if fix.distance <= fix.radius {
                PhaseUpdate::detonate(Detonation::Impact)
            } else if hazard.phase_elapsed >= rocket.fuel {
                PhaseUpdate::detonate(Detonation::Expired)
            } else {
                PhaseUpdate::stay(HazardPhase::Active)
            }
        }
        phase => PhaseUpdate::stay(phase),
    }
}

/// Wrap an angle into `(-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Rotate `heading` toward `desired` by at most `max_turn` radians, the short way round.
pub fn turn_toward(heading: f32, desired: f32, max_turn: f32) -> f32 {
    let delta = wrap_angle(desired - heading);
    wrap_angle(heading + delta.clamp(-max_turn, max_turn))
}

/// Advance a homing rocket one tick toward `target`.
///
/// Returns the new position and heading. The heading turns at most
/// `angular_velocity * dt`; the step never overshoots the target point.
pub fn steer(rocket: &Rocket, position: Vec2, target: Vec2, dt: f32) -> (Vec2, f32) {
    let to_target = target - position;
    let distance = to_target.length();
    if distance <= f32::EPSILON {
        return (position, rocket.heading);
    }

    let desired = to_target.y.atan2(to_target.x);
    let heading = turn_toward(rocket.heading, desired, rocket.angular_velocity * dt);
    let step = (rocket.velocity * dt).min(distance);
    (position + Vec2::from_angle(heading) * step, heading)
}
