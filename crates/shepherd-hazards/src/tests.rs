#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use shepherd_core::components::{Hazard, HazardKind, Lazer, Rocket};
    use shepherd_core::constants::*;
    use shepherd_core::enums::{Detonation, Difficulty, HazardFamily, HazardPhase};
    use shepherd_core::types::UnitId;

    use crate::fsm::{evaluate, steer, turn_toward, wrap_angle, TargetFix};
    use crate::profiles::get_profile;

    fn make_lazer(phase: HazardPhase, elapsed: f32) -> Hazard {
        Hazard {
            kind: HazardKind::Lazer(Lazer {
                angle: 0.3,
                size: Vec2::new(LAZER_LENGTH, LAZER_WIDTH),
                telegraph: 1.5,
                duration: 1.0,
            }),
            phase,
            phase_elapsed: elapsed,
        }
    }

    fn make_rocket(phase: HazardPhase, elapsed: f32) -> Hazard {
        Hazard {
            kind: HazardKind::Rocket(test_rocket()),
            phase,
            phase_elapsed: elapsed,
        }
    }

    fn test_rocket() -> Rocket {
        Rocket {
            heading: 0.0,
            velocity: 100.0,
            angular_velocity: 2.0,
            lock_time: 1.0,
            fuel: 8.0,
            blast_radius: ROCKET_BLAST_RADIUS,
            size: Vec2::new(ROCKET_LENGTH, ROCKET_WIDTH),
            target: Some(UnitId(0)),
            harmless: false,
        }
    }

    fn far_target() -> Option<TargetFix> {
        Some(TargetFix {
            distance: 300.0,
            radius: 25.0,
        })
    }

    // ---- Profiles ----

    #[test]
    fn test_spawn_intervals_shrink_with_difficulty() {
        let playable = &Difficulty::ALL[1..];
        for pair in playable.windows(2) {
            let easier = get_profile(pair[0]);
            let harder = get_profile(pair[1]);
            for family in [HazardFamily::Lazer, HazardFamily::Rocket] {
                let easy_interval = easier.interval(family).unwrap();
                let hard_interval = harder.interval(family).unwrap();
                assert!(
                    hard_interval <= easy_interval,
                    "{family:?} interval should not grow from {:?} to {:?}",
                    pair[0],
                    pair[1]
                );
            }
        }

        let simple = get_profile(Difficulty::Simple);
        let impossible = get_profile(Difficulty::Impossible);
        assert!(impossible.lazer_interval.unwrap() <= simple.lazer_interval.unwrap());
        assert!(impossible.rocket_interval.unwrap() <= simple.rocket_interval.unwrap());
    }

    #[test]
    fn test_hazards_get_nastier_with_difficulty() {
        for pair in Difficulty::ALL.windows(2) {
            let easier = get_profile(pair[0]);
            let harder = get_profile(pair[1]);
            assert!(harder.lazer_telegraph <= easier.lazer_telegraph);
            assert!(harder.lazer_duration >= easier.lazer_duration);
            assert!(harder.rocket_lock_time <= easier.rocket_lock_time);
            assert!(harder.rocket_velocity >= easier.rocket_velocity);
            assert!(harder.rocket_angular_velocity >= easier.rocket_angular_velocity);
            assert!(harder.rocket_fuel >= easier.rocket_fuel);
            assert!(harder.min_surviving_units >= easier.min_surviving_units);
        }
    }

    #[test]
    fn test_debug_disables_spawning() {
        let profile = get_profile(Difficulty::Debug);
        assert!(!profile.spawning_enabled());
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(profile.next_interval(HazardFamily::Lazer, &mut rng), None);
        assert_eq!(profile.next_interval(HazardFamily::Rocket, &mut rng), None);
    }

    #[test]
    fn test_next_interval_stays_within_jitter() {
        let profile = get_profile(Difficulty::Medium);
        let base = profile.rocket_interval.unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..200 {
            let interval = profile
                .next_interval(HazardFamily::Rocket, &mut rng)
                .unwrap();
            assert!(interval >= base * (1.0 - profile.spawn_jitter) - 1e-4);
            assert!(interval <= base * (1.0 + profile.spawn_jitter) + 1e-4);
        }
    }

    // ---- Lazer lifecycle ----

    #[test]
    fn test_lazer_telegraphs_before_firing() {
        let update = evaluate(&make_lazer(HazardPhase::Spawning, 1.0), None);
        assert!(!update.phase_changed);
        assert_eq!(update.new_phase, HazardPhase::Spawning);

        let update = evaluate(&make_lazer(HazardPhase::Spawning, 1.5), None);
        assert!(update.phase_changed);
        assert_eq!(update.new_phase, HazardPhase::Active);
    }

    #[test]
    fn test_lazer_detonates_when_duration_expires() {
        let update = evaluate(&make_lazer(HazardPhase::Active, 0.5), None);
        assert_eq!(update.new_phase, HazardPhase::Active);

        let update = evaluate(&make_lazer(HazardPhase::Active, 1.0), None);
        assert_eq!(update.new_phase, HazardPhase::Detonated);
        assert_eq!(update.detonation, Some(Detonation::Expired));
    }

    #[test]
    fn test_detonated_hazard_removed_after_explosion() {
        let update = evaluate(
            &make_lazer(HazardPhase::Detonated, LAZER_EXPLOSION_SECS * 0.5),
            None,
        );
        assert_eq!(update.new_phase, HazardPhase::Detonated);

        let update = evaluate(&make_lazer(HazardPhase::Detonated, LAZER_EXPLOSION_SECS), None);
        assert_eq!(update.new_phase, HazardPhase::Removed);

        let update = evaluate(&make_rocket(HazardPhase::Detonated, ROCKET_EXPLOSION_SECS), None);
        assert_eq!(update.new_phase, HazardPhase::Removed);
        assert_eq!(update.detonation, None);
    }

    #[test]
    fn test_removed_is_terminal() {
        let update = evaluate(&make_rocket(HazardPhase::Removed, 100.0), far_target());
        assert!(!update.phase_changed);
        assert_eq!(update.new_phase, HazardPhase::Removed);
    }

    // ---- Rocket lifecycle ----

    #[test]
    fn test_rocket_launches_after_lock() {
        let update = evaluate(&make_rocket(HazardPhase::Spawning, 0.5), far_target());
        assert_eq!(update.new_phase, HazardPhase::Spawning);

        let update = evaluate(&make_rocket(HazardPhase::Spawning, 1.0), far_target());
        assert_eq!(update.new_phase, HazardPhase::Active);
    }

    #[test]
    fn test_rocket_impacts_inside_target_radius() {
        let update = evaluate(
            &make_rocket(HazardPhase::Active, 2.0),
            Some(TargetFix {
                distance: 20.0,
                radius: 25.0,
            }),
        );
        assert_eq!(update.new_phase, HazardPhase::Detonated);
        assert_eq!(update.detonation, Some(Detonation::Impact));
    }

    #[test]
    fn test_rocket_runs_out_of_fuel() {
        let update = evaluate(&make_rocket(HazardPhase::Active, 8.0), far_target());
        assert_eq!(update.detonation, Some(Detonation::Expired));
    }

    #[test]
    fn test_rocket_without_target_fizzles() {
        let update = evaluate(&make_rocket(HazardPhase::Active, 2.0), None);
        assert_eq!(update.new_phase, HazardPhase::Detonated);
        assert_eq!(update.detonation, Some(Detonation::Fizzled));

        let update = evaluate(&make_rocket(HazardPhase::Spawning, 0.1), None);
        assert_eq!(update.detonation, Some(Detonation::Fizzled));
    }

    // ---- Homing ----

    #[test]
    fn test_wrap_angle_range() {
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(-FRAC_PI_2) + FRAC_PI_2).abs() < 1e-6);
        assert!((wrap_angle(2.0 * PI)).abs() < 1e-5);
    }

    #[test]
    fn test_turn_toward_clamps_and_takes_short_way() {
        // Limited turn.
        assert!((turn_toward(0.0, FRAC_PI_2, 0.1) - 0.1).abs() < 1e-6);
        // Small remaining delta is closed exactly.
        assert!((turn_toward(0.0, 0.05, 0.1) - 0.05).abs() < 1e-6);
        // From just below +PI to just above -PI turns through PI, not through zero.
        let turned = turn_toward(PI - 0.1, -PI + 0.1, 0.05);
        assert!(turned > PI - 0.1);
    }

    #[test]
    fn test_steer_turns_at_most_angular_velocity() {
        let rocket = test_rocket();
        // Target straight "down" (+Y) while heading +X.
        let (pos, heading) = steer(&rocket, Vec2::ZERO, Vec2::new(0.0, 500.0), 0.1);
        assert!((heading - 0.2).abs() < 1e-5, "heading {heading}");
        assert!((pos.length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_steer_closes_in_on_target() {
        let mut rocket = test_rocket();
        let target = Vec2::new(400.0, 300.0);
        let mut pos = Vec2::ZERO;
        let start = (target - pos).length();
        for _ in 0..120 {
            let (next, heading) = steer(&rocket, pos, target, 1.0 / 60.0);
            pos = next;
            rocket.heading = heading;
        }
        assert!((target - pos).length() < start - 100.0);
    }

    #[test]
    fn test_steer_never_overshoots() {
        let rocket = test_rocket();
        let (pos, _) = steer(&rocket, Vec2::ZERO, Vec2::new(5.0, 0.0), 1.0);
        assert!((pos - Vec2::new(5.0, 0.0)).length() < 1e-5);
    }
}
