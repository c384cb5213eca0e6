use glam::Vec2;

use shepherd_sim::core::commands::PlayerCommand;
use shepherd_sim::core::config::SimConfig;
use shepherd_sim::core::constants::DT;
use shepherd_sim::core::enums::{DeathCause, Difficulty, HazardFamily, HazardPhase};
use shepherd_sim::core::events::SimEvent;
use shepherd_sim::core::geometry::{penetrates, penetration_vector};
use shepherd_sim::core::types::UnitId;
use shepherd_sim::SimulationEngine;

fn engine_with(config: SimConfig) -> SimulationEngine {
    SimulationEngine::new(config).expect("valid config")
}

fn lone_unit_config() -> SimConfig {
    SimConfig {
        difficulty: Difficulty::Debug,
        grid_columns: 1,
        grid_rows: 1,
        ..Default::default()
    }
}

#[test]
fn coincident_units_end_one_diameter_apart() {
    let p = Vec2::new(300.0, 300.0);
    assert!(penetrates(p, 25.0, p, 25.0));
    let corrected = p - penetration_vector(p, 25.0, p, 25.0);
    assert_eq!(corrected, Vec2::new(350.0, 300.0));

    // Same thing through the engine: the lone unit stands at the world center.
    let mut engine = engine_with(lone_unit_config());
    let twin = engine.spawn_unit(Vec2::new(640.0, 360.0));
    let snapshot = engine.tick(DT);
    let a = snapshot.unit(UnitId(0)).unwrap().position;
    let b = snapshot.unit(twin).unwrap().position;
    assert!(((a - b).length() - 50.0).abs() < 1e-4);
    assert_eq!(a - b, Vec2::new(50.0, 0.0));
}

#[test]
fn two_clusters_move_as_two_flocks() {
    let mut engine = engine_with(lone_unit_config());
    let near_center = engine.spawn_unit(Vec2::new(690.0, 360.0));
    let corner: Vec<UnitId> = [100.0, 150.0, 200.0]
        .into_iter()
        .map(|x| engine.spawn_unit(Vec2::new(x, 100.0)))
        .collect();

    engine.queue_command(PlayerCommand::SelectAll);
    engine.queue_command(PlayerCommand::MoveSelected {
        target: Vec2::new(640.0, 500.0),
    });
    let snapshot = engine.tick(DT);

    let flocks = engine.flocks();
    assert_eq!(flocks.len(), 2);
    let mut sizes: Vec<usize> = flocks.iter().map(|f| f.len()).collect();
    sizes.sort();
    assert_eq!(sizes, vec![2, 3]);

    // Each flock keeps its shape: members share one offset.
    let destination = |id: UnitId| snapshot.unit(id).unwrap().destination;
    assert_eq!(
        destination(near_center) - destination(UnitId(0)),
        Vec2::new(50.0, 0.0)
    );
    assert_eq!(destination(corner[1]) - destination(corner[0]), Vec2::new(50.0, 0.0));
    assert_eq!(destination(corner[2]) - destination(corner[1]), Vec2::new(50.0, 0.0));
}

#[test]
fn member_on_left_wall_does_not_cross_it() {
    let mut engine = engine_with(lone_unit_config());
    let edge = engine.spawn_unit(Vec2::new(25.0, 300.0));

    engine.queue_command(PlayerCommand::SelectInBox {
        min: Vec2::new(0.0, 290.0),
        max: Vec2::new(30.0, 310.0),
        additive: false,
    });
    engine.queue_command(PlayerCommand::MoveSelected {
        target: Vec2::new(-200.0, 300.0),
    });
    let snapshot = engine.tick(DT);
    assert_eq!(snapshot.selected_count(), 1);
    assert_eq!(snapshot.unit(edge).unwrap().destination.x, 25.0);

    for _ in 0..120 {
        let snapshot = engine.tick(DT);
        assert!(snapshot.unit(edge).unwrap().position.x >= 25.0);
    }
}

#[test]
fn rocket_retargets_when_its_target_dies() {
    let mut engine = engine_with(SimConfig {
        difficulty: Difficulty::Debug,
        ..Default::default()
    });
    engine.spawn_rocket(Vec2::new(1200.0, 700.0), UnitId(0));
    for _ in 0..150 {
        engine.tick(DT);
    }
    assert!(engine.destroy_unit(UnitId(0), DeathCause::Lazer));

    let snapshot = engine.tick(DT);

    assert!(snapshot.events.contains(&SimEvent::RocketRetargeted {
        from: Some(UnitId(0)),
        to: UnitId(11),
    }));
    assert_eq!(snapshot.hazard_count(HazardFamily::Rocket), 1);
    let rocket = &snapshot.hazards[0];
    assert_eq!(rocket.phase, HazardPhase::Active);
    assert_eq!(
        rocket.target_position,
        Some(snapshot.unit(UnitId(11)).unwrap().position)
    );
}

#[test]
fn debug_difficulty_never_spawns_hazards() {
    let mut engine = engine_with(SimConfig {
        difficulty: Difficulty::Debug,
        seed: 9,
        ..Default::default()
    });
    for step in 0..2000 {
        // Mix of long, short and empty steps.
        let dt = [0.5, DT, 0.0][step % 3];
        let snapshot = engine.tick(dt);
        assert!(snapshot.hazards.is_empty());
        assert!(!snapshot
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::HazardSpawned { .. })));
    }
    assert!(engine.time().elapsed_secs > 300.0);
}
