//! Intersection tick tests
//!
//! Covers the decision step and the motion pass together, including the
//! four reference scenarios.

use std::str::FromStr;

use smart_traffic::simulation::{
    Approach, ApproachGeometry, Heading, PhaseReason, Position, SignalColor, SimConfig,
    SimIntersection,
};

fn assert_single_green(intersection: &SimIntersection) {
    let greens: Vec<Approach> = intersection
        .signals()
        .iter()
        .filter(|(_, color)| *color == SignalColor::Green)
        .map(|(approach, _)| approach)
        .collect();
    assert_eq!(greens, vec![intersection.active_approach()]);
}

/// A config whose phases never expire during a test
fn long_green_config(initial: Approach) -> SimConfig {
    SimConfig {
        min_green: 1000.0,
        max_green: 1000.0,
        initial_approach: initial,
        ..SimConfig::default()
    }
}

#[test]
fn test_construction_shows_single_green() {
    let intersection = SimIntersection::new(SimConfig::default()).unwrap();
    assert_eq!(intersection.active_approach(), Approach::Up);
    assert_eq!(intersection.controller().phase_duration(), 3.0);
    assert_single_green(&intersection);
}

#[test]
fn test_invalid_green_bounds_are_rejected() {
    let config = SimConfig {
        min_green: 7.0,
        max_green: 6.0,
        ..SimConfig::default()
    };
    let err = SimIntersection::new(config).unwrap_err();
    assert!(format!("{:#}", err).contains("min_green"));
}

#[test]
fn test_invalid_speeds_are_rejected() {
    let config = SimConfig {
        priority_speed: 0.0,
        ..SimConfig::default()
    };
    assert!(SimIntersection::new(config).is_err());

    let config = SimConfig {
        vehicle_speed: f32::NAN,
        ..SimConfig::default()
    };
    assert!(SimIntersection::new(config).is_err());
}

#[test]
fn test_spawn_past_exit_is_rejected() {
    let mut config = SimConfig::default();
    config.geometry.set(
        Approach::Right,
        ApproachGeometry::new(Position::new(900.0, 390.0), Heading::East, 860.0),
    );
    assert!(SimIntersection::new(config).is_err());
}

#[test]
fn test_unknown_approach_name_is_rejected() {
    assert_eq!(Approach::from_str("left").unwrap(), Approach::Left);
    assert_eq!(Approach::from_str("RIGHT").unwrap(), Approach::Right);
    assert!(Approach::from_str("NORTH").is_err());
}

#[test]
fn test_spawn_places_vehicle_at_approach_start() {
    let mut intersection = SimIntersection::new(SimConfig::default()).unwrap();
    let car = intersection.spawn(Approach::Down, false);
    let ambulance = intersection.spawn(Approach::Up, true);

    let car = intersection.vehicle(car).unwrap();
    assert_eq!(car.position(), Position::new(360.0, -40.0));
    assert_eq!(car.speed(), 2.0);
    assert!(!car.is_priority());

    let ambulance = intersection.vehicle(ambulance).unwrap();
    assert_eq!(ambulance.position(), Position::new(390.0, 820.0));
    assert_eq!(ambulance.speed(), 3.0);
    assert!(ambulance.is_priority());

    assert_eq!(intersection.stats().total_vehicles_spawned, 2);
    assert_eq!(intersection.stats().priority_vehicles_spawned, 1);
}

#[test]
fn test_scenario_a_timeout_with_empty_queues() {
    let mut first = SimIntersection::new(SimConfig::default()).unwrap();
    let mut second = SimIntersection::new(SimConfig::default()).unwrap();

    let a = first.tick(4.0);
    let b = second.tick(4.0);

    assert_eq!(a, b);
    let change = a.change.expect("phase should rotate");
    assert_eq!(change.reason, PhaseReason::Rotated);
    assert_eq!(a.active, Approach::Up);
    assert_single_green(&first);
}

#[test]
fn test_scenario_b_rotation_to_busiest_queue() {
    let mut intersection = SimIntersection::new(SimConfig::default()).unwrap();
    for _ in 0..3 {
        intersection.spawn(Approach::Left, false);
    }
    intersection.spawn(Approach::Right, false);

    let report = intersection.tick(1.0);
    assert!(report.change.is_none());
    assert_eq!(report.active, Approach::Up);

    let report = intersection.tick(3.5);
    assert_eq!(report.active, Approach::Left);
    assert_eq!(intersection.controller().phase_duration(), 4.5);
    assert_eq!(report.signals.color(Approach::Left), SignalColor::Green);
    assert_eq!(report.signals.color(Approach::Up), SignalColor::Red);
    assert_single_green(&intersection);
}

#[test]
fn test_scenario_c_priority_preempts_fresh_phase() {
    let mut intersection = SimIntersection::new(SimConfig::default()).unwrap();
    intersection.spawn(Approach::Down, true);

    let report = intersection.tick(0.01);

    assert_eq!(report.active, Approach::Down);
    assert_eq!(report.change.map(|c| c.reason), Some(PhaseReason::Preempted));
    for approach in [Approach::Up, Approach::Left, Approach::Right] {
        assert_eq!(report.signals.color(approach), SignalColor::Red);
    }
    assert_eq!(intersection.stats().preemptions, 1);
    assert_single_green(&intersection);
}

#[test]
fn test_scenario_d_vehicle_crosses_and_is_removed() {
    let mut intersection = SimIntersection::new(long_green_config(Approach::Right)).unwrap();
    let id = intersection.spawn(Approach::Right, false);
    assert_eq!(intersection.queue_size(Approach::Right), 1);

    // Starts at x = -40 and moves 2 per tick; x = 860 is still inside
    for tick in 1..=450 {
        intersection.tick(tick as f64 * 0.01);
        let vehicle = intersection.vehicle(id).expect("vehicle still queued");
        assert_eq!(vehicle.position().x, -40.0 + 2.0 * tick as f32);
        assert_eq!(vehicle.position().y, 390.0);
    }

    intersection.tick(4.51);
    assert!(intersection.vehicle(id).is_none());
    assert_eq!(intersection.queue_size(Approach::Right), 0);
    assert_eq!(intersection.stats().total_vehicles_exited, 1);
    assert_eq!(intersection.stats().active_vehicles, 0);
}

#[test]
fn test_red_approach_holds_regular_vehicles() {
    let mut intersection = SimIntersection::new(long_green_config(Approach::Up)).unwrap();
    let waiting = intersection.spawn(Approach::Left, false);
    let moving = intersection.spawn(Approach::Up, false);

    for tick in 1..=10 {
        intersection.tick(tick as f64);
    }

    let waiting = intersection.vehicle(waiting).unwrap();
    assert_eq!(waiting.position(), Position::new(820.0, 360.0));

    let moving = intersection.vehicle(moving).unwrap();
    assert_eq!(moving.position(), Position::new(390.0, 800.0));
}

#[test]
fn test_priority_vehicle_moves_on_red() {
    let mut intersection = SimIntersection::new(long_green_config(Approach::Up)).unwrap();
    // UP holds the first priority vehicle in canonical order, so it keeps green
    let on_green = intersection.spawn(Approach::Up, true);
    let on_red = intersection.spawn(Approach::Down, true);

    let report = intersection.tick(1.0);
    assert!(report.change.is_none());
    assert_eq!(report.signals.color(Approach::Down), SignalColor::Red);

    assert_eq!(
        intersection.vehicle(on_red).unwrap().position(),
        Position::new(360.0, -37.0)
    );
    assert_eq!(
        intersection.vehicle(on_green).unwrap().position(),
        Position::new(390.0, 817.0)
    );
}

#[test]
fn test_exited_vehicle_is_never_advanced_again() {
    let mut config = long_green_config(Approach::Left);
    // Exit just past the spawn point so one step is enough
    config.geometry.set(
        Approach::Left,
        ApproachGeometry::new(Position::new(10.0, 360.0), Heading::West, 9.0),
    );
    let mut intersection = SimIntersection::new(config).unwrap();
    let id = intersection.spawn(Approach::Left, false);

    intersection.tick(0.1);
    assert!(intersection.vehicle(id).is_none());
    assert_eq!(intersection.queue_size(Approach::Left), 0);

    intersection.tick(0.2);
    assert_eq!(intersection.stats().total_vehicles_exited, 1);
}

#[test]
fn test_decision_sees_queues_before_motion() {
    let mut config = SimConfig::default();
    // A priority vehicle on DOWN leaves within its first step
    config.geometry.set(
        Approach::Down,
        ApproachGeometry::new(Position::new(360.0, 0.0), Heading::South, 1.0),
    );
    let mut intersection = SimIntersection::new(config).unwrap();
    intersection.spawn(Approach::Down, true);

    let report = intersection.tick(0.5);

    // The controller saw the vehicle even though motion removed it the same tick
    assert_eq!(report.active, Approach::Down);
    assert_eq!(intersection.queue_size(Approach::Down), 0);
}

#[test]
fn test_expired_phase_waits_for_priority_vehicle_on_green() {
    let mut config = SimConfig::default();
    // The priority vehicle on UP needs a few ticks to cross
    config.geometry.set(
        Approach::Up,
        ApproachGeometry::new(Position::new(390.0, 10.0), Heading::North, 0.0),
    );
    let mut intersection = SimIntersection::new(config).unwrap();
    let ambulance = intersection.spawn(Approach::Up, true);
    for _ in 0..3 {
        intersection.spawn(Approach::Right, false);
    }

    // y = 10 -> 7 -> 4 -> 1, all while the phase is long expired
    for now in [3.5, 3.6, 3.7] {
        let report = intersection.tick(now);
        assert!(report.change.is_none(), "t={}", now);
        assert_eq!(report.active, Approach::Up);
        assert!(intersection.vehicle(ambulance).is_some());
    }

    // Crosses y = 0 during this tick's motion pass
    let report = intersection.tick(3.8);
    assert!(report.change.is_none());
    assert!(intersection.vehicle(ambulance).is_none());
    assert_eq!(intersection.stats().rotations, 0);

    // Normal rotation resumes on the next decision
    let report = intersection.tick(3.9);
    let change = report.change.expect("phase should rotate");
    assert_eq!(change.reason, PhaseReason::Rotated);
    assert_eq!(report.active, Approach::Right);
    assert_eq!(intersection.controller().phase_duration(), 4.5);
}
