//! Whole-fleet behaviour of the detector.

use approx::assert_abs_diff_eq;
use deconflict_core::{
    detect, distance, ConflictDetector, DetectionSettings, Fleet, Point2, Point3, Status,
    Trajectory, Waypoint,
};

fn figure_eight() -> Vec<Waypoint<Point3>> {
    vec![
        Waypoint::spatial(0.0, 0.0, 40.0, 0.0),
        Waypoint::spatial(30.0, 30.0, 45.0, 12.0),
        Waypoint::spatial(60.0, 0.0, 50.0, 24.0),
        Waypoint::spatial(30.0, -30.0, 45.0, 36.0),
        Waypoint::spatial(0.0, 0.0, 40.0, 48.0),
    ]
}

fn diagonal() -> Vec<Waypoint<Point3>> {
    vec![
        Waypoint::spatial(60.0, 40.0, 42.0, 4.0),
        Waypoint::spatial(0.0, -20.0, 48.0, 40.0),
    ]
}

fn loiter() -> Vec<Waypoint<Point3>> {
    vec![
        Waypoint::spatial(30.0, 0.0, 46.0, 10.0),
        Waypoint::spatial(32.0, 2.0, 46.0, 20.0),
        Waypoint::spatial(30.0, 0.0, 46.0, 30.0),
    ]
}

fn fleet(order: &[&str]) -> Fleet<Point3> {
    order
        .iter()
        .map(|id| {
            let waypoints = match *id {
                "eight" => figure_eight(),
                "diagonal" => diagonal(),
                _ => loiter(),
            };
            (id.to_string(), waypoints)
        })
        .collect()
}

#[test]
fn detection_is_pair_symmetric() {
    let forward = detect(&fleet(&["eight", "diagonal"]), 15.0, 0.5);
    let backward = detect(&fleet(&["diagonal", "eight"]), 15.0, 0.5);

    assert!(!forward.is_clear());
    assert_eq!(forward.len(), backward.len());
    for (a, b) in forward.conflicts().iter().zip(backward.conflicts()) {
        assert_abs_diff_eq!(a.time_s(), b.time_s(), epsilon = 1e-9);
        assert_abs_diff_eq!(a.distance_m(), b.distance_m(), epsilon = 1e-9);
        assert_eq!(a.drone1_id(), b.drone2_id());
        assert_eq!(a.drone2_id(), b.drone1_id());
    }
}

#[test]
fn smaller_safety_distance_never_adds_conflicts() {
    let fleet = fleet(&["eight", "diagonal", "loiter"]);
    let mut previous = usize::MAX;
    for safety in [40.0, 20.0, 10.0, 5.0, 1.0] {
        let count = detect(&fleet, safety, 0.5).len();
        assert!(count <= previous, "{safety}m gave {count} > {previous}");
        previous = count;
    }
}

#[test]
fn finer_step_never_hides_conflicts() {
    let fleet = fleet(&["eight", "diagonal", "loiter"]);
    let coarse = detect(&fleet, 10.0, 1.0);
    let fine = detect(&fleet, 10.0, 0.5);
    assert!(fine.len() >= coarse.len());

    // Every coarse sample time is also a fine sample time.
    for conflict in coarse.conflicts() {
        assert!(fine.conflicts().iter().any(|c| {
            c.between() == conflict.between() && (c.time_s() - conflict.time_s()).abs() < 1e-9
        }));
    }
}

#[test]
fn reported_distances_stay_within_threshold() {
    let fleet = fleet(&["eight", "diagonal", "loiter"]);
    let report = detect(&fleet, 12.0, 0.25);
    assert_eq!(report.status(), Status::Conflict);
    for conflict in report.conflicts() {
        assert!(conflict.distance_m() <= 12.0);
        let a = fleet.get(conflict.drone1_id()).unwrap();
        let b = fleet.get(conflict.drone2_id()).unwrap();
        let pos_a = a.position_at(conflict.time_s()).unwrap();
        let pos_b = b.position_at(conflict.time_s()).unwrap();
        assert_eq!(conflict.location(), pos_a);
        assert_abs_diff_eq!(distance(&pos_a, &pos_b), conflict.distance_m(), epsilon = 1e-9);
    }
}

#[test]
fn conflicts_within_pair_are_time_ordered() {
    let fleet = fleet(&["eight", "diagonal", "loiter"]);
    let report = detect(&fleet, 20.0, 0.5);
    for window in report.conflicts().windows(2) {
        if window[0].between() == window[1].between() {
            assert!(window[0].time_s() < window[1].time_s());
        }
    }
}

#[test]
fn planar_variant_matches_flat_altitude() {
    let planar: Fleet<Point2> = [
        ("A", vec![Waypoint::planar(0.0, 0.0, 0.0), Waypoint::planar(20.0, 0.0, 20.0)]),
        ("B", vec![Waypoint::planar(20.0, 3.0, 0.0), Waypoint::planar(0.0, 3.0, 20.0)]),
    ]
    .into_iter()
    .collect();
    let spatial: Fleet<Point3> = [
        (
            "A",
            vec![Waypoint::spatial(0.0, 0.0, 50.0, 0.0), Waypoint::spatial(20.0, 0.0, 50.0, 20.0)],
        ),
        (
            "B",
            vec![Waypoint::spatial(20.0, 3.0, 50.0, 0.0), Waypoint::spatial(0.0, 3.0, 50.0, 20.0)],
        ),
    ]
    .into_iter()
    .collect();

    let planar_times: Vec<f64> = detect(&planar, 5.0, 1.0)
        .conflicts()
        .iter()
        .map(|c| c.time_s())
        .collect();
    let spatial_times: Vec<f64> = detect(&spatial, 5.0, 1.0)
        .conflicts()
        .iter()
        .map(|c| c.time_s())
        .collect();
    assert!(!planar_times.is_empty());
    assert_eq!(planar_times, spatial_times);
}

#[test]
fn altitude_separation_clears_crossing() {
    let fleet: Fleet<Point3> = [
        (
            "low",
            vec![Waypoint::spatial(0.0, 0.0, 30.0, 0.0), Waypoint::spatial(100.0, 0.0, 30.0, 10.0)],
        ),
        (
            "high",
            vec![Waypoint::spatial(50.0, -50.0, 90.0, 0.0), Waypoint::spatial(50.0, 50.0, 90.0, 10.0)],
        ),
    ]
    .into_iter()
    .collect();
    assert!(detect(&fleet, 25.0, 0.1).is_clear());
}

#[test]
fn unsorted_input_is_normalized_before_detection() {
    let mut reversed = figure_eight();
    reversed.reverse();
    let sorted = Trajectory::new(figure_eight());
    let from_reversed = Trajectory::new(reversed);
    assert_eq!(sorted, from_reversed);

    let detector = ConflictDetector::new(DetectionSettings::new(15.0, 0.5).unwrap());
    let mut shuffled = Fleet::new();
    shuffled.insert("eight", from_reversed);
    shuffled.insert_waypoints("diagonal", diagonal());
    assert_eq!(
        detector.detect(&shuffled),
        detector.detect(&fleet(&["eight", "diagonal"]))
    );
}
