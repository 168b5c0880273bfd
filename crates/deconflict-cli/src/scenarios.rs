//! Pre-defined fleets for demonstrating and smoke-testing deconfliction.
//!
//! Scenarios are written in `(x, y, z, t)` and projected onto the plane
//! (altitude dropped) when run in 2D.

use deconflict_core::{Fleet, Point, Waypoint};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Named scenario selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScenarioKind {
    /// Two aircraft hovering 1m apart for ten seconds
    Hover,
    /// West-east and south-north tracks crossing at the origin
    Crossing,
    /// Same track flown twenty seconds apart
    SeparatedInTime,
    /// Parallel tracks 100m apart
    Parallel,
    /// Midpoint crossing checked with a step longer than the mission
    CoarseStep,
    /// Four aircraft converging on the origin from cardinal directions
    Converging,
    /// Seeded random fleet
    Random,
}

/// A named set of drones with flight paths and suggested settings.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub drones: Vec<(String, Vec<[f64; 4]>)>,
    pub safety_distance_m: Option<f64>,
    pub time_step_s: Option<f64>,
}

impl Scenario {
    /// Build the fleet in the requested dimensionality.
    pub fn fleet<P: Point>(&self) -> Fleet<P> {
        self.drones
            .iter()
            .map(|(id, tuples)| {
                let waypoints: Vec<Waypoint<P>> = tuples
                    .iter()
                    .filter_map(|&[x, y, z, t]| {
                        let position = P::from_coords(&[x, y, z][..P::DIMENSIONS])?;
                        Some(Waypoint::new(position, t))
                    })
                    .collect();
                (id.clone(), waypoints)
            })
            .collect()
    }
}

fn drone(id: &str, waypoints: &[[f64; 4]]) -> (String, Vec<[f64; 4]>) {
    (id.to_string(), waypoints.to_vec())
}

pub fn create_hover_scenario() -> Scenario {
    Scenario {
        name: "hover".to_string(),
        drones: vec![
            drone("DRONE001", &[[0.0, 0.0, 30.0, 0.0], [0.0, 0.0, 30.0, 10.0]]),
            drone("DRONE002", &[[1.0, 0.0, 30.0, 0.0], [1.0, 0.0, 30.0, 10.0]]),
        ],
        safety_distance_m: Some(5.0),
        time_step_s: Some(1.0),
    }
}

/// Create two drones on collision course (crossing at the origin).
///
/// - Drone 1: Flying West to East
/// - Drone 2: Flying South to North
pub fn create_crossing_scenario() -> Scenario {
    let offset_m = 300.0;
    let speed_mps = 10.0;
    let duration_s = 2.0 * offset_m / speed_mps;

    Scenario {
        name: "crossing".to_string(),
        drones: vec![
            drone(
                "DRONE001",
                &[[-offset_m, 0.0, 50.0, 0.0], [offset_m, 0.0, 50.0, duration_s]],
            ),
            drone(
                "DRONE002",
                &[[0.0, -offset_m, 50.0, 0.0], [0.0, offset_m, 50.0, duration_s]],
            ),
        ],
        safety_distance_m: Some(50.0),
        time_step_s: None,
    }
}

pub fn create_separated_in_time_scenario() -> Scenario {
    Scenario {
        name: "separated-in-time".to_string(),
        drones: vec![
            drone("DRONE001", &[[0.0, 0.0, 40.0, 0.0], [100.0, 0.0, 40.0, 10.0]]),
            drone("DRONE002", &[[0.0, 0.0, 40.0, 20.0], [100.0, 0.0, 40.0, 30.0]]),
        ],
        safety_distance_m: Some(5.0),
        time_step_s: Some(1.0),
    }
}

/// Create two drones flying parallel paths (no conflict).
pub fn create_parallel_scenario() -> Scenario {
    let separation_m = 100.0;
    Scenario {
        name: "parallel".to_string(),
        drones: vec![
            drone("DRONE001", &[[-300.0, 0.0, 50.0, 0.0], [300.0, 0.0, 50.0, 60.0]]),
            drone(
                "DRONE002",
                &[[-300.0, separation_m, 50.0, 0.0], [300.0, separation_m, 50.0, 60.0]],
            ),
        ],
        safety_distance_m: Some(5.0),
        time_step_s: Some(1.0),
    }
}

pub fn create_coarse_step_scenario() -> Scenario {
    Scenario {
        name: "coarse-step".to_string(),
        drones: vec![
            drone("DRONE001", &[[0.0, 0.0, 50.0, 0.0], [100.0, 0.0, 50.0, 100.0]]),
            drone("DRONE002", &[[50.0, -50.0, 50.0, 0.0], [50.0, 50.0, 50.0, 100.0]]),
        ],
        safety_distance_m: Some(5.0),
        time_step_s: Some(1_000.0),
    }
}

/// Create multiple drones converging on a central point.
pub fn create_converging_scenario() -> Scenario {
    let offset_m = 300.0;
    let speed_mps = 8.0;
    let angles: [f64; 4] = [0.0, 90.0, 180.0, 270.0];

    let drones = angles
        .iter()
        .enumerate()
        .map(|(i, &angle)| {
            let bearing = angle.to_radians();
            let start = [offset_m * bearing.sin(), offset_m * bearing.cos(), 50.0, 0.0];
            let end = [0.0, 0.0, 50.0, offset_m / speed_mps];
            (format!("DRONE{:03}", i + 1), vec![start, end])
        })
        .collect();

    Scenario {
        name: "converging".to_string(),
        drones,
        safety_distance_m: Some(30.0),
        time_step_s: Some(0.5),
    }
}

/// Seeded random fleet inside a 1km box between 30m and 120m altitude.
pub fn create_random_scenario(count: usize, seed: u64) -> Scenario {
    let mut rng = StdRng::seed_from_u64(seed);

    let drones = (0..count)
        .map(|i| {
            let legs = rng.random_range(1..=4);
            let mut t = rng.random_range(0.0..60.0);
            let mut waypoints = Vec::with_capacity(legs + 1);
            for _ in 0..=legs {
                waypoints.push([
                    rng.random_range(0.0..1_000.0),
                    rng.random_range(0.0..1_000.0),
                    rng.random_range(30.0..120.0),
                    t,
                ]);
                t += rng.random_range(10.0..60.0);
            }
            (format!("RAND{:03}", i + 1), waypoints)
        })
        .collect();

    Scenario {
        name: format!("random-{seed}"),
        drones,
        safety_distance_m: Some(25.0),
        time_step_s: Some(1.0),
    }
}

impl ScenarioKind {
    pub fn build(self, count: usize, seed: u64) -> Scenario {
        match self {
            ScenarioKind::Hover => create_hover_scenario(),
            ScenarioKind::Crossing => create_crossing_scenario(),
            ScenarioKind::SeparatedInTime => create_separated_in_time_scenario(),
            ScenarioKind::Parallel => create_parallel_scenario(),
            ScenarioKind::CoarseStep => create_coarse_step_scenario(),
            ScenarioKind::Converging => create_converging_scenario(),
            ScenarioKind::Random => create_random_scenario(count, seed),
        }
    }
}
