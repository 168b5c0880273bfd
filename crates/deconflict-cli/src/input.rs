//! Fleet file loading and validation.
//!
//! A fleet file is JSON:
//!
//! ```json
//! { "drones": [
//!     { "id": "A", "departure_time": "2026-05-01T09:00:00Z",
//!       "waypoints": [[0.0, 0.0, 50.0, 0.0], [100.0, 0.0, 50.0, 20.0]] }
//! ] }
//! ```
//!
//! Each waypoint is a flat `(x, y, [z,] t)` tuple. With a `departure_time`
//! the `t` values are offsets from it; all departures are re-based on the
//! earliest one in the file so the mission clock starts near zero.

use chrono::{DateTime, Utc};
use deconflict_core::{Fleet, Point, Waypoint};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid fleet JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("aircraft #{index} has an empty id")]
    EmptyId { index: usize },
    #[error("aircraft '{0}' appears more than once")]
    DuplicateId(String),
    #[error("aircraft '{drone_id}' waypoint {index}: expected {expected} values, found {found}")]
    WrongArity {
        drone_id: String,
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("aircraft '{drone_id}' waypoint {index}: coordinates and time must be finite")]
    NonFinite { drone_id: String, index: usize },
    #[error("could not parse '{value}' as {expected}")]
    BadEntry { value: String, expected: &'static str },
    #[error("input ended while waiting for {0}")]
    UnexpectedEof(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// On-disk fleet description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetFile {
    pub drones: Vec<DroneEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<DateTime<Utc>>,
    pub waypoints: Vec<Vec<f64>>,
}

impl FleetFile {
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| InputError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Earliest departure across the file, the zero of the mission clock.
    pub fn reference_time(&self) -> Option<DateTime<Utc>> {
        self.drones.iter().filter_map(|d| d.departure_time).min()
    }

    /// Validate and convert into a fleet of the requested dimensionality.
    pub fn into_fleet<P: Point>(self) -> Result<Fleet<P>, InputError> {
        let reference = self.reference_time();
        let mut seen = HashSet::new();
        let mut fleet = Fleet::new();

        for (index, drone) in self.drones.into_iter().enumerate() {
            if drone.id.trim().is_empty() {
                return Err(InputError::EmptyId { index });
            }
            if !seen.insert(drone.id.clone()) {
                return Err(InputError::DuplicateId(drone.id));
            }

            let base_s = match (drone.departure_time, reference) {
                (Some(departure), Some(reference)) => {
                    (departure - reference).num_milliseconds() as f64 / 1000.0
                }
                _ => 0.0,
            };

            let waypoints = drone
                .waypoints
                .iter()
                .enumerate()
                .map(|(wp_index, values)| to_waypoint::<P>(&drone.id, wp_index, values, base_s))
                .collect::<Result<Vec<_>, _>>()?;

            if waypoints.len() < 2 {
                tracing::warn!(
                    "Aircraft '{}' has {} waypoint(s); it will not be checked",
                    drone.id,
                    waypoints.len()
                );
            }
            fleet.insert_waypoints(drone.id, waypoints);
        }

        tracing::debug!("Loaded {} aircraft", fleet.len());
        Ok(fleet)
    }
}

fn to_waypoint<P: Point>(
    drone_id: &str,
    index: usize,
    values: &[f64],
    base_s: f64,
) -> Result<Waypoint<P>, InputError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(InputError::NonFinite {
            drone_id: drone_id.to_string(),
            index,
        });
    }
    let mut waypoint = Waypoint::from_tuple(values).ok_or_else(|| InputError::WrongArity {
        drone_id: drone_id.to_string(),
        index,
        expected: P::DIMENSIONS + 1,
        found: values.len(),
    })?;
    waypoint.time_s += base_s;
    Ok(waypoint)
}

/// Load a fleet file straight into a fleet.
pub fn load_fleet<P: Point>(path: impl AsRef<Path>) -> Result<Fleet<P>, InputError> {
    FleetFile::load(path)?.into_fleet()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deconflict_core::{Point2, Point3};

    #[test]
    fn parses_spatial_fleet() {
        let file = FleetFile::from_json(
            r#"{"drones": [
                {"id": "A", "waypoints": [[0, 0, 50, 10], [10, 0, 50, 0]]},
                {"id": "B", "waypoints": [[5, 5, 60, 0]]}
            ]}"#,
        )
        .unwrap();
        let fleet: Fleet<Point3> = file.into_fleet().unwrap();
        assert_eq!(fleet.ids().collect::<Vec<_>>(), vec!["A", "B"]);

        let a = fleet.get("A").unwrap();
        assert_eq!(a.start_time(), Some(0.0));
        assert_eq!(a.waypoints()[0].position, Point3::new(10.0, 0.0, 50.0));
        assert!(fleet.get("B").unwrap().is_degenerate());
    }

    #[test]
    fn rejects_wrong_arity_for_dimension() {
        let file = FleetFile::from_json(r#"{"drones": [{"id": "A", "waypoints": [[0, 0, 50, 0]]}]}"#)
            .unwrap();
        match file.into_fleet::<Point2>() {
            Err(InputError::WrongArity {
                expected, found, ..
            }) => {
                assert_eq!(expected, 3);
                assert_eq!(found, 4);
            }
            other => panic!("expected arity error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_and_empty_ids() {
        let duplicate = FleetFile::from_json(
            r#"{"drones": [{"id": "A", "waypoints": []}, {"id": "A", "waypoints": []}]}"#,
        )
        .unwrap();
        assert!(matches!(
            duplicate.into_fleet::<Point2>(),
            Err(InputError::DuplicateId(id)) if id == "A"
        ));

        let empty = FleetFile::from_json(r#"{"drones": [{"id": " ", "waypoints": []}]}"#).unwrap();
        assert!(matches!(
            empty.into_fleet::<Point2>(),
            Err(InputError::EmptyId { index: 0 })
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        let file = FleetFile {
            drones: vec![DroneEntry {
                id: "A".to_string(),
                departure_time: None,
                waypoints: vec![vec![0.0, f64::NAN, 0.0]],
            }],
        };
        assert!(matches!(
            file.into_fleet::<Point2>(),
            Err(InputError::NonFinite { index: 0, .. })
        ));
    }

    #[test]
    fn departure_times_are_rebased_on_earliest() {
        let file = FleetFile::from_json(
            r#"{"drones": [
                {"id": "late", "departure_time": "2026-05-01T09:01:00Z",
                 "waypoints": [[0, 0, 0], [10, 0, 30]]},
                {"id": "early", "departure_time": "2026-05-01T09:00:00Z",
                 "waypoints": [[0, 0, 0], [10, 0, 30]]}
            ]}"#,
        )
        .unwrap();
        let fleet: Fleet<Point2> = file.into_fleet().unwrap();
        assert_eq!(fleet.get("early").unwrap().start_time(), Some(0.0));
        assert_eq!(fleet.get("late").unwrap().start_time(), Some(60.0));
        assert_eq!(fleet.get("late").unwrap().end_time(), Some(90.0));
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(matches!(
            FleetFile::from_json("{\"drones\": [}"),
            Err(InputError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = FleetFile::load("/nonexistent/fleet.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/fleet.json"));
    }
}
