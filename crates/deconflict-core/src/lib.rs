//! Strategic deconfliction for planned UAV trajectories.
//!
//! Given each aircraft's time-stamped waypoints, finds every sampled instant
//! at which two aircraft are within the safety distance of each other.
//! Works on planar ([`Point2`]) and altitude-aware ([`Point3`]) positions.

pub mod conflict;
pub mod fleet;
pub mod geometry;
pub mod models;
pub mod report;
pub mod rules;
pub mod trajectory;

pub use conflict::{detect, ConflictDetector, PairSkip, SamplingWindow};
pub use fleet::Fleet;
pub use geometry::{distance, interpolate};
pub use models::{Point, Point2, Point3, Waypoint};
pub use report::{ConflictEvent, ConflictSummary, Report, ReportSummary, Status};
pub use rules::{ConfigError, DetectionSettings};
pub use trajectory::{Trajectory, TrajectoryCursor};
