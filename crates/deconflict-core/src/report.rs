//! Conflict events and the aggregated deconfliction report.

use crate::geometry::{round_to, REPORT_DECIMALS};
use crate::models::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall outcome of a deconfliction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// No pair came within the safety distance
    Clear,
    /// At least one conflict event was found
    Conflict,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Clear => write!(f, "CLEAR"),
            Status::Conflict => write!(f, "CONFLICT"),
        }
    }
}

/// One sampled instant where two aircraft were too close.
///
/// Values are kept at full precision; see [`Report::summary`] for the
/// rounded presentation form. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictEvent<P> {
    time_s: f64,
    location: P,
    distance_m: f64,
    drone1_id: String,
    drone2_id: String,
}

impl<P: Point> ConflictEvent<P> {
    pub fn new(
        time_s: f64,
        location: P,
        distance_m: f64,
        drone1_id: impl Into<String>,
        drone2_id: impl Into<String>,
    ) -> Self {
        Self {
            time_s,
            location,
            distance_m,
            drone1_id: drone1_id.into(),
            drone2_id: drone2_id.into(),
        }
    }

    /// Sample time (seconds)
    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    /// Position of the first aircraft of the pair at the sample time
    pub fn location(&self) -> P {
        self.location
    }

    /// Separation at the sample time (meters)
    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    pub fn drone1_id(&self) -> &str {
        &self.drone1_id
    }

    pub fn drone2_id(&self) -> &str {
        &self.drone2_id
    }

    pub fn between(&self) -> (&str, &str) {
        (self.drone1_id.as_str(), self.drone2_id.as_str())
    }

    /// True if the event involves the given aircraft.
    pub fn involves(&self, drone_id: &str) -> bool {
        self.drone1_id == drone_id || self.drone2_id == drone_id
    }

    pub fn summary(&self) -> ConflictSummary<P> {
        ConflictSummary {
            time: round_to(self.time_s, REPORT_DECIMALS),
            location: self.location.rounded(REPORT_DECIMALS),
            distance: round_to(self.distance_m, REPORT_DECIMALS),
            between: (self.drone1_id.clone(), self.drone2_id.clone()),
        }
    }
}

/// Rounded, presentation-ready conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictSummary<P> {
    pub time: f64,
    pub location: P,
    pub distance: f64,
    pub between: (String, String),
}

/// Rounded, presentation-ready report.
///
/// Serializes as `{"status":"CLEAR"}` or
/// `{"status":"CONFLICT","conflicts":[...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary<P> {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<ConflictSummary<P>>,
}

/// Conflicts in discovery order plus the derived status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report<P> {
    conflicts: Vec<ConflictEvent<P>>,
}

impl<P> Default for Report<P> {
    fn default() -> Self {
        Self {
            conflicts: Vec::new(),
        }
    }
}

impl<P: Point> Report<P> {
    pub fn new(conflicts: Vec<ConflictEvent<P>>) -> Self {
        Self { conflicts }
    }

    pub fn status(&self) -> Status {
        if self.conflicts.is_empty() {
            Status::Clear
        } else {
            Status::Conflict
        }
    }

    pub fn is_clear(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn conflicts(&self) -> &[ConflictEvent<P>] {
        &self.conflicts
    }

    pub fn into_conflicts(self) -> Vec<ConflictEvent<P>> {
        self.conflicts
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Distinct aircraft pairs, in the order their first conflict was found.
    pub fn conflicting_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        for conflict in &self.conflicts {
            let pair = conflict.between();
            if !pairs.contains(&pair) {
                pairs.push(pair);
            }
        }
        pairs
    }

    /// Event with the smallest separation; the earliest one wins ties.
    pub fn closest(&self) -> Option<&ConflictEvent<P>> {
        self.conflicts.iter().reduce(|best, conflict| {
            if conflict.distance_m < best.distance_m {
                conflict
            } else {
                best
            }
        })
    }

    pub fn summary(&self) -> ReportSummary<P> {
        ReportSummary {
            status: self.status(),
            conflicts: self.conflicts.iter().map(ConflictEvent::summary).collect(),
        }
    }
}
