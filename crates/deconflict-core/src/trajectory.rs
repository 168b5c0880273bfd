//! Time-indexed waypoint sequences and position lookup.

use crate::geometry::interpolate;
use crate::models::{Point, Waypoint};
use serde::{Deserialize, Serialize};

/// Ordered, time-indexed waypoints for one aircraft.
///
/// Waypoints are kept sorted ascending by timestamp. A trajectory with
/// fewer than two waypoints is degenerate and has no defined position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "P: Point + Serialize",
    deserialize = "P: Point + Deserialize<'de>"
))]
#[serde(from = "Vec<Waypoint<P>>", into = "Vec<Waypoint<P>>")]
pub struct Trajectory<P> {
    waypoints: Vec<Waypoint<P>>,
}

impl<P: Point> From<Vec<Waypoint<P>>> for Trajectory<P> {
    fn from(waypoints: Vec<Waypoint<P>>) -> Self {
        Self::new(waypoints)
    }
}

impl<P: Point> From<Trajectory<P>> for Vec<Waypoint<P>> {
    fn from(trajectory: Trajectory<P>) -> Self {
        trajectory.waypoints
    }
}

impl<P: Point> FromIterator<Waypoint<P>> for Trajectory<P> {
    fn from_iter<I: IntoIterator<Item = Waypoint<P>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<P: Point> Trajectory<P> {
    /// Take ownership of the waypoints and sort them by time.
    pub fn new(waypoints: Vec<Waypoint<P>>) -> Self {
        let mut trajectory = Self { waypoints };
        trajectory.normalize();
        trajectory
    }

    /// Sort ascending by timestamp. Stable, so tied waypoints keep their
    /// input order. Idempotent.
    pub fn normalize(&mut self) {
        self.waypoints.sort_by(|a, b| a.time_s.total_cmp(&b.time_s));
    }

    pub fn waypoints(&self) -> &[Waypoint<P>] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// True when the trajectory cannot be interpolated.
    pub fn is_degenerate(&self) -> bool {
        self.waypoints.len() < 2
    }

    pub fn start_time(&self) -> Option<f64> {
        self.waypoints.first().map(|wp| wp.time_s)
    }

    pub fn end_time(&self) -> Option<f64> {
        self.waypoints.last().map(|wp| wp.time_s)
    }

    /// Interpolated position at time `t`.
    ///
    /// Uses the first segment whose timestamps bound `t`. Returns `None`
    /// outside `[start_time, end_time]` or for a degenerate trajectory.
    pub fn position_at(&self, t: f64) -> Option<P> {
        self.waypoints
            .windows(2)
            .find(|pair| pair[0].time_s <= t && t <= pair[1].time_s)
            .map(|pair| interpolate(&pair[0], &pair[1], t))
    }

    /// Cursor for sampling at non-decreasing times.
    pub fn cursor(&self) -> TrajectoryCursor<'_, P> {
        TrajectoryCursor {
            waypoints: &self.waypoints,
            index: 0,
        }
    }
}

/// Forward-only position lookup.
///
/// Gives the same answer as [`Trajectory::position_at`] as long as the
/// query times never decrease; segments already passed are not rescanned.
#[derive(Debug, Clone)]
pub struct TrajectoryCursor<'a, P> {
    waypoints: &'a [Waypoint<P>],
    index: usize,
}

impl<P: Point> TrajectoryCursor<'_, P> {
    pub fn position_at(&mut self, t: f64) -> Option<P> {
        let first = self.waypoints.first()?;
        let last = self.waypoints.last()?;
        if self.waypoints.len() < 2 || !(first.time_s <= t && t <= last.time_s) {
            return None;
        }

        // Skip segments ending strictly before t; the first remaining one bounds it.
        while self.index + 2 < self.waypoints.len() && self.waypoints[self.index + 1].time_s < t {
            self.index += 1;
        }

        let start = &self.waypoints[self.index];
        let end = &self.waypoints[self.index + 1];
        Some(interpolate(start, end, t))
    }
}
