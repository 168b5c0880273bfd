//! Insertion-ordered collection of aircraft trajectories.

use crate::models::{Point, Waypoint};
use crate::trajectory::Trajectory;

/// Aircraft identifier to trajectory, iterated in insertion order.
///
/// Pair enumeration and report ordering follow this order, so it must be
/// deterministic; a hash map would not do.
#[derive(Debug, Clone, PartialEq)]
pub struct Fleet<P> {
    entries: Vec<(String, Trajectory<P>)>,
}

impl<P> Default for Fleet<P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<P: Point> Fleet<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a trajectory.
    ///
    /// Replacing keeps the aircraft at its original position. Returns the
    /// previous trajectory, if any.
    pub fn insert(
        &mut self,
        drone_id: impl Into<String>,
        trajectory: Trajectory<P>,
    ) -> Option<Trajectory<P>> {
        let drone_id = drone_id.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(id, _)| *id == drone_id) {
            return Some(std::mem::replace(existing, trajectory));
        }
        self.entries.push((drone_id, trajectory));
        None
    }

    /// Insert raw waypoints; they are normalized on the way in.
    pub fn insert_waypoints(
        &mut self,
        drone_id: impl Into<String>,
        waypoints: Vec<Waypoint<P>>,
    ) -> Option<Trajectory<P>> {
        self.insert(drone_id, Trajectory::new(waypoints))
    }

    pub fn get(&self, drone_id: &str) -> Option<&Trajectory<P>> {
        self.entries
            .iter()
            .find(|(id, _)| id == drone_id)
            .map(|(_, trajectory)| trajectory)
    }

    pub fn remove(&mut self, drone_id: &str) -> Option<Trajectory<P>> {
        let index = self.entries.iter().position(|(id, _)| id == drone_id)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Trajectory<P>)> {
        self.entries.iter().map(|(id, trajectory)| (id.as_str(), trajectory))
    }

    pub(crate) fn entries(&self) -> &[(String, Trajectory<P>)] {
        &self.entries
    }
}

impl<P: Point, S: Into<String>> FromIterator<(S, Vec<Waypoint<P>>)> for Fleet<P> {
    fn from_iter<I: IntoIterator<Item = (S, Vec<Waypoint<P>>)>>(iter: I) -> Self {
        let mut fleet = Self::new();
        for (drone_id, waypoints) in iter {
            fleet.insert_waypoints(drone_id, waypoints);
        }
        fleet
    }
}

impl<P: Point, S: Into<String>> FromIterator<(S, Trajectory<P>)> for Fleet<P> {
    fn from_iter<I: IntoIterator<Item = (S, Trajectory<P>)>>(iter: I) -> Self {
        let mut fleet = Self::new();
        for (drone_id, trajectory) in iter {
            fleet.insert(drone_id, trajectory);
        }
        fleet
    }
}
