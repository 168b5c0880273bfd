//! Core data models for trajectory deconfliction.
//!
//! Positions are dimension-generic through the [`Point`] trait so the
//! planar and altitude-aware variants share one detection algorithm.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in a Euclidean frame of fixed dimensionality.
pub trait Point: Copy + fmt::Debug + PartialEq + Send + Sync {
    /// Number of spatial coordinates (2 or 3).
    const DIMENSIONS: usize;

    /// Euclidean distance to another point.
    fn distance(&self, other: &Self) -> f64;

    /// Componentwise linear blend: `self + ratio * (other - self)`.
    ///
    /// `ratio` is not clamped; values outside `[0, 1]` extrapolate.
    fn lerp(&self, other: &Self, ratio: f64) -> Self;

    /// Build a point from exactly `DIMENSIONS` coordinates.
    fn from_coords(coords: &[f64]) -> Option<Self>;

    /// Coordinates in axis order.
    fn coords(&self) -> Vec<f64>;

    /// Round every coordinate to `decimals` places.
    fn rounded(&self, decimals: u32) -> Self;
}

/// Planar position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Point for Point2 {
    const DIMENSIONS: usize = 2;

    fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    fn lerp(&self, other: &Self, ratio: f64) -> Self {
        Self {
            x: self.x + ratio * (other.x - self.x),
            y: self.y + ratio * (other.y - self.y),
        }
    }

    fn from_coords(coords: &[f64]) -> Option<Self> {
        match *coords {
            [x, y] => Some(Self { x, y }),
            _ => None,
        }
    }

    fn coords(&self) -> Vec<f64> {
        vec![self.x, self.y]
    }

    fn rounded(&self, decimals: u32) -> Self {
        Self {
            x: crate::geometry::round_to(self.x, decimals),
            y: crate::geometry::round_to(self.y, decimals),
        }
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Position with altitude (`z`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    #[serde(alias = "altitude_m", alias = "alt")]
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Point for Point3 {
    const DIMENSIONS: usize = 3;

    fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    fn lerp(&self, other: &Self, ratio: f64) -> Self {
        Self {
            x: self.x + ratio * (other.x - self.x),
            y: self.y + ratio * (other.y - self.y),
            z: self.z + ratio * (other.z - self.z),
        }
    }

    fn from_coords(coords: &[f64]) -> Option<Self> {
        match *coords {
            [x, y, z] => Some(Self { x, y, z }),
            _ => None,
        }
    }

    fn coords(&self) -> Vec<f64> {
        vec![self.x, self.y, self.z]
    }

    fn rounded(&self, decimals: u32) -> Self {
        Self {
            x: crate::geometry::round_to(self.x, decimals),
            y: crate::geometry::round_to(self.y, decimals),
            z: crate::geometry::round_to(self.z, decimals),
        }
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Time-stamped position along a planned flight path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint<P> {
    pub position: P,
    /// Seconds on the mission clock shared by the whole fleet
    #[serde(alias = "time")]
    pub time_s: f64,
}

impl<P: Point> Waypoint<P> {
    pub fn new(position: P, time_s: f64) -> Self {
        Self { position, time_s }
    }

    /// Build a waypoint from a flat `(x, y, [z,] t)` tuple.
    ///
    /// Returns `None` unless the slice holds exactly `DIMENSIONS + 1` values.
    pub fn from_tuple(values: &[f64]) -> Option<Self> {
        let (time_s, coords) = values.split_last()?;
        let position = P::from_coords(coords)?;
        Some(Self {
            position,
            time_s: *time_s,
        })
    }

    /// Flatten back into `(x, y, [z,] t)` form.
    pub fn to_tuple(&self) -> Vec<f64> {
        let mut values = self.position.coords();
        values.push(self.time_s);
        values
    }
}

impl Waypoint<Point2> {
    pub fn planar(x: f64, y: f64, time_s: f64) -> Self {
        Self::new(Point2::new(x, y), time_s)
    }
}

impl Waypoint<Point3> {
    pub fn spatial(x: f64, y: f64, z: f64, time_s: f64) -> Self {
        Self::new(Point3::new(x, y, z), time_s)
    }
}
