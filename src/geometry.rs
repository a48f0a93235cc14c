//! Pure polygon measurement: shoelace area, wrapped side lengths, and the
//! closing-point proximity test used for vertex snapping.
//!
//! Everything in this module is a pure function of its inputs; all coordinates
//! are in world (unscaled, unpanned) pixel space.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Distance (world units) within which a candidate point snaps onto the
/// polygon's first vertex. World-space so the snap radius behaves the same at
/// every zoom level.
pub const SNAP_THRESHOLD_WORLD: f64 = 5.0;

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Errors from the measurement functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// The pixels-per-foot scale was zero, negative, or non-finite.
    InvalidScale,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidScale => write!(f, "scale must be a positive number"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Length of every polygon edge in real-world feet, traversal order, with the
/// closing edge (last vertex back to the first) as the final entry.
///
/// Fewer than 3 points yields an empty result; callers gate on vertex count
/// before treating the ring as closed.
pub fn side_lengths(points: &[Point], scale: f64) -> Result<Vec<f64>, GeometryError> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(GeometryError::InvalidScale);
    }
    if points.len() < 3 {
        return Ok(Vec::new());
    }
    let n = points.len();
    let mut lengths = Vec::with_capacity(n);
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        lengths.push(a.distance_to(b) / scale);
    }
    Ok(lengths)
}

/// Polygon area in world pixels² via the shoelace formula.
///
/// Orientation-agnostic: the absolute value makes clockwise and
/// counter-clockwise rings equivalent. Fewer than 3 points is zero area.
pub fn shoelace_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum.abs() / 2.0
}

/// True when `candidate` lies within `threshold` world units of `first`.
pub fn closing_proximity(candidate: Point, first: Point, threshold: f64) -> bool {
    candidate.distance_to(first) <= threshold
}
