//! Geometry primitives shared by every pipeline stage.
//!
//! Pure functions over `nalgebra` points: rotation, averaging, finiteness
//! checks, linear interpolation and nearest-sample search.

use crate::error::{GeometryError, Result};
use nalgebra::{Isometry2, Point2, Rotation2, Vector2};
use serde::{Deserialize, Serialize};

/// A 2D point in either the track frame or the world frame.
pub type Point2D = Point2<f64>;

/// An ordered sequence of samples describing a traversal.
pub type Path = Vec<Point2D>;

/// Anchor pose of the track: origin plus heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Origin x in the world frame (meters)
    pub x: f64,

    /// Origin y in the world frame (meters)
    pub y: f64,

    /// Heading in radians, counter-clockwise from +x
    pub heading: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    /// Returns the origin as a point.
    pub fn origin(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Returns the rigid transform mapping track-frame points to the world.
    pub fn isometry(&self) -> Isometry2<f64> {
        Isometry2::new(Vector2::new(self.x, self.y), self.heading)
    }

    pub fn heading_degrees(&self) -> f64 {
        self.heading.to_degrees()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.heading.is_finite()
    }
}

/// Unit vector pointing along `angle` (radians).
pub fn unit_vector_from_angle(angle: f64) -> Vector2<f64> {
    Vector2::new(angle.cos(), angle.sin())
}

/// Rotates a vector counter-clockwise by `angle` (radians).
pub fn rotate(v: &Vector2<f64>, angle: f64) -> Vector2<f64> {
    Rotation2::new(angle) * v
}

/// Rotates `point` counter-clockwise about `center` by `angle` (radians).
pub fn rotate_about(point: &Point2D, center: &Point2D, angle: f64) -> Point2D {
    *center + rotate(&(point - center), angle)
}

/// Arithmetic mean of a point set, `None` when empty.
pub fn mean(points: &[Point2D]) -> Option<Point2D> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector2::zeros(), |acc: Vector2<f64>, p| acc + p.coords);
    Some(Point2D::from(sum / points.len() as f64))
}

pub fn is_finite(p: &Point2D) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Rejects a point with NaN or infinite coordinates.
pub fn ensure_finite(p: &Point2D, what: &str) -> Result<()> {
    if is_finite(p) {
        Ok(())
    } else {
        Err(GeometryError::invalid(format!(
            "{} has non-finite coordinates ({}, {})",
            what, p.x, p.y
        )))
    }
}

/// Rejects a point set containing any non-finite coordinate.
pub fn ensure_all_finite(points: &[Point2D], what: &str) -> Result<()> {
    match points.iter().position(|p| !is_finite(p)) {
        None => Ok(()),
        Some(i) => Err(GeometryError::invalid(format!(
            "{} sample {} has non-finite coordinates ({}, {})",
            what, i, points[i].x, points[i].y
        ))),
    }
}

/// `count` equally spaced points from `a` to `b`, both endpoints included.
///
/// The last point is `b` bit-for-bit, so callers can rely on exact equality
/// at the junction.
pub fn linspace(a: &Point2D, b: &Point2D, count: usize) -> Vec<Point2D> {
    match count {
        0 => Vec::new(),
        1 => vec![*a],
        _ => {
            let step = (b - a) / (count - 1) as f64;
            let mut points: Vec<Point2D> =
                (0..count - 1).map(|i| *a + step * i as f64).collect();
            points.push(*b);
            points
        }
    }
}

/// Keeps every `stride`-th sample, starting with the first.
pub fn subsample(path: &[Point2D], stride: usize) -> Result<Path> {
    if stride == 0 {
        return Err(GeometryError::invalid("subsampling stride must be at least 1"));
    }
    Ok(path.iter().step_by(stride).copied().collect())
}

/// Index of the sample closest to `point`; ties resolve to the lowest index.
pub fn closest_index(point: &Point2D, path: &[Point2D]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, sample) in path.iter().enumerate() {
        let d = (sample - point).norm_squared();
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}
