//! Lookahead sampling ahead of a vehicle position.
//!
//! Given the derived path and a position on or near it, produces evenly spaced
//! samples along the path ahead with their curvature and their clearance to
//! the nearest left (blue) and right (yellow) boundary cones.

use crate::arc_length::ArcLengthIndex;
use crate::cones::{ConeColor, ObservedCone};
use crate::error::{GeometryError, Result};
use crate::geometry::{closest_index, ensure_finite, Point2D};
use serde::{Deserialize, Serialize};

/// Triangles with a smaller area are treated as straight.
const COLLINEAR_AREA: f64 = 1e-6;

/// Lookahead parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookaheadConfig {
    /// Number of samples ahead (default: 40)
    pub count: usize,

    /// Arc-length spacing between samples (meters, default: 0.2)
    pub spacing: f64,
}

impl Default for LookaheadConfig {
    fn default() -> Self {
        Self {
            count: 40,
            spacing: 0.2,
        }
    }
}

/// A point on the path ahead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathSample {
    /// Arc length from the start sample
    pub s: f64,
    pub x: f64,
    pub y: f64,

    /// Unsigned curvature (1/m)
    pub curvature: f64,
}

/// A lookahead row with boundary clearances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookaheadSample {
    #[serde(flatten)]
    pub sample: PathSample,

    /// Distance to the nearest blue cone, if any
    pub d_left: Option<f64>,

    /// Distance to the nearest yellow cone, if any
    pub d_right: Option<f64>,
}

/// Curvature of the circle through three points (`1/R`, `R = abc / 4A`).
///
/// Returns 0 for (nearly) collinear points.
pub fn three_point_curvature(p1: &Point2D, p2: &Point2D, p3: &Point2D) -> f64 {
    let a = (p2 - p1).norm();
    let b = (p3 - p2).norm();
    let c = (p1 - p3).norm();

    let v1 = p2 - p1;
    let v2 = p3 - p1;
    let area = (v1.x * v2.y - v1.y * v2.x).abs() * 0.5;
    if area < COLLINEAR_AREA {
        return 0.0;
    }

    4.0 * area / (a * b * c)
}

/// Samples every `spacing` meters past `start`, up to `count` samples.
///
/// Positions are interpolated along the segment containing each target
/// distance; curvature comes from that segment's first sample and the two
/// after it. Stops early once fewer than three samples remain.
pub fn sample_ahead(
    path: &[Point2D],
    index: &ArcLengthIndex,
    start: usize,
    config: &LookaheadConfig,
) -> Vec<PathSample> {
    let mut samples = Vec::with_capacity(config.count);
    if path.len() < 3 || start >= path.len() {
        return samples;
    }

    let s_start = index.distance_at(start);
    let mut idx = start;

    for i in 1..=config.count {
        let target = s_start + i as f64 * config.spacing;
        while idx + 1 < path.len() && index.distance_at(idx + 1) < target {
            idx += 1;
        }
        if idx + 2 >= path.len() {
            break;
        }

        let s0 = index.distance_at(idx);
        let seg = index.distance_at(idx + 1) - s0;
        let t = if seg > 0.0 {
            ((target - s0) / seg).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let p = path[idx] + (path[idx + 1] - path[idx]) * t;

        samples.push(PathSample {
            s: target - s_start,
            x: p.x,
            y: p.y,
            curvature: three_point_curvature(&path[idx], &path[idx + 1], &path[idx + 2]),
        });
    }
    samples
}

/// Distance from `point` to the nearest cone of `color`; `None` when there
/// is no cone of that colour.
pub fn nearest_cone_distance(point: &Point2D, cones: &[ObservedCone], color: ConeColor) -> Option<f64> {
    cones
        .iter()
        .filter(|c| c.color == color)
        .map(|c| (c.position - point).norm())
        .min_by(|a, b| a.total_cmp(b))
}

/// The `count` samples following the sample closest to `position`.
pub fn points_ahead(path: &[Point2D], position: &Point2D, count: usize) -> Vec<Point2D> {
    match closest_index(position, path) {
        Some(idx) => path.iter().skip(idx + 1).take(count).copied().collect(),
        None => Vec::new(),
    }
}

/// Lookahead rows from the sample closest to `position`.
pub fn lookahead(
    path: &[Point2D],
    index: &ArcLengthIndex,
    position: &Point2D,
    cones: &[ObservedCone],
    config: &LookaheadConfig,
) -> Result<Vec<LookaheadSample>> {
    ensure_finite(position, "lookahead position")?;
    if !(config.spacing.is_finite() && config.spacing > 0.0) {
        return Err(GeometryError::invalid(format!(
            "lookahead spacing must be positive, got {}",
            config.spacing
        )));
    }

    let start = closest_index(position, path).ok_or(GeometryError::EmptyPath {
        required: 1,
        found: 0,
    })?;

    Ok(sample_ahead(path, index, start, config)
        .into_iter()
        .map(|sample| {
            let p = Point2D::new(sample.x, sample.y);
            LookaheadSample {
                sample,
                d_left: nearest_cone_distance(&p, cones, ConeColor::Blue),
                d_right: nearest_cone_distance(&p, cones, ConeColor::Yellow),
            }
        })
        .collect())
}
