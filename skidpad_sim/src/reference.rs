//! Built-in skidpad layout used when no files are given.
//!
//! The base path is expressed in the track frame: origin on the timing line
//! between the two circles, +x pointing from the entry towards the exit. It
//! runs the entry straight, two right-hand laps around the right circle, two
//! left-hand laps around the left circle and the exit straight.

use skidpad_core::frame::derive_pose;
use skidpad_core::{GeometryError, Landmarks, PathTransformer, Point2D};
use skidpad_env::{ConeRecord, InMemorySource, PathRecord};
use std::f64::consts::{PI, TAU};

/// Centre-line radius of both circles (m).
pub const CENTERLINE_RADIUS: f64 = 9.125;

/// Radii of the inner and outer cone rings (m).
pub const INNER_RADIUS: f64 = 7.625;
pub const OUTER_RADIUS: f64 = 10.625;

/// Length of the entry and exit straights (m).
pub const STRAIGHT_LENGTH: f64 = 15.0;

/// Distance between consecutive base path samples (m).
pub const SAMPLE_SPACING: f64 = 0.25;

const LAPS: usize = 2;
const CONES_PER_RING: usize = 16;
/// Outer cones closer than this to the timing line would block the crossing.
const CROSSING_CLEARANCE: f64 = 3.0;

/// Landmark cones of the built-in layout, entry pair first.
pub fn landmark_points() -> [Point2D; 4] {
    [
        Point2D::new(0.0, -1.5),
        Point2D::new(0.0, 1.5),
        Point2D::new(3.0, -1.5),
        Point2D::new(3.0, 1.5),
    ]
}

fn straight(from_x: f64, to_x: f64) -> impl Iterator<Item = Point2D> {
    let count = ((to_x - from_x).abs() / SAMPLE_SPACING).round() as usize;
    (1..=count).map(move |i| Point2D::new(from_x + (to_x - from_x) * i as f64 / count as f64, 0.0))
}

/// `laps` full turns around `center`, starting and ending at the track origin.
fn circle(center_y: f64, clockwise: bool) -> impl Iterator<Item = Point2D> {
    let per_lap = (TAU * CENTERLINE_RADIUS / SAMPLE_SPACING).round() as usize;
    let start = if center_y < 0.0 { PI / 2.0 } else { -PI / 2.0 };
    let direction = if clockwise { -1.0 } else { 1.0 };

    (1..=per_lap * LAPS).map(move |i| {
        let angle = start + direction * TAU * i as f64 / per_lap as f64;
        Point2D::new(
            CENTERLINE_RADIUS * angle.cos(),
            center_y + CENTERLINE_RADIUS * angle.sin(),
        )
    })
}

/// Base path in the track frame.
pub fn base_path() -> Vec<Point2D> {
    let mut path = vec![Point2D::new(-STRAIGHT_LENGTH, 0.0)];
    path.extend(straight(-STRAIGHT_LENGTH, 0.0));
    path.extend(circle(-CENTERLINE_RADIUS, true));
    path.extend(circle(CENTERLINE_RADIUS, false));
    path.extend(straight(0.0, STRAIGHT_LENGTH));
    path
}

fn ring(center_y: f64, radius: f64, skip_crossing: bool) -> Vec<Point2D> {
    (0..CONES_PER_RING)
        .map(|i| {
            let angle = TAU * i as f64 / CONES_PER_RING as f64;
            Point2D::new(radius * angle.cos(), center_y + radius * angle.sin())
        })
        .filter(|p| !skip_crossing || p.y.abs() > CROSSING_CLEARANCE)
        .collect()
}

/// Boundary cones in the track frame as `(position, color)`.
///
/// The right circle is driven clockwise, so its inner ring is on the right
/// (yellow); the left circle is driven counter-clockwise and its inner ring
/// is blue.
pub fn boundary_cones() -> Vec<(Point2D, &'static str)> {
    let mut cones = Vec::new();
    cones.extend(ring(-CENTERLINE_RADIUS, INNER_RADIUS, false).into_iter().map(|p| (p, "yellow")));
    cones.extend(ring(-CENTERLINE_RADIUS, OUTER_RADIUS, true).into_iter().map(|p| (p, "blue")));
    cones.extend(ring(CENTERLINE_RADIUS, INNER_RADIUS, false).into_iter().map(|p| (p, "blue")));
    cones.extend(ring(CENTERLINE_RADIUS, OUTER_RADIUS, true).into_iter().map(|p| (p, "yellow")));
    cones
}

/// In-memory source holding the built-in layout.
///
/// Landmark and boundary cones are placed in the world frame the landmarks
/// define, so the observed layout lines up with the derived path.
pub fn reference_source() -> Result<InMemorySource, GeometryError> {
    let landmarks = landmark_points();
    let transformer = PathTransformer::new(derive_pose(&Landmarks::new(landmarks))?)?;

    let mut cones: Vec<ConeRecord> = landmarks
        .iter()
        .map(|p| ConeRecord::new(p.x, p.y, "orange"))
        .collect();
    cones.extend(boundary_cones().into_iter().map(|(p, color)| {
        let world = transformer.transform_point(&p);
        ConeRecord::new(world.x, world.y, color)
    }));

    Ok(InMemorySource::new("reference")
        .with_cones(cones)
        .with_path(base_path().into_iter().map(|p| PathRecord::new(p.x, p.y))))
}
