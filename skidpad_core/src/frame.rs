//! Frame Builder: derives the track anchor pose from four landmark cones.
//!
//! The landmarks form two gates around the middle section of the skidpad:
//! `(A, B)` is the entry gate and `(C, D)` the exit gate. The anchor origin is
//! the centroid of all four cones; the heading points from the entry gate
//! midpoint to the exit gate midpoint.

use crate::cones::{ConeColor, ObservedCone};
use crate::error::{GeometryError, Result};
use crate::geometry::{ensure_all_finite, mean, rotate_about, Point2D, Pose};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Gate midpoints closer than this are treated as coincident.
const DEGENERATE_TOLERANCE: f64 = 1e-12;

/// The four landmark cones, ordered `[A, B, C, D]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmarks {
    points: [Point2D; 4],
}

impl Landmarks {
    pub fn new(points: [Point2D; 4]) -> Self {
        Self { points }
    }

    /// Builds landmarks from a slice that must hold exactly four points.
    pub fn from_slice(points: &[Point2D]) -> Result<Self> {
        let points: [Point2D; 4] = points
            .try_into()
            .map_err(|_| GeometryError::LandmarkCount(points.len()))?;
        Ok(Self::new(points))
    }

    /// Picks the orange cones of an observed layout, in source order.
    pub fn from_observed(cones: &[ObservedCone]) -> Result<Self> {
        let orange: Vec<Point2D> = cones
            .iter()
            .filter(|c| c.color == ConeColor::Orange)
            .map(|c| c.position)
            .collect();
        Self::from_slice(&orange)
    }

    pub fn points(&self) -> &[Point2D; 4] {
        &self.points
    }

    pub fn centroid(&self) -> Point2D {
        // Four points, never empty.
        mean(&self.points).unwrap_or_else(Point2D::origin)
    }

    /// Midpoint of the entry gate `(A, B)`.
    pub fn entry_midpoint(&self) -> Point2D {
        nalgebra::center(&self.points[0], &self.points[1])
    }

    /// Midpoint of the exit gate `(C, D)`.
    pub fn exit_midpoint(&self) -> Point2D {
        nalgebra::center(&self.points[2], &self.points[3])
    }

    /// Rotates all four cones rigidly about their centroid.
    ///
    /// Positive degrees turn the layout clockwise.
    pub fn rotated_deg(&self, degrees: f64) -> Self {
        let center = self.centroid();
        let angle = (-degrees).to_radians();
        Self::new(self.points.map(|p| rotate_about(&p, &center, angle)))
    }
}

/// Result of frame derivation: the anchor pose and the landmarks it came from
/// (after the configured rotation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorFrame {
    pub pose: Pose,
    pub landmarks: Landmarks,
}

/// Derives the anchor pose of the track.
#[derive(Debug, Clone, Default)]
pub struct FrameBuilder {
    /// Rigid rotation applied to the landmarks before derivation (degrees)
    rotation_deg: f64,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the layout rotation (degrees, positive = clockwise).
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation_deg = degrees;
        self
    }

    /// Rotates the landmarks, then derives the pose.
    pub fn build(&self, landmarks: &Landmarks) -> Result<AnchorFrame> {
        if !self.rotation_deg.is_finite() {
            return Err(GeometryError::invalid(format!(
                "rotation angle must be finite, got {}",
                self.rotation_deg
            )));
        }
        ensure_all_finite(landmarks.points(), "landmark")?;

        let landmarks = if self.rotation_deg == 0.0 {
            *landmarks
        } else {
            landmarks.rotated_deg(self.rotation_deg)
        };

        let pose = derive_pose(&landmarks)?;
        debug!(
            "Anchor pose: origin=({:.3}, {:.3}) heading={:.2}°",
            pose.x,
            pose.y,
            pose.heading_degrees()
        );

        Ok(AnchorFrame { pose, landmarks })
    }
}

/// Anchor pose from landmarks, without rotation.
pub fn derive_pose(landmarks: &Landmarks) -> Result<Pose> {
    ensure_all_finite(landmarks.points(), "landmark")?;

    let origin = landmarks.centroid();
    let mid1 = landmarks.entry_midpoint();
    let mid2 = landmarks.exit_midpoint();
    let direction = mid2 - mid1;

    if direction.norm() <= DEGENERATE_TOLERANCE {
        return Err(GeometryError::DegenerateFrame {
            x: mid1.x,
            y: mid1.y,
        });
    }

    Ok(Pose::new(origin.x, origin.y, direction.y.atan2(direction.x)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn reference_landmarks() -> Landmarks {
        Landmarks::new([
            Point2D::new(0.0, -1.5),
            Point2D::new(0.0, 1.5),
            Point2D::new(3.0, -1.5),
            Point2D::new(3.0, 1.5),
        ])
    }

    #[test]
    fn test_reference_layout() {
        let frame = FrameBuilder::new().build(&reference_landmarks()).unwrap();

        assert_relative_eq!(frame.pose.x, 1.5);
        assert_relative_eq!(frame.pose.y, 0.0);
        assert_relative_eq!(frame.pose.heading, 0.0);
    }

    #[test]
    fn test_rotation_is_clockwise_and_keeps_origin() {
        let frame = FrameBuilder::new()
            .with_rotation(90.0)
            .build(&reference_landmarks())
            .unwrap();

        assert_relative_eq!(frame.pose.x, 1.5, epsilon = 1e-12);
        assert_relative_eq!(frame.pose.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(frame.pose.heading, -FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_midpoints() {
        let landmarks = Landmarks::new([
            Point2D::new(0.0, -1.5),
            Point2D::new(0.0, 1.5),
            Point2D::new(-1.0, 0.0),
            Point2D::new(1.0, 0.0),
        ]);
        assert!(matches!(
            derive_pose(&landmarks),
            Err(GeometryError::DegenerateFrame { .. })
        ));
    }

    #[test]
    fn test_non_finite_landmark_rejected() {
        let landmarks = Landmarks::new([
            Point2D::new(f64::NAN, -1.5),
            Point2D::new(0.0, 1.5),
            Point2D::new(3.0, -1.5),
            Point2D::new(3.0, 1.5),
        ]);
        assert!(matches!(
            FrameBuilder::new().build(&landmarks),
            Err(GeometryError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_landmarks_from_observed() {
        let cones = vec![
            ObservedCone::new(9.0, 9.0, ConeColor::Blue),
            ObservedCone::new(0.0, -1.5, ConeColor::Orange),
            ObservedCone::new(0.0, 1.5, ConeColor::Orange),
            ObservedCone::new(3.0, -1.5, ConeColor::Orange),
            ObservedCone::new(3.0, 1.5, ConeColor::Orange),
        ];
        let landmarks = Landmarks::from_observed(&cones).unwrap();
        assert_eq!(landmarks, reference_landmarks());

        assert!(matches!(
            Landmarks::from_observed(&cones[..3]),
            Err(GeometryError::LandmarkCount(2))
        ));
    }
}
