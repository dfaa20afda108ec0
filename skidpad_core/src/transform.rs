//! Path Transformer: maps the track-frame base path into the world frame and
//! synthesizes gate cones at its ends.

use crate::cones::{ConeRole, ConeSet};
use crate::error::{GeometryError, Result};
use crate::geometry::{ensure_all_finite, ensure_finite, Path, Point2D, Pose};
use nalgebra::Isometry2;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Dimensions of a synthesized gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateGeometry {
    /// Half distance between the two cones of a pair (meters)
    pub spacing: f64,

    /// Distance between the front and back pair along the heading (meters)
    pub width: f64,
}

impl Default for GateGeometry {
    fn default() -> Self {
        Self {
            spacing: 1.5,
            width: 3.0,
        }
    }
}

/// Four gate cones forming a `width` × `2·spacing` rectangle whose rear edge
/// is centred on `center`, rotated by `heading`.
///
/// Local layout before rotation: `(0,-s) (0,s) (w,-s) (w,s)`.
pub fn make_gate_pair(
    center: &Point2D,
    spacing: f64,
    width: f64,
    heading: f64,
) -> Result<[Point2D; 4]> {
    ensure_finite(center, "gate center")?;
    if !(spacing.is_finite() && width.is_finite() && heading.is_finite()) {
        return Err(GeometryError::invalid(format!(
            "gate parameters must be finite (spacing={}, width={}, heading={})",
            spacing, width, heading
        )));
    }

    let iso = Isometry2::new(center.coords, heading);
    let local = [
        Point2D::new(0.0, -spacing),
        Point2D::new(0.0, spacing),
        Point2D::new(width, -spacing),
        Point2D::new(width, spacing),
    ];
    Ok(local.map(|p| iso * p))
}

/// Applies an anchor pose to track-frame geometry.
#[derive(Debug, Clone)]
pub struct PathTransformer {
    pose: Pose,
    iso: Isometry2<f64>,
}

impl PathTransformer {
    pub fn new(pose: Pose) -> Result<Self> {
        if !pose.is_finite() {
            return Err(GeometryError::invalid(format!(
                "anchor pose must be finite, got ({}, {}, {})",
                pose.x, pose.y, pose.heading
            )));
        }
        Ok(Self {
            pose,
            iso: pose.isometry(),
        })
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Rotates by the pose heading, then translates by the pose origin.
    pub fn transform_point(&self, p: &Point2D) -> Point2D {
        self.iso * p
    }

    /// Transforms every base path sample into the world frame.
    pub fn transform(&self, base: &[Point2D]) -> Result<Path> {
        ensure_all_finite(base, "base path")?;
        let path: Path = base.iter().map(|p| self.transform_point(p)).collect();
        ensure_all_finite(&path, "transformed path")?;
        debug!("Transformed {} base path samples", path.len());
        Ok(path)
    }

    /// Gate cones at the first (start) and last (end) sample of a world path.
    pub fn gate_cones(&self, world_path: &[Point2D], gate: &GateGeometry) -> Result<ConeSet> {
        let (first, last) = match (world_path.first(), world_path.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(GeometryError::EmptyPath {
                    required: 1,
                    found: 0,
                })
            }
        };

        let heading = self.pose.heading;
        let mut cones = ConeSet::new();
        cones.extend_role(
            make_gate_pair(first, gate.spacing, gate.width, heading)?,
            ConeRole::GateStart,
        );
        cones.extend_role(
            make_gate_pair(last, gate.spacing, gate.width, heading)?,
            ConeRole::GateEnd,
        );
        Ok(cones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity_pose() {
        let t = PathTransformer::new(Pose::new(0.0, 0.0, 0.0)).unwrap();
        let base = vec![Point2D::new(1.0, 2.0), Point2D::new(-3.0, 0.5)];
        assert_eq!(t.transform(&base).unwrap(), base);
    }

    #[test]
    fn test_rotate_then_translate() {
        let t = PathTransformer::new(Pose::new(10.0, 5.0, FRAC_PI_2)).unwrap();
        let p = t.transform_point(&Point2D::new(1.0, 0.0));

        assert_relative_eq!(p.x, 10.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_non_finite_base_rejected() {
        let t = PathTransformer::new(Pose::new(0.0, 0.0, 0.0)).unwrap();
        let base = vec![Point2D::new(0.0, 0.0), Point2D::new(f64::INFINITY, 0.0)];
        assert!(matches!(
            t.transform(&base),
            Err(GeometryError::InvalidGeometry(_))
        ));
        assert!(PathTransformer::new(Pose::new(f64::NAN, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_overflowing_output_rejected() {
        let t = PathTransformer::new(Pose::new(4e307, 0.0, 0.0)).unwrap();
        let base = vec![Point2D::new(0.0, 0.0), Point2D::new(1.5e308, 0.0)];
        assert!(matches!(
            t.transform(&base),
            Err(GeometryError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_gate_pair_layout() {
        let cones = make_gate_pair(&Point2D::new(1.0, 1.0), 1.5, 3.0, FRAC_PI_2).unwrap();

        // Width now runs along +y, spacing along -x/+x.
        assert_relative_eq!(cones[0].x, 2.5, epsilon = 1e-12);
        assert_relative_eq!(cones[0].y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(cones[1].x, -0.5, epsilon = 1e-12);
        assert_relative_eq!(cones[3].x, -0.5, epsilon = 1e-12);
        assert_relative_eq!(cones[3].y, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gate_cones_at_path_ends() {
        let t = PathTransformer::new(Pose::new(0.0, 0.0, 0.0)).unwrap();
        let path = vec![Point2D::new(-10.0, 0.0), Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0)];
        let cones = t.gate_cones(&path, &GateGeometry::default()).unwrap();

        let start = cones.positions(ConeRole::GateStart);
        let end = cones.positions(ConeRole::GateEnd);
        assert_eq!(start.len(), 4);
        assert_eq!(end.len(), 4);
        assert_eq!(start[0], Point2D::new(-10.0, -1.5));
        assert_eq!(end[3], Point2D::new(13.0, 1.5));

        assert!(matches!(
            t.gate_cones(&[], &GateGeometry::default()),
            Err(GeometryError::EmptyPath { .. })
        ));
    }
}
