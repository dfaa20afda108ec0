//! Path Splicer: joins an arbitrary start position onto the derived path.
//!
//! The closest path sample to the start point becomes the junction. A straight
//! connector of evenly spaced points leads from the start point to that sample,
//! and everything before the junction is dropped.

use crate::error::{GeometryError, Result};
use crate::geometry::{closest_index, ensure_all_finite, ensure_finite, linspace, Path, Point2D};
use tracing::debug;

/// Default number of connector samples, endpoints included.
pub const DEFAULT_CONNECTOR_COUNT: usize = 20;

/// Prepends a straight connector from an external start point.
#[derive(Debug, Clone)]
pub struct PathSplicer {
    connector_count: usize,
}

impl Default for PathSplicer {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECTOR_COUNT)
    }
}

impl PathSplicer {
    /// Creates a splicer. Counts below 2 are raised to 2 (start + junction).
    pub fn new(connector_count: usize) -> Self {
        Self {
            connector_count: connector_count.max(2),
        }
    }

    pub fn connector_count(&self) -> usize {
        self.connector_count
    }

    /// Splices `start` onto `path`; identity when `start` is `None`.
    pub fn splice(&self, path: &[Point2D], start: Option<Point2D>) -> Result<Path> {
        if path.len() < 2 {
            return Err(GeometryError::EmptyPath {
                required: 2,
                found: path.len(),
            });
        }

        let Some(start) = start else {
            return Ok(path.to_vec());
        };

        ensure_finite(&start, "external start point")?;
        ensure_all_finite(path, "path")?;

        let idx = closest_index(&start, path).ok_or(GeometryError::EmptyPath {
            required: 2,
            found: 0,
        })?;
        debug!(
            "Splicing start ({:.3}, {:.3}) onto sample {} of {} ({:.3} m away)",
            start.x,
            start.y,
            idx,
            path.len(),
            (path[idx] - start).norm()
        );

        let connector = linspace(&start, &path[idx], self.connector_count);
        let mut spliced = Vec::with_capacity(connector.len() + path.len() - idx - 1);
        spliced.extend(connector);
        // The connector already ends on path[idx].
        spliced.extend_from_slice(&path[idx + 1..]);
        Ok(spliced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight(n: usize) -> Vec<Point2D> {
        (0..n).map(|i| Point2D::new(i as f64, 0.0)).collect()
    }

    #[test]
    fn test_no_start_is_identity() {
        let path = straight(5);
        assert_eq!(PathSplicer::default().splice(&path, None).unwrap(), path);
    }

    #[test]
    fn test_splice_drops_prefix_without_duplicate() {
        let path = straight(10);
        let spliced = PathSplicer::new(5)
            .splice(&path, Some(Point2D::new(4.2, -3.0)))
            .unwrap();

        // 5 connector points + samples 5..9
        assert_eq!(spliced.len(), 5 + 5);
        assert_eq!(spliced[0], Point2D::new(4.2, -3.0));
        assert_eq!(spliced[4], path[4]);
        assert_eq!(spliced[5], path[5]);
        assert_eq!(spliced.iter().filter(|p| **p == path[4]).count(), 1);
    }

    #[test]
    fn test_start_on_last_sample() {
        let path = straight(4);
        let spliced = PathSplicer::new(3)
            .splice(&path, Some(Point2D::new(10.0, 0.0)))
            .unwrap();
        assert_eq!(spliced.len(), 3);
        assert_eq!(*spliced.last().unwrap(), path[3]);
    }

    #[test]
    fn test_connector_count_clamped() {
        assert_eq!(PathSplicer::new(0).connector_count(), 2);
    }

    #[test]
    fn test_short_path_rejected() {
        let err = PathSplicer::default()
            .splice(&straight(1), Some(Point2D::origin()))
            .unwrap_err();
        assert_eq!(err, GeometryError::EmptyPath { required: 2, found: 1 });
    }

    #[test]
    fn test_non_finite_start_rejected() {
        assert!(matches!(
            PathSplicer::default().splice(&straight(3), Some(Point2D::new(f64::NAN, 0.0))),
            Err(GeometryError::InvalidGeometry(_))
        ));
    }
}
