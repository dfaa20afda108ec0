//! Arc-Length Index: cumulative distance along the final path.

use crate::error::{GeometryError, Result};
use crate::geometry::{ensure_all_finite, Point2D};

/// Cumulative distances aligned by index with a path.
///
/// `distances[0] == 0` and the sequence never decreases.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLengthIndex {
    distances: Vec<f64>,
}

impl ArcLengthIndex {
    /// Builds the index for a finite path with at least one sample.
    pub fn new(path: &[Point2D]) -> Result<Self> {
        if path.is_empty() {
            return Err(GeometryError::EmptyPath {
                required: 1,
                found: 0,
            });
        }
        ensure_all_finite(path, "path")?;

        let mut distances = Vec::with_capacity(path.len());
        let mut total = 0.0;
        distances.push(total);
        for w in path.windows(2) {
            total += (w[1] - w[0]).norm();
            distances.push(total);
        }
        if !total.is_finite() {
            return Err(GeometryError::invalid(format!(
                "path length overflows ({} samples)",
                path.len()
            )));
        }
        Ok(Self { distances })
    }

    /// Distance from the first sample to sample `i`, O(1).
    ///
    /// Indices past the end are clamped to the last sample.
    pub fn distance_at(&self, i: usize) -> f64 {
        self.distances[i.min(self.distances.len() - 1)]
    }

    /// First sample whose cumulative distance is `>= d`, O(log n).
    ///
    /// `d` is clamped to `[0, total]`; NaN counts as 0.
    pub fn index_at_distance(&self, d: f64) -> usize {
        // NaN maps to the first sample.
        let d = d.max(0.0).min(self.total());
        self.distances
            .partition_point(|&x| x < d)
            .min(self.distances.len() - 1)
    }

    /// Total path length.
    pub fn total(&self) -> f64 {
        self.distances[self.distances.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.distances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn l_shape() -> Vec<Point2D> {
        vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(3.0, 0.0),
            Point2D::new(3.0, 4.0),
            Point2D::new(3.0, 5.0),
        ]
    }

    #[test]
    fn test_cumulative_distances() {
        let index = ArcLengthIndex::new(&l_shape()).unwrap();

        assert_eq!(index.len(), 4);
        assert_eq!(index.distance_at(0), 0.0);
        assert_relative_eq!(index.distance_at(2), 7.0);
        assert_relative_eq!(index.total(), 8.0);
    }

    #[test]
    fn test_index_at_distance() {
        let index = ArcLengthIndex::new(&l_shape()).unwrap();

        assert_eq!(index.index_at_distance(0.0), 0);
        assert_eq!(index.index_at_distance(2.9), 1);
        assert_eq!(index.index_at_distance(3.0), 1);
        assert_eq!(index.index_at_distance(3.1), 2);
        assert_eq!(index.index_at_distance(-10.0), 0);
        assert_eq!(index.index_at_distance(100.0), 3);
    }

    #[test]
    fn test_round_trip() {
        let index = ArcLengthIndex::new(&l_shape()).unwrap();
        for i in 0..index.len() {
            assert_eq!(index.index_at_distance(index.distance_at(i)), i);
        }
    }

    #[test]
    fn test_single_sample_and_empty() {
        let index = ArcLengthIndex::new(&[Point2D::new(1.0, 1.0)]).unwrap();
        assert_eq!(index.total(), 0.0);
        assert_eq!(index.index_at_distance(5.0), 0);

        assert!(ArcLengthIndex::new(&[]).is_err());
    }

    #[test]
    fn test_non_finite_path_rejected() {
        let nan = [Point2D::new(0.0, 0.0), Point2D::new(f64::NAN, 0.0)];
        assert!(matches!(
            ArcLengthIndex::new(&nan),
            Err(GeometryError::InvalidGeometry(_))
        ));

        // Finite samples whose spacing overflows.
        let huge = [Point2D::new(-1.5e308, 0.0), Point2D::new(1.5e308, 0.0)];
        assert!(matches!(
            ArcLengthIndex::new(&huge),
            Err(GeometryError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_nan_distance_lookup() {
        let index = ArcLengthIndex::new(&l_shape()).unwrap();
        assert_eq!(index.index_at_distance(f64::NAN), 0);
        assert_eq!(index.index_at_distance(f64::INFINITY), 3);
    }
}
