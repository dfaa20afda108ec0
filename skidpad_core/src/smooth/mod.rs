//! Smoother: optional refit of the derived path as a smooth parametric curve.
//!
//! 1. Consecutive exactly-equal samples are dropped (the first is kept).
//! 2. The curve degree is clamped to the number of distinct samples minus one.
//! 3. A smoothing B-spline is fitted over chord-length parameters and
//!    resampled at a fixed number of evenly spaced parameter values.

pub mod bspline;

use crate::error::{GeometryError, Result};
use crate::geometry::{ensure_all_finite, Path, Point2D};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Highest supported curve degree.
pub const MAX_DEGREE: usize = 5;

/// Smoother configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmootherConfig {
    /// Number of output samples (default: 2000)
    pub sample_count: usize,

    /// Upper bound on the sum of squared residuals (default: 0.5)
    pub smoothing: f64,

    /// Maximum curve degree, clamped to 1..=5 (default: 3)
    pub max_degree: usize,

    /// Cap on control points, bounding the fit cost (default: 128)
    pub max_control_points: usize,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            sample_count: 2000,
            smoothing: 0.5,
            max_degree: 3,
            max_control_points: 128,
        }
    }
}

/// Refits a path as a smoothing spline.
#[derive(Debug, Clone, Default)]
pub struct Smoother {
    config: SmootherConfig,
}

impl Smoother {
    pub fn new(config: SmootherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SmootherConfig {
        &self.config
    }

    /// Drops every sample equal to its immediate predecessor.
    pub fn dedup(path: &[Point2D]) -> Path {
        let mut out: Path = Vec::with_capacity(path.len());
        for p in path {
            if out.last() != Some(p) {
                out.push(*p);
            }
        }
        out
    }

    /// Degree usable with `distinct` samples.
    pub fn effective_degree(&self, distinct: usize) -> Result<usize> {
        if distinct < 2 {
            return Err(GeometryError::InsufficientPoints { found: distinct });
        }
        let max_degree = self.config.max_degree.clamp(1, MAX_DEGREE);
        Ok(max_degree.min(distinct - 1))
    }

    /// Deduplicates, fits and resamples `path`.
    pub fn smooth(&self, path: &[Point2D]) -> Result<Path> {
        let distinct = self.prepare(path)?;
        let degree = self.effective_degree(distinct.len())?;
        self.fit_at_degree(&distinct, degree)
    }

    /// Like [`Smoother::smooth`], retrying with lower degrees on fit failure.
    pub fn smooth_with_fallback(&self, path: &[Point2D]) -> Result<Path> {
        let distinct = self.prepare(path)?;
        let top = self.effective_degree(distinct.len())?;

        step_down(top, |degree| self.fit_at_degree(&distinct, degree))
    }

    fn prepare(&self, path: &[Point2D]) -> Result<Path> {
        if self.config.sample_count == 0 {
            return Err(GeometryError::invalid("smoothing output sample count must be positive"));
        }
        if !(self.config.smoothing.is_finite() && self.config.smoothing >= 0.0) {
            return Err(GeometryError::invalid(format!(
                "smoothing factor must be finite and non-negative, got {}",
                self.config.smoothing
            )));
        }
        ensure_all_finite(path, "path")?;

        let distinct = Self::dedup(path);
        debug!(
            "Smoother: {} samples, {} after dedup",
            path.len(),
            distinct.len()
        );
        Ok(distinct)
    }

    fn fit_at_degree(&self, distinct: &[Point2D], degree: usize) -> Result<Path> {
        let fit = bspline::fit(
            distinct,
            degree,
            self.config.smoothing,
            self.config.max_control_points,
        )?;
        debug!(
            "Fitted degree {} spline: {} control points, residual={:.4}, lambda={:e}",
            degree,
            fit.spline.control_points().len(),
            fit.residual,
            fit.lambda
        );

        let out = fit.spline.sample(self.config.sample_count);
        if out.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(GeometryError::smoothing("curve evaluation produced non-finite samples"));
        }
        Ok(out)
    }
}

/// Tries `fit` from degree `top` down to 1, moving on only after
/// `SmoothingFailed`.
fn step_down<F>(top: usize, mut fit: F) -> Result<Path>
where
    F: FnMut(usize) -> Result<Path>,
{
    let mut last_err = None;
    for degree in (1..=top).rev() {
        match fit(degree) {
            Ok(out) => return Ok(out),
            Err(e @ GeometryError::SmoothingFailed(_)) => {
                warn!("Smoothing at degree {} failed: {}", degree, e);
                last_err = Some(e);
            }
            Err(e) => return Err(e),
        }
    }
    Err(last_err.unwrap_or_else(|| GeometryError::smoothing("no degree left to try")))
}
