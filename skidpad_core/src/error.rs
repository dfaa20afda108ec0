//! Error types for the geometry pipeline.

use thiserror::Error;

/// Errors raised while constructing the derived path.
///
/// All of them are fatal to the one-shot pipeline: each stage feeds the next,
/// so there is no partial path to fall back on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Entry and exit gate midpoints coincide, so no heading can be derived
    #[error("Degenerate frame: gate midpoints coincide at ({x:.3}, {y:.3})")]
    DegenerateFrame { x: f64, y: f64 },

    /// NaN or infinite coordinates, or an out-of-range numeric parameter
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Too few samples for an operation that traverses the path
    #[error("Path too short: {found} samples, need at least {required}")]
    EmptyPath { required: usize, found: usize },

    /// Not enough distinct samples to fit a curve
    #[error("Insufficient points for smoothing: {found} distinct samples, need at least 2")]
    InsufficientPoints { found: usize },

    /// The curve fit was numerically singular or produced non-finite output
    #[error("Smoothing failed: {0}")]
    SmoothingFailed(String),

    /// The cone list did not contain exactly four landmark cones
    #[error("Expected exactly 4 landmark cones, found {0}")]
    LandmarkCount(usize),
}

impl GeometryError {
    /// Creates an invalid geometry error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Creates a smoothing failure.
    pub fn smoothing(msg: impl Into<String>) -> Self {
        Self::SmoothingFailed(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GeometryError>;
