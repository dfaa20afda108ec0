//! One-shot construction of the derived path.
//!
//! ```text
//! landmarks ─► FrameBuilder ─► Pose ─► PathTransformer ─► world path + gate cones
//!                                                          │
//!                             subsample(stride) ◄──────────┘
//!                                   │
//!                             PathSplicer (external start)
//!                                   │
//!                             Smoother (optional)
//!                                   ▼
//!                               TrackLayout
//! ```
//!
//! Every stage either succeeds or aborts the whole construction; no partial
//! path is ever returned.

use crate::cones::{ConeRole, ConeSet};
use crate::error::{GeometryError, Result};
use crate::frame::{FrameBuilder, Landmarks};
use crate::geometry::{subsample, Path, Point2D, Pose};
use crate::smooth::{Smoother, SmootherConfig};
use crate::splice::{PathSplicer, DEFAULT_CONNECTOR_COUNT};
use crate::transform::{GateGeometry, PathTransformer};
use serde::{Deserialize, Serialize};
use skidpad_env::PathRecord;
use tracing::{debug, info};

/// Options controlling path construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Rotation of the landmark layout about its centroid (degrees, positive = clockwise)
    pub rotation_deg: f64,

    /// Where the vehicle starts; `None` starts on the path itself
    pub external_start: Option<Point2D>,

    /// Refit the path as a smoothing spline
    pub use_smoothing: bool,

    /// Residual budget of the smoothing fit
    pub smoothing_s: f64,

    /// Samples produced by the smoother
    pub output_sample_count: usize,

    /// Maximum spline degree
    pub max_degree: usize,

    /// Keep every `stride`-th base path sample for playback
    pub stride: usize,

    /// Connector samples between the external start and the path
    pub connector_count: usize,

    /// Half distance between the cones of a synthesized gate pair
    pub gate_spacing: f64,

    /// Depth of a synthesized gate along the heading
    pub gate_width: f64,

    /// Retry smoothing with lower degrees when the fit fails
    pub smoothing_fallback: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        let smoother = SmootherConfig::default();
        let gate = GateGeometry::default();
        Self {
            rotation_deg: 0.0,
            external_start: None,
            use_smoothing: false,
            smoothing_s: smoother.smoothing,
            output_sample_count: smoother.sample_count,
            max_degree: smoother.max_degree,
            stride: 10,
            connector_count: DEFAULT_CONNECTOR_COUNT,
            gate_spacing: gate.spacing,
            gate_width: gate.width,
            smoothing_fallback: false,
        }
    }
}

impl PipelineOptions {
    pub fn smoother_config(&self) -> SmootherConfig {
        SmootherConfig {
            sample_count: self.output_sample_count,
            smoothing: self.smoothing_s,
            max_degree: self.max_degree,
            ..SmootherConfig::default()
        }
    }

    pub fn gate_geometry(&self) -> GateGeometry {
        GateGeometry {
            spacing: self.gate_spacing,
            width: self.gate_width,
        }
    }
}

/// Result of path construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackLayout {
    /// Anchor pose of the track
    pub pose: Pose,

    /// Derived world-frame path, ready for playback
    pub path: Path,

    /// Gate-start cones, landmarks and gate-end cones, in that order
    pub cones: ConeSet,
}

/// Converts raw base path records into points.
pub fn base_path_from_records(records: &[PathRecord]) -> Path {
    records.iter().map(|r| Point2D::new(r.x, r.y)).collect()
}

/// Builds the derived path together with its pose and cone layout.
pub fn build_track(
    landmarks: &Landmarks,
    base_path: &[Point2D],
    options: &PipelineOptions,
) -> Result<TrackLayout> {
    if base_path.is_empty() {
        return Err(GeometryError::EmptyPath {
            required: 1,
            found: 0,
        });
    }

    let frame = FrameBuilder::new()
        .with_rotation(options.rotation_deg)
        .build(landmarks)?;

    let transformer = PathTransformer::new(frame.pose)?;
    let world = transformer.transform(base_path)?;

    let mut cones = ConeSet::new();
    let gates = transformer.gate_cones(&world, &options.gate_geometry())?;
    cones.extend_role(gates.positions(ConeRole::GateStart), ConeRole::GateStart);
    cones.extend_role(frame.landmarks.points().iter().copied(), ConeRole::Landmark);
    cones.extend_role(gates.positions(ConeRole::GateEnd), ConeRole::GateEnd);

    let stepped = subsample(&world, options.stride)?;
    debug!(
        "Subsampled {} -> {} samples (stride {})",
        world.len(),
        stepped.len(),
        options.stride
    );

    let path = match options.external_start {
        Some(start) => PathSplicer::new(options.connector_count).splice(&stepped, Some(start))?,
        None => stepped,
    };

    let path = if options.use_smoothing {
        let smoother = Smoother::new(options.smoother_config());
        if options.smoothing_fallback {
            smoother.smooth_with_fallback(&path)?
        } else {
            smoother.smooth(&path)?
        }
    } else {
        path
    };

    info!(
        "Built track: {} samples, {} cones, heading {:.2}°",
        path.len(),
        cones.len(),
        frame.pose.heading_degrees()
    );

    Ok(TrackLayout {
        pose: frame.pose,
        path,
        cones,
    })
}

/// Builds only the derived path.
pub fn build_path(
    landmarks: &Landmarks,
    base_path: &[Point2D],
    options: &PipelineOptions,
) -> Result<Path> {
    build_track(landmarks, base_path, options).map(|layout| layout.path)
}
