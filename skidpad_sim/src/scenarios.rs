//! Named presets of pipeline options.

use skidpad_core::{PipelineOptions, Point2D};

/// Start point used by the random-start presets.
pub const RANDOM_START: (f64, f64) = (-20.0, -20.0);

/// Layout rotation used by the rotated presets (degrees).
pub const ROTATION_DEG: f64 = 30.0;

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    /// Landmarks as given, path started on the entry straight
    Reference,

    /// Vehicle starts away from the track and joins through a connector
    RandomStart,

    /// Landmark layout rotated before the frame is derived
    Rotated,

    /// Path refit as a smoothing spline
    Smoothed,

    /// Rotated layout combined with an external start
    RotatedRandomStart,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::Reference,
            ScenarioId::RandomStart,
            ScenarioId::Rotated,
            ScenarioId::Smoothed,
            ScenarioId::RotatedRandomStart,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::Reference => "reference",
            ScenarioId::RandomStart => "random_start",
            ScenarioId::Rotated => "rotated",
            ScenarioId::Smoothed => "smoothed",
            ScenarioId::RotatedRandomStart => "rotated_random_start",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::Reference => "Base path mapped onto the landmark frame, no extras",
            ScenarioId::RandomStart => "Straight connector from (-20, -20) onto the nearest sample",
            ScenarioId::Rotated => "Landmark layout rotated 30° clockwise about its centroid",
            ScenarioId::Smoothed => "Cubic smoothing spline resampled to 2000 points",
            ScenarioId::RotatedRandomStart => "Rotated layout joined from (-20, -20)",
        }
    }

    /// Pipeline options for this preset.
    pub fn options(&self) -> PipelineOptions {
        let start = Some(Point2D::new(RANDOM_START.0, RANDOM_START.1));
        match self {
            ScenarioId::Reference => PipelineOptions::default(),
            ScenarioId::RandomStart => PipelineOptions {
                external_start: start,
                ..Default::default()
            },
            ScenarioId::Rotated => PipelineOptions {
                rotation_deg: ROTATION_DEG,
                ..Default::default()
            },
            ScenarioId::Smoothed => PipelineOptions {
                use_smoothing: true,
                smoothing_fallback: true,
                ..Default::default()
            },
            ScenarioId::RotatedRandomStart => PipelineOptions {
                rotation_deg: ROTATION_DEG,
                external_start: start,
                ..Default::default()
            },
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reference" | "default" => Ok(ScenarioId::Reference),
            "random_start" | "randomstart" => Ok(ScenarioId::RandomStart),
            "rotated" => Ok(ScenarioId::Rotated),
            "smoothed" | "smooth" => Ok(ScenarioId::Smoothed),
            "rotated_random_start" | "rotatedrandomstart" => Ok(ScenarioId::RotatedRandomStart),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}
