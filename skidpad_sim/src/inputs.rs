//! Loading landmarks, boundary cones and the base path from sources.

use crate::error::SimError;
use skidpad_core::{base_path_from_records, ConeColor, Landmarks, ObservedCone, Path};
use skidpad_env::{ConeSource, PathSource};
use tracing::{debug, info};

/// Everything the pipeline and the lookahead need from outside.
#[derive(Debug, Clone)]
pub struct TrackInputs {
    /// The four orange cones anchoring the track frame
    pub landmarks: Landmarks,

    /// Blue and yellow cones, used for boundary distances
    pub boundary: Vec<ObservedCone>,

    /// Base path in the track frame
    pub base_path: Path,
}

impl TrackInputs {
    /// Reads both sources and splits the cones by colour.
    pub fn load(cones: &dyn ConeSource, path: &dyn PathSource) -> Result<Self, SimError> {
        let records = cones.load_cones()?;
        let observed = ObservedCone::from_records(&records);
        let landmarks = Landmarks::from_observed(&observed)?;
        let boundary: Vec<ObservedCone> = observed
            .into_iter()
            .filter(|c| c.color != ConeColor::Orange)
            .collect();
        debug!(
            "Loaded {} cone records from {} ({} boundary)",
            records.len(),
            cones.describe(),
            boundary.len()
        );

        let base_path = base_path_from_records(&path.load_path()?);
        info!("Loaded {} base path samples from {}", base_path.len(), path.describe());

        Ok(Self {
            landmarks,
            boundary,
            base_path,
        })
    }
}
