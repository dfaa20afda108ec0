//! Error types for the playback driver.

use skidpad_core::GeometryError;
use skidpad_env::EnvError;
use thiserror::Error;

/// Everything that can abort a run before playback starts.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Source error: {0}")]
    Source(#[from] EnvError),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
