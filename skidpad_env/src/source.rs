//! Source traits consumed by the pipeline.

use crate::{ConeRecord, EnvError, PathRecord};

/// Supplies the cones of one track layout.
///
/// # Implementations
///
/// - **Files**: `CsvConeSource` - header `x,y,color`
/// - **Tests / presets**: `InMemorySource`
pub trait ConeSource {
    /// Loads every cone record, in source order.
    ///
    /// A malformed numeric field fails the whole load; nothing is defaulted.
    fn load_cones(&self) -> Result<Vec<ConeRecord>, EnvError>;

    /// Human readable origin, used in logs and error messages.
    fn describe(&self) -> String;
}

/// Supplies the dense base path of one full skidpad run (track frame).
pub trait PathSource {
    /// Loads every path sample, in traversal order.
    fn load_path(&self) -> Result<Vec<PathRecord>, EnvError>;

    /// Human readable origin, used in logs and error messages.
    fn describe(&self) -> String;
}
