//! In-memory source used by tests and built-in scenarios.

use crate::{ConeRecord, ConeSource, EnvError, PathRecord, PathSource};

/// A source backed by vectors owned in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    name: String,
    cones: Vec<ConeRecord>,
    path: Vec<PathRecord>,
}

impl InMemorySource {
    /// Creates an empty source with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Replaces the cone records.
    pub fn with_cones(mut self, cones: Vec<ConeRecord>) -> Self {
        self.cones = cones;
        self
    }

    /// Replaces the path samples.
    pub fn with_path<P: Into<PathRecord>>(mut self, path: impl IntoIterator<Item = P>) -> Self {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }
}

impl ConeSource for InMemorySource {
    fn load_cones(&self) -> Result<Vec<ConeRecord>, EnvError> {
        Ok(self.cones.clone())
    }

    fn describe(&self) -> String {
        format!("memory:{}", self.name)
    }
}

impl PathSource for InMemorySource {
    fn load_path(&self) -> Result<Vec<PathRecord>, EnvError> {
        if self.path.is_empty() {
            return Err(EnvError::EmptySource(PathSource::describe(self)));
        }
        Ok(self.path.clone())
    }

    fn describe(&self) -> String {
        format!("memory:{}", self.name)
    }
}
