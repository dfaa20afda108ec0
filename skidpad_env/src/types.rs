//! Raw record types produced by the sources.

use serde::{Deserialize, Serialize};

/// A cone as read from a cone source.
///
/// The colour is kept as the raw label; collapsing `orange*` variants into a
/// single gate category is done by the consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConeRecord {
    pub x: f64,
    pub y: f64,
    pub color: String,
}

impl ConeRecord {
    pub fn new(x: f64, y: f64, color: impl Into<String>) -> Self {
        Self {
            x,
            y,
            color: color.into(),
        }
    }
}

/// One sample of the base path, in the track frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    pub x: f64,
    pub y: f64,
}

impl PathRecord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for PathRecord {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}
