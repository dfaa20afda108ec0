//! Cone categories: colours read from a cone source and roles in the layout.

use crate::geometry::Point2D;
use serde::{Deserialize, Serialize};
use skidpad_env::ConeRecord;
use tracing::warn;

/// Colour label of an observed cone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConeColor {
    /// Left track boundary
    Blue,

    /// Right track boundary
    Yellow,

    /// Gate / landmark cones. Every `orange*` label collapses here.
    Orange,
}

impl ConeColor {
    /// Parses a source label. Unknown labels return `None`.
    ///
    /// Any label starting with `orange` (e.g. `orange_big`) is treated as a
    /// single gate category; sub-variants carry no separate meaning here.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_ascii_lowercase();
        match label.as_str() {
            "blue" => Some(ConeColor::Blue),
            "yellow" => Some(ConeColor::Yellow),
            l if l.starts_with("orange") => Some(ConeColor::Orange),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConeColor::Blue => "blue",
            ConeColor::Yellow => "yellow",
            ConeColor::Orange => "orange",
        }
    }
}

impl std::fmt::Display for ConeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A cone as observed in the world, tagged by colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservedCone {
    pub position: Point2D,
    pub color: ConeColor,
}

impl ObservedCone {
    pub fn new(x: f64, y: f64, color: ConeColor) -> Self {
        Self {
            position: Point2D::new(x, y),
            color,
        }
    }

    /// Converts raw source records, skipping labels that name no known colour.
    pub fn from_records(records: &[ConeRecord]) -> Vec<Self> {
        records
            .iter()
            .filter_map(|r| match ConeColor::from_label(&r.color) {
                Some(color) => Some(Self::new(r.x, r.y, color)),
                None => {
                    warn!("Skipping cone at ({}, {}) with unknown colour '{}'", r.x, r.y, r.color);
                    None
                }
            })
            .collect()
    }
}

/// Role of a cone in the synthesized layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConeRole {
    /// One of the four cones defining the anchor frame
    Landmark,

    /// Synthesized at the first sample of the path
    GateStart,

    /// Synthesized at the last sample of the path
    GateEnd,
}

/// A cone placed in the layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cone {
    pub position: Point2D,
    pub role: ConeRole,
}

/// Ordered cone layout of the track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConeSet {
    cones: Vec<Cone>,
}

impl ConeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every point with the same role.
    pub fn extend_role(&mut self, points: impl IntoIterator<Item = Point2D>, role: ConeRole) {
        self.cones
            .extend(points.into_iter().map(|position| Cone { position, role }));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cone> {
        self.cones.iter()
    }

    /// Positions of the cones with the given role, in order.
    pub fn positions(&self, role: ConeRole) -> Vec<Point2D> {
        self.cones
            .iter()
            .filter(|c| c.role == role)
            .map(|c| c.position)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cones.is_empty()
    }
}
