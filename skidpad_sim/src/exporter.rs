//! Playback export: JSON frames for offline rendering, CSV lookahead rows.

use crate::error::SimError;
use crate::runner::FrameEvent;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use skidpad_core::{ConeSet, LookaheadSample, PipelineOptions, Point2D, Pose, TrackLayout};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Column order of the lookahead CSV.
pub const LOOKAHEAD_HEADER: [&str; 6] = ["s", "x", "y", "curvature", "d_left", "d_right"];

/// A single rendered frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    pub frame: usize,

    /// Sample index of the vehicle
    pub cursor: usize,

    /// Arc length travelled in the current pass (m)
    pub distance: f64,

    /// Trailing window, oldest sample first
    pub window: Vec<Point2D>,

    /// Heading arrow; absent on the first frame of a pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<Vector2<f64>>,
}

impl From<&FrameEvent<'_>> for FrameRecord {
    fn from(event: &FrameEvent<'_>) -> Self {
        Self {
            frame: event.frame,
            cursor: event.cursor,
            distance: event.distance,
            window: event.render.window.to_vec(),
            heading: event.render.heading_vector,
        }
    }
}

/// Complete playback export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackExport {
    /// Scenario name
    pub scenario: String,

    /// Options the path was built with
    pub options: PipelineOptions,

    pub pose: Pose,
    pub cones: ConeSet,

    /// Full derived path
    pub path: Vec<Point2D>,

    /// Every `frame_interval`-th frame is recorded
    pub frame_interval: usize,

    /// Recorded frames
    pub frames: Vec<FrameRecord>,
}

impl PlaybackExport {
    /// Creates a new export container.
    pub fn new(scenario: &str, options: &PipelineOptions, layout: &TrackLayout, frame_interval: usize) -> Self {
        Self {
            scenario: scenario.to_string(),
            options: options.clone(),
            pose: layout.pose,
            cones: layout.cones.clone(),
            path: layout.path.clone(),
            frame_interval: frame_interval.max(1),
            frames: Vec::new(),
        }
    }

    /// Records the frame if it falls on the export interval.
    pub fn record(&mut self, event: &FrameEvent<'_>) {
        if event.frame % self.frame_interval == 0 {
            self.frames.push(FrameRecord::from(event));
        }
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

fn optional_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes lookahead rows as CSV; a missing boundary distance is an empty field.
pub fn write_lookahead<W: Write>(writer: W, rows: &[LookaheadSample]) -> Result<(), SimError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(LOOKAHEAD_HEADER)?;
    for row in rows {
        let s = &row.sample;
        wtr.write_record([
            s.s.to_string(),
            s.x.to_string(),
            s.y.to_string(),
            s.curvature.to_string(),
            optional_field(row.d_left),
            optional_field(row.d_right),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes lookahead rows to a CSV file.
pub fn write_lookahead_file(path: impl AsRef<Path>, rows: &[LookaheadSample]) -> Result<(), SimError> {
    let file = File::create(path)?;
    write_lookahead(file, rows)
}
