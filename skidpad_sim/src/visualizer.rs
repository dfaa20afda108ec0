//! Rerun rendering of the playback.
//!
//! Visualization is optional and only available with the `visualization` feature.
//!
//! # What Gets Logged
//!
//! - The derived path as a static grey line strip
//! - Landmark cones in orange, gate cones in white
//! - Per frame: the trailing window as a red line and the heading arrow,
//!   on the `frame` timeline

use nalgebra::Vector2;
#[cfg(feature = "visualization")]
use rerun::{Arrows2D, Color, LineStrips2D, Points2D, Radius, RecordingStream};
#[cfg(feature = "visualization")]
use skidpad_core::ConeRole;
use skidpad_core::{ConeSet, Point2D};

#[cfg(feature = "visualization")]
fn to_f32(points: &[Point2D]) -> Vec<[f32; 2]> {
    points.iter().map(|p| [p.x as f32, p.y as f32]).collect()
}

/// Rerun logger for playback visualization.
pub struct RerunLogger {
    #[cfg(feature = "visualization")]
    rec: Option<RecordingStream>,

    /// Whether visualization is enabled
    enabled: bool,
}

impl RerunLogger {
    /// Creates a new logger with visualization disabled.
    pub fn disabled() -> Self {
        Self {
            #[cfg(feature = "visualization")]
            rec: None,
            enabled: false,
        }
    }

    /// Creates a new logger with visualization enabled.
    #[cfg(feature = "visualization")]
    pub fn new(name: &str) -> Self {
        match rerun::RecordingStreamBuilder::new(name).spawn() {
            Ok(rec) => {
                tracing::info!("Rerun visualization enabled - open Rerun Viewer to follow playback");
                Self {
                    rec: Some(rec),
                    enabled: true,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to initialize Rerun: {:?}", e);
                Self::disabled()
            }
        }
    }

    /// Creates a logger - returns disabled if visualization feature not enabled.
    #[cfg(not(feature = "visualization"))]
    pub fn new(_name: &str) -> Self {
        tracing::info!("Rerun visualization not available (compile with --features visualization)");
        Self::disabled()
    }

    /// Returns whether visualization is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs the full path and the cone layout once, outside the timeline.
    #[cfg(feature = "visualization")]
    pub fn log_track(&self, path: &[Point2D], cones: &ConeSet) {
        if let Some(ref rec) = self.rec {
            let _ = rec.log_static(
                "track/path",
                &LineStrips2D::new([to_f32(path)]).with_colors([Color::from_rgb(160, 160, 160)]),
            );

            for (role, name, color) in [
                (ConeRole::Landmark, "landmarks", Color::from_rgb(255, 140, 0)),
                (ConeRole::GateStart, "gate_start", Color::from_rgb(240, 240, 240)),
                (ConeRole::GateEnd, "gate_end", Color::from_rgb(240, 240, 240)),
            ] {
                let _ = rec.log_static(
                    format!("track/cones/{}", name),
                    &Points2D::new(to_f32(&cones.positions(role)))
                        .with_colors([color])
                        .with_radii([Radius::new_scene_units(0.3)]),
                );
            }
        }
    }

    #[cfg(not(feature = "visualization"))]
    pub fn log_track(&self, _path: &[Point2D], _cones: &ConeSet) {}

    /// Logs the trailing window and heading arrow of one frame.
    #[cfg(feature = "visualization")]
    pub fn log_frame(&self, frame: usize, window: &[Point2D], heading: Option<Vector2<f64>>) {
        if let Some(ref rec) = self.rec {
            rec.set_time_sequence("frame", frame as i64);

            let _ = rec.log(
                "vehicle/window",
                &LineStrips2D::new([to_f32(window)]).with_colors([Color::from_rgb(220, 40, 40)]),
            );

            if let (Some(heading), Some(position)) = (heading, window.last()) {
                let _ = rec.log(
                    "vehicle/heading",
                    &Arrows2D::from_vectors([[heading.x as f32, heading.y as f32]])
                        .with_origins([[position.x as f32, position.y as f32]])
                        .with_colors([Color::from_rgb(40, 40, 220)]),
                );
            }
        }
    }

    #[cfg(not(feature = "visualization"))]
    pub fn log_frame(&self, _frame: usize, _window: &[Point2D], _heading: Option<Vector2<f64>>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_logger() {
        let logger = RerunLogger::disabled();
        assert!(!logger.is_enabled());

        // These should be no-ops
        logger.log_track(&[Point2D::new(0.0, 0.0)], &ConeSet::new());
        logger.log_frame(1, &[Point2D::new(0.0, 0.0)], Some(Vector2::new(5.0, 0.0)));
    }
}
