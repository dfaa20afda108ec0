//! Skidpad Core - Reference Path Synthesis for a Skidpad Track
//!
//! Turns four hand-placed landmark cones and a precomputed base path into a
//! world-frame driving path, a synthetic cone layout and a frame-by-frame
//! playback of that path:
//!
//! 1. **Frame**: anchor pose from the landmark gates ([`FrameBuilder`])
//! 2. **Transform**: rigid mapping of the base path, gate cones ([`PathTransformer`])
//! 3. **Splice**: straight connector from an arbitrary start ([`PathSplicer`])
//! 4. **Smooth**: optional spline refit and resampling ([`Smoother`])
//! 5. **Playback**: arc-length windowing and heading ([`Playback`])
//!
//! # Usage
//!
//! ```ignore
//! use skidpad_core::{build_track, Landmarks, PipelineOptions, Playback, PlaybackConfig};
//!
//! let layout = build_track(&landmarks, &base_path, &PipelineOptions::default())?;
//! let mut playback = Playback::new(layout.path, PlaybackConfig::default())?;
//! while !playback.is_finished() {
//!     playback.advance();
//!     let frame = playback.render_state();
//!     draw(frame.window, frame.heading_vector);
//! }
//! ```

pub mod arc_length;
pub mod cones;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod lookahead;
pub mod pipeline;
pub mod playback;
pub mod smooth;
pub mod splice;
pub mod transform;

// Re-export key types for convenience
pub use arc_length::ArcLengthIndex;
pub use cones::{Cone, ConeColor, ConeRole, ConeSet, ObservedCone};
pub use error::GeometryError;
pub use frame::{AnchorFrame, FrameBuilder, Landmarks};
pub use geometry::{Path, Point2D, Pose};
pub use lookahead::{LookaheadConfig, LookaheadSample, PathSample};
pub use pipeline::{base_path_from_records, build_path, build_track, PipelineOptions, TrackLayout};
pub use playback::{Playback, PlaybackConfig, PlaybackState, RenderState};
pub use smooth::{Smoother, SmootherConfig};
pub use splice::PathSplicer;
pub use transform::{make_gate_pair, GateGeometry, PathTransformer};
