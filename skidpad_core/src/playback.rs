//! Playback State Machine: frame-by-frame traversal of the derived path.
//!
//! Each call to [`Playback::advance`] moves the cursor exactly one sample
//! forward. [`Playback::render_state`] is a pure read of the current frame:
//! the trailing window of samples within `window_length` meters behind the
//! cursor, plus a fixed-length heading vector. Timing belongs to the driver;
//! stopping playback means the driver stops calling `advance`.

use crate::arc_length::ArcLengthIndex;
use crate::error::Result;
use crate::geometry::{Path, Point2D};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Playback display parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Length of the trailing window behind the cursor (meters, default: 20)
    pub window_length: f64,

    /// Display length of the heading vector (meters, default: 5)
    pub heading_length: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            window_length: 20.0,
            heading_length: 5.0,
        }
    }
}

/// Playback lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Not started, cursor at 0
    Idle,

    /// Cursor somewhere before the last sample
    Playing,

    /// Cursor on the last sample
    Finished,
}

/// What the renderer draws for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState<'a> {
    /// Trailing samples up to and including the cursor; empty at cursor 0
    pub window: &'a [Point2D],

    /// Sample under the cursor
    pub position: Point2D,

    /// Direction of travel scaled to the display length; `None` at cursor 0
    pub heading_vector: Option<Vector2<f64>>,
}

/// Owns the animation state: cursor, window length, path and its index.
#[derive(Debug, Clone)]
pub struct Playback {
    path: Path,
    index: ArcLengthIndex,
    config: PlaybackConfig,
    cursor: usize,
    state: PlaybackState,
}

impl Playback {
    /// Takes ownership of the final path. Fails on an empty path.
    pub fn new(path: Path, config: PlaybackConfig) -> Result<Self> {
        let index = ArcLengthIndex::new(&path)?;
        Ok(Self {
            path,
            index,
            config,
            cursor: 0,
            state: PlaybackState::Idle,
        })
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    pub fn path(&self) -> &[Point2D] {
        &self.path
    }

    pub fn index(&self) -> &ArcLengthIndex {
        &self.index
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Number of frames in one pass (one per sample).
    pub fn frame_count(&self) -> usize {
        self.path.len()
    }

    /// Distance travelled at the cursor.
    pub fn distance(&self) -> f64 {
        self.index.distance_at(self.cursor)
    }

    /// Moves one sample forward; a no-op once finished.
    pub fn advance(&mut self) -> PlaybackState {
        if self.state == PlaybackState::Finished {
            return self.state;
        }

        let last = self.path.len() - 1;
        if self.cursor < last {
            self.cursor += 1;
        }
        self.state = if self.cursor == last {
            PlaybackState::Finished
        } else {
            PlaybackState::Playing
        };
        self.state
    }

    /// Back to `Idle` at cursor 0, for looping playback.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.state = PlaybackState::Idle;
    }

    /// Window and heading for the current cursor.
    pub fn render_state(&self) -> RenderState<'_> {
        let cursor = self.cursor;
        let position = self.path[cursor];

        if cursor == 0 {
            return RenderState {
                window: &[],
                position,
                heading_vector: None,
            };
        }

        let from = (self.index.distance_at(cursor) - self.config.window_length).max(0.0);
        let start = self.index.index_at_distance(from).min(cursor);

        let direction = position - self.path[cursor - 1];
        let length = direction.norm();
        let heading = if length > 0.0 {
            direction / length * self.config.heading_length
        } else {
            Vector2::zeros()
        };

        RenderState {
            window: &self.path[start..=cursor],
            position,
            heading_vector: Some(heading),
        }
    }
}
