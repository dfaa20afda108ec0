//! Ticker-driven playback loop.

use crate::ticker::Ticker;
use skidpad_core::{Playback, PlaybackState, RenderState};
use tracing::debug;

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Passes over the path; 0 repeats until the ticker or frame limit stops the run
    pub loops: usize,

    /// Hard limit on rendered frames
    pub max_frames: Option<usize>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            loops: 1,
            max_frames: None,
        }
    }
}

/// One rendered frame, handed to the frame callback.
#[derive(Debug, Clone)]
pub struct FrameEvent<'a> {
    /// Frame number across all loops, starting at 0
    pub frame: usize,

    /// Pass over the path this frame belongs to
    pub loop_index: usize,

    pub cursor: usize,

    /// Arc length travelled in the current pass
    pub distance: f64,

    pub render: RenderState<'a>,
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: usize,
    pub loops_completed: usize,

    /// Arc length travelled over all passes
    pub distance: f64,

    /// True when the ticker or frame limit ended the run early
    pub cancelled: bool,
}

/// Advances a [`Playback`] once per tick and renders every step.
pub struct PlaybackRunner {
    playback: Playback,
    config: RunnerConfig,
}

impl PlaybackRunner {
    pub fn new(playback: Playback, config: RunnerConfig) -> Self {
        Self { playback, config }
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Runs until the configured loops complete or the run is cancelled.
    pub fn run<T, F>(&mut self, ticker: &mut T, mut on_frame: F) -> RunSummary
    where
        T: Ticker + ?Sized,
        F: FnMut(FrameEvent<'_>),
    {
        let total = self.playback.index().total();
        let mut frames = 0;
        let mut loops_completed = 0;
        let mut cancelled = false;
        // The first frame of each pass shows the cursor-0 state.
        let mut pass_start = true;

        loop {
            if self.config.max_frames.is_some_and(|max| frames >= max) || !ticker.tick() {
                cancelled = true;
                break;
            }

            let state = if pass_start && self.playback.frame_count() > 1 {
                self.playback.state()
            } else {
                self.playback.advance()
            };
            pass_start = false;
            on_frame(FrameEvent {
                frame: frames,
                loop_index: loops_completed,
                cursor: self.playback.cursor(),
                distance: self.playback.distance(),
                render: self.playback.render_state(),
            });
            frames += 1;

            if state == PlaybackState::Finished {
                loops_completed += 1;
                debug!("Pass {} finished after {} frames", loops_completed, frames);
                if self.config.loops > 0 && loops_completed >= self.config.loops {
                    break;
                }
                self.playback.reset();
                pass_start = true;
            }
        }

        let partial = if self.playback.is_finished() {
            0.0
        } else {
            self.playback.distance()
        };

        RunSummary {
            frames,
            loops_completed,
            distance: loops_completed as f64 * total + partial,
            cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::ImmediateTicker;
    use skidpad_core::{PlaybackConfig, Point2D};

    fn playback(n: usize) -> Playback {
        let path = (0..n).map(|i| Point2D::new(i as f64, 0.0)).collect();
        Playback::new(path, PlaybackConfig::default()).unwrap()
    }

    #[test]
    fn test_single_pass() {
        let mut runner = PlaybackRunner::new(playback(6), RunnerConfig::default());
        let mut cursors = Vec::new();
        let summary = runner.run(&mut ImmediateTicker::new(), |event| cursors.push(event.cursor));

        assert_eq!(cursors, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(summary.frames, 6);
        assert_eq!(summary.loops_completed, 1);
        assert_eq!(summary.distance, 5.0);
        assert!(!summary.cancelled);
    }

    #[test]
    fn test_loops_restart_from_origin() {
        let config = RunnerConfig {
            loops: 2,
            max_frames: None,
        };
        let mut runner = PlaybackRunner::new(playback(3), config);
        let mut cursors = Vec::new();
        let summary = runner.run(&mut ImmediateTicker::new(), |event| {
            cursors.push((event.loop_index, event.cursor))
        });

        assert_eq!(cursors, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
        assert_eq!(summary.distance, 4.0);
    }

    #[test]
    fn test_frame_limit_cancels() {
        let config = RunnerConfig {
            loops: 0,
            max_frames: Some(7),
        };
        let mut runner = PlaybackRunner::new(playback(4), config);
        let summary = runner.run(&mut ImmediateTicker::new(), |_| {});

        assert_eq!(summary.frames, 7);
        assert_eq!(summary.loops_completed, 1);
        assert_eq!(summary.distance, 5.0);
        assert!(summary.cancelled);
    }

    #[test]
    fn test_first_frame_of_pass_is_idle() {
        let mut runner = PlaybackRunner::new(playback(4), RunnerConfig::default());
        let mut first = None;
        runner.run(&mut ImmediateTicker::new(), |event| {
            if event.frame == 0 {
                first = Some((event.cursor, event.render.window.len(), event.render.heading_vector));
            }
        });

        assert_eq!(first, Some((0, 0, None)));
    }

    #[test]
    fn test_single_sample_pass() {
        let mut runner = PlaybackRunner::new(playback(1), RunnerConfig::default());
        let summary = runner.run(&mut ImmediateTicker::new(), |_| {});

        assert_eq!(summary.frames, 1);
        assert_eq!(summary.loops_completed, 1);
    }

    #[test]
    fn test_ticker_cancels() {
        let mut runner = PlaybackRunner::new(playback(10), RunnerConfig::default());
        let summary = runner.run(&mut ImmediateTicker::limited(3), |_| {});

        assert_eq!(summary.frames, 3);
        assert_eq!(summary.loops_completed, 0);
        assert!(summary.cancelled);
    }
}
