//! One complete run: build the track, play it back, collect outputs.

use crate::error::SimError;
use crate::exporter::PlaybackExport;
use crate::inputs::TrackInputs;
use crate::runner::{PlaybackRunner, RunSummary, RunnerConfig};
use crate::ticker::Ticker;
use crate::visualizer::RerunLogger;
use skidpad_core::lookahead::lookahead;
use skidpad_core::{
    build_track, LookaheadConfig, LookaheadSample, PipelineOptions, Playback, PlaybackConfig, Point2D,
    TrackLayout,
};
use tracing::info;

/// Settings of a run
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Scenario name recorded in the export
    pub name: String,

    pub options: PipelineOptions,
    pub playback: PlaybackConfig,
    pub runner: RunnerConfig,

    /// Record every n-th frame; `None` disables the JSON export
    pub export_interval: Option<usize>,

    /// Compute lookahead rows from this position (path start when `None`)
    pub lookahead_from: Option<Point2D>,
    pub lookahead: LookaheadConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name: "reference".to_string(),
            options: PipelineOptions::default(),
            playback: PlaybackConfig::default(),
            runner: RunnerConfig::default(),
            export_interval: None,
            lookahead_from: None,
            lookahead: LookaheadConfig::default(),
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub layout: TrackLayout,
    pub summary: RunSummary,
    pub export: Option<PlaybackExport>,
    pub lookahead: Vec<LookaheadSample>,
}

/// Builds the track from `inputs` and plays it back at the pace of `ticker`.
pub fn run_session(
    inputs: &TrackInputs,
    config: &SessionConfig,
    ticker: &mut dyn Ticker,
    logger: &RerunLogger,
) -> Result<SessionReport, SimError> {
    let layout = build_track(&inputs.landmarks, &inputs.base_path, &config.options)?;
    logger.log_track(&layout.path, &layout.cones);

    let playback = Playback::new(layout.path.clone(), config.playback)?;
    let from = config.lookahead_from.unwrap_or(layout.path[0]);
    let rows = lookahead(
        &layout.path,
        playback.index(),
        &from,
        &inputs.boundary,
        &config.lookahead,
    )?;

    let mut export = config
        .export_interval
        .map(|interval| PlaybackExport::new(&config.name, &config.options, &layout, interval));

    let mut runner = PlaybackRunner::new(playback, config.runner.clone());
    let summary = runner.run(ticker, |event| {
        logger.log_frame(event.frame, event.render.window, event.render.heading_vector);
        if let Some(export) = export.as_mut() {
            export.record(&event);
        }
    });

    info!(
        "Played {} frames over {:.1} m ({} passes{})",
        summary.frames,
        summary.distance,
        summary.loops_completed,
        if summary.cancelled { ", cancelled" } else { "" }
    );

    Ok(SessionReport {
        layout,
        summary,
        export,
        lookahead: rows,
    })
}
