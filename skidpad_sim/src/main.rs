//! Skidpad playback CLI
//!
//! Builds the reference path for a scenario and replays it frame by frame.

use clap::Parser;
use skidpad_core::{PipelineOptions, PlaybackConfig, Point2D};
use skidpad_env::{ConeSource, CsvConeSource, CsvPathSource, PathSource};
use skidpad_sim::scenarios::ScenarioId;
use skidpad_sim::{
    reference, run_session, write_lookahead_file, ImmediateTicker, IntervalTicker, RerunLogger, RunnerConfig,
    SessionConfig, SessionReport, SimError, Ticker, TrackInputs,
};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Skidpad path synthesis and playback
#[derive(Parser, Debug)]
#[command(name = "skidpad-sim")]
#[command(about = "Build the skidpad reference path and play it back", long_about = None)]
struct Args {
    /// Scenario preset (reference, random_start, rotated, smoothed, rotated_random_start)
    #[arg(short = 'S', long, default_value = "reference")]
    scenario: String,

    /// Cone CSV with header `x,y,color` (built-in layout when omitted)
    #[arg(long)]
    cones: Option<PathBuf>,

    /// Base path CSV, two columns without header (built-in path when omitted)
    #[arg(long)]
    base_path: Option<PathBuf>,

    /// JSON file with pipeline options, replacing the scenario preset
    #[arg(long)]
    options: Option<PathBuf>,

    /// Layout rotation in degrees, positive = clockwise
    #[arg(short, long, allow_hyphen_values = true)]
    rotation: Option<f64>,

    /// External start point as `x,y`
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    start: Option<Point2D>,

    /// Refit the path as a smoothing spline
    #[arg(long)]
    smooth: bool,

    /// Keep every n-th base path sample
    #[arg(long)]
    stride: Option<usize>,

    /// Delay between frames in milliseconds (0 = as fast as possible)
    #[arg(short, long, default_value_t = skidpad_sim::DEFAULT_INTERVAL_MS)]
    interval_ms: u64,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<usize>,

    /// Passes over the path (0 = repeat until --max-frames)
    #[arg(long, default_value = "1")]
    loops: usize,

    /// Export playback frames to a JSON file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Record every n-th frame in the export
    #[arg(long, default_value = "1")]
    export_every: usize,

    /// Write lookahead samples from the path start to a CSV file
    #[arg(long)]
    lookahead: Option<PathBuf>,

    /// List scenarios and exit
    #[arg(long)]
    list: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON summary on stdout
    #[arg(long)]
    json: bool,

    /// Stream the playback to a Rerun viewer
    #[arg(long)]
    visualize: bool,
}

fn parse_point(s: &str) -> Result<Point2D, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{}`", s))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x `{}`: {}", x, e))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y `{}`: {}", y, e))?;
    Ok(Point2D::new(x, y))
}

fn resolve_options(args: &Args, scenario: ScenarioId) -> Result<PipelineOptions, SimError> {
    let mut options = match &args.options {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => scenario.options(),
    };

    if let Some(rotation) = args.rotation {
        options.rotation_deg = rotation;
    }
    if let Some(start) = args.start {
        options.external_start = Some(start);
    }
    if args.smooth {
        options.use_smoothing = true;
    }
    if let Some(stride) = args.stride {
        options.stride = stride;
    }
    Ok(options)
}

fn load_inputs(args: &Args) -> Result<TrackInputs, SimError> {
    let builtin = reference::reference_source()?;
    let csv_cones = args.cones.as_ref().map(CsvConeSource::new);
    let csv_path = args.base_path.as_ref().map(CsvPathSource::new);

    let cones: &dyn ConeSource = match &csv_cones {
        Some(source) => source,
        None => &builtin,
    };
    let path: &dyn PathSource = match &csv_path {
        Some(source) => source,
        None => &builtin,
    };
    TrackInputs::load(cones, path)
}

fn run(args: &Args, scenario: ScenarioId) -> Result<SessionReport, SimError> {
    if args.export_every == 0 {
        return Err(SimError::Config("--export-every must be at least 1".to_string()));
    }
    if args.loops == 0 && args.max_frames.is_none() {
        return Err(SimError::Config("--loops 0 needs --max-frames".to_string()));
    }

    let options = resolve_options(args, scenario)?;
    let inputs = load_inputs(args)?;

    let config = SessionConfig {
        name: scenario.name().to_string(),
        options,
        playback: PlaybackConfig::default(),
        runner: RunnerConfig {
            loops: args.loops,
            max_frames: args.max_frames,
        },
        export_interval: args.export.as_ref().map(|_| args.export_every),
        ..Default::default()
    };

    let logger = if args.visualize {
        RerunLogger::new("skidpad")
    } else {
        RerunLogger::disabled()
    };

    let mut ticker: Box<dyn Ticker> = if args.interval_ms == 0 {
        Box::new(ImmediateTicker::new())
    } else {
        Box::new(IntervalTicker::from_millis(args.interval_ms))
    };

    let report = run_session(&inputs, &config, ticker.as_mut(), &logger)?;

    if let (Some(path), Some(export)) = (&args.export, &report.export) {
        export.write_to_file(path)?;
        info!("Exported {} frames to {}", export.frames.len(), path.display());
    }
    if let Some(path) = &args.lookahead {
        write_lookahead_file(path, &report.lookahead)?;
        info!("Wrote {} lookahead samples to {}", report.lookahead.len(), path.display());
    }
    Ok(report)
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    if args.list {
        for scenario in ScenarioId::all() {
            println!("{:<22} {}", scenario.name(), scenario.description());
        }
        return;
    }

    let scenario: ScenarioId = args.scenario.parse().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Available scenarios: reference, random_start, rotated, smoothed, rotated_random_start");
        std::process::exit(1);
    });

    if !args.json {
        info!("Skidpad playback v{}", env!("CARGO_PKG_VERSION"));
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        info!("Scenario: {} ({})", scenario.name(), scenario.description());
    }

    let report = match run(&args, scenario) {
        Ok(report) => report,
        Err(e) => {
            error!("✗ {} failed: {}", scenario.name(), e);
            std::process::exit(1);
        }
    };

    if args.json {
        let summary = serde_json::json!({
            "scenario": scenario.name(),
            "pose": report.layout.pose,
            "path_samples": report.layout.path.len(),
            "cones": report.layout.cones.len(),
            "frames": report.summary.frames,
            "loops": report.summary.loops_completed,
            "distance": report.summary.distance,
            "cancelled": report.summary.cancelled,
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                error!("Failed to serialize summary: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        info!(
            "✓ {} done: {} samples, {} frames, {:.1} m",
            scenario.name(),
            report.layout.path.len(),
            report.summary.frames,
            report.summary.distance
        );
    }
}
