//! Skidpad Playback Driver
//!
//! Builds the skidpad reference path from cone and base path sources and
//! replays it frame by frame, one path sample per tick.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐   ┌──────────────┐   ┌────────────────────┐
//! │  ConeSource    │──►│              │   │                    │
//! │  PathSource    │──►│ TrackInputs  │──►│  build_track       │
//! └────────────────┘   └──────────────┘   └─────────┬──────────┘
//!                                                   │ TrackLayout
//!                      ┌──────────────┐   ┌─────────▼──────────┐
//!                      │   Ticker     │──►│  PlaybackRunner    │
//!                      └──────────────┘   └─────────┬──────────┘
//!                                                   │ FrameEvent
//!                               ┌───────────────────┼───────────────┐
//!                               ▼                   ▼               ▼
//!                         RerunLogger        PlaybackExport    lookahead CSV
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use skidpad_sim::{reference, run_session, ImmediateTicker, RerunLogger, SessionConfig, TrackInputs};
//!
//! let source = reference::reference_source()?;
//! let inputs = TrackInputs::load(&source, &source)?;
//! let report = run_session(&inputs, &SessionConfig::default(), &mut ImmediateTicker::new(), &RerunLogger::disabled())?;
//! ```

mod error;
mod exporter;
mod inputs;
mod runner;
mod session;
mod ticker;
mod visualizer;
pub mod reference;
pub mod scenarios;

pub use error::SimError;
pub use exporter::{write_lookahead, write_lookahead_file, FrameRecord, PlaybackExport, LOOKAHEAD_HEADER};
pub use inputs::TrackInputs;
pub use runner::{FrameEvent, PlaybackRunner, RunSummary, RunnerConfig};
pub use session::{run_session, SessionConfig, SessionReport};
pub use ticker::{ImmediateTicker, IntervalTicker, Ticker, DEFAULT_INTERVAL_MS};
pub use visualizer::RerunLogger;
