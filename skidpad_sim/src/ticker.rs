//! Tick sources driving playback, one step per tick.

use std::thread;
use std::time::Duration;

/// Default animation interval (ms).
pub const DEFAULT_INTERVAL_MS: u64 = 5;

/// Paces the playback loop. Returning `false` stops the run.
pub trait Ticker {
    fn tick(&mut self) -> bool;
}

/// Sleeps a fixed period before every frame.
#[derive(Debug, Clone)]
pub struct IntervalTicker {
    interval: Duration,
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::from_millis(DEFAULT_INTERVAL_MS)
    }
}

impl Ticker for IntervalTicker {
    fn tick(&mut self) -> bool {
        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
        true
    }
}

/// Never waits; optionally stops after a fixed number of ticks.
#[derive(Debug, Clone, Default)]
pub struct ImmediateTicker {
    remaining: Option<usize>,
}

impl ImmediateTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops after `ticks` ticks.
    pub fn limited(ticks: usize) -> Self {
        Self {
            remaining: Some(ticks),
        }
    }
}

impl Ticker for ImmediateTicker {
    fn tick(&mut self) -> bool {
        match self.remaining.as_mut() {
            Some(0) => false,
            Some(n) => {
                *n -= 1;
                true
            }
            None => true,
        }
    }
}
