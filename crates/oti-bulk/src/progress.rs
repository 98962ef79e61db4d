//! Progress callbacks.

use std::time::Duration;

use crate::batch::{BatchCounters, BatchResult, ScanTarget};
use crate::outcome::{LookupOutcome, Phase};

/// Receives batch progress. Every method defaults to doing nothing.
pub trait ProgressReporter: Send + Sync {
    /// A phase is starting with `targets` URLs to process
    fn on_start(&self, _phase: Phase, _targets: usize) {}

    /// A target was classified and recorded
    fn on_target(
        &self,
        _phase: Phase,
        _target: &ScanTarget,
        _outcome: &LookupOutcome,
        _counters: &BatchCounters,
    ) {
    }

    /// The scanner is about to sleep before a poll round
    fn on_wait(&self, _round: u32, _interval: Duration, _pending: usize) {}

    /// The batch has ended
    fn on_finish(&self, _result: &BatchResult) {}
}

/// Reporter that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {}
