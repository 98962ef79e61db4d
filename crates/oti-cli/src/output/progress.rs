//! Spinner for bulk scans.

use indicatif::{ProgressBar, ProgressStyle};
use oti::bulk::{BatchCounters, BatchResult, LookupOutcome, Phase, ProgressReporter, ScanTarget};
use std::time::Duration;

/// Renders bulk scan progress on stderr
pub struct BulkProgress {
    bar: ProgressBar,
}

impl BulkProgress {
    /// Create a spinner; hidden when `quiet` is set
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {prefix:.bold} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        };
        Self { bar }
    }
}

impl ProgressReporter for BulkProgress {
    fn on_start(&self, phase: Phase, targets: usize) {
        self.bar.set_prefix(match phase {
            Phase::Lookup => "Lookup".to_string(),
            Phase::Poll { round } => format!("Poll {}", round + 1),
        });
        self.bar.set_message(format!("{targets} URLs queued"));
    }

    fn on_target(
        &self,
        phase: Phase,
        target: &ScanTarget,
        _outcome: &LookupOutcome,
        counters: &BatchCounters,
    ) {
        let url: String = target.url().chars().take(64).collect();
        let message = match (phase, counters.scan) {
            (Phase::Poll { .. }, Some(scan)) => format!(
                "{url} | scanned {} malicious {} benign {} pending {} errors {}",
                scan.completed, scan.malicious, scan.benign, scan.pending, scan.errors
            ),
            _ => {
                let lookup = counters.lookup;
                format!(
                    "{url} | total {} malicious {} benign {} invalid {} live {} errors {}",
                    lookup.total,
                    lookup.malicious,
                    lookup.benign,
                    lookup.invalid,
                    lookup.submitted_for_scan,
                    lookup.errors
                )
            }
        };
        self.bar.set_message(message);
    }

    fn on_wait(&self, round: u32, interval: Duration, pending: usize) {
        self.bar.set_prefix(format!("Poll {}", round + 1));
        self.bar.set_message(format!(
            "waiting {}s for {pending} live scans (Ctrl+C to stop)",
            interval.as_secs()
        ));
    }

    fn on_finish(&self, _result: &BatchResult) {
        self.bar.finish_and_clear();
    }
}
