//! Batch inputs, running counters and the final result.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

use crate::error::BulkError;

/// One URL read from the input, with the line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    /// 1-based line number in the input
    pub line: usize,
    /// The line as submitted, without its terminator
    pub raw: String,
}

impl ScanTarget {
    /// Build targets from input lines, skipping blank ones.
    ///
    /// Lines are kept as written apart from the terminator; the service
    /// normalizes submissions on its side.
    pub fn from_lines<I>(lines: I) -> Vec<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        lines
            .into_iter()
            .enumerate()
            .filter_map(|(idx, line)| {
                let line = line.as_ref().trim_end_matches(['\r', '\n']);
                (!line.trim().is_empty()).then(|| Self {
                    line: idx + 1,
                    raw: line.to_string(),
                })
            })
            .collect()
    }

    /// The URL sent to the service
    #[must_use]
    pub fn url(&self) -> &str {
        &self.raw
    }
}

/// Lookup phase counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LookupCounters {
    /// URLs looked up and classified
    pub total: u64,
    /// URLs the service already had a verdict for
    pub found_in_cache: u64,
    /// Cache hits judged malicious
    pub malicious: u64,
    /// Cache hits judged benign
    pub benign: u64,
    /// URLs rejected as invalid
    pub invalid: u64,
    /// URLs answered with an unexpected error code
    pub errors: u64,
    /// URLs the service queued for a live scan
    pub submitted_for_scan: u64,
}

/// Poll phase counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanCounters {
    /// URLs that entered the poll phase
    pub total: u64,
    /// Live scans that finished
    pub completed: u64,
    /// Finished scans judged malicious
    pub malicious: u64,
    /// Finished scans judged benign
    pub benign: u64,
    /// URLs still waiting on a live scan
    pub pending: u64,
    /// URLs answered with an error while polling
    pub errors: u64,
}

/// All counts of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchCounters {
    /// Lookup phase
    pub lookup: LookupCounters,
    /// Poll phase; `None` when no URL needed a live scan
    pub scan: Option<ScanCounters>,
}

/// How a batch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchState {
    /// Every URL was processed, the retry budget ran out, or the run was interrupted
    Success,
    /// The subscription quota ran out; results are partial
    Quota,
    /// The batch could not start or was aborted; carries the reason
    Failed(String),
}

impl BatchState {
    /// Returns true for [`BatchState::Success`]
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("Success"),
            Self::Quota => f.write_str("Quota"),
            Self::Failed(reason) => f.write_str(reason),
        }
    }
}

impl From<&BulkError> for BatchState {
    fn from(err: &BulkError) -> Self {
        match err {
            BulkError::QuotaExceeded { .. } => Self::Quota,
            other => Self::Failed(other.to_string()),
        }
    }
}

/// Outcome of a bulk scan
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Terminal state
    pub state: BatchState,
    /// Counts accumulated up to the end of the run
    pub counters: BatchCounters,
    /// Raw responses of every URL classified malicious or benign, in order
    pub responses: Vec<Value>,
    /// Input file, when the batch was read from one
    pub input: Option<PathBuf>,
    /// Directory the artifacts were written to
    pub run_dir: Option<PathBuf>,
    /// True when the run was stopped by a shutdown signal
    pub interrupted: bool,
}

impl BatchResult {
    pub(crate) fn failed(err: &BulkError) -> Self {
        Self {
            state: err.into(),
            counters: BatchCounters::default(),
            responses: Vec::new(),
            input: None,
            run_dir: None,
            interrupted: false,
        }
    }

    /// URLs whose live scan had not finished when the batch ended.
    ///
    /// A batch that runs out of poll rounds still ends in
    /// [`BatchState::Success`]; these URLs need a follow-up report lookup.
    #[must_use]
    pub fn pending(&self) -> u64 {
        self.counters.scan.map_or(0, |scan| scan.pending)
    }

    /// Total number of URLs classified in the lookup phase
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.counters.lookup.total
    }
}
