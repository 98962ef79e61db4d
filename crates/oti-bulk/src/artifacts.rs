//! Per-run output files.

use chrono::Utc;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{BulkError, BulkResult};

/// A list a URL or raw response is appended to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Every URL classified in the lookup phase
    Original,
    /// Lookup cache hits
    FoundInCache,
    /// Lookup cache hits judged malicious
    FoundMalicious,
    /// Lookup cache hits judged benign
    FoundBenign,
    /// URLs rejected as invalid
    FoundInvalid,
    /// URLs queued for a live scan
    SubmittedForScan,
    /// URLs answered with an unexpected error, followed by the error line
    ScanError,
    /// Raw JSON of malicious responses, one per line
    MaliciousRaw,
    /// Raw JSON of benign responses, one per line
    BenignRaw,
    /// Live scans that finished
    Scanned,
    /// Finished live scans judged malicious
    ScannedMalicious,
    /// Finished live scans judged benign
    ScannedBenign,
    /// URLs still pending after the given zero-based poll round
    ScanPending(u32),
}

impl Category {
    /// File name inside the run directory
    #[must_use]
    pub fn file_name(self) -> String {
        let name = match self {
            Self::Original => "urls_original.txt",
            Self::FoundInCache => "urls_found_in_cache.txt",
            Self::FoundMalicious => "urls_found_malicious.txt",
            Self::FoundBenign => "urls_found_benign.txt",
            Self::FoundInvalid => "urls_found_invalid.txt",
            Self::SubmittedForScan => "urls_submitted_for_scan.txt",
            Self::ScanError => "urls_scan_error.txt",
            Self::MaliciousRaw => "malicious_urls_raw.log",
            Self::BenignRaw => "benign_urls_raw.log",
            Self::Scanned => "urls_scanned.txt",
            Self::ScannedMalicious => "urls_scanned_malicious.txt",
            Self::ScannedBenign => "urls_scanned_benign.txt",
            Self::ScanPending(round) => return format!("urls_scan_pending_{round}.txt"),
        };
        name.to_string()
    }
}

/// A fresh, timestamped directory holding one run's files.
///
/// Every file is opened in append mode, so a run must never reuse a
/// directory; [`RunDirectory::create`] always makes a new one.
#[derive(Debug, Clone)]
pub struct RunDirectory {
    path: PathBuf,
}

impl RunDirectory {
    /// Create `<base>/<YYYYmmdd_HHMMSS>` (UTC), adding a `_N` suffix when a
    /// run already used that second.
    pub fn create(base: &Path) -> BulkResult<Self> {
        if !base.is_dir() {
            return Err(BulkError::bad_output_dir());
        }

        let stamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        let mut candidate = base.join(&stamp);
        let mut attempt = 0u32;
        loop {
            match fs::create_dir(&candidate) {
                Ok(()) => break,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    attempt += 1;
                    candidate = base.join(format!("{stamp}_{attempt}"));
                }
                Err(e) => return Err(e.into()),
            }
        }

        debug!(path = %candidate.display(), "Created run directory");
        Ok(Self { path: candidate })
    }

    /// Path of the run directory
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a category file
    #[must_use]
    pub fn file(&self, category: Category) -> PathBuf {
        self.path.join(category.file_name())
    }

    /// Append one line to a category file
    pub fn append_line(&self, category: Category, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.file(category))?;
        writeln!(file, "{line}")
    }

    /// Append a JSON document as one line
    pub fn append_json(&self, category: Category, value: &Value) -> io::Result<()> {
        self.append_line(category, &value.to_string())
    }
}
