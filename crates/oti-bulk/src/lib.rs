//! Bulk URL scanning against the OTI cache-or-scan API.
//!
//! The [`BulkScanner`] takes a list of URLs, looks each one up once, then
//! polls the ones the service had to scan live until they resolve, error out
//! or the retry budget runs dry. Every URL lands in exactly one category per
//! pass; categories and raw responses are appended to files in a fresh,
//! timestamped run directory.
//!
//! ```rust,ignore
//! use oti_bulk::{BulkScanConfig, BulkScanner};
//! use oti_client::OtiClient;
//!
//! let client = OtiClient::new("api-key")?;
//! let scanner = BulkScanner::new(client, BulkScanConfig::default());
//! let result = scanner.run_file("urls.txt".as_ref(), ".".as_ref()).await;
//! println!("{} ({} still pending)", result.state, result.pending());
//! ```
//!
//! [`UrlNormalizer`] is the URL canonicalizer used for the host-reputation
//! fallback; it is public so callers can normalize URLs the same way.

#![doc(html_root_url = "https://docs.rs/oti-bulk/1.1.0")]

mod artifacts;
mod batch;
mod config;
mod error;
mod normalize;
mod outcome;
mod progress;
mod scanner;

pub use artifacts::{Category, RunDirectory};
pub use batch::{BatchCounters, BatchResult, BatchState, LookupCounters, ScanCounters, ScanTarget};
pub use config::{
    BulkScanConfig, NormalizerConfig, DEFAULT_POLL_INTERVAL, DEFAULT_RETRIES, DEFAULT_SCHEME,
    DUMMY_EMAIL, INVALID_EMAIL_SUFFIXES,
};
pub use error::{BulkError, BulkResult};
pub use normalize::{split_host, SplitUrl, UrlNormalizer};
pub use outcome::{classify, effective_verdict, LookupOutcome, Phase};
pub use progress::{NoProgress, ProgressReporter};
pub use scanner::BulkScanner;
