//! Bulk scan and normalizer configuration.

use oti_core::codes;
use std::time::Duration;

/// Default wait between poll rounds
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Default number of poll rounds
pub const DEFAULT_RETRIES: u32 = 10;

/// Scheme prepended to URLs that have none
pub const DEFAULT_SCHEME: &str = "http";

/// Placeholder substituted for e-mail addresses found in URLs
pub const DUMMY_EMAIL: &str = "Jackdavis@eureliosollutions.com";

/// Address-like matches ending in these are file names, not e-mail addresses
pub const INVALID_EMAIL_SUFFIXES: [&str; 3] = [".exe", ".php", ".html"];

/// Settings of one bulk scan
#[derive(Debug, Clone)]
pub struct BulkScanConfig {
    /// Wait before each poll round
    pub poll_interval: Duration,

    /// Maximum number of poll rounds
    pub retries: u32,

    /// Scheme used when normalizing URLs that have none
    pub default_scheme: String,

    /// `errorNo` values that stop the batch with a quota state
    pub quota_codes: Vec<i64>,

    /// `errorNo` values that abort the batch
    pub fatal_codes: Vec<i64>,
}

impl Default for BulkScanConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            retries: DEFAULT_RETRIES,
            default_scheme: DEFAULT_SCHEME.to_string(),
            quota_codes: codes::QUOTA_EXCEEDED.to_vec(),
            fatal_codes: codes::FATAL.to_vec(),
        }
    }
}

impl BulkScanConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wait before each poll round
    #[must_use]
    pub const fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the maximum number of poll rounds
    #[must_use]
    pub const fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set the scheme used for scheme-less URLs
    #[must_use]
    pub fn default_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.default_scheme = scheme.into();
        self
    }

    pub(crate) fn is_quota(&self, code: i64) -> bool {
        self.quota_codes.contains(&code)
    }

    pub(crate) fn is_fatal(&self, code: i64) -> bool {
        self.fatal_codes.contains(&code)
    }

    /// Upper bound on the wall-clock time spent waiting between rounds
    #[must_use]
    pub fn max_wait(&self) -> Duration {
        self.poll_interval.saturating_mul(self.retries)
    }
}

/// Settings of the URL normalizer
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Replacement for e-mail addresses found in a URL's path or query
    pub dummy_email: String,

    /// Suffixes marking an address-like match as a file name
    pub invalid_email_suffixes: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            dummy_email: DUMMY_EMAIL.to_string(),
            invalid_email_suffixes: INVALID_EMAIL_SUFFIXES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl NormalizerConfig {
    pub(crate) fn is_file_like(&self, candidate: &str) -> bool {
        let lower = candidate.to_ascii_lowercase();
        self.invalid_email_suffixes
            .iter()
            .any(|suffix| lower.ends_with(&suffix.to_ascii_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BulkScanConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.retries, 10);
        assert_eq!(config.default_scheme, "http");
        assert!(config.is_quota(7066));
        assert!(config.is_fatal(7001));
        assert!(!config.is_fatal(7026));
        assert_eq!(config.max_wait(), Duration::from_secs(600));
    }

    #[test]
    fn test_file_like_suffixes() {
        let config = NormalizerConfig::default();
        assert!(config.is_file_like("setup@download.exe"));
        assert!(config.is_file_like("index@site.HTML"));
        assert!(!config.is_file_like("foo@bar.com"));
    }
}
