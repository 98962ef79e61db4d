//! Classification of a single `url/scan` response.
//!
//! Both phases of a batch share this one decision table; only the counters
//! and files an outcome is recorded into differ by [`Phase`].

use oti_core::{codes, Verdict};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::config::BulkScanConfig;

/// Which pass over the targets a response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// First lookup of every input URL
    Lookup,
    /// Re-query of URLs waiting on a live scan; `round` starts at 0
    Poll {
        /// Zero-based poll round
        round: u32,
    },
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lookup => f.write_str("lookup"),
            Self::Poll { round } => write!(f, "poll round {}", round + 1),
        }
    }
}

/// What a response means for its URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Verdict available and not malicious; a host-reputation check may still override it
    CacheHitBenign,
    /// Verdict available and malicious
    CacheHitMalicious,
    /// The service rejected the URL as invalid
    Invalid,
    /// A live scan is running; poll again
    SubmittedForScan,
    /// Quota exhausted, stop the batch
    QuotaExceeded {
        /// Service `errorNo`
        code: i64,
    },
    /// Key or account refused, abort the batch
    FatalError {
        /// Service `errorNo`
        code: i64,
        /// Service `errorMsg`
        message: String,
    },
    /// Any other response; counted as an error and skipped
    ApiError(String),
}

impl LookupOutcome {
    /// Returns true if this outcome ends the batch
    #[must_use]
    pub const fn is_abort(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. } | Self::FatalError { .. })
    }
}

/// Classify a served response by its `errorNo`.
///
/// Code sets come from `config` so callers can extend them. A response
/// without an `errorNo` is an [`LookupOutcome::ApiError`].
#[must_use]
pub fn classify(response: &Value, config: &BulkScanConfig) -> LookupOutcome {
    let Some(code) = codes::error_no(response) else {
        return LookupOutcome::ApiError(codes::status_of(response));
    };

    match code {
        codes::SUCCESS if effective_verdict(response).is_malicious() => {
            LookupOutcome::CacheHitMalicious
        }
        codes::SUCCESS => LookupOutcome::CacheHitBenign,
        codes::PENDING => LookupOutcome::SubmittedForScan,
        codes::INVALID_URL => LookupOutcome::Invalid,
        code if config.is_quota(code) => LookupOutcome::QuotaExceeded { code },
        code if config.is_fatal(code) => LookupOutcome::FatalError {
            code,
            message: codes::status_of(response),
        },
        _ => LookupOutcome::ApiError(codes::status_of(response)),
    }
}

/// Verdict of a served URL response: the landing URL's when present,
/// the URL's own otherwise.
#[must_use]
pub fn effective_verdict(response: &Value) -> Verdict {
    let url_data = &response["urlData"];
    let threat = match url_data.get("landingUrl") {
        Some(landing) if !landing.is_null() => &landing["threatData"],
        _ => &url_data["threatData"],
    };
    verdict_of(threat)
}

/// Verdict carried by a `threatData` object
pub(crate) fn verdict_of(threat: &Value) -> Verdict {
    threat
        .get("verdict")
        .map(|v| Verdict::deserialize(v).unwrap_or_default())
        .unwrap_or_default()
}

/// Replace the URL verdict of `response` with a host's `threatData`
pub(crate) fn splice_threat(response: &mut Value, threat: Value) {
    if let Some(url_data) = response.get_mut("urlData").and_then(Value::as_object_mut) {
        url_data.insert("threatData".to_string(), threat);
    } else if let Some(object) = response.as_object_mut() {
        object.insert(
            "urlData".to_string(),
            serde_json::json!({ "threatData": threat }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> BulkScanConfig {
        BulkScanConfig::default()
    }

    #[test]
    fn test_cache_hits() {
        let malicious = json!({"errorNo": 0, "urlData": {"threatData": {"verdict": "Malicious"}}});
        let benign = json!({"errorNo": 0, "urlData": {"threatData": {"verdict": "Benign"}}});
        let no_data = json!({"errorNo": 0, "errorMsg": "Success"});
        assert_eq!(classify(&malicious, &config()), LookupOutcome::CacheHitMalicious);
        assert_eq!(classify(&benign, &config()), LookupOutcome::CacheHitBenign);
        assert_eq!(classify(&no_data, &config()), LookupOutcome::CacheHitBenign);
    }

    #[test]
    fn test_landing_url_verdict_wins() {
        let redirect = json!({
            "errorNo": 0,
            "urlData": {
                "threatData": {"verdict": "Redirector"},
                "landingUrl": {"threatData": {"verdict": "Malicious"}}
            }
        });
        assert_eq!(effective_verdict(&redirect), Verdict::Malicious);
        assert_eq!(classify(&redirect, &config()), LookupOutcome::CacheHitMalicious);

        let benign_landing = json!({
            "errorNo": 0,
            "urlData": {
                "threatData": {"verdict": "Malicious"},
                "landingUrl": {"threatData": {"verdict": "Benign"}}
            }
        });
        assert_eq!(classify(&benign_landing, &config()), LookupOutcome::CacheHitBenign);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            classify(&json!({"errorNo": 1}), &config()),
            LookupOutcome::SubmittedForScan
        );
        assert_eq!(
            classify(&json!({"errorNo": 7026}), &config()),
            LookupOutcome::Invalid
        );
        assert_eq!(
            classify(&json!({"errorNo": 7066}), &config()),
            LookupOutcome::QuotaExceeded { code: 7066 }
        );
        assert_eq!(
            classify(&json!({"errorNo": 7001, "errorMsg": "bad key"}), &config()),
            LookupOutcome::FatalError {
                code: 7001,
                message: "bad key".to_string()
            }
        );
        assert_eq!(
            classify(&json!({"errorNo": 7099, "errorMsg": "odd"}), &config()),
            LookupOutcome::ApiError("odd".to_string())
        );
        assert_eq!(
            classify(&json!({"errorMsg": "no code"}), &config()),
            LookupOutcome::ApiError("no code".to_string())
        );
    }

    #[test]
    fn test_code_sets_are_configurable() {
        let mut config = config();
        config.quota_codes.push(7099);
        assert!(classify(&json!({"errorNo": 7099}), &config).is_abort());
    }

    #[test]
    fn test_splice_threat() {
        let mut response = json!({"errorNo": 0, "urlData": {"url": "http://a.test/", "threatData": {"verdict": "Benign"}}});
        splice_threat(&mut response, json!({"verdict": "Malicious", "threatName": "Phishing"}));
        assert_eq!(response["urlData"]["threatData"]["threatName"], "Phishing");
        assert_eq!(response["urlData"]["url"], "http://a.test/");
        assert_eq!(effective_verdict(&response), Verdict::Malicious);
    }
}
