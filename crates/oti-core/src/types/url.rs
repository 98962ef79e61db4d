use serde::{Deserialize, Serialize};

use super::ThreatData;

/// Scan data for a single URL
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlData {
    /// The URL as the service recorded it
    #[serde(default)]
    pub url: String,

    /// Scan identifier, usable for reports and downloads
    #[serde(default)]
    pub scan_id: Option<String>,

    /// Threat details of this URL
    #[serde(default)]
    pub threat_data: Option<ThreatData>,

    /// Final destination after redirects, when different from `url`
    #[serde(default)]
    pub landing_url: Option<Box<UrlData>>,
}

impl UrlData {
    /// Threat data that decides the verdict: the landing URL's when the URL
    /// redirects, its own otherwise.
    #[must_use]
    pub fn effective_threat(&self) -> Option<&ThreatData> {
        match &self.landing_url {
            Some(landing) => landing.threat_data.as_ref(),
            None => self.threat_data.as_ref(),
        }
    }
}

/// Server-side normalization feedback
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeData {
    /// Non-zero when the service rewrote the URL
    #[serde(default)]
    pub normalize_status: i64,

    /// Explanation of the rewrite
    #[serde(default)]
    pub normalize_message: String,
}

/// Allow-list match information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwlData {
    /// `1` when the URL matched an allow-list entry
    #[serde(default)]
    pub swl_status: i64,

    /// Matched allow-list entry
    #[serde(default)]
    pub swl_message: Option<String>,
}

/// Response of `url/scan` and `url/scansync`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlScanReport {
    /// Scan data, absent while a live scan is pending
    #[serde(default)]
    pub url_data: Option<UrlData>,

    /// Server-side normalization feedback
    #[serde(default)]
    pub normalize_data: Option<NormalizeData>,

    /// Allow-list match information
    #[serde(default)]
    pub swl_data: Option<SwlData>,
}

impl UrlScanReport {
    /// Threat data that decides the verdict
    #[must_use]
    pub fn effective_threat(&self) -> Option<&ThreatData> {
        self.url_data.as_ref().and_then(UrlData::effective_threat)
    }
}

/// A URL scan either finished or still running server-side
#[derive(Debug, Clone)]
pub enum UrlScanStatus {
    /// Verdict available (`errorNo` 0)
    Complete(UrlScanReport),
    /// Live scan still running (`errorNo` 1); the report may carry the scan ID
    Pending(UrlScanReport),
}

impl UrlScanStatus {
    /// Returns true while the live scan is running
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// The report, complete or partial
    #[must_use]
    pub const fn report(&self) -> &UrlScanReport {
        match self {
            Self::Complete(report) | Self::Pending(report) => report,
        }
    }

    /// Scan identifier, if the service assigned one
    #[must_use]
    pub fn scan_id(&self) -> Option<&str> {
        self.report()
            .url_data
            .as_ref()
            .and_then(|data| data.scan_id.as_deref())
    }
}
