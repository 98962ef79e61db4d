use serde::{Deserialize, Serialize};

use super::{ThreatData, UrlData};

/// Response of `host/reputation`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostReputation {
    /// Threat details of the host
    #[serde(default)]
    pub threat_data: Option<ThreatData>,
}

/// URL list of `host/report`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostUrls {
    /// URLs seen on the host, most recent first
    #[serde(default)]
    pub url_data_list: Vec<UrlData>,
}

/// Combined host report: reputation plus the most recent URL seen on it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostReport {
    /// Host that was looked up
    pub host: String,

    /// Reputation of the host
    pub reputation: HostReputation,

    /// Most recent URL scanned on the host
    #[serde(default)]
    pub latest_url: Option<UrlData>,
}
