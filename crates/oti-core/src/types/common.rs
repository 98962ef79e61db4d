use serde::{Deserialize, Serialize};

/// Remote classification of a URL or host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Known phishing or malware
    Malicious,
    /// Shows signs of abuse without a confirmed threat
    Suspicious,
    /// Redirects elsewhere; the landing URL carries the real verdict
    Redirector,
    /// Nothing harmful observed
    Benign,
    /// Any verdict this client does not know about
    #[default]
    #[serde(other)]
    Unknown,
}

impl Verdict {
    /// Returns true for a malicious verdict
    #[must_use]
    pub const fn is_malicious(&self) -> bool {
        matches!(self, Self::Malicious)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malicious => write!(f, "Malicious"),
            Self::Suspicious => write!(f, "Suspicious"),
            Self::Redirector => write!(f, "Redirector"),
            Self::Benign => write!(f, "Benign"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Threat details attached to a URL or host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatData {
    /// Overall verdict
    #[serde(default)]
    pub verdict: Verdict,

    /// Whether the threat is still live
    #[serde(default)]
    pub threat_status: Option<String>,

    /// Threat name, `N/A` when none
    #[serde(default)]
    pub threat_name: Option<String>,

    /// Threat category, `N/A` when none
    #[serde(default)]
    pub threat_type: Option<String>,

    /// First time the service saw this resource
    #[serde(default)]
    pub first_seen: Option<String>,

    /// Most recent sighting
    #[serde(default)]
    pub last_seen: Option<String>,
}
