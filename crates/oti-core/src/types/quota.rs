use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A quota figure, either a count or a label such as `Unlimited`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuotaAmount {
    /// Numeric quota
    Count(i64),
    /// Label, e.g. `Unlimited`
    Label(String),
}

impl std::fmt::Display for QuotaAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Label(s) => write!(f, "{s}"),
        }
    }
}

/// `quotaDetails` of `quota/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaDetails {
    /// Quota granted by the licence
    pub licensed_quota: QuotaAmount,

    /// Quota left
    pub remaining_quota: QuotaAmount,

    /// Licence expiry date
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,

    /// Whether the licence has expired
    #[serde(default)]
    pub is_expired: bool,

    /// Service note about quota resets
    #[serde(default)]
    pub note: Option<String>,

    /// Calls consumed, per API
    #[serde(default, rename = "consumedAPIDetail")]
    pub consumed_api_detail: BTreeMap<String, i64>,

    /// Points consumed, per API
    #[serde(default)]
    pub consumed_points_detail: BTreeMap<String, i64>,

    /// Points charged per call, per API
    #[serde(default)]
    pub points_consumption_rate: BTreeMap<String, i64>,
}

/// Response of `quota/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStatus {
    /// Quota details
    pub quota_details: QuotaDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_parses_labels_and_dates() {
        let status: QuotaStatus = serde_json::from_value(serde_json::json!({
            "errorNo": 0,
            "errorMsg": "Success",
            "quotaDetails": {
                "consumedAPIDetail": {"urlScan": 4},
                "pointsConsumptionRate": {"urlScan": 3},
                "expiryDate": "2020-12-19",
                "isExpired": false,
                "licensedQuota": "Unlimited",
                "remainingQuota": 120
            }
        }))
        .unwrap();

        let details = status.quota_details;
        assert_eq!(details.licensed_quota.to_string(), "Unlimited");
        assert_eq!(details.remaining_quota, QuotaAmount::Count(120));
        assert_eq!(details.expiry_date, NaiveDate::from_ymd_opt(2020, 12, 19));
        assert_eq!(details.consumed_api_detail.get("urlScan"), Some(&4));
    }
}
