//! URL scanning API endpoints.

use crate::OtiClient;
use oti_core::{codes, Operation, Result, UrlScanReport, UrlScanStatus};
use serde_json::Value;

/// URL scanning API endpoints
pub struct UrlApi<'a> {
    client: &'a OtiClient,
}

impl<'a> UrlApi<'a> {
    pub(crate) const fn new(client: &'a OtiClient) -> Self {
        Self { client }
    }

    /// Look a URL up in the cache, submitting it for a live scan on a miss
    pub async fn scan(&self, url: &str) -> Result<UrlScanStatus> {
        let value = self.client.post_form(Operation::UrlScan, &[("url", url)]).await?;
        Self::scan_status(value)
    }

    /// Scan a URL and block server-side until the verdict is ready or
    /// `timeout_secs` elapses
    pub async fn scan_sync(&self, url: &str, timeout_secs: u64) -> Result<UrlScanStatus> {
        let timeout = timeout_secs.to_string();
        let value = self
            .client
            .post_form(
                Operation::UrlScanSync,
                &[("url", url), ("timeout", timeout.as_str())],
            )
            .await?;
        Self::scan_status(value)
    }

    /// Fetch the report of an earlier scan
    pub async fn report(&self, scan_id: &str) -> Result<UrlScanStatus> {
        let value = self
            .client
            .post_form(Operation::UrlScan, &[("scanid", scan_id)])
            .await?;
        Self::scan_status(value)
    }

    fn scan_status(value: Value) -> Result<UrlScanStatus> {
        if codes::error_no(&value) == Some(codes::PENDING) {
            let report: UrlScanReport = serde_json::from_value(value)?;
            return Ok(UrlScanStatus::Pending(report));
        }
        OtiClient::expect_success(value).map(UrlScanStatus::Complete)
    }
}
