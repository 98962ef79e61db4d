//! Host API endpoints.

use crate::OtiClient;
use oti_core::{HostReport, HostReputation, HostUrls, Operation, Result};

/// Host API endpoints
pub struct HostApi<'a> {
    client: &'a OtiClient,
}

impl<'a> HostApi<'a> {
    pub(crate) const fn new(client: &'a OtiClient) -> Self {
        Self { client }
    }

    /// Get the reputation of a domain name or IPv4 address
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let rep = client.host().reputation("google.com").await?;
    /// println!("Verdict: {:?}", rep.threat_data.map(|t| t.verdict));
    /// ```
    pub async fn reputation(&self, host: &str) -> Result<HostReputation> {
        self.client
            .call(Operation::HostReputation, &[("host", host)])
            .await
    }

    /// List URLs recently scanned on a host
    pub async fn urls(&self, host: &str, limit: u32) -> Result<HostUrls> {
        let rpp = limit.to_string();
        self.client
            .call(
                Operation::HostReport,
                &[("host", host), ("page", "1"), ("rpp", rpp.as_str())],
            )
            .await
    }

    /// Reputation of a host together with the most recent URL seen on it
    pub async fn report(&self, host: &str) -> Result<HostReport> {
        let reputation = self.reputation(host).await?;
        let latest_url = self.urls(host, 1).await?.url_data_list.into_iter().next();

        Ok(HostReport {
            host: host.to_string(),
            reputation,
            latest_url,
        })
    }
}
