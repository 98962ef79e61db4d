//! Quota API endpoints.

use crate::OtiClient;
use oti_core::{Operation, QuotaStatus, Result};

/// Quota API endpoints
pub struct QuotaApi<'a> {
    client: &'a OtiClient,
}

impl<'a> QuotaApi<'a> {
    pub(crate) const fn new(client: &'a OtiClient) -> Self {
        Self { client }
    }

    /// Get licence and consumption details of the API key
    pub async fn status(&self) -> Result<QuotaStatus> {
        self.client.call(Operation::ApiQuota, &[]).await
    }
}
