//! otictl - OTI threat-intelligence CLI
//!
//! Look up URLs and hosts, download scan forensics, and scan URL lists in bulk.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    oti_cli::run().await
}
