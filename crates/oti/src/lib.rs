//! Rust client for the OTI threat-intelligence API.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use oti::OtiClient;
//!
//! #[tokio::main]
//! async fn main() -> oti::Result<()> {
//!     let client = OtiClient::new("your-api-key")?;
//!
//!     // Reputation of a host
//!     let rep = client.host().reputation("example.com").await?;
//!     println!("Verdict: {:?}", rep.threat_data.map(|t| t.verdict));
//!
//!     // Scan a URL, waiting up to a minute for the verdict
//!     let status = client.url().scan_sync("http://example.com/login", 60).await?;
//!     println!("Scan ID: {:?}", status.scan_id());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Bulk scanning
//!
//! ```rust,ignore
//! use oti::bulk::{BulkScanConfig, BulkScanner};
//!
//! let scanner = BulkScanner::new(client, BulkScanConfig::default());
//! let result = scanner.run_file("urls.txt".as_ref(), "out".as_ref()).await;
//! println!("{} ({} pending)", result.state, result.pending());
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/oti/1.1.0")]

// Re-export core types
pub use oti_core::*;

// Re-export client
pub use oti_client::{Gateway, OtiClient, OtiClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

// Bulk scanning and URL normalization
pub use oti_bulk as bulk;

// Re-export runtime for convenience
pub use tokio;
pub use serde;
pub use serde_json;
