//! Core types and response codes for the OTI threat-intelligence API client.
//!
//! This crate provides the foundational types used across the OTI library:
//!
//! - **Types**: Strongly-typed representations of the OTI API responses
//! - **Codes**: The `errorNo` values that drive classification and abort decisions
//! - **Operations**: The catalogue of remote operations and their paths
//! - **Errors**: Comprehensive error handling with [`OtiError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use oti_core::{HostReputation, OtiError, Result};
//!
//! fn process_host(rep: HostReputation) -> Result<()> {
//!     if let Some(threat) = rep.threat_data {
//!         println!("Verdict: {}", threat.verdict);
//!     }
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/oti-core/1.1.0")]

pub mod codes;
mod error;
mod operation;
pub mod types;

pub use error::{OtiError, Result};
pub use operation::Operation;
pub use types::*;
