//! # oti-cli
//!
//! Command-line interface for the OTI threat-intelligence API.
//!
//! ## Features
//!
//! - **Single lookups**: host reputation, host URLs, URL scans and reports
//! - **Forensics**: screenshot, HTML and text downloads for a scan
//! - **Bulk scanning**: cache lookups plus live-scan polling for URL lists
//! - **Multiple output formats**: Pretty, JSON, YAML

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
