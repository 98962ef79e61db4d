//! HTTP client for the OTI threat-intelligence API.
//!
//! This crate provides the main [`OtiClient`] for interacting with the OTI API,
//! and the [`Gateway`] trait the bulk scanner is written against.

#![doc(html_root_url = "https://docs.rs/oti-client/1.1.0")]

mod client;
mod gateway;
pub mod api;

pub use client::{OtiClient, OtiClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use gateway::Gateway;
pub use oti_core::{Operation, OtiError, Result};
