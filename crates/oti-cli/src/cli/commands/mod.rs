//! Command implementations.

pub mod bulk;
pub mod config;
pub mod download;
pub mod host;
pub mod normalize;
pub mod quota;
pub mod url;

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// OTI API key
    pub api_key: Option<String>,

    /// API base URL
    pub base_url: String,

    /// Output format
    pub output_format: OutputFormat,

    /// Loaded configuration file
    pub config: Config,

    /// Verbosity level
    pub verbose: u8,
}

impl Context {
    /// Get the API key, returning an error if not set.
    pub fn require_api_key(&self) -> anyhow::Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "API key required.\n\n\
                     Set it with one of:\n  \
                     1. --api-key <KEY>\n  \
                     2. OTI_API_KEY environment variable"
                )
            })
    }

    /// Create an OTI client with the configured API key and base URL.
    pub fn client(&self) -> anyhow::Result<oti::OtiClient> {
        let key = self.require_api_key()?;
        Ok(oti::OtiClient::builder(key)
            .base_url(&self.base_url)
            .build()?)
    }
}
