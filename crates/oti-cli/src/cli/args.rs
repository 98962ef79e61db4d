//! Command-line argument definitions using clap.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use oti::Resolution;

use crate::output::OutputFormat;

/// Command-line interface for the OTI threat-intelligence API
///
/// Check URLs and hosts against the OTI cache, run live scans, download
/// scan forensics and process URL lists in bulk.
#[derive(Parser, Debug)]
#[command(name = "otictl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// OTI API key (or set OTI_API_KEY env var)
    #[arg(short = 'k', long, env = "OTI_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL (or set OTI_BASE_URL env var)
    #[arg(short = 'b', long, env = "OTI_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Host reputation and URLs seen on a host
    Host(HostArgs),

    /// Scan URLs and fetch scan reports
    Url(UrlArgs),

    /// Download screenshot, HTML or text of a scanned page
    Download(DownloadArgs),

    /// Show API quota usage
    Quota,

    /// Normalize URLs locally, as the bulk scanner does
    Normalize(NormalizeArgs),

    /// Scan a file of URLs in bulk
    Bulk(BulkArgs),

    /// Show CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Host command
// ============================================================================

#[derive(Args, Debug)]
pub struct HostArgs {
    #[command(subcommand)]
    pub command: HostCommands,
}

#[derive(Subcommand, Debug)]
pub enum HostCommands {
    /// Reputation of a host name or IP address
    Reputation {
        /// Host name or IP address
        host: String,
    },

    /// URLs recently scanned on a host
    Urls {
        /// Host name or IP address
        host: String,

        /// Maximum number of URLs to return
        #[arg(short, long, default_value = "10")]
        limit: u32,
    },

    /// Reputation plus the most recent URL scanned on a host
    Report {
        /// Host name or IP address
        host: String,
    },
}

// ============================================================================
// URL command
// ============================================================================

#[derive(Args, Debug)]
pub struct UrlArgs {
    #[command(subcommand)]
    pub command: UrlCommands,
}

#[derive(Subcommand, Debug)]
pub enum UrlCommands {
    /// Look up a URL, starting a live scan if it is not cached
    Scan {
        /// URL to scan
        url: String,
    },

    /// Scan a URL and wait for the verdict
    ScanSync {
        /// URL to scan
        url: String,

        /// Seconds the service may spend on the scan
        #[arg(short, long, default_value = "60")]
        timeout: u64,
    },

    /// Fetch the report of an earlier scan
    Report {
        /// Scan ID returned by a scan
        scan_id: String,
    },
}

// ============================================================================
// Download command
// ============================================================================

#[derive(Args, Debug)]
pub struct DownloadArgs {
    #[command(subcommand)]
    pub command: DownloadCommands,
}

#[derive(Subcommand, Debug)]
pub enum DownloadCommands {
    /// Screenshot of the scanned page
    Screenshot {
        /// Scan ID returned by a scan
        scan_id: String,

        /// Screenshot resolution
        #[arg(short, long, value_enum, default_value_t = ResolutionArg::High)]
        resolution: ResolutionArg,

        /// Directory the file is written to
        #[arg(short = 'd', long)]
        output_dir: Option<String>,
    },

    /// HTML source of the scanned page
    Html {
        /// Scan ID returned by a scan
        scan_id: String,

        /// Directory the file is written to
        #[arg(short = 'd', long)]
        output_dir: Option<String>,
    },

    /// Rendered text of the scanned page
    Text {
        /// Scan ID returned by a scan
        scan_id: String,

        /// Directory the file is written to
        #[arg(short = 'd', long)]
        output_dir: Option<String>,
    },
}

/// Screenshot resolution
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ResolutionArg {
    /// Full resolution
    High,
    /// Reduced resolution
    Medium,
}

impl From<ResolutionArg> for Resolution {
    fn from(arg: ResolutionArg) -> Self {
        match arg {
            ResolutionArg::High => Self::High,
            ResolutionArg::Medium => Self::Medium,
        }
    }
}

// ============================================================================
// Normalize command
// ============================================================================

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// URLs to normalize
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Scheme added to URLs that have none
    #[arg(long, default_value = "http")]
    pub scheme: String,
}

// ============================================================================
// Bulk command
// ============================================================================

#[derive(Args, Debug)]
pub struct BulkArgs {
    /// File with one URL per line
    #[arg(short, long)]
    pub input: String,

    /// Directory the timestamped run directory is created in
    #[arg(short = 'd', long)]
    pub output_dir: Option<String>,

    /// Seconds to wait before each poll round
    #[arg(short, long)]
    pub poll_interval: Option<u64>,

    /// Maximum number of poll rounds
    #[arg(short, long)]
    pub retries: Option<u32>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Show the configuration file path
    Path,
}
