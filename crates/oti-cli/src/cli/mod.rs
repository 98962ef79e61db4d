//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::load()?;

    // Flag or env first, then the config file
    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);
    let base_url = cli
        .base_url
        .or_else(|| config.base_url.clone())
        .unwrap_or_else(|| oti::DEFAULT_BASE_URL.to_string());

    // Create context for commands
    let ctx = commands::Context {
        api_key: cli.api_key,
        base_url,
        output_format,
        config,
        verbose: cli.verbose,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Host(args) => commands::host::execute(ctx, args).await,
        Commands::Url(args) => commands::url::execute(ctx, args).await,
        Commands::Download(args) => commands::download::execute(ctx, args).await,
        Commands::Quota => commands::quota::execute(ctx).await,
        Commands::Normalize(args) => commands::normalize::execute(&ctx, &args),
        Commands::Bulk(args) => commands::bulk::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(&ctx, &args),
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
