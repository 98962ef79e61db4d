//! `otictl config` - Inspect the configuration.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::{render, OutputFormat};

/// Settings in effect after flags, environment and the config file are merged
#[derive(Serialize)]
struct Effective {
    config_file: PathBuf,
    api_key_set: bool,
    base_url: String,
    output_format: OutputFormat,
    poll_interval_secs: u64,
    retries: u32,
    output_dir: PathBuf,
}

pub fn execute(ctx: &Context, args: &ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show(ctx),
        ConfigCommands::Path => {
            println!("{}", Config::path()?.display());
            Ok(())
        }
    }
}

fn show(ctx: &Context) -> Result<()> {
    let effective = Effective {
        config_file: Config::path()?,
        api_key_set: ctx.require_api_key().is_ok(),
        base_url: ctx.base_url.clone(),
        output_format: ctx.output_format,
        poll_interval_secs: ctx
            .config
            .poll_interval
            .unwrap_or(oti::bulk::DEFAULT_POLL_INTERVAL.as_secs()),
        retries: ctx.config.retries.unwrap_or(oti::bulk::DEFAULT_RETRIES),
        output_dir: ctx.config.output_dir(None)?,
    };

    render(ctx.output_format, &effective, |e| {
        println!("{}", "Configuration:".bold());
        println!();
        println!("  {:16} {}", "Config file:".bold(), e.config_file.display());
        let key = if e.api_key_set {
            "set".green()
        } else {
            "not set".yellow()
        };
        println!("  {:16} {}", "API key:".bold(), key);
        println!("  {:16} {}", "Base URL:".bold(), e.base_url.cyan());
        println!("  {:16} {}", "Output format:".bold(), e.output_format);
        println!("  {:16} {}s", "Poll interval:".bold(), e.poll_interval_secs);
        println!("  {:16} {}", "Retries:".bold(), e.retries);
        println!("  {:16} {}", "Output dir:".bold(), e.output_dir.display());
    })
}
