//! `otictl host` - Host reputation and URLs.

use anyhow::Result;
use colored::Colorize;
use oti::{HostReport, HostReputation, HostUrls, UrlData};

use super::Context;
use crate::cli::args::{HostArgs, HostCommands};
use crate::output::{print_threat, render, verdict_colored};

pub async fn execute(ctx: Context, args: HostArgs) -> Result<()> {
    match args.command {
        HostCommands::Reputation { host } => reputation(&ctx, &host).await,
        HostCommands::Urls { host, limit } => urls(&ctx, &host, limit).await,
        HostCommands::Report { host } => report(&ctx, &host).await,
    }
}

async fn reputation(ctx: &Context, host: &str) -> Result<()> {
    let client = ctx.client()?;
    let rep = client.host().reputation(host).await?;

    render(ctx.output_format, &rep, |rep| {
        println!("{} {}", "Host:".bold(), host.cyan().bold());
        print_reputation(rep);
    })
}

async fn urls(ctx: &Context, host: &str, limit: u32) -> Result<()> {
    let client = ctx.client()?;
    let urls = client.host().urls(host, limit).await?;

    render(ctx.output_format, &urls, |urls| print_urls(host, urls))
}

async fn report(ctx: &Context, host: &str) -> Result<()> {
    let client = ctx.client()?;
    let report = client.host().report(host).await?;

    render(ctx.output_format, &report, print_report)
}

fn print_reputation(rep: &HostReputation) {
    match &rep.threat_data {
        Some(threat) => print_threat(threat),
        None => println!("  {}", "No threat data".dimmed()),
    }
}

fn print_urls(host: &str, urls: &HostUrls) {
    println!("{} {}", "URLs seen on".bold(), host.cyan().bold());
    println!();

    if urls.url_data_list.is_empty() {
        println!("  No URLs found.");
        return;
    }
    for data in &urls.url_data_list {
        print_url_line(data);
    }
}

fn print_report(report: &HostReport) {
    println!("{} {}", "Host:".bold(), report.host.cyan().bold());
    print_reputation(&report.reputation);

    if let Some(latest) = &report.latest_url {
        println!();
        println!("{}", "Latest URL:".bold().underline());
        print_url_line(latest);
    }
}

fn print_url_line(data: &UrlData) {
    let verdict = data
        .effective_threat()
        .map_or_else(|| "-".dimmed(), |t| verdict_colored(t.verdict));
    println!(
        "  {} {} {}",
        verdict,
        data.url,
        data.scan_id.as_deref().unwrap_or("").dimmed()
    );
}
