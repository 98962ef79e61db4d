//! `otictl url` - URL scans and scan reports.

use anyhow::Result;
use colored::Colorize;
use oti::{UrlData, UrlScanReport, UrlScanStatus};

use super::Context;
use crate::cli::args::{UrlArgs, UrlCommands};
use crate::output::{print_threat, render};

pub async fn execute(ctx: Context, args: UrlArgs) -> Result<()> {
    let client = ctx.client()?;

    let status = match args.command {
        UrlCommands::Scan { url } => client.url().scan(&url).await?,
        UrlCommands::ScanSync { url, timeout } => client.url().scan_sync(&url, timeout).await?,
        UrlCommands::Report { scan_id } => client.url().report(&scan_id).await?,
    };

    render(ctx.output_format, status.report(), |report| {
        print_status(&status, report);
    })
}

fn print_status(status: &UrlScanStatus, report: &UrlScanReport) {
    if let Some(normalized) = report
        .normalize_data
        .as_ref()
        .filter(|n| n.normalize_status != 0)
    {
        println!("{} {}", "Note:".yellow().bold(), normalized.normalize_message);
    }

    if let Some(data) = &report.url_data {
        print_url_data(data);
    }

    if let Some(swl) = report.swl_data.as_ref().filter(|s| s.swl_status == 1) {
        println!(
            "  {} {}",
            "Allow-listed:".bold(),
            swl.swl_message.as_deref().unwrap_or("yes")
        );
    }

    if status.is_pending() {
        println!();
        println!("{}", "Live scan in progress.".yellow().bold());
        if let Some(scan_id) = status.scan_id() {
            println!("Check the result with: {} url report {}", "otictl".cyan(), scan_id);
        }
    }
}

fn print_url_data(data: &UrlData) {
    println!("{} {}", "URL:".bold(), data.url.cyan().bold());
    if let Some(scan_id) = &data.scan_id {
        println!("  {} {}", "Scan ID:".bold(), scan_id);
    }
    if let Some(threat) = &data.threat_data {
        print_threat(threat);
    }

    if let Some(landing) = &data.landing_url {
        println!();
        println!("{} {}", "Landing URL:".bold(), landing.url.cyan());
        if let Some(threat) = &landing.threat_data {
            print_threat(threat);
        }
    }
}
