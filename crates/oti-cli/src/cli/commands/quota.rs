//! `otictl quota` - API quota usage.

use anyhow::Result;
use colored::Colorize;
use oti::QuotaStatus;
use std::collections::BTreeMap;

use super::Context;
use crate::output::render;

pub async fn execute(ctx: Context) -> Result<()> {
    let client = ctx.client()?;
    let status = client.quota().status().await?;

    render(ctx.output_format, &status, print_quota)
}

fn print_quota(status: &QuotaStatus) {
    let details = &status.quota_details;

    println!("{}", "API Quota:".bold());
    println!();
    println!("  {} {}", "Licensed:".bold(), details.licensed_quota);
    println!("  {} {}", "Remaining:".bold(), details.remaining_quota.to_string().cyan());

    if let Some(expiry) = details.expiry_date {
        let expiry = expiry.format("%Y-%m-%d").to_string();
        if details.is_expired {
            println!("  {} {} {}", "Expires:".bold(), expiry, "(expired)".red().bold());
        } else {
            println!("  {} {}", "Expires:".bold(), expiry);
        }
    }

    print_breakdown("Consumed per API:", &details.consumed_api_detail);
    print_breakdown("Points consumed:", &details.consumed_points_detail);
    print_breakdown("Points per call:", &details.points_consumption_rate);

    if let Some(note) = &details.note {
        println!();
        println!("{}", note.dimmed());
    }
}

fn print_breakdown(title: &str, values: &BTreeMap<String, i64>) {
    if values.is_empty() {
        return;
    }
    println!();
    println!("{}", title.bold());
    for (api, value) in values {
        println!("  {api:24} {value}");
    }
}
