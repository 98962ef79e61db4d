//! `otictl bulk` - Bulk URL scanning.

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use oti::bulk::{BatchResult, BatchState, BulkScanConfig, BulkScanner};
use serde::Serialize;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::Context;
use crate::cli::args::BulkArgs;
use crate::output::{render, BulkProgress, OutputFormat};

/// Machine-readable summary of a bulk run
#[derive(Serialize)]
struct Summary<'a> {
    state: String,
    interrupted: bool,
    input: Option<&'a PathBuf>,
    output: Option<&'a PathBuf>,
    pending: u64,
    counters: &'a oti::bulk::BatchCounters,
    responses: &'a [serde_json::Value],
    finished_at: String,
}

pub async fn execute(ctx: Context, args: BulkArgs) -> Result<()> {
    let client = ctx.client()?;

    let config = BulkScanConfig::default()
        .poll_interval(Duration::from_secs(
            args.poll_interval
                .or(ctx.config.poll_interval)
                .unwrap_or(oti::bulk::DEFAULT_POLL_INTERVAL.as_secs()),
        ))
        .retries(
            args.retries
                .or(ctx.config.retries)
                .unwrap_or(oti::bulk::DEFAULT_RETRIES),
        );

    let input = PathBuf::from(shellexpand::full(&args.input)?.as_ref());
    let output_dir = ctx.config.output_dir(args.output_dir.as_deref())?;

    info!(
        input = %input.display(),
        output = %output_dir.display(),
        interval = ?config.poll_interval,
        retries = config.retries,
        "starting bulk scan"
    );

    let progress = Arc::new(BulkProgress::new(ctx.output_format != OutputFormat::Pretty));
    let scanner = BulkScanner::new(client, config).with_progress(progress);

    let result = scanner
        .run_file_until(&input, &output_dir, interrupted(tokio::signal::ctrl_c()))
        .await;

    if let BatchState::Failed(reason) = &result.state {
        anyhow::bail!("{reason}");
    }

    let summary = Summary {
        state: result.state.to_string(),
        interrupted: result.interrupted,
        input: result.input.as_ref(),
        output: result.run_dir.as_ref(),
        pending: result.pending(),
        counters: &result.counters,
        responses: &result.responses,
        finished_at: Utc::now().to_rfc3339(),
    };
    render(ctx.output_format, &summary, |_| print_result(&result))
}

/// Resolves when `signal` fires. If the handler cannot be installed the run
/// is never interrupted.
async fn interrupted(signal: impl Future<Output = io::Result<()>>) {
    if let Err(e) = signal.await {
        warn!(error = %e, "cannot listen for Ctrl-C; the scan cannot be interrupted");
        std::future::pending::<()>().await;
    }
}

fn print_result(result: &BatchResult) {
    let title = if result.interrupted {
        "Bulk Scan Interrupted".yellow().bold()
    } else {
        "Bulk Scan Completed".bold()
    };
    println!("{title}");
    println!();

    if let Some(input) = &result.input {
        println!("  {} {}", "Input:".bold(), input.display());
    }
    if let Some(dir) = &result.run_dir {
        println!("  {} {}", "Output:".bold(), dir.display().to_string().cyan());
    }

    let lookup = result.counters.lookup;
    println!();
    println!("{}", "Cache lookup:".bold().underline());
    println!("  {:28} {}", "URLs submitted", lookup.total);
    println!("  {:28} {}", "Malicious (from cache)", lookup.malicious.to_string().red());
    println!("  {:28} {}", "Benign (from cache)", lookup.benign.to_string().green());
    println!("  {:28} {}", "Invalid", lookup.invalid);
    println!("  {:28} {}", "Submitted for live scan", lookup.submitted_for_scan);
    println!("  {:28} {}", "API errors", lookup.errors);

    if let Some(scan) = result.counters.scan {
        println!();
        println!("{}", "Live scans:".bold().underline());
        println!("  {:28} {}", "URLs scanned", scan.total);
        println!("  {:28} {}", "Completed", scan.completed);
        println!("  {:28} {}", "Malicious", scan.malicious.to_string().red());
        println!("  {:28} {}", "Benign", scan.benign.to_string().green());
        println!("  {:28} {}", "Scan errors", scan.errors);
        println!("  {:28} {}", "Still pending", scan.pending);
    }

    if result.pending() > 0 {
        println!();
        println!(
            "{} {} URL(s) were still being scanned when polling stopped.",
            "Warning:".yellow().bold(),
            result.pending()
        );
        println!("Look them up later with: {} url scan <URL>", "otictl".cyan());
    }

    if result.state == BatchState::Quota {
        println!();
        println!(
            "{} You have reached the maximum allowed API quota; results are partial.",
            "Quota:".red().bold()
        );
    }
}
