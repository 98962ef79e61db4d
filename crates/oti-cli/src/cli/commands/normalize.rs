//! `otictl normalize` - Local URL normalization.

use anyhow::Result;
use colored::Colorize;
use oti::bulk::{split_host, UrlNormalizer};
use serde::Serialize;

use super::Context;
use crate::cli::args::NormalizeArgs;
use crate::output::render;

#[derive(Serialize)]
struct Normalized {
    input: String,
    normalized: Option<String>,
    host: Option<String>,
}

pub fn execute(ctx: &Context, args: &NormalizeArgs) -> Result<()> {
    let normalizer = UrlNormalizer::default();

    let results: Vec<Normalized> = args
        .urls
        .iter()
        .map(|input| {
            let normalized = normalizer.normalize(input, &args.scheme);
            let host = normalized
                .as_deref()
                .and_then(split_host)
                .map(|split| split.host);
            Normalized {
                input: input.clone(),
                normalized,
                host,
            }
        })
        .collect();

    render(ctx.output_format, &results, |results| {
        for result in results {
            match &result.normalized {
                Some(url) => println!("{url}"),
                None => println!("{} {}", "invalid:".red().bold(), result.input),
            }
        }
    })?;

    if results.iter().all(|r| r.normalized.is_none()) {
        anyhow::bail!("no valid URL given");
    }
    Ok(())
}
