//! Output formatting for different formats.

mod progress;

pub use progress::BulkProgress;

use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use oti::{ThreatData, Verdict};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored key/value lines
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {s}\n\
                 Valid formats: pretty, json, yaml"
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Print `value` as JSON or YAML, or hand it to `pretty`.
pub fn render<T: Serialize>(format: OutputFormat, value: &T, pretty: impl FnOnce(&T)) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
        OutputFormat::Pretty => pretty(value),
    }
    Ok(())
}

/// A verdict colored by severity.
pub fn verdict_colored(verdict: Verdict) -> ColoredString {
    let text = verdict.to_string();
    match verdict {
        Verdict::Malicious => text.red().bold(),
        Verdict::Suspicious => text.yellow().bold(),
        Verdict::Benign => text.green(),
        Verdict::Redirector => text.cyan(),
        Verdict::Unknown => text.dimmed(),
    }
}

/// Print the fields of a `threatData` block, indented.
pub fn print_threat(threat: &ThreatData) {
    println!("  {} {}", "Verdict:".bold(), verdict_colored(threat.verdict));
    let fields = [
        ("Status:", &threat.threat_status),
        ("Name:", &threat.threat_name),
        ("Type:", &threat.threat_type),
        ("First seen:", &threat.first_seen),
        ("Last seen:", &threat.last_seen),
    ];
    for (label, value) in fields {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty() && *v != "N/A") {
            println!("  {} {}", label.bold(), value);
        }
    }
}
