//! `otictl download` - Scan forensics.

use anyhow::{Context as _, Result};
use base64::Engine;
use colored::Colorize;
use oti::Artifact;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::Context;
use crate::cli::args::{DownloadArgs, DownloadCommands};
use crate::output::render;

#[derive(Serialize)]
struct Saved {
    scan_id: String,
    name: String,
    content_type: String,
    path: PathBuf,
    bytes: usize,
}

pub async fn execute(ctx: Context, args: DownloadArgs) -> Result<()> {
    let client = ctx.client()?;

    let (scan_id, output_dir, artifact) = match args.command {
        DownloadCommands::Screenshot {
            scan_id,
            resolution,
            output_dir,
        } => {
            let artifact = client
                .download()
                .screenshot(&scan_id, resolution.into())
                .await?;
            (scan_id, output_dir, artifact)
        }
        DownloadCommands::Html {
            scan_id,
            output_dir,
        } => {
            let artifact = client.download().html(&scan_id).await?;
            (scan_id, output_dir, artifact)
        }
        DownloadCommands::Text {
            scan_id,
            output_dir,
        } => {
            let artifact = client.download().text(&scan_id).await?;
            (scan_id, output_dir, artifact)
        }
    };

    let dir = ctx.config.output_dir(output_dir.as_deref())?;
    let saved = save(&dir, &scan_id, &artifact)?;

    render(ctx.output_format, &saved, |saved| {
        println!(
            "{} {} saved as {}",
            "Saved:".green().bold(),
            saved.name,
            saved.path.display().to_string().cyan()
        );
        println!("{}", format!("{} bytes", saved.bytes).dimmed());
    })
}

/// Decode an artifact and write it under `dir`
fn save(dir: &Path, scan_id: &str, artifact: &Artifact) -> Result<Saved> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(artifact.base64.trim())
        .context("artifact is not valid base64")?;

    let path = dir.join(file_name(scan_id, artifact));
    std::fs::write(&path, &bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(Saved {
        scan_id: scan_id.to_string(),
        name: artifact.name.clone(),
        content_type: artifact.content_type.clone(),
        path,
        bytes: bytes.len(),
    })
}

/// `<scan id>_<name>.<ext>`, keeping only file-name safe characters
fn file_name(scan_id: &str, artifact: &Artifact) -> String {
    let extension = match artifact.content_type.to_ascii_lowercase().as_str() {
        "jpeg" | "jpg" | "image/jpeg" => "jpeg",
        "html" | "text/html" => "html",
        _ => "txt",
    };
    let stem: String = format!("{scan_id}_{}", artifact.name)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{stem}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(name: &str, content_type: &str, base64: &str) -> Artifact {
        Artifact {
            name: name.to_string(),
            content_type: content_type.to_string(),
            base64: base64.to_string(),
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            file_name("abc-123", &artifact("Webpage-screenshot", "jpeg", "")),
            "abc-123_Webpage-screenshot.jpeg"
        );
        assert_eq!(
            file_name("abc", &artifact("Webpage html", "html", "")),
            "abc_Webpage_html.html"
        );
        assert_eq!(
            file_name("../x", &artifact("Webpage-text", "text", "")),
            "___x_Webpage-text.txt"
        );
    }

    #[test]
    fn test_save_decodes_base64() {
        let dir = tempfile::tempdir().unwrap();
        let saved = save(dir.path(), "scan", &artifact("page", "text", "dGVzdCBkYXRh")).unwrap();
        assert_eq!(saved.bytes, 9);
        assert_eq!(std::fs::read_to_string(saved.path).unwrap(), "test data");
    }

    #[test]
    fn test_save_rejects_bad_base64() {
        let dir = tempfile::tempdir().unwrap();
        assert!(save(dir.path(), "scan", &artifact("page", "text", "not base64!")).is_err());
    }

    #[test]
    fn test_save_reports_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(save(&missing, "scan", &artifact("page", "text", "dGVzdA==")).is_err());
    }
}
