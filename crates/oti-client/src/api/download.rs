//! Forensics download API endpoints.

use crate::OtiClient;
use oti_core::{Artifact, HtmlData, Operation, Resolution, Result, ScreenshotData, TextData};
use serde::Deserialize;

/// Forensics download API endpoints
pub struct DownloadApi<'a> {
    client: &'a OtiClient,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScreenshotResponse {
    sc_data: ScreenshotData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HtmlResponse {
    html_data: HtmlData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextResponse {
    text_data: TextData,
}

impl<'a> DownloadApi<'a> {
    pub(crate) const fn new(client: &'a OtiClient) -> Self {
        Self { client }
    }

    /// Download the screenshot taken during a scan
    pub async fn screenshot(&self, scan_id: &str, resolution: Resolution) -> Result<Artifact> {
        let resolution = resolution.to_string();
        let response: ScreenshotResponse = self
            .client
            .call(
                Operation::DownloadScreenshot,
                &[("scanid", scan_id), ("resolution", resolution.as_str())],
            )
            .await?;
        Ok(response.sc_data.into())
    }

    /// Download the page source captured during a scan
    pub async fn html(&self, scan_id: &str) -> Result<Artifact> {
        let response: HtmlResponse = self
            .client
            .call(Operation::DownloadHtml, &[("scanid", scan_id)])
            .await?;
        Ok(response.html_data.into())
    }

    /// Download the rendered text captured during a scan
    pub async fn text(&self, scan_id: &str) -> Result<Artifact> {
        let response: TextResponse = self
            .client
            .call(Operation::DownloadText, &[("scanid", scan_id)])
            .await?;
        Ok(response.text_data.into())
    }
}
