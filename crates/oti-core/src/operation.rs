/// Remote operations exposed by the OTI API.
///
/// Every operation is a form-encoded POST to `{base_url}/oti/v1/{path}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `host/reputation`
    HostReputation,
    /// `host/report` (paged list of URLs seen on a host)
    HostReport,
    /// `url/scan` (cache-or-scan, also used to fetch a report by scan ID)
    UrlScan,
    /// `url/scansync` (blocks server-side until the scan finishes)
    UrlScanSync,
    /// `download/screenshot`
    DownloadScreenshot,
    /// `download/html`
    DownloadHtml,
    /// `download/text`
    DownloadText,
    /// `quota/status`
    ApiQuota,
}

impl Operation {
    /// Path of the operation relative to the API base URL
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::HostReputation => "/oti/v1/host/reputation",
            Self::HostReport => "/oti/v1/host/report",
            Self::UrlScan => "/oti/v1/url/scan",
            Self::UrlScanSync => "/oti/v1/url/scansync",
            Self::DownloadScreenshot => "/oti/v1/download/screenshot",
            Self::DownloadHtml => "/oti/v1/download/html",
            Self::DownloadText => "/oti/v1/download/text",
            Self::ApiQuota => "/oti/v1/quota/status",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path().trim_start_matches("/oti/v1/"))
    }
}
