//! API endpoint modules.

mod download;
mod host;
mod quota;
mod url;

pub use download::DownloadApi;
pub use host::HostApi;
pub use quota::QuotaApi;
pub use url::UrlApi;
