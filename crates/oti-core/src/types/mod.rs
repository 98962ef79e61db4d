mod common;
mod download;
mod host;
mod quota;
mod url;

pub use common::*;
pub use download::*;
pub use host::*;
pub use quota::*;
pub use url::*;
