use std::io;

use thiserror::Error;

const MIB: u64 = 1024 * 1024;

/// Every way a single download attempt can fail. The `Display` text is what
/// the caller shows to the user.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Connection error: invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Connection error: {0}")]
    Network(String),

    #[error("Connection error: HTTP {code} {reason} for url: {url}")]
    Status {
        code: u16,
        reason: String,
        url: String,
    },

    #[error("File size exceeds {}MB limit", .limit / MIB)]
    TooLarge { limit: u64 },

    #[error("Connection error: {0}")]
    Body(#[source] io::Error),

    #[error("An error occurred: {0}")]
    Io(#[from] io::Error),
}
