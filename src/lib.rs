pub mod config;
pub mod downloader;
pub mod error;
pub mod logging;

pub use config::FetcherConfig;
pub use downloader::{
    derive_filename, find_duplicate, Download, DownloadStatus, Downloader, FetchResult,
    FileDownloader, Payload, Response, UreqFetcher,
};
pub use error::DownloadError;
