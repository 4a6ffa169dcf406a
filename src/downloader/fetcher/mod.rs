mod ureq_fetcher;

use super::{FileDownloader, Payload, Response};

pub use ureq_fetcher::{UreqFetcher, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

#[cfg(test)]
mod mock_fetcher;

#[cfg(test)]
pub use mock_fetcher::MockFetcher;
