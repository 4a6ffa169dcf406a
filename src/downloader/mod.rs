mod duplicate;
mod fetcher;
mod filename;

use std::env;
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::config::FetcherConfig;
use crate::error::DownloadError;

pub use duplicate::find_duplicate;
pub use fetcher::{UreqFetcher, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use filename::{derive_filename, extension_for};

/// Refuse anything larger than this unless configured otherwise.
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Response headers the downloader cares about plus the unread body.
pub struct Payload {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    body: Box<dyn Read + Send>,
}

impl Payload {
    pub fn new(
        content_type: Option<String>,
        content_length: Option<u64>,
        body: impl Read + Send + 'static,
    ) -> Self {
        Self {
            content_type,
            content_length,
            body: Box::new(body),
        }
    }

    pub fn from_bytes(body: Vec<u8>, content_type: Option<&str>) -> Self {
        Self::new(content_type.map(str::to_string), None, io::Cursor::new(body))
    }

    pub fn with_content_length(mut self, content_length: u64) -> Self {
        self.content_length = Some(content_length);
        self
    }

    /// Reads the body, failing once more than `limit` bytes arrive.
    fn read_body(self, limit: u64) -> Result<Vec<u8>, DownloadError> {
        let mut body = Vec::new();

        self.body
            .take(limit.saturating_add(1))
            .read_to_end(&mut body)
            .map_err(DownloadError::Body)?;

        if body.len() as u64 > limit {
            return Err(DownloadError::TooLarge { limit });
        }

        Ok(body)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum Response {
    Ok(Payload),
    Status { code: u16, reason: String },
    NetworkError(String),
}

impl Response {
    pub fn ok(payload: Payload) -> Self {
        Self::Ok(payload)
    }

    pub fn status(code: u16, reason: impl Into<String>) -> Self {
        Self::Status {
            code,
            reason: reason.into(),
        }
    }

    pub fn network_error(detail: impl ToString) -> Self {
        Self::NetworkError(detail.to_string())
    }
}

/// Performs the single HTTP GET behind a download.
pub trait FileDownloader {
    fn fetch(&self, url: &str) -> Response;
}

pub struct Downloader<T: FileDownloader> {
    fetcher: T,
    path: PathBuf,
    max_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    /// The body was written to `file`.
    Saved,
    /// Identical bytes were already stored as `file`; nothing was written.
    AlreadyExists,
}

#[derive(Debug, PartialEq)]
pub struct Download {
    pub source: String,
    pub file_name: String,
    pub file: PathBuf,
    pub status: DownloadStatus,
    pub content_type: Option<String>,
}

impl Download {
    /// False when the server did not label the body as `image/*`.
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|content_type| content_type.starts_with("image/"))
    }
}

impl fmt::Display for Download {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            DownloadStatus::Saved => write!(f, "Successfully fetched: {}", self.file_name),
            DownloadStatus::AlreadyExists => {
                write!(f, "Image already exists as {}", self.file_name)
            }
        }
    }
}

/// Outcome handed to the user-facing layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    Success(String),
    Failure(String),
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Failure(message) => message,
        }
    }
}

impl From<Result<Download, DownloadError>> for FetchResult {
    fn from(result: Result<Download, DownloadError>) -> Self {
        match result {
            Ok(download) => Self::Success(download.to_string()),
            Err(err) => Self::Failure(err.to_string()),
        }
    }
}

impl<T> Downloader<T>
where
    T: FileDownloader,
{
    pub fn with_fetcher(path: impl AsRef<Path>, fetcher: T) -> io::Result<Self> {
        let path = Self::create_path(path.as_ref())?;

        Ok(Downloader {
            fetcher,
            path,
            max_bytes: DEFAULT_MAX_BYTES,
        })
    }

    pub fn max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.path
    }

    /// Fetches `url` and stores the body unless identical bytes are already
    /// in the target directory.
    pub fn download(&self, url: &str) -> Result<Download, DownloadError> {
        let parsed = Url::parse(url).map_err(|source| DownloadError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        tracing::info!("connecting to {}", parsed.host_str().unwrap_or_default());

        let payload = match self.fetcher.fetch(parsed.as_str()) {
            Response::Ok(payload) => payload,
            Response::Status { code, reason } => {
                return Err(DownloadError::Status {
                    code,
                    reason,
                    url: parsed.to_string(),
                })
            }
            Response::NetworkError(detail) => return Err(DownloadError::Network(detail)),
        };

        let content_type = payload.content_type.clone();
        if !content_type
            .as_deref()
            .is_some_and(|content_type| content_type.starts_with("image/"))
        {
            tracing::debug!(
                "{} is served as {:?}, not a standard image type",
                url,
                content_type
            );
        }

        if payload
            .content_length
            .is_some_and(|length| length > self.max_bytes)
        {
            return Err(DownloadError::TooLarge {
                limit: self.max_bytes,
            });
        }

        let body = payload.read_body(self.max_bytes)?;

        if let Some(existing) = find_duplicate(&body, &self.path)? {
            return Ok(Download {
                source: url.to_string(),
                file: self.path.join(&existing),
                file_name: existing,
                status: DownloadStatus::AlreadyExists,
                content_type,
            });
        }

        let file_name = derive_filename(url, content_type.as_deref());
        let file = self.path.join(&file_name);

        fs::write(&file, &body)?;
        tracing::info!("saved {} bytes to {}", body.len(), file.display());

        Ok(Download {
            source: url.to_string(),
            file_name,
            file,
            status: DownloadStatus::Saved,
            content_type,
        })
    }

    /// Same as [`Downloader::download`], flattened into a displayable outcome.
    pub fn fetch_image(&self, url: &str) -> FetchResult {
        self.download(url).into()
    }

    fn create_path(path: &Path) -> io::Result<PathBuf> {
        let absolute_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir()?.join(path)
        };

        fs::create_dir_all(&absolute_path)?;

        Ok(absolute_path)
    }
}

impl Downloader<UreqFetcher> {
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        Downloader::with_fetcher(path, UreqFetcher::new())
    }

    pub fn from_config(config: &FetcherConfig) -> io::Result<Self> {
        let fetcher = UreqFetcher::with_settings(
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        );

        Ok(Downloader::with_fetcher(&config.directory, fetcher)?.max_bytes(config.max_bytes))
    }
}

#[cfg(test)]
use fetcher::MockFetcher;
