//! Storage filename derivation.
//!
//! Uses the last URL path segment when it looks like a filename, otherwise
//! synthesizes `downloaded_image_<fingerprint>.<ext>` from the URL and the
//! response `Content-Type`.

use md5::{Digest, Md5};

const DEFAULT_EXTENSION: &str = "jpg";

/// Hex characters of the URL fingerprint kept in synthesized names.
const FINGERPRINT_LEN: usize = 8;

/// Derives the filename an image fetched from `url` is stored under.
///
/// # Examples
///
/// - `derive_filename("https://example.com/photos/cat.png", None)` → `"cat.png"`
/// - `derive_filename("https://example.com/avatar", Some("image/png"))` → `"downloaded_image_<8 hex>.png"`
pub fn derive_filename(url: &str, content_type: Option<&str>) -> String {
    let segment = last_path_segment(url);

    if segment.contains('.') && segment != "." && segment != ".." {
        return segment.to_string();
    }

    let extension = content_type
        .and_then(extension_for)
        .unwrap_or(DEFAULT_EXTENSION);

    format!("downloaded_image_{}.{}", url_fingerprint(url), extension)
}

/// Maps an image media type to the extension used for synthesized names.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        _ => None,
    }
}

// Works on the raw text so the name keeps the exact bytes the user typed;
// `Url::path` would percent-encode spaces and non-ASCII characters.
fn last_path_segment(url: &str) -> &str {
    let without_fragment = url.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();

    let path = match without_query.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |start| &rest[start..]),
        None => without_query,
    };

    let segment = path.rsplit('/').next().unwrap_or_default();
    segment.split(';').next().unwrap_or_default()
}

fn url_fingerprint(url: &str) -> String {
    let digest = hex::encode(Md5::digest(url.as_bytes()));
    digest[..FINGERPRINT_LEN].to_string()
}
