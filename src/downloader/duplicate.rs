//! Content-based duplicate detection over the target directory.

use std::fs;
use std::io;
use std::path::Path;

use md5::{Digest, Md5};

/// Looks for a regular file in `directory` whose bytes match `content`.
///
/// Returns the name of the first matching file in directory-listing order.
/// The directory is rescanned on every call. A missing directory has no
/// duplicates; entries that cannot be inspected or read are skipped.
pub fn find_duplicate(content: &[u8], directory: &Path) -> io::Result<Option<String>> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };

    let fingerprint = Md5::digest(content);

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!("skipping unreadable entry in {}: {}", directory.display(), err);
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let existing = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!("skipping {}: {}", path.display(), err);
                continue;
            }
        };

        if Md5::digest(&existing) == fingerprint {
            let name = entry.file_name().to_string_lossy().into_owned();
            tracing::debug!("content matches existing file {}", name);
            return Ok(Some(name));
        }
    }

    Ok(None)
}
